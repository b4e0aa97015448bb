//! Tabular path breakdowns.

use crate::config::{ RenderConfig, scaled };
use crate::path::Path;
use itertools::Itertools;

/// Marker repeated to draw a delay bar.
pub const BAR: char = '*';

const HEADER: [&str; 5] = ["MODULE", "IN PORT", "OUT PORT", "DELAY", "CELLS"];

/// Lay out rows as plain columns separated by two spaces.
///
/// Columns flagged in `right` are right-aligned. Each output line
/// starts with `indent` and has trailing whitespace removed.
fn layout(rows: &[Vec<String>], right: &[bool], indent: &str) -> String {
    let ncols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols).map(|c| {
        rows.iter()
            .filter_map(|r| r.get(c))
            .map(|s| s.chars().count())
            .max().unwrap_or(0)
    }).collect();
    rows.iter().map(|row| {
        let line = row.iter().enumerate().map(|(c, s)| {
            if right.get(c).copied().unwrap_or(false) {
                format!("{:>w$}", s, w = widths[c])
            }
            else {
                format!("{:<w$}", s, w = widths[c])
            }
        }).join("  ");
        format!("{}{}", indent, line).trim_end().to_string()
    }).join("\n")
}

/// Per-hop table with a `TOTAL` footer.
///
/// With `bars`, each hop row ends in a bar of
/// `round(bar_scale * delay)` markers.
pub fn render_table(path: &Path, cfg: &RenderConfig, bars: bool) -> String {
    let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect_vec()];
    for hop in path.summary_rows() {
        let mut row = vec![
            hop.name.chars().take(cfg.name_limit).collect(),
            hop.in_port.to_string(),
            hop.out_port,
            format!("{:.2}", hop.delay),
            hop.cells.to_string(),
        ];
        if bars {
            row.push(std::iter::repeat(BAR)
                     .take(scaled(hop.delay, cfg.bar_scale))
                     .collect());
        }
        rows.push(row);
    }
    rows.push(vec![
        "TOTAL".to_string(), String::new(), String::new(),
        format!("{:.2} ns", path.total_delay),
        path.total_cells.to_string(),
    ]);
    layout(&rows, &[false, false, false, true, true], "  ")
}

/// Every attributed cell line with its delay, and a `TOTAL` footer.
pub fn render_table_verbose(path: &Path) -> String {
    let mut rows = path.raw_cells()
        .map(|(label, delay)| vec![label.to_string(), format!("{:.2}", delay)])
        .collect_vec();
    rows.push(vec!["TOTAL".to_string(), format!("{:.2}", path.total_delay)]);
    layout(&rows, &[false, true], "    | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Module;

    fn sample() -> Path {
        let mut p = Path::new("reg_a", "reg_b");
        let mut a = Module::new("reg_a");
        a.add_cell("reg_a/Q (DFFRX1)", 0.30);
        let mut alu = Module::new("u_arithmetic_logic_unit_module");
        alu.observe_port("a");
        alu.add_cell("u_arithmetic_logic_unit_module/a (alu)", 0.0);
        alu.add_cell("u_arithmetic_logic_unit_module/U3/Y (INVX1)", 0.05);
        alu.observe_port("y");
        p.push_module(a);
        p.finish(alu, 0.41);
        p
    }

    #[test]
    fn plain_table() {
        let t = render_table(&sample(), &RenderConfig::default(), true);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  MODULE"));
        assert!(lines[0].ends_with("DELAY  CELLS"));
        assert!(lines[1].starts_with("  reg_a "));
        assert!(lines[1].ends_with("0.30      1  ******"));
        // name cut at 24 characters
        assert!(lines[2].starts_with("  u_arithmetic_logic_unit_  a        -> y"));
        assert!(lines[2].ends_with("*"));
        assert!(lines[3].starts_with("  TOTAL"));
        assert!(lines[3].ends_with("0.41 ns      3"));
    }

    #[test]
    fn plain_table_without_bars() {
        let t = render_table(&sample(), &RenderConfig::default(), false);
        assert!(!t.contains(BAR));
    }

    #[test]
    fn verbose_table() {
        let t = render_table_verbose(&sample());
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.starts_with("    | ")));
        assert!(lines[0].starts_with("    | reg_a/Q (DFFRX1)"));
        assert!(lines[0].ends_with("0.30"));
        assert!(lines[3].starts_with("    | TOTAL"));
        assert!(lines[3].ends_with("0.41"));
    }
}
