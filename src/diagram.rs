//! Proportional box-drawing diagram of a path.
//!
//! Each hop is drawn as a box whose width follows its delay:
//!
//! ```text
//! ┏━━━━━━━━━━━━━━━┳━━━━━━━┳━━━━━━━━━━━━━━━━━━━━━━━━━┓
//! ┃     reg_a     ┃ u_alu ┃╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍╍┃
//! ┗━━━━━━━━━━━━━━━┻━━━━━━━┻━━━━━━━━━━━━━━━━━━━━━━━━━┛
//! ```

use crate::config::{ RenderConfig, scaled };
use crate::path::{ Module, Path };
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref GENBLK: Regex = Regex::new(r"genblk\d+_")
        .expect("failed to compile genblk regex");
    static ref MODULE_SUFFIX: Regex = Regex::new(r"_module$")
        .expect("failed to compile module suffix regex");
}

/// Fill for leaf-cell boxes.
pub const LEAF_FILL: char = '╍';
/// Horizontal rule.
pub const RULE: char = '━';
/// Right edge of a named module box.
pub const EDGE_OPEN: char = '┃';
/// Right edge of a leaf-cell box.
pub const EDGE_CLOSED: char = '┫';

/// Inner width of a hop's box: `round(box_scale * delay) - 2`,
/// clamped at zero.
#[inline]
pub fn box_width(delay: f64, cfg: &RenderConfig) -> usize {
    scaled(delay, cfg.box_scale).saturating_sub(2)
}

/// The name shown inside a box, before truncation.
pub fn display_name(name: &str) -> String {
    let name = GENBLK.replace_all(name, "");
    MODULE_SUFFIX.replace(&name, "").into_owned()
}

/// Body of one label cell, without its right edge.
fn label_cell(module: &Module, width: usize) -> String {
    if module.is_leaf_cell() {
        return std::iter::repeat(LEAF_FILL).take(width).collect();
    }
    let name: String = display_name(&module.name).chars().take(width).collect();
    let len = name.chars().count();
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), name, " ".repeat(right))
}

/// The three rows of the diagram: top border, labels, bottom border.
pub fn render_rows(path: &Path, cfg: &RenderConfig) -> [String; 3] {
    let widths: Vec<usize> = path.modules.iter()
        .map(|m| box_width(m.cumulative_delay, cfg))
        .collect();
    let border = |start: char, joint: char, end: char| {
        let mut row = String::new();
        row.push(start);
        for (i, &w) in widths.iter().enumerate() {
            if i > 0 {
                row.push(joint);
            }
            row.extend(std::iter::repeat(RULE).take(w));
        }
        row.push(end);
        row
    };
    let mut mid = String::new();
    mid.push('┃');
    for (i, (m, &w)) in path.modules.iter().zip(widths.iter()).enumerate() {
        mid.push_str(&label_cell(m, w));
        mid.push(match (i + 1 == widths.len(), m.is_leaf_cell()) {
            (true, _) => '┃',
            (false, true) => EDGE_CLOSED,
            (false, false) => EDGE_OPEN,
        });
    }
    if path.modules.is_empty() {
        mid.push('┃');
    }
    [border('┏', '┳', '┓'), mid, border('┗', '┻', '┛')]
}

/// The diagram as a single string, rows separated by newlines.
pub fn render_diagram(path: &Path, cfg: &RenderConfig) -> String {
    render_rows(path, cfg).join("\n")
}
