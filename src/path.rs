//! Timing paths and the hops they traverse.

use compact_str::CompactString;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Top-level leaf cells are named by instance number, e.g. `U1234`.
    static ref LEAF_CELL: Regex = Regex::new(r"^U\d+")
        .expect("failed to compile leaf cell regex");
}

/// One traversal of a named instance along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Top-level instance or module name.
    pub name: CompactString,
    /// Sum of all attributed cell delays, in ns.
    pub cumulative_delay: f64,
    /// Number of attributed cell lines.
    pub cell_count: usize,
    /// `(label, delay)` of each attributed line, in report order.
    pub raw_cells: Vec<(CompactString, f64)>,
    /// First port seen through a port-transition marker.
    pub in_port: CompactString,
    /// Latest port seen after `in_port`. Empty if there was none.
    pub out_port: CompactString,
}

impl Module {
    /// Create an empty hop.
    #[inline]
    pub fn new(name: impl Into<CompactString>) -> Module {
        Module {
            name: name.into(),
            cumulative_delay: 0.0,
            cell_count: 0,
            raw_cells: Vec::new(),
            in_port: CompactString::default(),
            out_port: CompactString::default(),
        }
    }

    /// Attribute one cell line to this hop.
    pub fn add_cell(&mut self, label: impl Into<CompactString>, delay: f64) {
        self.cumulative_delay += delay;
        self.cell_count += 1;
        self.raw_cells.push((label.into(), delay));
    }

    /// Record a port transition. The first one is the input port;
    /// every later one overwrites the output port.
    pub fn observe_port(&mut self, port: &str) {
        if self.in_port.is_empty() {
            self.in_port = port.into();
        }
        else {
            self.out_port = port.into();
        }
    }

    /// Whether this hop is a primitive cell rather than a named
    /// hierarchical module.
    #[inline]
    pub fn is_leaf_cell(&self) -> bool {
        LEAF_CELL.is_match(&self.name)
    }

    /// The summary row shown in the path table.
    pub fn summary(&self) -> HopSummary<'_> {
        HopSummary {
            name: &self.name,
            in_port: &self.in_port,
            out_port: if self.in_port.is_empty() {
                String::new()
            }
            else {
                format!("-> {}", self.out_port)
            },
            delay: self.cumulative_delay,
            cells: self.cell_count,
        }
    }
}

/// A row of the per-hop breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct HopSummary<'m> {
    pub name: &'m str,
    pub in_port: &'m str,
    /// `-> <out_port>`, or empty when no input port was seen.
    pub out_port: String,
    pub delay: f64,
    pub cells: usize,
}

/// One timing arc from a startpoint to an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub startpoint: CompactString,
    pub endpoint: CompactString,
    /// Hops in traversal order.
    pub modules: Vec<Module>,
    /// Reported data arrival time in ns; negative until the
    /// path is complete.
    pub total_delay: f64,
    /// Sum of `cell_count` over `modules`.
    pub total_cells: usize,
}

impl Path {
    /// Open a path whose hops and total are still unknown.
    pub fn new(
        startpoint: impl Into<CompactString>,
        endpoint: impl Into<CompactString>
    ) -> Path {
        Path {
            startpoint: startpoint.into(),
            endpoint: endpoint.into(),
            modules: Vec::new(),
            total_delay: -1.0,
            total_cells: 0,
        }
    }

    /// Append a closed hop.
    pub fn push_module(&mut self, module: Module) {
        self.total_cells += module.cell_count;
        self.modules.push(module);
    }

    /// Append the final hop and set the reported total.
    pub fn finish(&mut self, last: Module, total_delay: f64) {
        self.push_module(last);
        self.total_delay = total_delay;
    }

    /// Whether the endpoint, at least one hop, and the total have
    /// all been set.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.endpoint.is_empty() && !self.modules.is_empty()
            && self.total_delay >= 0.0
    }

    /// Sum of hop delays. Usually a little below `total_delay`
    /// since clock lines are not attributed to any hop.
    pub fn hop_delay(&self) -> f64 {
        self.modules.iter().map(|m| m.cumulative_delay).sum()
    }

    /// One summary row per hop.
    pub fn summary_rows(&self) -> Vec<HopSummary<'_>> {
        self.modules.iter().map(Module::summary).collect()
    }

    /// All attributed cell lines across hops, in report order.
    pub fn raw_cells(&self) -> impl Iterator<Item = &(CompactString, f64)> {
        self.modules.iter().flat_map(|m| m.raw_cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cells_accumulate() {
        let mut m = Module::new("u_alu");
        m.add_cell("u_alu/U1/Y (INVX1)", 0.05);
        m.add_cell("u_alu/U2/Y (NAND2X1)", 0.12);
        assert_eq!(m.cell_count, 2);
        assert_eq!(m.cell_count, m.raw_cells.len());
        assert_relative_eq!(m.cumulative_delay, 0.17, epsilon = 1e-9);
    }

    #[test]
    fn out_port_last_wins() {
        let mut m = Module::new("u_alu");
        m.observe_port("a");
        assert_eq!(m.in_port, "a");
        assert_eq!(m.out_port, "");
        m.observe_port("y");
        m.observe_port("z");
        assert_eq!(m.in_port, "a");
        assert_eq!(m.out_port, "z");
        assert_eq!(m.summary().out_port, "-> z");
    }

    #[test]
    fn leaf_cells() {
        assert!(Module::new("U1234").is_leaf_cell());
        assert!(!Module::new("u_alu").is_leaf_cell());
        assert!(!Module::new("Uart").is_leaf_cell());
    }

    #[test]
    fn path_totals() {
        let mut p = Path::new("reg_a", "reg_b");
        assert!(!p.is_complete());
        let mut a = Module::new("reg_a");
        a.add_cell("reg_a/Q (DFFRX1)", 0.30);
        let mut b = Module::new("U7");
        b.add_cell("U7/Y (INVX1)", 0.10);
        b.add_cell("U8/Y (INVX1)", 0.10);
        p.push_module(a);
        p.finish(b, 0.55);
        assert!(p.is_complete());
        assert_eq!(p.total_cells, 3);
        assert_relative_eq!(p.hop_delay(), 0.50, epsilon = 1e-9);
        assert_eq!(p.raw_cells().count(), 3);
        let rows = p.summary_rows();
        assert_eq!(rows[1].name, "U7");
        assert_eq!(rows[1].out_port, "");
    }
}
