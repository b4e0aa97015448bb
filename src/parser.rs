//! The report state machine.
//!
//! Lines are consumed strictly in order. The in-flight path lives
//! inside the [`Stage`] value of the current state, so there is
//! never a half-built path reachable from outside the parser.

use crate::classify::{
    self, LineKind, State,
    classify, module_prefix, strip_clock_suffix
};
use crate::error::{ Result, StaError };
use crate::path::{ Module, Path };
use compact_str::CompactString;
use std::borrow::Cow;
use std::fs::File;
use std::io::{ BufRead, BufReader };

/// Per-state accumulator.
#[derive(Debug)]
enum Stage {
    Startpoint,
    Endpoint {
        startpoint: CompactString,
        /// Hop seeded from the startpoint's top-level name.
        pending: Module,
    },
    FirstHop {
        path: Path,
        pending: Module,
        /// First half of a line split at a port-transition marker.
        carry: Option<String>,
    },
    Hops {
        path: Path,
        current: Module,
        carry: Option<String>,
    },
}

impl Stage {
    #[inline]
    fn state(&self) -> State {
        match self {
            Stage::Startpoint => State::Startpoint,
            Stage::Endpoint { .. } => State::Endpoint,
            Stage::FirstHop { .. } => State::FirstHop,
            Stage::Hops { .. } => State::Hops,
        }
    }
}

/// Incremental timing report parser.
///
/// Feed it physical lines with [`ReportParser::feed_line`] and
/// collect the paths with [`ReportParser::finish`].
#[derive(Debug)]
pub struct ReportParser {
    stage: Stage,
    paths: Vec<Path>,
    line_no: usize,
}

impl Default for ReportParser {
    fn default() -> Self {
        ReportParser::new()
    }
}

impl ReportParser {
    /// Create a parser looking for the first startpoint.
    #[inline]
    pub fn new() -> ReportParser {
        ReportParser {
            stage: Stage::Startpoint,
            paths: Vec::new(),
            line_no: 0
        }
    }

    /// The state the next line will be classified in.
    #[inline]
    pub fn state(&self) -> State {
        self.stage.state()
    }

    /// Paths completed so far.
    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Consume one physical line.
    pub fn feed_line(&mut self, raw: &str) -> Result<()> {
        self.line_no += 1;
        let line = raw.trim();
        let stage = std::mem::replace(&mut self.stage, Stage::Startpoint);
        self.stage = match stage {
            Stage::Startpoint => match classify(State::Startpoint, "", line) {
                LineKind::Startpoint(text) => {
                    let startpoint = strip_clock_suffix(text);
                    Stage::Endpoint {
                        startpoint: startpoint.into(),
                        pending: Module::new(module_prefix(startpoint))
                    }
                }
                _ => Stage::Startpoint
            },
            Stage::Endpoint { startpoint, pending } => {
                match classify(State::Endpoint, "", line) {
                    LineKind::Endpoint(text) => Stage::FirstHop {
                        path: Path::new(startpoint, strip_clock_suffix(text)),
                        pending,
                        carry: None
                    },
                    _ => Stage::Endpoint { startpoint, pending }
                }
            },
            Stage::FirstHop { path, mut pending, carry } => {
                let logical = splice(carry, line);
                match classify(State::FirstHop, &pending.name, &logical) {
                    LineKind::HopStart => {
                        self.accumulate(&mut pending, &logical)?;
                        Stage::Hops { path, current: pending, carry: None }
                    }
                    LineKind::ContinuationNeeded => Stage::FirstHop {
                        path, pending, carry: Some(logical.into_owned())
                    },
                    _ => Stage::FirstHop { path, pending, carry: None }
                }
            },
            Stage::Hops { mut path, mut current, carry } => {
                match classify(State::Hops, &current.name, line) {
                    LineKind::PathEnd(text) => {
                        if let Some(dangling) = carry {
                            self.advance(&mut path, &mut current, &dangling)?;
                        }
                        let total: f64 = text.parse()
                            .map_err(|_| self.malformed(line))?;
                        path.finish(current, total);
                        clilog::debug!(
                            "path #{}: {} -> {} ({} hops, {:.2} ns)",
                            self.paths.len(), path.startpoint, path.endpoint,
                            path.modules.len(), path.total_delay
                        );
                        self.paths.push(path);
                        Stage::Startpoint
                    }
                    LineKind::ContinuationNeeded => Stage::Hops {
                        path, current,
                        carry: Some(splice(carry, line).into_owned())
                    },
                    LineKind::Cell(_) => {
                        let logical = splice(carry, line);
                        self.advance(&mut path, &mut current, &logical)?;
                        Stage::Hops { path, current, carry: None }
                    }
                    _ => Stage::Hops { path, current, carry }
                }
            }
        };
        Ok(())
    }

    /// Finish parsing. Fails if the input stopped mid-path.
    pub fn finish(self) -> Result<Vec<Path>> {
        match self.stage {
            Stage::Startpoint => {
                clilog::info!(
                    STA_PARSED,
                    "parsed {} timing paths from {} lines",
                    self.paths.len(), self.line_no
                );
                Ok(self.paths)
            }
            stage => Err(StaError::TruncatedReport { state: stage.state() })
        }
    }

    /// Move to a new hop if the line's prefix changed, then
    /// attribute the line.
    fn advance(
        &self, path: &mut Path, current: &mut Module, line: &str
    ) -> Result<()> {
        let prefix = module_prefix(line);
        if current.name != prefix {
            let closed = std::mem::replace(current, Module::new(prefix));
            path.push_module(closed);
        }
        self.accumulate(current, line)
    }

    /// Attribute one logical line to `module`.
    fn accumulate(&self, module: &mut Module, line: &str) -> Result<()> {
        let label = classify::cell_label(line)
            .ok_or_else(|| self.malformed(line))?;
        let delay = classify::first_decimal(line)
            .ok_or_else(|| self.malformed(line))?;
        module.add_cell(label, delay);
        if let Some(port) = classify::port_name(line) {
            module.observe_port(port.leaf());
        }
        Ok(())
    }

    #[inline]
    fn malformed(&self, line: &str) -> StaError {
        StaError::MalformedLine { line_no: self.line_no, line: line.to_string() }
    }
}

/// Join a carried half-line with the next physical line.
/// Blank lines leave the carry untouched.
#[inline]
fn splice(carry: Option<String>, line: &str) -> Cow<'_, str> {
    match carry {
        Some(mut head) => {
            if !line.is_empty() {
                head.push(' ');
                head.push_str(line);
            }
            Cow::Owned(head)
        }
        None => Cow::Borrowed(line)
    }
}

/// Parse any sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> Result<Vec<Path>>
where I: IntoIterator<Item = S>, S: AsRef<str>
{
    let mut parser = ReportParser::new();
    for line in lines {
        parser.feed_line(line.as_ref())?;
    }
    parser.finish()
}

/// Parse the full text of a report.
#[inline]
pub fn parse_report(text: &str) -> Result<Vec<Path>> {
    parse_lines(text.lines())
}

/// Stream a report file from disk.
pub fn parse_report_file(
    path: impl AsRef<std::path::Path>
) -> Result<Vec<Path>> {
    let path = path.as_ref();
    clilog::info!("reading timing report {}", path.display());
    let f = BufReader::with_capacity(65536, File::open(path)?);
    let mut parser = ReportParser::new();
    for line in f.lines() {
        parser.feed_line(&line?)?;
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TINY: &str = "\
Startpoint: reg_a (rising edge-triggered flip-flop clocked by clk)
Endpoint: reg_b (rising edge-triggered flip-flop clocked by clk)
reg_a/Q (reg) 0.00 f
data arrival time   1.23
";

    #[test]
    fn tiny_report() {
        let paths = parse_report(TINY).unwrap();
        assert_eq!(paths.len(), 1);
        let p = &paths[0];
        assert_eq!(p.startpoint, "reg_a");
        assert_eq!(p.endpoint, "reg_b");
        assert_relative_eq!(p.total_delay, 1.23);
        assert_eq!(p.modules.len(), 1);
        assert_eq!(p.modules[0].name, "reg_a");
        assert_eq!(p.modules[0].cell_count, 1);
        assert_eq!(p.modules[0].raw_cells[0].0, "reg_a/Q (reg)");
    }

    #[test]
    fn empty_report_is_not_an_error() {
        assert!(parse_report("").unwrap().is_empty());
        assert!(parse_report("Information: no paths\n\n").unwrap().is_empty());
    }

    #[test]
    fn truncated_inside_hops() {
        let text = TINY.replace("data arrival time   1.23\n", "");
        let err = parse_report(&text).unwrap_err();
        assert!(matches!(err, StaError::TruncatedReport { state: State::Hops }));
    }

    #[test]
    fn truncated_before_endpoint() {
        let err = parse_report("Startpoint: reg_a\n").unwrap_err();
        assert!(matches!(err, StaError::TruncatedReport { state: State::Endpoint }));
    }

    #[test]
    fn hop_boundaries() {
        let text = "\
Startpoint: reg_a (rising edge-triggered flip-flop clocked by clk)
Endpoint: reg_b (rising edge-triggered flip-flop clocked by clk)
Point                 Incr       Path
-----------------------------------------
clock clk (rise edge)  0.00      0.00
reg_a/CK (DFFRX1)      0.00      0.00 r
reg_a/Q (DFFRX1)       0.30      0.30 r
u_alu/a[0] (alu) <-    0.00      0.30 r
u_alu/U3/Y (INVX1)     0.05      0.35 f
u_alu/y (alu) <-       0.00      0.35 f
U12/Y (NAND2X1)        0.08      0.43 r
reg_b/D (DFFRX1)       0.00      0.43 r
data arrival time                0.43
";
        let paths = parse_report(text).unwrap();
        let names: Vec<_> = paths[0].modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["reg_a", "u_alu", "U12", "reg_b"]);
        let alu = &paths[0].modules[1];
        assert_eq!(alu.in_port, "a[0]");
        assert_eq!(alu.out_port, "y");
        assert_eq!(alu.cell_count, 3);
        assert_relative_eq!(alu.cumulative_delay, 0.05);
        assert_eq!(paths[0].total_cells, 7);
    }

    #[test]
    fn split_line_matches_unsplit() {
        let joined = "\
Startpoint: reg_a
Endpoint: reg_b
reg_a/Q (DFFRX1) 0.30 0.30 r
u_alu/a[0] (alu) <- 0.00 0.30 r
u_alu/U3/Y (INVX1) 0.05 0.35 f
data arrival time 0.35
";
        let split = joined.replace("<- 0.00", "<-\n      0.00");
        assert_eq!(split.lines().count(), joined.lines().count() + 1);
        assert_eq!(parse_report(joined).unwrap(), parse_report(&split).unwrap());
    }

    #[test]
    fn blank_line_inside_split() {
        let text = TINY.replace("reg_a/Q (reg) 0.00 f", "reg_a/Q (reg) <-\n\n   0.00 f");
        let paths = parse_report(&text).unwrap();
        assert_eq!(paths[0].modules[0].raw_cells[0].0, "reg_a/Q (reg)");
        assert_eq!(paths[0].modules[0].in_port, "Q");
    }

    #[test]
    fn split_first_hop() {
        let joined = "\
Startpoint: reg_a
Endpoint: reg_b
reg_a/Q (DFFRX1) <- 0.30 0.30 r
data arrival time 0.30
";
        let split = joined.replace("<- 0.30", "<-\n 0.30");
        let a = parse_report(joined).unwrap();
        assert_eq!(a, parse_report(&split).unwrap());
        assert_eq!(a[0].modules[0].in_port, "Q");
    }

    #[test]
    fn malformed_cell_line() {
        let text = TINY.replace("reg_a/Q (reg) 0.00 f", "reg_a/Q (reg) f");
        match parse_report(&text).unwrap_err() {
            StaError::MalformedLine { line_no, line } => {
                assert_eq!(line_no, 3);
                assert_eq!(line, "reg_a/Q (reg) f");
            }
            e => panic!("unexpected error {e}")
        }
    }

    #[test]
    fn malformed_arrival_time() {
        let text = TINY.replace("1.23", "n/a");
        assert!(matches!(
            parse_report(&text).unwrap_err(),
            StaError::MalformedLine { line_no: 4, .. }
        ));
    }

    #[test]
    fn fresh_modules_per_path() {
        let text = format!("{}{}", TINY, TINY.replace("0.00 f", "0.20 f"));
        let paths = parse_report(&text).unwrap();
        assert_eq!(paths.len(), 2);
        assert_relative_eq!(paths[0].modules[0].cumulative_delay, 0.0);
        assert_relative_eq!(paths[1].modules[0].cumulative_delay, 0.20);
        assert_eq!(paths[1].modules[0].cell_count, 1);
    }

    #[test]
    fn incremental_feed() {
        let mut parser = ReportParser::new();
        let mut lines = TINY.lines();
        parser.feed_line(lines.next().unwrap()).unwrap();
        assert_eq!(parser.state(), State::Endpoint);
        parser.feed_line(lines.next().unwrap()).unwrap();
        assert_eq!(parser.state(), State::FirstHop);
        parser.feed_line(lines.next().unwrap()).unwrap();
        assert_eq!(parser.state(), State::Hops);
        parser.feed_line(lines.next().unwrap()).unwrap();
        assert_eq!(parser.state(), State::Startpoint);
        assert_eq!(parser.paths().len(), 1);
    }
}
