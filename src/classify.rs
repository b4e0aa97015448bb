//! Lexical line classification.
//!
//! Timing reports have no schema. Every trimmed line is sorted into
//! one [`LineKind`] according to the parser [`State`] and a handful
//! of literal markers, so the state machine itself never looks at
//! raw text.

use crate::hier::{ self, HierName };
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Opens a path.
pub const STARTPOINT: &str = "Startpoint";
/// Names the capturing point of a path.
pub const ENDPOINT: &str = "Endpoint";
/// Closes a path and carries its total delay.
pub const ARRIVAL: &str = "data arrival time";
/// Port-transition marker. A line ending with it continues on
/// the next physical line.
pub const PORT_MARKER: &str = "<-";

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"\d+\.\d+")
        .expect("failed to compile delay regex");
}

/// Parser states.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum State {
    /// Looking for `Startpoint:`.
    Startpoint,
    /// Looking for `Endpoint:`.
    Endpoint,
    /// Skipping boilerplate until the startpoint's own hop.
    FirstHop,
    /// Accumulating hops until `data arrival time`.
    Hops,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Startpoint => write!(f, "startpoint"),
            State::Endpoint => write!(f, "endpoint"),
            State::FirstHop => write!(f, "the first hop"),
            State::Hops => write!(f, "data arrival time"),
        }
    }
}

/// What a trimmed line means in the current state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `Startpoint: <text>`; the keyword and colon are removed.
    Startpoint(&'a str),
    /// `Endpoint: <text>`; the keyword and colon are removed.
    Endpoint(&'a str),
    /// The first line belonging to the startpoint's hop.
    HopStart,
    /// `data arrival time <delay>`; carries the delay text.
    PathEnd(&'a str),
    /// The line ends with [`PORT_MARKER`] and its values follow
    /// on the next line.
    ContinuationNeeded,
    /// An ordinary hop line.
    Cell(&'a str),
    /// Nothing to do.
    Ignore,
}

/// Classify one trimmed line.
///
/// `hop` is the name of the pending (in [`State::FirstHop`]) or
/// current (in [`State::Hops`]) hop and is unused otherwise.
pub fn classify<'a>(state: State, hop: &str, line: &'a str) -> LineKind<'a> {
    match state {
        State::Startpoint => match keyword_value(line, STARTPOINT) {
            Some(text) => LineKind::Startpoint(text),
            None => LineKind::Ignore
        },
        State::Endpoint => match keyword_value(line, ENDPOINT) {
            Some(text) => LineKind::Endpoint(text),
            None => LineKind::Ignore
        },
        State::FirstHop => {
            if line.is_empty() || module_prefix(line) != hop {
                LineKind::Ignore
            }
            else if line.ends_with(PORT_MARKER) {
                LineKind::ContinuationNeeded
            }
            else {
                LineKind::HopStart
            }
        },
        State::Hops => {
            if let Some(rest) = line.strip_prefix(ARRIVAL) {
                LineKind::PathEnd(rest.trim())
            }
            else if line.is_empty() {
                LineKind::Ignore
            }
            else if line.ends_with(PORT_MARKER) {
                LineKind::ContinuationNeeded
            }
            else {
                LineKind::Cell(line)
            }
        }
    }
}

/// `Startpoint: foo` -> `foo`.
fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    Some(rest.trim_start().trim_start_matches(':').trim())
}

/// The hop a line belongs to: its first token up to the first `/`.
#[inline]
pub fn module_prefix(line: &str) -> &str {
    hier::head(line.split_whitespace().next().unwrap_or(""))
}

/// Remove a trailing `(...)` clock/edge annotation.
pub fn strip_clock_suffix(text: &str) -> &str {
    let text = text.trim();
    if text.ends_with(')') {
        if let Some(open) = text.rfind('(') {
            return text[..open].trim_end();
        }
    }
    text
}

/// The pin token followed by its parenthesised cell type, e.g.
/// `u_alu/U12/Y (NAND2X1)`.
pub fn cell_label(line: &str) -> Option<String> {
    let mut toks = line.split_whitespace();
    let pin = toks.next()?;
    let cell = toks.next().filter(|t| t.starts_with('('))?;
    Some(format!("{} {}", pin, cell))
}

/// The first decimal numeral on a line.
pub fn first_decimal(line: &str) -> Option<f64> {
    DECIMAL.find(line)?.as_str().parse().ok()
}

/// The port named by a port-transition marker: the leaf segment
/// of the pin token in front of the marker.
pub fn port_name(line: &str) -> Option<HierName> {
    let before = &line[..line.find(PORT_MARKER)?];
    let pin = before.split_whitespace().next()?;
    Some(HierName::parse(pin))
}
