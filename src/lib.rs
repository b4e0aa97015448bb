//! ## `stasummary`: static timing report summaries
//!
//! This contains the core functionalities and data structures
//! for reading the critical-path trace of a static timing report
//! and summarizing where delay accumulates along each path.
//!
//! A report is parsed into [`Path`]s, each made of [`Module`] hops
//! in traversal order. Paths are then picked with a [`Selection`]
//! and printed through a [`Presentation`] as tables and
//! proportional box diagrams.
//!
//! See the binary for example usage.

pub mod hier;
pub use hier::HierName;

pub mod error;
pub use error::{ Result, StaError };

pub mod classify;

pub mod path;
pub use path::{ Module, Path, HopSummary };

pub mod parser;
pub use parser::{ ReportParser, parse_lines, parse_report, parse_report_file };

pub mod select;
pub use select::{ OutOfRange, PathSet, Selection };

pub mod config;
pub use config::RenderConfig;

pub mod table;
pub use table::{ render_table, render_table_verbose };

pub mod diagram;
pub use diagram::{ render_diagram, render_rows };

pub mod present;
pub use present::{ Presentation, Verbosity };
