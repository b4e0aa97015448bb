//! Per-path output blocks.

use crate::config::RenderConfig;
use crate::diagram::render_rows;
use crate::error::Result;
use crate::path::Path;
use crate::select::Selection;
use crate::table::{ render_table, render_table_verbose };

/// Width of the id column in minimal output.
const ID_INDENT: usize = 6;

/// How much to print for each path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Only the diagram, tagged with the id and delay.
    Minimal,
    /// A label line above the diagram.
    Labeled,
    /// Label, hop table and diagram.
    Detailed,
    /// Label, table of every cell line and diagram.
    RawDetailed,
}

impl Verbosity {
    /// Map a `-v` count to a level.
    pub fn from_count(count: u8) -> Verbosity {
        match count {
            0 => Verbosity::Minimal,
            1 => Verbosity::Labeled,
            2 => Verbosity::Detailed,
            _ => Verbosity::RawDetailed
        }
    }
}

/// Output settings for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub verbosity: Verbosity,
    pub no_diagram: bool,
    pub render: RenderConfig,
}

impl Presentation {
    /// Create the settings. Hiding the diagram needs something else
    /// to show, so it raises the level to at least
    /// [`Verbosity::Detailed`].
    pub fn new(verbosity: Verbosity, no_diagram: bool, render: RenderConfig) -> Presentation {
        let verbosity = if no_diagram {
            verbosity.max(Verbosity::Detailed)
        }
        else {
            verbosity
        };
        Presentation { verbosity, no_diagram, render }
    }

    /// `#<id>  <startpoint> -> <endpoint>    <delay> ns`
    pub fn label(id: usize, path: &Path) -> String {
        format!(
            "#{}  {} -> {}    {:.2} ns",
            id, path.startpoint, path.endpoint, path.total_delay
        )
    }

    /// The output block for one path, ending in a newline.
    pub fn render_path(&self, id: usize, path: &Path) -> String {
        if self.verbosity == Verbosity::Minimal {
            return self.render_minimal(id, path);
        }
        let label = Presentation::label(id, path);
        let mut out = format!("{}\n", label);
        if self.verbosity >= Verbosity::Detailed {
            out.push_str(&"-".repeat(label.chars().count()));
            out.push('\n');
            let table = match self.verbosity {
                Verbosity::RawDetailed => render_table_verbose(path),
                _ => render_table(path, &self.render, !self.no_diagram)
            };
            out.push_str(&table);
            out.push('\n');
        }
        if !self.no_diagram {
            out.push_str(&render_rows(path, &self.render).join("\n"));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn render_minimal(&self, id: usize, path: &Path) -> String {
        let [top, mid, bottom] = render_rows(path, &self.render);
        let pad = " ".repeat(ID_INDENT);
        let tag = format!("{:<w$}", format!("#{}", id), w = ID_INDENT);
        format!(
            "{}{}\n{}{}  {:.2} ns\n{}{}\n",
            pad, top, tag, mid, path.total_delay, pad, bottom
        )
    }

    /// Select and render paths. Nothing is rendered if the
    /// selection fails.
    pub fn render_selection(&self, paths: &[Path], selection: &Selection) -> Result<String> {
        let picked = selection.apply(paths)?;
        clilog::info!("showing {} of {} paths", picked.len(), paths.len());
        Ok(picked.into_iter()
           .map(|(id, path)| self.render_path(id, path))
           .collect())
    }
}
