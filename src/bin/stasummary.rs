//! Static timing report summary.
//!
//! This program reads the path trace of a timing report and
//! prints, for each selected path, a proportional diagram of the
//! hops it traverses. More `-v` flags add a label line, a per-hop
//! table, and finally every cell line with its delay.

use stasummary::{
    OutOfRange, Presentation, RenderConfig, Selection, Verbosity,
    parse_report_file
};

#[derive(clap::Parser, Debug)]
struct StaSummaryArgs {
    /// The timing report file path
    report: String,
    /// Maximum number of paths to show
    #[clap(long, default_value_t = 10)]
    max: usize,
    /// Disable the maximum number of paths limit
    #[clap(short, long)]
    all: bool,
    /// Show only the first path of each startpoint/endpoint
    /// combination.
    ///
    /// Bus and register bit indices are ignored when comparing.
    #[clap(short, long)]
    unique: bool,
    /// Verbosity: -v labels paths, -vv adds the hop table,
    /// -vvv lists every cell line instead.
    #[clap(short, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Do not show the delay visualization graph
    #[clap(long)]
    no_graph: bool,
    /// Select paths by id
    #[clap(long, value_name = "ID", num_args = 1..)]
    sel: Vec<usize>,
    /// Skip selected ids that do not exist instead of failing
    #[clap(long)]
    skip_bad_ids: bool,
    /// Diagram characters per ns
    #[clap(long, default_value_t = 60.0)]
    box_scale: f64,
    /// Table bar characters per ns
    #[clap(long, default_value_t = 20.0)]
    bar_scale: f64,
    /// Longest module name shown in tables
    #[clap(long, default_value_t = 24)]
    name_limit: usize,
}

fn run(args: StaSummaryArgs) -> stasummary::Result<()> {
    println!();
    println!("Report: {}", args.report);
    println!();
    let paths = parse_report_file(&args.report)?;
    let mut selection = Selection::new(args.sel, args.max, args.all, args.unique);
    if args.skip_bad_ids {
        selection.out_of_range = OutOfRange::Skip;
    }
    let render = RenderConfig {
        box_scale: args.box_scale,
        bar_scale: args.bar_scale,
        name_limit: args.name_limit,
    };
    let presentation = Presentation::new(
        Verbosity::from_count(args.verbose), args.no_graph, render
    );
    print!("{}", presentation.render_selection(&paths, &selection)?);
    Ok(())
}

fn main() {
    clilog::init_stderr_color_debug();
    let args = <StaSummaryArgs as clap::Parser>::parse();
    clilog::debug!("args: {:?}", args);
    if let Err(e) = run(args) {
        clilog::error!("{}", e);
        std::process::exit(1);
    }
}
