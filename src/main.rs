use std::path::PathBuf;

use clap::{Parser as ClapParser, ValueEnum};
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use hatch::report::{FlatFormatter, JsonFormatter, SymbolFormatter, TreeFormatter};
use hatch::{scan_project, SwiftParser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented declaration tree.
    Tree,
    /// One tab-separated line per symbol, pre-order.
    Flat,
    /// Pretty-printed JSON.
    Json,
}

#[derive(ClapParser, Debug)]
#[command(name = "hatch", version, about = "List the declarations in Swift sources")]
struct Cli {
    /// Swift files or directories to scan.
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// List member properties under each type (tree format only).
    #[arg(short, long)]
    properties: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = Cli::parse();

    let formatter: Box<dyn SymbolFormatter> = match cli.format {
        Format::Tree => Box::new(TreeFormatter {
            show_properties: cli.properties,
        }),
        Format::Flat => Box::new(FlatFormatter),
        Format::Json => Box::new(JsonFormatter),
    };

    let parser = SwiftParser::new();
    for path in &cli.paths {
        let root = path.canonicalize().unwrap_or_else(|_| path.clone());
        let tree = scan_project(&root, &parser)?;
        print!("{}", formatter.format(&tree)?);
    }

    Ok(())
}

/// Log to stderr so stdout stays parseable. Filter with `RUST_LOG`
/// (e.g. `RUST_LOG=hatch=debug`); defaults to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
