//! nande - image viewer with grid, tiles and display transforms

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "viewer")]
use clap::ValueEnum;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nande")]
#[command(author, version, about = "Image viewer with grid, tiles and display transforms")]
#[command(long_about = "
Pan/zoom image viewer with a background grid, tiled drawing and
channel/luminance/inversion views.

Examples:
  nande view image.png                  # Open the viewer
  nande view                            # Reopen the last file
  nande view image.png --tiles --grid lines
  nande view image.png --display-config displays.yaml --display sRGB --view Raw
  nande info image.png                  # Show image info
  nande info a.png b.jpg --tile-edge 256
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display image information
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Open the interactive viewer
    #[cfg(feature = "viewer")]
    #[command(visible_alias = "v")]
    View(ViewArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Tile edge used for the tile count
    #[arg(short = 't', long, default_value = "512")]
    tile_edge: u32,
}

/// Grid drawn under the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[cfg(feature = "viewer")]
enum GridArg {
    /// No grid
    None,
    /// Dot at each cell corner
    Dots,
    /// Divider and main lines
    Lines,
}

#[derive(Args)]
#[cfg(feature = "viewer")]
struct ViewArgs {
    /// Image to open (defaults to the last opened file)
    input: Option<PathBuf>,

    /// Draw the image as tiles
    #[arg(long)]
    tiles: bool,

    /// Maximum tile edge in pixels
    #[arg(long, default_value = "512")]
    tile_edge: u32,

    /// Grid mode
    #[arg(short, long, value_enum)]
    grid: Option<GridArg>,

    /// Display/view YAML file (defaults to the built-in displays)
    #[arg(long)]
    display_config: Option<PathBuf>,

    /// Display name
    #[arg(short, long)]
    display: Option<String>,

    /// View name
    #[arg(long)]
    view: Option<String>,
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        #[cfg(feature = "viewer")]
        Commands::View(args) => commands::view::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["nande", "-vv", "info", "a.png"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_info_defaults() {
        let cli = Cli::parse_from(["nande", "info", "a.png", "b.png"]);
        let Commands::Info(args) = cli.command else {
            panic!("expected info");
        };
        assert_eq!(args.input.len(), 2);
        assert_eq!(args.tile_edge, 512);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn test_view_args() {
        let cli = Cli::parse_from(["nande", "view", "x.png", "--tiles", "--grid", "lines", "--display", "sRGB"]);
        let Commands::View(args) = cli.command else {
            panic!("expected view");
        };
        assert!(args.tiles);
        assert_eq!(args.grid, Some(GridArg::Lines));
        assert_eq!(args.display.as_deref(), Some("sRGB"));
        assert_eq!(args.input, Some(PathBuf::from("x.png")));
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn test_view_without_input() {
        let cli = Cli::parse_from(["nande", "view"]);
        let Commands::View(args) = cli.command else {
            panic!("expected view");
        };
        assert!(args.input.is_none());
        assert_eq!(args.tile_edge, 512);
    }
}
