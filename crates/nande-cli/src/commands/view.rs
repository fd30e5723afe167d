//! View command - interactive viewer.

use anyhow::Result;
use nande_view::GridMode;

use crate::{GridArg, ViewArgs};

/// Run the view command.
pub fn run(args: ViewArgs) -> Result<()> {
    let config = nande_view::ViewerConfig {
        use_tiles: args.tiles,
        tile_edge: args.tile_edge,
        grid: args.grid.map(grid_mode),
        display_config: args.display_config,
        display: args.display,
        view: args.view,
    };

    let exit_code = nande_view::run_opt(args.input, config);

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn grid_mode(arg: GridArg) -> GridMode {
    match arg {
        GridArg::None => GridMode::None,
        GridArg::Dots => GridMode::Dots,
        GridArg::Lines => GridMode::Lines,
    }
}
