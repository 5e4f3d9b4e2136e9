//! Rush Hour entry point
//!
//! Decodes a level and reports what the puzzle core sees: the board text,
//! vehicles, target, win state and a hit-test on the target.
//!
//! Usage: `rush-hour [LEVEL] [SETTINGS_JSON]`
//! - `LEVEL`: built-in level name (`classic`, `small`) or a level file path
//! - `SETTINGS_JSON`: optional settings file

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rush Hour starting...");

    if let Err(e) = native::run(std::env::args().skip(1).collect()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;

    use anyhow::{Context, Result};
    use rush_hour::{Board, Settings, levels, tile_center};

    pub fn run(args: Vec<String>) -> Result<()> {
        let level_arg = args.first().map(String::as_str).unwrap_or("classic");
        let level = match levels::by_name(level_arg) {
            Some(builtin) => builtin.to_string(),
            None => fs::read_to_string(level_arg)
                .with_context(|| format!("cannot read level {}", level_arg))?,
        };

        let settings = match args.get(1) {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("cannot read settings {}", path))?;
                Settings::from_json(&json).with_context(|| format!("invalid settings {}", path))?
            }
            None => Settings::default(),
        };

        let mut board = settings
            .board(&level)
            .with_context(|| format!("cannot build level {}", level_arg))?;
        report(&mut board);
        Ok(())
    }

    fn report(board: &mut Board) {
        let dims = board.dimensions();
        let size = board.pixel_size();
        println!("{}", board);
        println!();
        println!(
            "{}x{} cells, {}x{} px, exit at {}",
            dims.cols,
            dims.rows,
            size.x,
            size.y,
            board.exit_coordinate()
        );

        for (i, vehicle) in board.vehicles().iter().enumerate() {
            let marker = if Some(i) == board.target_index() { '*' } else { ' ' };
            println!(
                "{} {:>2}: {:?} {} -> {} color #{:06X}",
                marker,
                i,
                vehicle.kind(),
                vehicle.start(),
                vehicle.end(),
                vehicle.style().color.to_u32()
            );
        }

        match board.target().map(|v| v.start()) {
            Some(start) => {
                let pixel = tile_center(start, board.tile_size());
                let picked = board.hit_test(pixel).map(|v| v.start());
                println!("Hit test at {} selects vehicle at {:?}", pixel, picked);
            }
            None => println!("No vehicle lines up with the exit"),
        }
        println!("Solved: {}", board.win_check());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `rush_hour::Board` directly
}
