//! # Snake Autoplay
//!
//! Runs a game with the greedy autopilot and prints every frame.
//!
//! Usage: `snake_autoplay [CONFIG.toml] [--fast] [--max-ticks N]`
//!
//! Without `--fast` the loop sleeps `tick_ms` between frames.

use std::process::ExitCode;

use tessera_snake::{autopilot, Game, SnakeConfig, SnakeResult, TickOutcome};

/// Tick limit when none is given.
const DEFAULT_MAX_TICKS: u64 = 2_000;

/// Parsed command line.
struct Args {
    config: Option<String>,
    fast: bool,
    max_ticks: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        fast: false,
        max_ticks: DEFAULT_MAX_TICKS,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fast" => args.fast = true,
            "--max-ticks" => {
                let value = iter.next().ok_or("--max-ticks needs a value")?;
                args.max_ticks = value
                    .parse()
                    .map_err(|e| format!("bad --max-ticks {value}: {e}"))?;
            }
            _ if args.config.is_none() => args.config = Some(arg),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }
    Ok(args)
}

fn run(args: &Args) -> SnakeResult<()> {
    let config = match &args.config {
        Some(path) => SnakeConfig::load(path)?,
        None => SnakeConfig::default(),
    };
    let pause = config.tick_duration();
    let mut game = Game::new(config)?;

    println!("{}", game.frame());
    while game.ticks() < args.max_ticks {
        let input = autopilot::choose(game.world(), game.board());
        let outcome = game.tick(input)?;
        println!("{}", game.frame());
        match outcome {
            TickOutcome::Running => {}
            TickOutcome::GameOver => {
                println!("Game Over!");
                break;
            }
            TickOutcome::Won => {
                println!("Board filled, you win!");
                break;
            }
        }
        if !args.fast {
            std::thread::sleep(pause);
        }
    }

    println!("Final score {} after {} ticks", game.score(), game.ticks());
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: snake_autoplay [CONFIG.toml] [--fast] [--max-ticks N]");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
