// Offline simulator for the zigzag bot
//
// Usage:
//   cargo run --bin simulate -- [options]
//
// Options:
//   --width <n>       Grid width (default: 100)
//   --height <n>      Grid height (default: 100)
//   --obstacles <n>   Number of random obstacle cells (default: 0)
//   --seed <n>        Obstacle placement seed (default: 0)
//   --ticks <n>       Tick limit (default: 10000)
//   --name <name>     Bot name (default: zigzag)
//   --render          Print the final grid

use std::env;
use std::process;
use std::str::FromStr;

use cycles_zigzag_bot::arena::{Arena, ArenaConfig};
use cycles_zigzag_bot::bot::Bot;
use cycles_zigzag_bot::error::BotError;

fn print_usage() {
    eprintln!("Cycles Zigzag Simulator");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  simulate [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --width <n>       Grid width (default: 100)");
    eprintln!("  --height <n>      Grid height (default: 100)");
    eprintln!("  --obstacles <n>   Number of random obstacle cells (default: 0)");
    eprintln!("  --seed <n>        Obstacle placement seed (default: 0)");
    eprintln!("  --ticks <n>       Tick limit (default: 10000)");
    eprintln!("  --name <name>     Bot name (default: zigzag)");
    eprintln!("  --render          Print the final grid");
    eprintln!("  --help            Show this help message");
}

fn parse_value<T: FromStr>(flag: &str, value: Option<&String>) -> T
where
    T::Err: std::fmt::Display,
{
    let Some(raw) = value else {
        eprintln!("Error: {} requires an argument", flag);
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|e| {
        eprintln!("Error: Invalid value '{}' for {}: {}", raw, flag, e);
        process::exit(1);
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let mut config = ArenaConfig::default();
    let mut name = "zigzag".to_string();
    let mut render = false;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--width" => {
                config.width = parse_value("--width", value);
                i += 1;
            }
            "--height" => {
                config.height = parse_value("--height", value);
                i += 1;
            }
            "--obstacles" => {
                config.obstacles = parse_value("--obstacles", value);
                i += 1;
            }
            "--seed" => {
                config.seed = parse_value("--seed", value);
                i += 1;
            }
            "--ticks" => {
                config.max_ticks = parse_value("--ticks", value);
                i += 1;
            }
            "--name" => {
                name = parse_value("--name", value);
                i += 1;
            }
            "--render" => {
                render = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let arena = match Arena::new(&name, &config) {
        Ok(arena) => arena,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut bot = match Bot::new(name.as_str(), arena) {
        Ok(bot) => bot,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let outcome = bot.run();
    let summary = bot.summary();
    let arena = bot.connection();
    let total_cells = (config.width as usize) * (config.height as usize);

    println!(
        "Grid {}x{}, {} obstacles, seed {}",
        config.width, config.height, config.obstacles, config.seed
    );
    match outcome {
        Ok(_) => println!("Survived all {} ticks", summary.ticks),
        Err(BotError::PlayerMissing(_)) => {
            println!("Eliminated after {} ticks", summary.ticks)
        }
        Err(e) => {
            eprintln!("Error during simulation: {}", e);
            process::exit(1);
        }
    }
    println!("Forced moves: {}", summary.forced_moves);
    println!(
        "Covered {} of {} cells ({:.1}%)",
        arena.covered_cells(),
        total_cells,
        100.0 * arena.covered_cells() as f64 / total_cells as f64
    );

    if render {
        println!();
        print!("{}", arena.render());
    }
}
