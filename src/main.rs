use log::{error, info};
use std::env;
use std::process;

use cycles_zigzag_bot::bot::Bot;
use cycles_zigzag_bot::config::Config;
use cycles_zigzag_bot::connection::TcpConnection;
use cycles_zigzag_bot::error::Result;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        let program = args.first().map_or("cycles-zigzag-bot", String::as_str);
        eprintln!("Usage: {} <bot_name>", program);
        process::exit(1);
    }
    let name = &args[1];

    // Load configuration once at startup; logging is not up yet
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // `RUST_LOG` wins over the configured level when set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if let Err(e) = run(name, config) {
        error!("{}: Fatal error: {}", name, e);
        process::exit(1);
    }
}

fn run(name: &str, config: Config) -> Result<()> {
    let config = config.with_env_overrides()?;
    info!("{}: Connecting to {}", name, config.server.address());

    let connection = TcpConnection::connect(name, &config.server)?;
    let mut bot = Bot::new(name, connection)?;
    bot.run()?;

    Ok(())
}
