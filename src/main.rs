use clap::Parser;
use log::{error, info};
use std::env;

use pakku_bot::client::GameClient;
use pakku_bot::config::Config;
use pakku_bot::error::BotError;

/// Autonomous Pacman-style chase-game client
#[derive(Debug, Parser)]
#[command(name = "pakku-bot", version, about)]
struct Args {
    /// Pause for Enter between turns instead of playing unattended
    #[arg(long)]
    manual: bool,

    /// Override the server host from Pakku.toml
    #[arg(long)]
    host: Option<String>,

    /// Override the server port from Pakku.toml
    #[arg(long)]
    port: Option<u16>,

    /// Override the player email from Pakku.toml
    #[arg(long)]
    email: Option<String>,
}

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args = Args::parse();

    let mut config = Config::load_or_default();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(email) = args.email {
        config.game.email = email;
    }

    info!("Starting Pakku bot against {}", config.server.address());

    let mut client = match GameClient::start(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to start game session: {}", e);
            std::process::exit(1);
        }
    };

    match client.play(args.manual).await {
        Ok(()) => println!("EPIC WIN!!"),
        Err(BotError::GameOver) => {
            println!("Game over, Pakku is dead");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Session failed: {}", e);
            std::process::exit(1);
        }
    }
}
