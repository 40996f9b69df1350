use std::process::ExitCode;
use std::sync::Arc;

use birthday_bot::channels::discord;
use birthday_bot::{AppContext, Config};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    log::info!("Initializing Bugabot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let app = match AppContext::new(config) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            log::error!("Failed to initialize database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Starting Discord client");
    if let Err(e) = discord::start_discord_listener(app).await {
        log::error!("Discord client error: {}", e);
        return ExitCode::FAILURE;
    }

    log::info!("Bot shut down");
    ExitCode::SUCCESS
}
