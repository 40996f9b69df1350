//! One-shot birthday announcer.
//!
//! Posts today's birthday messages to every configured guild channel and exits.
//! Meant to be run once a day by cron or a systemd timer. An optional `MM-DD`
//! argument announces a different day instead.

use std::process::ExitCode;

use birthday_bot::announcer;
use birthday_bot::channels::discord;
use birthday_bot::dates::MonthDay;
use birthday_bot::{AppContext, Config};
use dotenv::dotenv;
use serenity::all::Http;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let day = match std::env::args().nth(1) {
        Some(arg) => match MonthDay::parse(&arg) {
            Ok(day) => day,
            Err(e) => {
                log::error!("Announce: '{}' is not a valid day: {}", arg, e);
                return ExitCode::FAILURE;
            }
        },
        None => MonthDay::today(),
    };

    let app = match Config::from_env().and_then(AppContext::new) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let announcements = match announcer::announce(&app.db, &day) {
        Ok(announcements) => announcements,
        Err(e) => {
            log::error!("Announce: Database error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if announcements.is_empty() {
        log::info!("Announce: Nothing to announce for {}", day);
        return ExitCode::SUCCESS;
    }

    let http = Http::new(&app.config.discord_token);
    let sent = discord::send_announcements(&http, &announcements).await;
    log::info!(
        "Announce: Sent {}/{} message(s) for {}",
        sent,
        announcements.len(),
        day
    );

    if sent == announcements.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
