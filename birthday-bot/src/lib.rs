//! Birthday bot library
//!
//! Shared by the Discord bot binary and the one-shot `announce` binary.

pub mod announcer;
pub mod channels;
pub mod commands;
pub mod config;
pub mod context;
pub mod dates;
pub mod db;
pub mod error;
pub mod seed;

pub use config::Config;
pub use context::AppContext;
pub use db::Database;
pub use error::{BotError, Result};
