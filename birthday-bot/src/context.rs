//! Application context built once at startup and shared with every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::db::Database;
use crate::error::Result;

pub struct AppContext {
    pub db: Arc<Database>,
    pub config: Config,
}

impl AppContext {
    /// Open the database named by the config
    pub fn new(config: Config) -> Result<Self> {
        log::info!("Opening database at {}", config.database_path());
        let db = Database::new(config.database_path())?;
        Ok(Self {
            db: Arc::new(db),
            config,
        })
    }
}
