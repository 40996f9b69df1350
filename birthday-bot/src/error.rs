use thiserror::Error;

use crate::dates::DateError;

/// Any failure talking to the database.
///
/// Pool checkout, file and SQLite errors are folded into one kind; callers never need
/// to tell them apart.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bot error type
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid date: {0}")]
    Validation(#[from] DateError),

    #[error("Administrator permission required")]
    Permission,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Command must be used inside a server")]
    GuildOnly,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Seed data error: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("Task join error: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

impl From<rusqlite::Error> for BotError {
    fn from(err: rusqlite::Error) -> Self {
        BotError::Storage(err.into())
    }
}

impl BotError {
    /// Text shown to the Discord user for this error.
    ///
    /// Internal failures are logged here and replaced with a generic retry message.
    pub fn user_message(&self) -> String {
        match self {
            BotError::Validation(e) => e.to_string(),
            BotError::Permission => {
                "You need administrator permissions to use this command!".to_string()
            }
            BotError::NotFound(name) => {
                format!("Could not find a birthday entry for '{}'.", name)
            }
            BotError::GuildOnly => "This command can only be used inside a server.".to_string(),
            BotError::Storage(e) => {
                log::error!("Database error: {}", e);
                "There was an error accessing the database. Please try again later.".to_string()
            }
            BotError::Config(_)
            | BotError::Seed(_)
            | BotError::Task(_)
            | BotError::Discord(_) => {
                log::error!("Internal error: {}", self);
                "Something went wrong on my end. Please try again later.".to_string()
            }
        }
    }
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_corrective() {
        let err = BotError::from(DateError::MonthOutOfRange);
        assert_eq!(
            err.user_message(),
            "Invalid month! Month must be between 01 and 12."
        );
    }

    #[test]
    fn test_storage_message_is_generic() {
        let err = BotError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, BotError::Storage(StorageError::Sqlite(_))));
        assert_eq!(
            err.user_message(),
            "There was an error accessing the database. Please try again later."
        );
    }

    #[test]
    fn test_not_found_names_entry() {
        let err = BotError::NotFound("Alice".to_string());
        assert_eq!(
            err.user_message(),
            "Could not find a birthday entry for 'Alice'."
        );
    }
}
