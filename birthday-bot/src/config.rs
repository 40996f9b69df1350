use std::env;

use crate::error::{BotError, Result};

#[derive(Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    /// Register slash commands on this guild only (instant) instead of globally
    pub command_guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BotError::Config(format!("{} must be set", key)))
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let database_url = required("DATABASE_URL")?;

        let command_guild_id = match lookup("COMMAND_GUILD_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|id| *id != 0)
                    .ok_or_else(|| {
                        BotError::Config("COMMAND_GUILD_ID must be a numeric guild id".to_string())
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            discord_token,
            database_url,
            command_guild_id,
        })
    }

    /// Filesystem path (or `:memory:`) behind `DATABASE_URL`
    pub fn database_path(&self) -> &str {
        self.database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))
            .unwrap_or(&self.database_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_required_values() {
        let config = config_from(&[("DISCORD_TOKEN", "abc"), ("DATABASE_URL", "./bday.db")]).unwrap();
        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.database_path(), "./bday.db");
        assert_eq!(config.command_guild_id, None);
    }

    #[test]
    fn test_missing_token_is_error() {
        let err = config_from(&[("DATABASE_URL", "./bday.db")]).err().unwrap();
        assert!(matches!(err, BotError::Config(msg) if msg.contains("DISCORD_TOKEN")));
    }

    #[test]
    fn test_missing_database_is_error() {
        assert!(config_from(&[("DISCORD_TOKEN", "abc")]).is_err());
        assert!(config_from(&[("DISCORD_TOKEN", "abc"), ("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_sqlite_prefix_stripped() {
        let config =
            config_from(&[("DISCORD_TOKEN", "abc"), ("DATABASE_URL", "sqlite://data/b.db")]).unwrap();
        assert_eq!(config.database_path(), "data/b.db");
    }

    #[test]
    fn test_guild_id() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DATABASE_URL", ":memory:"),
            ("COMMAND_GUILD_ID", "123456789"),
        ])
        .unwrap();
        assert_eq!(config.command_guild_id, Some(123456789));

        assert!(config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DATABASE_URL", ":memory:"),
            ("COMMAND_GUILD_ID", "general"),
        ])
        .is_err());
        assert!(config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("DATABASE_URL", ":memory:"),
            ("COMMAND_GUILD_ID", "0"),
        ])
        .is_err());
    }
}
