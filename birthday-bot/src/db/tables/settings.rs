//! Per-guild notification settings

use rusqlite::OptionalExtension;

use super::super::Database;
use crate::error::StorageError;

impl Database {
    /// Set (or clear, with `None`) the announcement channel for a guild
    pub fn upsert_notification_channel(
        &self,
        guild_id: &str,
        channel_id: Option<&str>,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO settings (guild_id, notification_channel)
             VALUES (?1, ?2)
             ON CONFLICT(guild_id) DO UPDATE SET
                notification_channel = excluded.notification_channel",
            rusqlite::params![guild_id, channel_id],
        )?;

        log::info!(
            "Settings: Notification channel for guild {} set to {:?}",
            guild_id,
            channel_id
        );
        Ok(())
    }

    /// The announcement channel for a guild, if one is configured
    pub fn get_notification_channel(&self, guild_id: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn()?;

        let channel: Option<Option<String>> = conn
            .query_row(
                "SELECT notification_channel FROM settings WHERE guild_id = ?1",
                [guild_id],
                |row| row.get(0),
            )
            .optional()?;

        Ok(channel.flatten())
    }

    /// Every guild with a settings row
    pub fn list_notification_groups(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT guild_id FROM settings ORDER BY guild_id")?;

        let groups = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(groups)
    }
}
