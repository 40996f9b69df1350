//! Set notification channel command - where birthday announcements go (admin only)

use super::{Invocation, Reply};
use crate::db::Database;
use crate::error::{BotError, Result};

/// Execute the set_notification_channel command
pub fn execute(invocation: &Invocation, channel_id: &str, db: &Database) -> Result<Reply> {
    invocation.require_admin()?;
    let guild_id = invocation.guild_id.as_deref().ok_or(BotError::GuildOnly)?;

    db.upsert_notification_channel(guild_id, Some(channel_id))?;

    Ok(Reply::public(format!(
        "Birthday announcements will be posted in <#{}>.",
        channel_id
    )))
}
