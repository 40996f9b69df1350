//! Birthday slash commands, independent of the chat platform.
//!
//! The Discord adapter turns an interaction into a [`Command`] plus an
//! [`Invocation`] describing the caller, then runs [`respond`] and sends the
//! resulting [`Reply`].

mod add_birthday;
mod init_default;
mod list_birthdays;
mod remove_birthday;
mod set_channel;


use birthday_types::BirthdayEntry;

use crate::dates::MonthDay;
use crate::db::Database;
use crate::error::{BotError, Result};

pub const ADD_BIRTHDAY: &str = "add_birthday";
pub const REMOVE_BIRTHDAY: &str = "remove_birthday";
pub const LIST_BIRTHDAYS: &str = "list_birthdays";
pub const INIT_DEFAULT_BIRTHDAYS: &str = "init_default_birthdays";
pub const SET_NOTIFICATION_CHANNEL: &str = "set_notification_channel";

/// Available commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a birthday for a user: `/add_birthday user:@someone birthday:01/31`
    AddBirthday {
        user_id: String,
        display_name: String,
        date: String,
    },
    /// Remove a birthday by name, or the caller's own when no name is given
    RemoveBirthday { name: Option<String> },
    /// Show every stored birthday
    ListBirthdays,
    /// Replace all birthdays with the default list (admin only)
    InitDefaultBirthdays,
    /// Choose the channel for birthday announcements (admin only)
    SetNotificationChannel { channel_id: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBirthday { .. } => ADD_BIRTHDAY,
            Command::RemoveBirthday { .. } => REMOVE_BIRTHDAY,
            Command::ListBirthdays => LIST_BIRTHDAYS,
            Command::InitDefaultBirthdays => INIT_DEFAULT_BIRTHDAYS,
            Command::SetNotificationChannel { .. } => SET_NOTIFICATION_CHANNEL,
        }
    }
}

/// Who ran a command, and where
#[derive(Debug, Clone)]
pub struct Invocation {
    pub invoker_id: String,
    /// The platform's administrator flag for the invoker
    pub is_admin: bool,
    /// `None` in direct messages
    pub guild_id: Option<String>,
}

impl Invocation {
    pub fn require_admin(&self) -> Result<()> {
        if self.is_admin {
            Ok(())
        } else {
            log::warn!(
                "Commands: User {} lacks administrator permission",
                self.invoker_id
            );
            Err(BotError::Permission)
        }
    }
}

/// What to send back. The first message answers the interaction; follow-ups
/// are sent after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Only visible to the invoker
    pub ephemeral: bool,
    pub followups: Vec<String>,
}

impl Reply {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
            followups: Vec::new(),
        }
    }

    pub fn private(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
            followups: Vec::new(),
        }
    }

    pub fn with_followup(mut self, text: impl Into<String>) -> Self {
        self.followups.push(text.into());
        self
    }
}

/// Execute a command and return the reply, or the error that stopped it
pub fn execute(cmd: Command, invocation: &Invocation, db: &Database) -> Result<Reply> {
    match cmd {
        Command::AddBirthday {
            user_id,
            display_name,
            date,
        } => add_birthday::execute(invocation, &user_id, &display_name, &date, db),
        Command::RemoveBirthday { name } => {
            remove_birthday::execute(invocation, name.as_deref(), db)
        }
        Command::ListBirthdays => list_birthdays::execute(db),
        Command::InitDefaultBirthdays => init_default::execute(invocation, db),
        Command::SetNotificationChannel { channel_id } => {
            set_channel::execute(invocation, &channel_id, db)
        }
    }
}

/// Execute a command, turning any error into a private reply
pub fn respond(cmd: Command, invocation: &Invocation, db: &Database) -> Reply {
    let name = cmd.name();
    match execute(cmd, invocation, db) {
        Ok(reply) => reply,
        Err(e) => {
            log::info!(
                "Commands: /{} by {} rejected: {}",
                name,
                invocation.invoker_id,
                e
            );
            Reply::private(e.user_message())
        }
    }
}

/// Render a birthday list under `header`, one `• **name**: Month DD` line per entry
pub fn format_birthday_list(header: &str, entries: &[BirthdayEntry]) -> String {
    let mut lines = vec![header.to_string()];
    for entry in entries {
        let date = MonthDay::from_canonical(&entry.month_day)
            .map(|d| d.long_form())
            .unwrap_or_else(|_| entry.month_day.clone());
        lines.push(format!("• **{}**: {}", entry.display_name, date));
    }
    lines.join("\n")
}
