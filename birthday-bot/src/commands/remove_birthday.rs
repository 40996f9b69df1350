//! Remove birthday command - deletes an entry by user id or display name

use super::{Invocation, Reply, format_birthday_list};
use crate::db::Database;
use crate::error::{BotError, Result};

/// Execute the remove_birthday command.
///
/// Without a name the caller's own entry is removed. With a name, an exact
/// user id wins; otherwise the name must match exactly one display name
/// (ignoring case). Removing another user's entry needs admin.
pub fn execute(invocation: &Invocation, name: Option<&str>, db: &Database) -> Result<Reply> {
    let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
        return remove_own(invocation, db);
    };

    let user_id = resolve_user_id(name, db)?;
    if user_id != invocation.invoker_id {
        invocation.require_admin()?;
    }

    if !db.remove_birthday(&user_id)? {
        // Deleted by someone else between the lookup and now
        return Err(BotError::NotFound(name.to_string()));
    }

    log::info!(
        "Commands: {} removed birthday entry '{}' ({})",
        invocation.invoker_id,
        name,
        user_id
    );

    with_updated_list(
        Reply::public(format!("Successfully removed birthday entry for '{}'.", name)),
        db,
    )
}

fn remove_own(invocation: &Invocation, db: &Database) -> Result<Reply> {
    if !db.remove_birthday(&invocation.invoker_id)? {
        return Ok(Reply::private("You don't have a birthday on file."));
    }

    with_updated_list(Reply::public("Your birthday has been removed."), db)
}

/// Resolve a user id or display name to exactly one stored user id
fn resolve_user_id(name: &str, db: &Database) -> Result<String> {
    if let Some(record) = db.get_birthday(name)? {
        return Ok(record.user_id);
    }

    let mut matches = db.find_birthdays_by_name(name)?;
    match matches.len() {
        1 => Ok(matches.remove(0).user_id),
        0 => Err(BotError::NotFound(name.to_string())),
        n => {
            log::warn!(
                "Commands: '{}' matches {} birthday entries, refusing to remove",
                name,
                n
            );
            Err(BotError::NotFound(name.to_string()))
        }
    }
}

fn with_updated_list(reply: Reply, db: &Database) -> Result<Reply> {
    let birthdays = db.list_birthdays()?;
    if birthdays.is_empty() {
        return Ok(reply.with_followup("The birthday list is now empty!"));
    }
    Ok(reply.with_followup(format_birthday_list(
        "**📅 Updated Birfday List:**",
        &birthdays,
    )))
}
