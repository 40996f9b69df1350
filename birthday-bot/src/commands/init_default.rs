//! Init default birthdays command - resets the list to the built-in seed (admin only)

use super::{Invocation, Reply, format_birthday_list};
use crate::db::Database;
use crate::error::Result;
use crate::seed;

/// Execute the init_default_birthdays command
pub fn execute(invocation: &Invocation, db: &Database) -> Result<Reply> {
    invocation.require_admin()?;

    // Load before clearing so a broken seed never leaves an empty table
    let defaults = seed::default_birthdays()?;

    db.clear_birthdays()?;
    for (record, date) in &defaults {
        db.upsert_birthday(&record.user_id, &record.display_name, date)?;
    }

    log::info!(
        "Commands: Admin {} reset birthdays to {} defaults",
        invocation.invoker_id,
        defaults.len()
    );

    let birthdays = db.list_birthdays()?;
    Ok(
        Reply::public("Hi, I'm Bugabot! We have your list of birfs!").with_followup(
            format_birthday_list("**Current birfdays in database:**", &birthdays),
        ),
    )
}
