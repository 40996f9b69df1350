//! List birthdays command

use super::{Reply, format_birthday_list};
use crate::db::Database;
use crate::error::Result;

/// Execute the list_birthdays command
pub fn execute(db: &Database) -> Result<Reply> {
    let birthdays = db.list_birthdays()?;
    log::debug!("Commands: Listing {} birthdays", birthdays.len());

    if birthdays.is_empty() {
        return Ok(Reply::private("No birthdays have been added yet!"));
    }

    Ok(Reply::public(format_birthday_list(
        "**📅 Birfday List:**",
        &birthdays,
    )))
}
