//! Add birthday command - stores or replaces a user's birthday

use super::{Invocation, Reply, format_birthday_list};
use crate::dates::MonthDay;
use crate::db::Database;
use crate::error::Result;

/// Execute the add_birthday command.
///
/// Anyone may set their own birthday; setting someone else's needs admin.
pub fn execute(
    invocation: &Invocation,
    user_id: &str,
    display_name: &str,
    date_text: &str,
    db: &Database,
) -> Result<Reply> {
    if user_id != invocation.invoker_id {
        invocation.require_admin()?;
    }

    let date = MonthDay::parse(date_text)?;

    db.upsert_birthday(user_id, display_name, &date)?;

    let birthdays = db.list_birthdays()?;
    Ok(
        Reply::public(format!(
            "Added birthday for {}: {}",
            display_name,
            date.slash_form()
        ))
        .with_followup(format_birthday_list("**📅 Updated Birfday List:**", &birthdays)),
    )
}
