//! The default birthday list installed by `/init_default_birthdays`.

use birthday_types::BirthdayRecord;

use crate::dates::MonthDay;
use crate::error::Result;

const DEFAULT_BIRTHDAYS: &str = include_str!("../seed/default_birthdays.json");

/// Load the embedded seed set, validating every date
pub fn default_birthdays() -> Result<Vec<(BirthdayRecord, MonthDay)>> {
    let records: Vec<BirthdayRecord> = serde_json::from_str(DEFAULT_BIRTHDAYS)?;

    records
        .into_iter()
        .map(|record| -> Result<(BirthdayRecord, MonthDay)> {
            let date = MonthDay::from_canonical(&record.month_day)?;
            Ok((record, date))
        })
        .collect()
}
