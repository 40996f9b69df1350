//! Birthday database operations

use birthday_types::{BirthdayEntry, BirthdayMatch, BirthdayRecord};
use rusqlite::OptionalExtension;

use super::super::Database;
use crate::dates::MonthDay;
use crate::error::StorageError;

impl Database {
    /// Insert or replace the birthday for a user
    pub fn upsert_birthday(
        &self,
        user_id: &str,
        display_name: &str,
        month_day: &MonthDay,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO birthdays (user_id, username, birthday)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                birthday = excluded.birthday",
            rusqlite::params![user_id, display_name, month_day.to_string()],
        )?;

        log::info!(
            "Birthdays: Stored {} for {} ({})",
            month_day,
            display_name,
            user_id
        );
        Ok(())
    }

    /// Delete a user's birthday. Returns whether a row existed.
    pub fn remove_birthday(&self, user_id: &str) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let rows_affected = conn.execute(
            "DELETE FROM birthdays WHERE user_id = ?1",
            rusqlite::params![user_id],
        )?;

        if rows_affected > 0 {
            log::info!("Birthdays: Removed entry for {}", user_id);
        }
        Ok(rows_affected > 0)
    }

    /// All birthdays ordered by `MM-DD`, January first
    pub fn list_birthdays(&self) -> Result<Vec<BirthdayEntry>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT username, birthday FROM birthdays ORDER BY birthday, username",
        )?;

        let entries = stmt
            .query_map([], |row| {
                Ok(BirthdayEntry {
                    display_name: row.get(0)?,
                    month_day: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Birthdays falling on the given day
    pub fn find_birthdays_on(&self, month_day: &MonthDay) -> Result<Vec<BirthdayMatch>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, username FROM birthdays WHERE birthday = ?1 ORDER BY user_id",
        )?;

        let matches = stmt
            .query_map([month_day.to_string()], |row| {
                Ok(BirthdayMatch {
                    user_id: row.get(0)?,
                    display_name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(matches)
    }

    /// Records whose display name matches `name`, ignoring case
    pub fn find_birthdays_by_name(&self, name: &str) -> Result<Vec<BirthdayRecord>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT user_id, username, birthday FROM birthdays
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY user_id",
        )?;

        let records = stmt
            .query_map([name], map_birthday_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Look up a single record by user id
    pub fn get_birthday(&self, user_id: &str) -> Result<Option<BirthdayRecord>, StorageError> {
        let conn = self.conn()?;
        let record = conn
            .query_row(
                "SELECT user_id, username, birthday FROM birthdays WHERE user_id = ?1",
                [user_id],
                map_birthday_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Delete every birthday. Returns the number of rows removed.
    pub fn clear_birthdays(&self) -> Result<usize, StorageError> {
        let conn = self.conn()?;
        let count = conn.execute("DELETE FROM birthdays", [])?;
        log::info!("Birthdays: Cleared {} entries", count);
        Ok(count)
    }
}

fn map_birthday_row(row: &rusqlite::Row) -> rusqlite::Result<BirthdayRecord> {
    Ok(BirthdayRecord {
        user_id: row.get(0)?,
        display_name: row.get(1)?,
        month_day: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::new(":memory:").expect("in-memory db")
    }

    fn date(text: &str) -> MonthDay {
        MonthDay::parse(text).unwrap()
    }

    fn seed_three(db: &Database) {
        db.upsert_birthday("u1", "A", &date("01-05")).unwrap();
        db.upsert_birthday("u2", "B", &date("12-01")).unwrap();
        db.upsert_birthday("u3", "C", &date("01-01")).unwrap();
    }

    #[test]
    fn test_upsert_replaces_existing_row() {
        let db = db();
        db.upsert_birthday("u1", "Alice", &date("02-29")).unwrap();
        db.upsert_birthday("u1", "Alicia", &date("03-01")).unwrap();

        let list = db.list_birthdays().unwrap();
        assert_eq!(
            list,
            vec![BirthdayEntry {
                display_name: "Alicia".to_string(),
                month_day: "03-01".to_string(),
            }]
        );
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let db = db();
        assert!(!db.remove_birthday("nobody").unwrap());

        db.upsert_birthday("u1", "Alice", &date("04-21")).unwrap();
        assert!(db.remove_birthday("u1").unwrap());
        assert!(!db.remove_birthday("u1").unwrap());
        assert!(db.list_birthdays().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_by_month_day() {
        let db = db();
        seed_three(&db);
        db.upsert_birthday("u4", "D", &date("11-30")).unwrap();

        let order: Vec<(String, String)> = db
            .list_birthdays()
            .unwrap()
            .into_iter()
            .map(|e| (e.display_name, e.month_day))
            .collect();

        assert_eq!(
            order,
            vec![
                ("C".to_string(), "01-01".to_string()),
                ("A".to_string(), "01-05".to_string()),
                ("D".to_string(), "11-30".to_string()),
                ("B".to_string(), "12-01".to_string()),
            ]
        );
    }

    #[test]
    fn test_find_on_day() {
        let db = db();
        seed_three(&db);

        assert_eq!(
            db.find_birthdays_on(&date("01-05")).unwrap(),
            vec![BirthdayMatch {
                user_id: "u1".to_string(),
                display_name: "A".to_string(),
            }]
        );
        assert!(db.find_birthdays_on(&date("07-04")).unwrap().is_empty());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        let db = db();
        db.upsert_birthday("u1", "The Larch", &date("04-21")).unwrap();
        db.upsert_birthday("u2", "Kevon", &date("06-21")).unwrap();

        let found = db.find_birthdays_by_name("the LARCH").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].user_id, "u1");
        assert!(db.find_birthdays_by_name("Larch").unwrap().is_empty());
    }

    #[test]
    fn test_get_and_clear() {
        let db = db();
        seed_three(&db);

        let record = db.get_birthday("u2").unwrap().unwrap();
        assert_eq!(record.display_name, "B");
        assert_eq!(record.month_day, "12-01");
        assert!(db.get_birthday("u9").unwrap().is_none());

        assert_eq!(db.clear_birthdays().unwrap(), 3);
        assert!(db.list_birthdays().unwrap().is_empty());
    }
}
