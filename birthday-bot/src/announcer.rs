//! Daily birthday announcements.
//!
//! Works out who to congratulate and where, for a given day. Delivery and
//! timing belong to the caller (see the `announce` binary); this module holds
//! no state, so running it twice for the same day gives the same answer.

use birthday_types::{Announcement, BirthdayMatch};

use crate::dates::MonthDay;
use crate::db::Database;
use crate::error::StorageError;

/// Build the announcements for `today`.
///
/// Every guild with a configured notification channel gets one message per
/// birthday. Guilds without a channel are skipped.
pub fn announce(db: &Database, today: &MonthDay) -> Result<Vec<Announcement>, StorageError> {
    let birthdays = db.find_birthdays_on(today)?;
    if birthdays.is_empty() {
        log::debug!("Announcer: No birthdays on {}", today);
        return Ok(Vec::new());
    }

    let mut announcements = Vec::new();
    for group_id in db.list_notification_groups()? {
        let Some(channel_id) = db.get_notification_channel(&group_id)? else {
            log::debug!("Announcer: Guild {} has no notification channel", group_id);
            continue;
        };

        for birthday in &birthdays {
            announcements.push(Announcement {
                group_id: group_id.clone(),
                channel_id: channel_id.clone(),
                user_id: birthday.user_id.clone(),
                message: birthday_message(birthday),
            });
        }
    }

    log::info!(
        "Announcer: {} birthday(s) on {}, {} message(s) to send",
        birthdays.len(),
        today,
        announcements.len()
    );
    Ok(announcements)
}

/// Congratulation text. Numeric ids are Discord snowflakes and get a mention.
pub fn birthday_message(birthday: &BirthdayMatch) -> String {
    let is_snowflake =
        !birthday.user_id.is_empty() && birthday.user_id.chars().all(|c| c.is_ascii_digit());

    if is_snowflake {
        format!(
            "🎉 Happy birfday, **{}** (<@{}>)! 🎂",
            birthday.display_name, birthday.user_id
        )
    } else {
        format!("🎉 Happy birfday, **{}**! 🎂", birthday.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(text: &str) -> MonthDay {
        MonthDay::parse(text).unwrap()
    }

    fn seeded() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.upsert_birthday("111", "A", &date("01-05")).unwrap();
        db.upsert_birthday("222", "B", &date("12-01")).unwrap();
        db.upsert_birthday("333", "C", &date("01-05")).unwrap();
        db
    }

    #[test]
    fn test_one_message_per_group_and_birthday() {
        let db = seeded();
        db.upsert_notification_channel("g1", Some("c1")).unwrap();
        db.upsert_notification_channel("g2", Some("c2")).unwrap();

        let out = announce(&db, &date("01-05")).unwrap();
        let pairs: Vec<(&str, &str)> = out
            .iter()
            .map(|a| (a.channel_id.as_str(), a.user_id.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![("c1", "111"), ("c1", "333"), ("c2", "111"), ("c2", "333")]
        );
    }

    #[test]
    fn test_groups_without_channel_skipped() {
        let db = seeded();
        db.upsert_notification_channel("g1", None).unwrap();
        db.upsert_notification_channel("g2", Some("c2")).unwrap();

        let out = announce(&db, &date("12-01")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].group_id, "g2");
        assert_eq!(out[0].channel_id, "c2");
    }

    #[test]
    fn test_destination_never_taken_from_user_id() {
        let db = Database::new(":memory:").unwrap();
        // Destinations come from configured guilds, never from a user id lookup.
        db.upsert_birthday("g1", "Collider", &date("05-26")).unwrap();
        assert!(announce(&db, &date("05-26")).unwrap().is_empty());

        db.upsert_notification_channel("g9", Some("c9")).unwrap();
        let out = announce(&db, &date("05-26")).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].channel_id, "c9");
    }

    #[test]
    fn test_repeatable_and_empty_days() {
        let db = seeded();
        db.upsert_notification_channel("g1", Some("c1")).unwrap();

        let first = announce(&db, &date("01-05")).unwrap();
        let second = announce(&db, &date("01-05")).unwrap();
        assert_eq!(first, second);

        assert!(announce(&db, &date("07-04")).unwrap().is_empty());
    }

    #[test]
    fn test_message_mentions_snowflakes_only() {
        let numeric = BirthdayMatch {
            user_id: "123".to_string(),
            display_name: "Kevon".to_string(),
        };
        assert_eq!(
            birthday_message(&numeric),
            "🎉 Happy birfday, **Kevon** (<@123>)! 🎂"
        );

        let legacy = BirthdayMatch {
            user_id: "detrotsid".to_string(),
            display_name: "Kevon".to_string(),
        };
        assert_eq!(birthday_message(&legacy), "🎉 Happy birfday, **Kevon**! 🎂");
    }
}
