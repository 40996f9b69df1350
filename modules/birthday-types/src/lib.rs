//! Shared types for the birthday store, the command surface and the announcer.

use serde::{Deserialize, Serialize};

// =====================================================
// Stored Rows
// =====================================================

/// One row of the `birthdays` table.
///
/// `month_day` is always the canonical zero-padded `MM-DD` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayRecord {
    pub user_id: String,
    pub display_name: String,
    pub month_day: String,
}

// =====================================================
// Query Results
// =====================================================

/// A line of the birthday list, as shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEntry {
    pub display_name: String,
    pub month_day: String,
}

/// A birthday falling on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayMatch {
    pub user_id: String,
    pub display_name: String,
}

// =====================================================
// Announcements
// =====================================================

/// A congratulatory message addressed to a group's notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub group_id: String,
    pub channel_id: String,
    pub user_id: String,
    pub message: String,
}
