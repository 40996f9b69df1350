//! Table operations, one file per table. Each file adds methods to [`Database`](super::Database).

pub mod birthdays;
pub mod settings;
