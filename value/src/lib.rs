//! The Timon runtime value domain: arithmetic, comparison, field access, and
//! canonical string forms over numbers, strings, and calendar-aware
//! temporal values (§3, §4.3 of the specification).

mod error;
mod timedelta;
mod value;

pub use error::{ValueError, ValueResult};
pub use timedelta::Timedelta;
pub use value::Value;

pub use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
