use std::cmp::Ordering;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{ValueError, ValueResult};
use crate::timedelta::Timedelta;

/// The runtime value domain (§3, §4.3). `Bool` is produced only by
/// comparisons and the boolean operators; it has no literal syntax. `Unit`
/// is the absence of a return value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(i64),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Datetime(NaiveDateTime),
    Timedelta(Timedelta),
    Bool(bool),
    Unit,
}

impl Value {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::Datetime(_) => "Datetime",
            Value::Timedelta(_) => "Timedelta",
            Value::Bool(_) => "Bool",
            Value::Unit => "Unit",
        }
    }

    fn mismatch(op: &'static str, lhs: &Value, rhs: &Value) -> ValueError {
        ValueError::TypeMismatch {
            op,
            operands: format!("{} and {}", lhs.variant_name(), rhs.variant_name()),
        }
    }

    pub fn add(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_add(*b))),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (Value::Timedelta(a), Value::Timedelta(b)) => a
                .checked_add(*b)
                .map(Value::Timedelta)
                .ok_or(ValueError::OutOfRange("timedelta component overflow".into())),
            (Value::Date(d), Value::Timedelta(td)) => apply_to_date(*d, *td, 1).map(Value::Date),
            (Value::Datetime(d), Value::Timedelta(td)) => apply_to_datetime(*d, *td, 1).map(Value::Datetime),
            (Value::Time(t), Value::Timedelta(td)) => Ok(Value::Time(apply_to_time(*t, *td, 1))),
            _ => Err(Self::mismatch("+", self, other)),
        }
    }

    pub fn sub(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_sub(*b))),
            (Value::Timedelta(a), Value::Timedelta(b)) => a
                .checked_sub(*b)
                .map(Value::Timedelta)
                .ok_or(ValueError::OutOfRange("timedelta component overflow".into())),
            (Value::Date(d), Value::Timedelta(td)) => apply_to_date(*d, *td, -1).map(Value::Date),
            (Value::Datetime(d), Value::Timedelta(td)) => apply_to_datetime(*d, *td, -1).map(Value::Datetime),
            (Value::Time(t), Value::Timedelta(td)) => Ok(Value::Time(apply_to_time(*t, *td, -1))),
            (Value::Date(a), Value::Date(b)) => Ok(Value::Timedelta(Timedelta::from_days(
                a.signed_duration_since(*b).num_days(),
            ))),
            (Value::Time(a), Value::Time(b)) => {
                let hms = seconds_to_hms(a.signed_duration_since(*b).num_seconds());
                Ok(Value::Timedelta(Timedelta::from_hms(hms.hours, hms.minutes, hms.seconds)))
            }
            (Value::Datetime(a), Value::Datetime(b)) => {
                let diff = a.signed_duration_since(*b);
                let days = diff.num_days();
                let remainder = (diff - Duration::days(days)).num_seconds();
                let hms = seconds_to_hms(remainder);
                Ok(Value::Timedelta(Timedelta::from_dhms(days, hms.hours, hms.minutes, hms.seconds)))
            }
            _ => Err(Self::mismatch("-", self, other)),
        }
    }

    pub fn mul(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.wrapping_mul(*b))),
            (Value::Timedelta(a), Value::Number(n)) | (Value::Number(n), Value::Timedelta(a)) => a
                .checked_mul(*n)
                .map(Value::Timedelta)
                .ok_or(ValueError::OutOfRange("timedelta component overflow".into())),
            _ => Err(Self::mismatch("*", self, other)),
        }
    }

    pub fn div(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Number(_), Value::Number(0)) => Err(ValueError::DivisionByZero),
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a / b)),
            (Value::Timedelta(_), Value::Number(0)) => Err(ValueError::DivisionByZero),
            (Value::Timedelta(a), Value::Number(n)) => Ok(Value::Timedelta(a.div(*n))),
            _ => Err(Self::mismatch("/", self, other)),
        }
    }

    pub fn neg(&self) -> ValueResult<Value> {
        match self {
            Value::Number(n) => Ok(Value::Number(n.wrapping_neg())),
            Value::Timedelta(t) => Ok(Value::Timedelta(t.negate())),
            _ => Err(ValueError::TypeMismatch { op: "unary -", operands: self.variant_name().to_string() }),
        }
    }

    pub fn not(&self) -> ValueResult<Value> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(ValueError::TypeMismatch { op: "!", operands: self.variant_name().to_string() }),
        }
    }

    /// `==`/`!=`: defined only between two values of the same variant.
    pub fn values_equal(&self, other: &Value) -> ValueResult<bool> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a == b),
            (Value::String(a), Value::String(b)) => Ok(a == b),
            (Value::Date(a), Value::Date(b)) => Ok(a == b),
            (Value::Time(a), Value::Time(b)) => Ok(a == b),
            (Value::Datetime(a), Value::Datetime(b)) => Ok(a == b),
            (Value::Timedelta(a), Value::Timedelta(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Unit, Value::Unit) => Ok(true),
            _ => Err(Self::mismatch("==", self, other)),
        }
    }

    /// `<`/`<=`/`>`/`>=`: a total order within `Number`, `Date`, `Time`,
    /// `Datetime`, `Timedelta`, and `String`; undefined across variants or
    /// for `Bool`/`Unit`.
    pub fn compare(&self, other: &Value) -> ValueResult<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(a.cmp(b)),
            (Value::Date(a), Value::Date(b)) => Ok(a.cmp(b)),
            (Value::Time(a), Value::Time(b)) => Ok(a.cmp(b)),
            (Value::Datetime(a), Value::Datetime(b)) => Ok(a.cmp(b)),
            (Value::Timedelta(a), Value::Timedelta(b)) => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
            _ => Err(Self::mismatch("comparison", self, other)),
        }
    }

    /// `.field` access (§4.3): which fields exist depends on the variant.
    pub fn field(&self, name: &str) -> ValueResult<Value> {
        let unknown = || ValueError::UnknownField { variant: self.variant_name(), field: name.to_string() };
        match self {
            Value::Timedelta(t) => Ok(Value::Number(match name {
                "years" => t.years,
                "months" => t.months,
                "weeks" => t.weeks,
                "days" => t.days,
                "hours" => t.hours,
                "minutes" => t.minutes,
                "seconds" => t.seconds,
                _ => return Err(unknown()),
            })),
            Value::Date(d) => Ok(Value::Number(match name {
                "years" => d.year() as i64,
                "months" => d.month() as i64,
                "days" => d.day() as i64,
                _ => return Err(unknown()),
            })),
            Value::Time(t) => Ok(Value::Number(match name {
                "hours" => t.hour() as i64,
                "minutes" => t.minute() as i64,
                "seconds" => t.second() as i64,
                _ => return Err(unknown()),
            })),
            Value::Datetime(dt) => Ok(Value::Number(match name {
                "years" => dt.year() as i64,
                "months" => dt.month() as i64,
                "days" => dt.day() as i64,
                "hours" => dt.hour() as i64,
                "minutes" => dt.minute() as i64,
                "seconds" => dt.second() as i64,
                _ => return Err(unknown()),
            })),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Value {
    /// The canonical `print` string forms of §4.4.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{:02}.{:02}.{:04}", d.day(), d.month(), d.year()),
            Value::Time(t) => write!(f, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second()),
            Value::Datetime(dt) => write!(
                f,
                "{:02}.{:02}.{:04}~{:02}:{:02}:{:02}",
                dt.day(),
                dt.month(),
                dt.year(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            Value::Timedelta(t) => t.fmt(f),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Unit => Ok(()),
        }
    }
}

fn check_year(year: i32) -> ValueResult<()> {
    if !(1..=9999).contains(&year) {
        return Err(ValueError::OutOfRange(format!(
            "year {year} is outside the representable range 1..9999"
        )));
    }
    Ok(())
}

fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Adds a signed month delta to `date`, clamping the day-of-month to the
/// last valid day of the resulting month (§4.3: "apply years first, then
/// months, then re-clamp day-of-month").
fn add_months_clamped(date: NaiveDate, total_months: i64) -> ValueResult<NaiveDate> {
    let total = date.year() as i64 * 12 + (date.month() as i64 - 1) + total_months;
    let new_year = total.div_euclid(12);
    let new_month = total.rem_euclid(12) as u32 + 1;
    let new_year = i32::try_from(new_year).map_err(|_| ValueError::OutOfRange("year out of range".into()))?;
    check_year(new_year)?;
    let day = date.day().min(last_day_of_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, day).ok_or_else(|| ValueError::OutOfRange("invalid calendar date".into()))
}

fn apply_to_date(date: NaiveDate, td: Timedelta, sign: i64) -> ValueResult<NaiveDate> {
    apply_to_datetime(NaiveDateTime::new(date, NaiveTime::MIN), td, sign).map(|dt| dt.date())
}

/// Applies a timedelta to a datetime anchor, carrying the sub-calendar part
/// (weeks through seconds) with ordinary civil-time arithmetic.
fn apply_to_datetime(dt: NaiveDateTime, td: Timedelta, sign: i64) -> ValueResult<NaiveDateTime> {
    let date = add_months_clamped(dt.date(), td.total_months() * sign)?;
    let stepped = NaiveDateTime::new(date, dt.time());
    let seconds = td.sub_calendar_seconds() * sign;
    let result = stepped
        .checked_add_signed(Duration::seconds(seconds))
        .ok_or_else(|| ValueError::OutOfRange("datetime overflow".into()))?;
    check_year(result.year())?;
    Ok(result)
}

/// Applies only the sub-day part of a timedelta to a bare time of day,
/// wrapping modulo 24h and discarding any day overflow (§4.3): years and
/// months have no meaning without an anchor date, so they do not
/// contribute.
fn apply_to_time(time: NaiveTime, td: Timedelta, sign: i64) -> NaiveTime {
    let seconds = td.sub_calendar_seconds() * sign;
    time.overflowing_add_signed(Duration::seconds(seconds)).0
}

struct Hms {
    hours: i64,
    minutes: i64,
    seconds: i64,
}

fn seconds_to_hms(total_seconds: i64) -> Hms {
    let hours = total_seconds / 3600;
    let remainder = total_seconds % 3600;
    let minutes = remainder / 60;
    let seconds = remainder % 60;
    Hms { hours, minutes, seconds }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn td(years: i64, months: i64, weeks: i64, days: i64, hours: i64, minutes: i64, seconds: i64) -> Value {
        Value::Timedelta(Timedelta::new(years, months, weeks, days, hours, minutes, seconds))
    }

    #[test]
    fn leap_year_month_clamp() {
        let result = date(2024, 1, 31).add(&td(0, 1, 0, 0, 0, 0, 0)).unwrap();
        assert_eq!(result.to_string(), "29.02.2024");
    }

    #[test]
    fn non_leap_year_month_clamp() {
        let result = date(2023, 1, 31).add(&td(0, 1, 0, 0, 0, 0, 0)).unwrap();
        assert_eq!(result.to_string(), "28.02.2023");
    }

    #[test]
    fn datetime_carries_across_midnight() {
        let dt = Value::Datetime(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(23, 59, 59).unwrap(),
        );
        let result = dt.add(&td(0, 0, 0, 0, 0, 0, 1)).unwrap();
        assert_eq!(result.to_string(), "02.01.2020~00:00:00");
    }

    #[test]
    fn time_wraps_without_carrying_the_day() {
        let t = Value::Time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        let result = t.add(&td(0, 0, 0, 0, 0, 0, 2)).unwrap();
        assert_eq!(result.to_string(), "00:00:01");
    }

    #[test]
    fn integer_division_truncates_toward_zero() {
        assert_eq!(Value::Number(-7).div(&Value::Number(2)).unwrap(), Value::Number(-3));
        assert_eq!(Value::Number(7).div(&Value::Number(-2)).unwrap(), Value::Number(-3));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(Value::Number(1).div(&Value::Number(0)), Err(ValueError::DivisionByZero));
    }

    #[test]
    fn add_then_subtract_same_timedelta_round_trips_without_clamping() {
        let original = date(2021, 6, 15);
        let delta = td(0, 0, 2, 3, 0, 0, 0);
        let forward = original.add(&delta).unwrap();
        let back = forward.sub(&delta).unwrap();
        assert_eq!(original, back);
    }

    #[test]
    fn cross_variant_equality_is_an_error() {
        assert!(Value::Number(1).values_equal(&Value::String("1".into())).is_err());
    }

    #[test]
    fn field_access_round_trips_timedelta_components() {
        let value = Timedelta::new(1, 2, 3, 4, 5, 6, 7);
        let v = Value::Timedelta(value);
        assert_eq!(v.field("years").unwrap(), Value::Number(1));
        assert_eq!(v.field("months").unwrap(), Value::Number(2));
        assert_eq!(v.field("weeks").unwrap(), Value::Number(3));
        assert_eq!(v.field("days").unwrap(), Value::Number(4));
        assert_eq!(v.field("hours").unwrap(), Value::Number(5));
        assert_eq!(v.field("minutes").unwrap(), Value::Number(6));
        assert_eq!(v.field("seconds").unwrap(), Value::Number(7));
    }

    #[test]
    fn date_has_no_hours_field() {
        assert!(date(2020, 1, 1).field("hours").is_err());
    }

    #[test]
    fn date_minus_date_is_days_only() {
        let a = date(2020, 1, 10);
        let b = date(2020, 1, 1);
        assert_eq!(a.sub(&b).unwrap(), td(0, 0, 0, 9, 0, 0, 0));
    }
}
