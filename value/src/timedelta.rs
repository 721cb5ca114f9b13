use std::fmt;

/// A signed duration with seven named components, stored exactly as written
/// and not normalized until it is applied to a date, time, or datetime
/// anchor (§3, §4.3 of the specification).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timedelta {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Timedelta {
    pub const ZERO: Timedelta = Timedelta { years: 0, months: 0, weeks: 0, days: 0, hours: 0, minutes: 0, seconds: 0 };

    pub fn new(
        years: i64,
        months: i64,
        weeks: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self { years, months, weeks, days, hours, minutes, seconds }
    }

    /// `years*12 + months`, the single signed month delta applied to a
    /// calendar anchor before day-of-month clamping.
    pub fn total_months(&self) -> i64 {
        self.years * 12 + self.months
    }

    /// Total seconds across weeks/days/hours/minutes/seconds — the
    /// sub-calendar part of the delta, carried with ordinary civil-time
    /// (Gregorian) arithmetic rather than re-applied unit by unit.
    pub fn sub_calendar_seconds(&self) -> i64 {
        ((self.weeks * 7 + self.days) * 24 + self.hours) * 3600 + self.minutes * 60 + self.seconds
    }

    pub fn checked_add(self, other: Timedelta) -> Option<Timedelta> {
        Some(Timedelta {
            years: self.years.checked_add(other.years)?,
            months: self.months.checked_add(other.months)?,
            weeks: self.weeks.checked_add(other.weeks)?,
            days: self.days.checked_add(other.days)?,
            hours: self.hours.checked_add(other.hours)?,
            minutes: self.minutes.checked_add(other.minutes)?,
            seconds: self.seconds.checked_add(other.seconds)?,
        })
    }

    pub fn checked_sub(self, other: Timedelta) -> Option<Timedelta> {
        Some(Timedelta {
            years: self.years.checked_sub(other.years)?,
            months: self.months.checked_sub(other.months)?,
            weeks: self.weeks.checked_sub(other.weeks)?,
            days: self.days.checked_sub(other.days)?,
            hours: self.hours.checked_sub(other.hours)?,
            minutes: self.minutes.checked_sub(other.minutes)?,
            seconds: self.seconds.checked_sub(other.seconds)?,
        })
    }

    pub fn checked_mul(self, n: i64) -> Option<Timedelta> {
        Some(Timedelta {
            years: self.years.checked_mul(n)?,
            months: self.months.checked_mul(n)?,
            weeks: self.weeks.checked_mul(n)?,
            days: self.days.checked_mul(n)?,
            hours: self.hours.checked_mul(n)?,
            minutes: self.minutes.checked_mul(n)?,
            seconds: self.seconds.checked_mul(n)?,
        })
    }

    /// Integer division, truncating each component toward zero.
    pub fn div(self, n: i64) -> Timedelta {
        Timedelta {
            years: self.years / n,
            months: self.months / n,
            weeks: self.weeks / n,
            days: self.days / n,
            hours: self.hours / n,
            minutes: self.minutes / n,
            seconds: self.seconds / n,
        }
    }

    pub fn negate(self) -> Timedelta {
        Timedelta {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }

    pub fn from_days(days: i64) -> Timedelta {
        Timedelta { days, ..Timedelta::ZERO }
    }

    pub fn from_hms(hours: i64, minutes: i64, seconds: i64) -> Timedelta {
        Timedelta { hours, minutes, seconds, ..Timedelta::ZERO }
    }

    pub fn from_dhms(days: i64, hours: i64, minutes: i64, seconds: i64) -> Timedelta {
        Timedelta { days, hours, minutes, seconds, ..Timedelta::ZERO }
    }
}

impl fmt::Display for Timedelta {
    /// The canonical `print` form of §4.4: each non-zero component in
    /// `Y M W D h m s` order as `<n><unit>`, all-zero prints as `'0s'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'")?;
        let parts: [(i64, char); 7] = [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
            (self.hours, 'h'),
            (self.minutes, 'm'),
            (self.seconds, 's'),
        ];
        let mut any = false;
        for (n, unit) in parts {
            if n != 0 {
                write!(f, "{n}{unit}")?;
                any = true;
            }
        }
        if !any {
            write!(f, "0s")?;
        }
        write!(f, "'")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_timedelta_prints_as_0s() {
        assert_eq!(Timedelta::ZERO.to_string(), "'0s'");
    }

    #[test]
    fn display_orders_components_and_skips_zeros() {
        let d = Timedelta::new(1, 0, 0, 3, 0, 0, 5);
        assert_eq!(d.to_string(), "'1Y3D5s'");
    }

    #[test]
    fn division_truncates_toward_zero_per_component() {
        let d = Timedelta::from_hms(0, 0, -7);
        assert_eq!(d.div(2).seconds, -3);
    }
}
