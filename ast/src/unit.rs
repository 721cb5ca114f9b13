use std::fmt;

/// One of the seven calendar/clock granularities recognized both as a
/// `.field` access name and as a `from ... by <unit>` step unit (§3: "field
/// words"); the lexer classifies all seven as keywords rather than plain
/// identifiers so a typo like `.foo` is rejected at parse time, not silently
/// accepted as an unknown-field runtime error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnitWord {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl UnitWord {
    pub const ALL: [UnitWord; 7] = [
        UnitWord::Years,
        UnitWord::Months,
        UnitWord::Weeks,
        UnitWord::Days,
        UnitWord::Hours,
        UnitWord::Minutes,
        UnitWord::Seconds,
    ];

    pub fn from_str(s: &str) -> Option<UnitWord> {
        Some(match s {
            "years" => UnitWord::Years,
            "months" => UnitWord::Months,
            "weeks" => UnitWord::Weeks,
            "days" => UnitWord::Days,
            "hours" => UnitWord::Hours,
            "minutes" => UnitWord::Minutes,
            "seconds" => UnitWord::Seconds,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitWord::Years => "years",
            UnitWord::Months => "months",
            UnitWord::Weeks => "weeks",
            UnitWord::Days => "days",
            UnitWord::Hours => "hours",
            UnitWord::Minutes => "minutes",
            UnitWord::Seconds => "seconds",
        }
    }
}

impl fmt::Display for UnitWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
