//! Time source for case and financial record dates.

use chrono::NaiveDateTime;

/// Supplies the current local date/time.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock frozen at a settable instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

/// Parse `YYYY-MM-DD` (midnight) or `YYYY-MM-DD HH:MM[:SS]` (space or `T`).
pub fn parse_date_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(input, f).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let parsed = parse_date_time("2024-01-15").unwrap();
        assert_eq!(parsed.to_string(), "2024-01-15 00:00:00");
    }

    #[test]
    fn test_parse_with_time() {
        assert_eq!(
            parse_date_time("2024-01-15 14:30").unwrap().to_string(),
            "2024-01-15 14:30:00"
        );
        assert_eq!(
            parse_date_time(" 2024-01-15T09:05:10 ").unwrap().to_string(),
            "2024-01-15 09:05:10"
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_time("next tuesday").is_none());
        assert!(parse_date_time("2024-13-01").is_none());
    }

    #[test]
    fn test_fixed_clock() {
        let start = parse_date_time("2024-03-01").unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.now(), start);
    }
}
