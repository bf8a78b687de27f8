//! Logbook timestamps
//!
//! Format: `<day> <full month> <hour>:<minute> <AM|PM>` in local time,
//! e.g. `5 March 9:15 AM`. The output always classifies as a logbook line.

use chrono::{Local, NaiveDateTime};

/// Source of the current local time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Formatted timestamp for the current time
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Clock backed by the host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Formats a local time as a logbook timestamp
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format("%-d %B %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line::{classify, LineKind};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn formats_morning() {
        assert_eq!(format_timestamp(at(5, 9, 15)), "5 March 9:15 AM");
    }

    #[test]
    fn formats_afternoon_with_padded_minutes() {
        assert_eq!(format_timestamp(at(16, 23, 5)), "16 March 11:05 PM");
    }

    #[test]
    fn midnight_and_noon_use_twelve() {
        assert_eq!(format_timestamp(at(1, 0, 0)), "1 March 12:00 AM");
        assert_eq!(format_timestamp(at(1, 12, 30)), "1 March 12:30 PM");
    }

    #[test]
    fn fixed_clock_timestamp_is_a_logbook_line() {
        let clock = FixedClock(at(5, 9, 15));
        assert_eq!(classify(&clock.timestamp()), LineKind::Logbook);
    }
}
