//! Time utilities for the restaurant's local clock.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Indochina Time (Asia/Bangkok): UTC+7, no daylight saving.
pub const ICT_OFFSET_SECS: i32 = 7 * 3600;

pub fn ict_offset() -> FixedOffset {
    // 7h is always inside chrono's ±24h range.
    FixedOffset::east_opt(ICT_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Current instant expressed in Bangkok local time.
pub fn bangkok_now() -> DateTime<FixedOffset> {
    to_bangkok(Utc::now())
}

pub fn to_bangkok(instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.with_timezone(&ict_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn bangkok_is_seven_hours_ahead_of_utc() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 30, 20, 15, 0).unwrap();
        let local = to_bangkok(utc);

        assert_eq!(local.offset().local_minus_utc(), 7 * 3600);
        assert_eq!(local.hour(), 3);
        assert_eq!(local.to_rfc3339(), "2025-03-31T03:15:00+07:00");
        assert_eq!(local, utc);
    }

    #[test]
    fn now_carries_the_ict_offset() {
        let before = Utc::now();
        let now = bangkok_now();
        let after = Utc::now();

        assert_eq!(now.offset().local_minus_utc(), ICT_OFFSET_SECS);
        let now_utc = now.with_timezone(&Utc);
        assert!(now_utc >= before && now_utc <= after);
    }
}
