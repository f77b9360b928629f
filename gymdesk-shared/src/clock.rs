/// Injected calendar/timezone dependency
///
/// Every engine operation that reasons about "today", "this week", or
/// "this month" does so through a [`Clock`]. The reference instant is
/// captured once at the start of an operation, and all day boundaries are
/// computed against a single configured UTC offset (the gym's local time,
/// UTC+8 by default), never against ambient server-local time.
///
/// # Example
///
/// ```
/// use gymdesk_shared::clock::{Clock, SystemClock};
///
/// let clock = SystemClock::default();
/// let now = clock.now();
/// assert!(clock.day_start() <= now);
/// assert!(now < clock.day_end());
/// ```

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Default gym timezone offset in hours east of UTC (Asia/Shanghai)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;

/// Time source plus the fixed offset all calendar math runs in
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Offset of the gym's local timezone
    fn offset(&self) -> FixedOffset;

    /// Converts a local wall-clock datetime to its UTC instant
    fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&(local - self.offset()))
    }

    /// Today's calendar date in the gym's timezone
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&self.offset()).date_naive()
    }

    /// 00:00:00 of the current local day, as a UTC instant
    fn day_start(&self) -> DateTime<Utc> {
        self.to_utc(self.today().and_time(NaiveTime::MIN))
    }

    /// 00:00:00 of the next local day, as a UTC instant (exclusive bound)
    fn day_end(&self) -> DateTime<Utc> {
        self.day_start() + Duration::days(1)
    }

    /// First day of the current local month at 00:00:00, as a UTC instant
    fn month_start(&self) -> DateTime<Utc> {
        let today = self.today();
        let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .expect("first of month is a valid date");
        self.to_utc(first.and_time(NaiveTime::MIN))
    }

    /// Monday 00:00:00 of the current local week, as a UTC instant
    fn week_start(&self) -> DateTime<Utc> {
        let today = self.today();
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        self.to_utc(monday.and_time(NaiveTime::MIN))
    }
}

/// Real clock bound to a configured fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Builds a clock for an offset given in whole hours east of UTC
    ///
    /// Returns `None` for offsets outside the valid -23..=23 range.
    pub fn from_east_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(Self::new)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .expect("default offset is valid"),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to one instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub instant: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { instant, offset }
    }

    /// Fixed clock in the default gym timezone
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600)
                .expect("default offset is valid"),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}
