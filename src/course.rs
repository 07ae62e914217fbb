//! Course opening hours and the UK clock-change window.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Utc};

/// The course opens at 7am year round.
const OPENING_HOUR: u32 = 7;
/// Last tee time is 9pm in summer, 5pm in winter.
const SUMMER_CLOSING_HOUR: u32 = 21;
const WINTER_CLOSING_HOUR: u32 = 17;

/// 01:00 UTC on the last Sunday of the given month.
///
/// March and October both have 31 days, which is all this is used for.
fn clock_change(year: i32, month: u32) -> DateTime<Utc> {
  let month_end = NaiveDate::from_ymd_opt(year, month, 31).expect("valid month end");
  let sunday = month_end - Days::new(u64::from(month_end.weekday().num_days_from_sunday()));
  Utc.from_utc_datetime(&sunday.and_hms_opt(1, 0, 0).expect("valid time"))
}

/// Whether the given instant falls within British Summer Time.
///
/// BST runs from 01:00 UTC on the last Sunday of March until 01:00 UTC on the
/// last Sunday of October, computed for the instant's own year.
pub fn is_bst<Tz: TimeZone>(date: &DateTime<Tz>) -> bool {
  let year = date.year();
  let instant = date.with_timezone(&Utc);
  instant >= clock_change(year, 3) && instant < clock_change(year, 10)
}

/// Whether the course is open at the given local time.
///
/// 7am to 9pm during BST, 7am to 5pm the rest of the year. The hour is read
/// from `now`'s own offset, so callers pass local wall-clock time.
pub fn within_opening_hours<Tz: TimeZone>(now: &DateTime<Tz>) -> bool {
  let closing = if is_bst(now) {
    SUMMER_CLOSING_HOUR
  } else {
    WINTER_CLOSING_HOUR
  };
  (OPENING_HOUR..closing).contains(&now.hour())
}
