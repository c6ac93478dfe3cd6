//! Calendar arithmetic for renewals and month-window aggregates.

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, Utc};

use crate::domain::model::AmcRenewal;

/// How many days before the contract end the renewal window opens.
pub const RENEWAL_NOTICE_DAYS: i64 = 30;

/// New end and renewal dates for a contract extended by `months` calendar
/// months. A day-of-month missing from the target month clamps to that
/// month's last day (Jan 31 + 1 month lands on Feb 28/29). The renewal date
/// sits [`RENEWAL_NOTICE_DAYS`] before the new end.
pub fn renewal_dates(end_date: DateTime<Utc>, months: u32) -> Option<AmcRenewal> {
    let end = end_date.checked_add_months(Months::new(months))?;
    Some(AmcRenewal {
        end_date: end,
        renewal_date: end - Duration::days(RENEWAL_NOTICE_DAYS),
    })
}

/// First instant of the month containing `now`.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now
        .date_naive()
        .with_day(1)
        .expect("every month has a first day");
    first.and_time(NaiveTime::MIN).and_utc()
}

/// First instant of the month before the one containing `now`.
pub fn prev_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let start = month_start(now);
    start.checked_sub_months(Months::new(1)).unwrap_or(start)
}
