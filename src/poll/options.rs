//! Day-labelled poll options for a Monday-first week.
//!
//! All date arithmetic happens in Berlin time so a run at 23:30 UTC on a
//! Sunday in summer already belongs to the following week.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::core::config::WeekStart;
use crate::core::models::{INTERMEDIATE_SUFFIX, PollOption};

pub const POLL_TIME_ZONE: Tz = chrono_tz::Europe::Berlin;
pub const DAYS_PER_WEEK: u64 = 7;

/// Monday that opens the poll window.
#[must_use]
pub fn window_start(now: DateTime<Utc>, week: WeekStart) -> NaiveDate {
    let today = now.with_timezone(&POLL_TIME_ZONE).date_naive();
    let offset = u64::from(today.weekday().num_days_from_monday());
    let monday = today - Days::new(offset);
    match week {
        WeekStart::Current => monday,
        WeekStart::Next => monday + Days::new(DAYS_PER_WEEK),
    }
}

/// `Monday 03/06` style label.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    date.format("%A %d/%m").to_string()
}

/// Two options per day, base label first, for seven consecutive days.
#[must_use]
pub fn build_poll_options(now: DateTime<Utc>, week: WeekStart) -> Vec<PollOption> {
    let start = window_start(now, week);

    let options: Vec<PollOption> = (0..DAYS_PER_WEEK)
        .map(|i| day_label(start + Days::new(i)))
        .flat_map(|label| {
            let intermediate = format!("{label}{INTERMEDIATE_SUFFIX}");
            [PollOption::text(label), PollOption::text(intermediate)]
        })
        .collect();

    tracing::debug!(count = options.len(), first_day = %start, "Poll options created");
    options
}
