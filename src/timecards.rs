//! Two-phase timecard retrieval: list summaries, then fetch each in full.

use crate::api_client::ApiClient;
use crate::types::{Timecard, TimecardFilters};
use crate::Error;
use chrono::{Datelike, Duration, NaiveDate};

/// Full timecards retrieved for a window, plus the ones that could not be.
#[derive(Debug, Default)]
pub struct TimecardAggregation {
	pub timecards: Vec<Timecard>,
	pub skipped: Vec<SkippedTimecard>,
}

#[derive(Debug)]
pub struct SkippedTimecard {
	pub id: String,
	pub error: String,
}

/// The Sunday one week before the most recent Sunday on or before `today`.
pub fn two_sundays_ago(today: NaiveDate) -> NaiveDate {
	let last_sunday = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
	last_sunday - Duration::weeks(1)
}

/// Filters covering the two-week lookback window ending today.
pub fn lookback_filters(today: NaiveDate) -> TimecardFilters {
	TimecardFilters::new().start_date(two_sundays_ago(today))
}

/// Fetch the full timecard for every summary matching `filters`.
///
/// Failing to list the summaries fails the call. A failed detail fetch only
/// drops that timecard, which is recorded in [`TimecardAggregation::skipped`].
/// Detail requests are made one at a time.
pub async fn aggregate_timecards(api: &ApiClient, filters: &TimecardFilters) -> Result<TimecardAggregation, Error> {
	let summaries = api.get_timecard_summaries(filters).await?;
	log::debug!("Found {} timecard summaries", summaries.len());

	let mut aggregation = TimecardAggregation::default();
	for summary in summaries {
		match api.get_timecard(&summary.id).await {
			Ok(timecard) => aggregation.timecards.push(timecard),
			Err(e) => {
				log::warn!("Skipping timecard {}: {}", summary.id, e);
				aggregation.skipped.push(SkippedTimecard {
					id: summary.id,
					error: e.to_string(),
				});
			},
		}
	}

	Ok(aggregation)
}

#[cfg(test)]
mod test {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn window_starts_one_week_before_last_sunday() {
		// 2026-10-18 is a Sunday.
		assert_eq!(two_sundays_ago(date(2026, 10, 18)), date(2026, 10, 11));
		assert_eq!(two_sundays_ago(date(2026, 10, 19)), date(2026, 10, 11));
		assert_eq!(two_sundays_ago(date(2026, 10, 24)), date(2026, 10, 11));
		assert_eq!(two_sundays_ago(date(2026, 10, 25)), date(2026, 10, 18));
	}

	#[test]
	fn window_crosses_year_boundary() {
		// 2027-01-02 is a Saturday, the previous Sunday is 2026-12-27.
		assert_eq!(two_sundays_ago(date(2027, 1, 2)), date(2026, 12, 20));
	}

	#[test]
	fn lookback_only_sets_start_date() {
		let filters = lookback_filters(date(2026, 10, 21));
		assert_eq!(filters.start_date, Some(date(2026, 10, 11)));
		assert_eq!(filters.end_date, None);
		assert_eq!(filters.cursor, None);
	}
}
