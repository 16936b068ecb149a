//! The refresh tasks and their registration with the [`Scheduler`].

use crate::api_client::ApiClient;
use crate::config::{minutes, Intervals};
use crate::scheduler::{PeriodicJob, Scheduler};
use crate::session::SessionManager;
use crate::store::Store;
use crate::timecards::{aggregate_timecards, lookback_filters};
use crate::transform;
use crate::Error;
use chrono::NaiveDate;
use std::sync::Arc;

pub const TOKEN: &str = "token";
pub const JOBS: &str = "jobs";
pub const EMPLOYEES: &str = "employees";
pub const EQUIPMENT: &str = "equipment";
pub const TIMECARDS: &str = "timecards";

/// Outcome of a timecard refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimecardRefresh {
	pub saved: usize,
	/// Ids of timecards whose details could not be fetched.
	pub skipped: Vec<String>,
}

/// Refresh all jobs, returning the number saved.
pub async fn refresh_jobs<S: Store + ?Sized>(api: &ApiClient, store: &S) -> Result<usize, Error> {
	log::info!("Refreshing jobs...");
	let jobs = transform::transform_jobs(api.get_jobs().await?);
	let count = jobs.len();
	store.upsert_jobs(jobs).await?;
	Ok(count)
}

/// Refresh all employees, returning the number saved.
pub async fn refresh_employees<S: Store + ?Sized>(api: &ApiClient, store: &S) -> Result<usize, Error> {
	log::info!("Refreshing employees...");
	let employees = transform::transform_employees(api.get_employees().await?);
	let count = employees.len();
	store.upsert_employees(employees).await?;
	Ok(count)
}

/// Refresh all equipment, returning the number saved.
pub async fn refresh_equipment<S: Store + ?Sized>(api: &ApiClient, store: &S) -> Result<usize, Error> {
	log::info!("Refreshing equipment...");
	let equipment = transform::transform_equipment(api.get_equipment().await?);
	let count = equipment.len();
	store.upsert_equipment(equipment).await?;
	Ok(count)
}

/// Refresh the timecards of the two-week window ending at `today`.
///
/// Timecards whose details fail to load are left out and reported in
/// [`TimecardRefresh::skipped`]; the rest are still saved.
pub async fn refresh_timecards<S: Store + ?Sized>(api: &ApiClient, store: &S, today: NaiveDate) -> Result<TimecardRefresh, Error> {
	log::info!("Refreshing timecards...");
	let aggregation = aggregate_timecards(api, &lookback_filters(today)).await?;
	let timecards = transform::transform_timecards(aggregation.timecards);
	let saved = timecards.len();
	store.upsert_timecards(timecards).await?;
	Ok(TimecardRefresh {
		saved,
		skipped: aggregation.skipped.into_iter().map(|x| x.id).collect(),
	})
}

/// Register the token refresh and the four entity refreshes.
///
/// The token refresh first runs one interval after start, so `sessions` must already hold a token.
pub fn register(
	scheduler: &mut Scheduler,
	intervals: &Intervals,
	sessions: Arc<SessionManager>,
	api: ApiClient,
	store: Arc<dyn Store>,
) -> Result<(), Error> {
	// The caller fetches the first token before starting the scheduler.
	scheduler.add(PeriodicJob::new(TOKEN, minutes(intervals.token), move || {
		let sessions = sessions.clone();
		async move { sessions.refresh_session().await }
	}).delay_first_run())?;

	scheduler.add(PeriodicJob::new(JOBS, minutes(intervals.jobs), {
		let api = api.clone();
		let store = store.clone();
		move || {
			let api = api.clone();
			let store = store.clone();
			async move {
				let count = refresh_jobs(&api, &*store).await?;
				log::info!("Saved {} jobs", count);
				Ok(())
			}
		}
	}))?;

	scheduler.add(PeriodicJob::new(EMPLOYEES, minutes(intervals.employees), {
		let api = api.clone();
		let store = store.clone();
		move || {
			let api = api.clone();
			let store = store.clone();
			async move {
				let count = refresh_employees(&api, &*store).await?;
				log::info!("Saved {} employees", count);
				Ok(())
			}
		}
	}))?;

	scheduler.add(PeriodicJob::new(EQUIPMENT, minutes(intervals.equipment), {
		let api = api.clone();
		let store = store.clone();
		move || {
			let api = api.clone();
			let store = store.clone();
			async move {
				let count = refresh_equipment(&api, &*store).await?;
				log::info!("Saved {} pieces of equipment", count);
				Ok(())
			}
		}
	}))?;

	scheduler.add(PeriodicJob::new(TIMECARDS, minutes(intervals.timecards), move || {
		let api = api.clone();
		let store = store.clone();
		async move {
			let today = chrono::Local::now().date_naive();
			let refresh = refresh_timecards(&api, &*store, today).await?;
			if refresh.skipped.is_empty() {
				log::info!("Saved {} timecards", refresh.saved);
			} else {
				log::warn!("Saved {} timecards, skipped {}: {}", refresh.saved, refresh.skipped.len(), refresh.skipped.join(", "));
			}
			Ok(())
		}
	}))?;

	Ok(())
}
