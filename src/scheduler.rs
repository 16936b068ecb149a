//! Interval scheduler for named periodic jobs.

use crate::Error;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub type JobFuture = Pin<Box<dyn Future<Output = Result<(), Error>> + Send>>;

type JobFn = Arc<dyn Fn() -> JobFuture + Send + Sync>;

/// A named job run every `interval`.
#[derive(Clone)]
pub struct PeriodicJob {
	name: String,
	interval: Duration,
	run_on_start: bool,
	run: JobFn,
}

impl PeriodicJob {
	pub fn new<F, Fut>(name: impl Into<String>, interval: Duration, run: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<(), Error>> + Send + 'static,
	{
		Self {
			name: name.into(),
			interval,
			run_on_start: true,
			run: Arc::new(move || Box::pin(run()) as JobFuture),
		}
	}

	/// Wait one full interval before the first run.
	pub fn delay_first_run(mut self) -> Self {
		self.run_on_start = false;
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Run the job a single time.
	pub async fn run_once(&self) -> Result<(), Error> {
		(self.run)().await
	}
}

impl std::fmt::Debug for PeriodicJob {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.debug_struct("PeriodicJob")
			.field("name", &self.name)
			.field("interval", &self.interval)
			.field("run_on_start", &self.run_on_start)
			.finish()
	}
}

#[derive(Debug, Default)]
pub struct Scheduler {
	jobs: Vec<PeriodicJob>,
}

impl Scheduler {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, job: PeriodicJob) -> Result<(), Error> {
		if job.interval.is_zero() {
			return Err(Error::Config(format!("interval for {} must be positive", job.name)));
		}
		if self.jobs.iter().any(|x| x.name == job.name) {
			return Err(Error::Config(format!("duplicate job name: {}", job.name)));
		}
		self.jobs.push(job);
		Ok(())
	}

	pub fn jobs(&self) -> &[PeriodicJob] {
		&self.jobs
	}

	/// Run every job once, one after another, in registration order.
	///
	/// Jobs registered with [`PeriodicJob::delay_first_run`] are left out.
	pub async fn run_all_once(&self) -> Vec<(&str, Result<(), Error>)> {
		let mut results = Vec::with_capacity(self.jobs.len());
		for job in self.jobs.iter().filter(|x| x.run_on_start) {
			results.push((job.name(), job.run_once().await));
		}
		results
	}

	/// Start ticking every job, beginning immediately unless the job delays its first run.
	///
	/// Each tick runs in its own task, so a slow run never delays the next
	/// tick and runs of the same job may overlap. Errors are logged and the
	/// job keeps its schedule.
	pub fn start(self) -> SchedulerHandle {
		let tickers = self.jobs.into_iter().map(spawn_ticker).collect();
		SchedulerHandle { tickers }
	}
}

fn spawn_ticker(job: PeriodicJob) -> JoinHandle<()> {
	log::info!("Scheduling {} every {} minutes", job.name, job.interval.as_secs_f64() / 60.0);
	tokio::spawn(async move {
		let start = if job.run_on_start {
			Instant::now()
		} else {
			Instant::now() + job.interval
		};
		let mut ticker = tokio::time::interval_at(start, job.interval);
		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
		loop {
			ticker.tick().await;
			let run = (job.run)();
			let name = job.name.clone();
			tokio::spawn(async move {
				if let Err(e) = run.await {
					log::error!("Job {} failed: {}", name, e);
				}
			});
		}
	})
}

/// Running scheduler. Dropping it stops all tickers.
pub struct SchedulerHandle {
	tickers: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
	pub fn shutdown(self) {
		drop(self)
	}
}

impl Drop for SchedulerHandle {
	fn drop(&mut self) {
		for ticker in &self.tickers {
			ticker.abort();
		}
	}
}
