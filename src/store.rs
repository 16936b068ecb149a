//! Persistence of synchronized entities.

use crate::models::{Employee, Equipment, Job, Timecard};
use crate::Error;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Sink for transformed records.
///
/// Each call inserts records with unknown ids and overwrites those with
/// known ids. Calls must be safe to repeat and to run concurrently.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
	async fn upsert_jobs(&self, jobs: Vec<Job>) -> Result<(), Error>;
	async fn upsert_employees(&self, employees: Vec<Employee>) -> Result<(), Error>;
	async fn upsert_equipment(&self, equipment: Vec<Equipment>) -> Result<(), Error>;
	async fn upsert_timecards(&self, timecards: Vec<Timecard>) -> Result<(), Error>;
}

/// Store keeping everything in memory, keyed by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: Mutex<Snapshot>,
}

/// Contents of a [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
	pub jobs: BTreeMap<String, Job>,
	pub employees: BTreeMap<String, Employee>,
	pub equipment: BTreeMap<String, Equipment>,
	pub timecards: BTreeMap<String, Timecard>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn snapshot(&self) -> Snapshot {
		self.lock().clone()
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Snapshot> {
		self.inner.lock().unwrap_or_else(|e| e.into_inner())
	}
}

fn upsert<T>(map: &mut BTreeMap<String, T>, records: Vec<T>, id: impl Fn(&T) -> &str) {
	for record in records {
		map.insert(id(&record).to_string(), record);
	}
}

#[async_trait::async_trait]
impl Store for MemoryStore {
	async fn upsert_jobs(&self, jobs: Vec<Job>) -> Result<(), Error> {
		upsert(&mut self.lock().jobs, jobs, |x| x.id.as_str());
		Ok(())
	}

	async fn upsert_employees(&self, employees: Vec<Employee>) -> Result<(), Error> {
		upsert(&mut self.lock().employees, employees, |x| x.id.as_str());
		Ok(())
	}

	async fn upsert_equipment(&self, equipment: Vec<Equipment>) -> Result<(), Error> {
		upsert(&mut self.lock().equipment, equipment, |x| x.id.as_str());
		Ok(())
	}

	async fn upsert_timecards(&self, timecards: Vec<Timecard>) -> Result<(), Error> {
		upsert(&mut self.lock().timecards, timecards, |x| x.id.as_str());
		Ok(())
	}
}
