//! Records as served by the HeavyJob API.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Employee {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub first_name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub last_name: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub is_foreman: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Equipment {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub make: String,
	#[serde(deserialize_with = "null_as_default")]
	pub model: String,
}

/// One row of the `/timeCardInfo` listing.
///
/// Only used to discover which timecards to fetch in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimecardSummary {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub foreman_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub job_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub date: String,
	#[serde(deserialize_with = "null_as_default")]
	pub revision: i64,
	#[serde(deserialize_with = "null_as_default")]
	pub last_modified_date_time: String,
	#[serde(deserialize_with = "null_as_default")]
	pub last_modified_precise_date_time: String,
	#[serde(deserialize_with = "null_as_default")]
	pub sent_to_payroll_date_time: String,
	#[serde(deserialize_with = "null_as_default")]
	pub sent_to_payroll_revision: i64,
	#[serde(deserialize_with = "null_as_default")]
	pub is_approved: bool,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
	#[serde(default = "Vec::new", deserialize_with = "null_as_default")]
	pub results: Vec<T>,
	#[serde(default)]
	pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
	#[serde(default)]
	pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Timecard {
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub foreman_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub foreman_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub foreman_description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub job_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub job_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub job_description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub business_unit_description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub date: String,
	#[serde(deserialize_with = "null_as_default")]
	pub revision: i64,
	#[serde(deserialize_with = "null_as_default")]
	pub is_approved: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub approved_by_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub is_reviewed: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub reviewed_by_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub is_accepted: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub accepted_by_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub is_rejected: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub rejected_by_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub sent_to_payroll_revision: i64,
	#[serde(deserialize_with = "null_as_default")]
	pub sent_to_payroll_date_time: String,
	#[serde(deserialize_with = "null_as_default")]
	pub last_modified_date_time: String,
	#[serde(deserialize_with = "null_as_default")]
	pub cost_codes: Vec<CostCode>,
	#[serde(deserialize_with = "null_as_default")]
	pub employees: Vec<TimecardEmployee>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CostCode {
	#[serde(rename = "timeCardCostCodeId")]
	#[serde(deserialize_with = "null_as_default")]
	pub timecard_cost_code_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub cost_code_id: String,
	#[serde(rename = "costCodeCode")]
	#[serde(deserialize_with = "null_as_default")]
	pub code: String,
	#[serde(rename = "costCodeDescription")]
	#[serde(deserialize_with = "null_as_default")]
	pub description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub is_rework: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub is_tm: bool,
	#[serde(deserialize_with = "null_as_default")]
	pub quantity: f64,
	#[serde(rename = "unitOfMeasure")]
	#[serde(deserialize_with = "null_as_default")]
	pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimecardEmployee {
	#[serde(rename = "timeCardEmployeeId")]
	#[serde(deserialize_with = "null_as_default")]
	pub timecard_employee_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub employee_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub employee_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub employee_description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub pay_class_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub pay_class_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub pay_class_description: String,
	#[serde(deserialize_with = "null_as_default")]
	pub regular_hours: Vec<EmployeeHours>,
	#[serde(deserialize_with = "null_as_default")]
	pub overtime_hours: Vec<EmployeeHours>,
	#[serde(rename = "doubleOvertimeHours")]
	#[serde(deserialize_with = "null_as_default")]
	pub doubletime_hours: Vec<EmployeeHours>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmployeeHours {
	#[serde(rename = "timeCardCostCodeId")]
	#[serde(deserialize_with = "null_as_default")]
	pub timecard_cost_code_id: String,
	#[serde(deserialize_with = "null_as_default")]
	pub tag_code: String,
	#[serde(deserialize_with = "null_as_default")]
	pub hours: f64,
}

/// Filters accepted by `/timeCardInfo`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimecardFilters {
	pub job_id: Option<String>,
	pub foreman_id: Option<String>,
	pub employee_id: Option<String>,
	pub start_date: Option<NaiveDate>,
	pub end_date: Option<NaiveDate>,
	pub modified_since: Option<String>,
	pub cursor: Option<String>,
}

impl TimecardFilters {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn start_date(mut self, date: NaiveDate) -> Self {
		self.start_date = Some(date);
		self
	}

	pub fn end_date(mut self, date: NaiveDate) -> Self {
		self.end_date = Some(date);
		self
	}

	pub fn job_id(mut self, id: impl Into<String>) -> Self {
		self.job_id = Some(id.into());
		self
	}

	pub fn foreman_id(mut self, id: impl Into<String>) -> Self {
		self.foreman_id = Some(id.into());
		self
	}

	pub fn employee_id(mut self, id: impl Into<String>) -> Self {
		self.employee_id = Some(id.into());
		self
	}

	pub fn modified_since(mut self, timestamp: impl Into<String>) -> Self {
		self.modified_since = Some(timestamp.into());
		self
	}
}

impl crate::api_client::CursorFilters for TimecardFilters {
	fn cursor(&self) -> Option<&str> {
		self.cursor.as_deref()
	}

	fn set_cursor(&mut self, cursor: String) {
		self.cursor = Some(cursor);
	}

	fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs: Vec<(&'static str, String)> = Vec::new();
		let mut push = |key: &'static str, value: Option<String>| {
			if let Some(value) = value.filter(|x| !x.is_empty()) {
				pairs.push((key, value));
			}
		};
		push("jobId", self.job_id.clone());
		push("foremanId", self.foreman_id.clone());
		push("employeeId", self.employee_id.clone());
		push("startDate", self.start_date.map(|x| x.format("%Y-%m-%d").to_string()));
		push("endDate", self.end_date.map(|x| x.format("%Y-%m-%d").to_string()));
		push("modifiedSince", self.modified_since.clone());
		push("cursor", self.cursor.clone());
		pairs
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::api_client::CursorFilters;

	#[test]
	fn empty_filters_render_no_pairs() {
		assert!(TimecardFilters::new().query_pairs().is_empty());
		let filters = TimecardFilters::new().job_id("");
		assert!(filters.query_pairs().is_empty());
	}

	#[test]
	fn filters_render_in_fixed_order() {
		let mut filters = TimecardFilters::new()
			.start_date(NaiveDate::from_ymd_opt(2026, 10, 4).unwrap())
			.foreman_id("f-1");
		filters.set_cursor("abc".into());
		assert_eq!(filters.query_pairs(), vec![
			("foremanId", "f-1".to_string()),
			("startDate", "2026-10-04".to_string()),
			("cursor", "abc".to_string()),
		]);
	}

	#[test]
	fn timecard_decodes_wire_names() {
		let json = r#"{
			"id": "tc-1",
			"jobId": "job-1",
			"isApproved": true,
			"costCodes": [{"timeCardCostCodeId": "tcc-1", "costCodeCode": "100", "isTm": true, "quantity": 12.125, "unitOfMeasure": "CY"}],
			"employees": [{"timeCardEmployeeId": "tce-1", "doubleOvertimeHours": [{"timeCardCostCodeId": "tcc-1", "tagCode": "A", "hours": 1.5}]}],
			"somethingNew": 42
		}"#;
		let timecard: Timecard = serde_json::from_str(json).unwrap();
		assert_eq!(timecard.id, "tc-1");
		assert!(timecard.is_approved);
		assert_eq!(timecard.cost_codes[0].code, "100");
		assert!(timecard.cost_codes[0].is_tm);
		assert_eq!(timecard.cost_codes[0].quantity, 12.125);
		assert_eq!(timecard.cost_codes[0].unit, "CY");
		assert_eq!(timecard.employees[0].doubletime_hours[0].hours, 1.5);
		assert!(timecard.employees[0].regular_hours.is_empty());
	}

	#[test]
	fn nulls_decode_as_defaults() {
		let json = r#"{
			"id": "tc-1",
			"approvedById": null,
			"isApproved": null,
			"revision": null,
			"sentToPayrollDateTime": null,
			"costCodes": null,
			"employees": [{"timeCardEmployeeId": "tce-1", "regularHours": null, "overtimeHours": [{"tagCode": null, "hours": null}]}]
		}"#;
		let timecard: Timecard = serde_json::from_str(json).unwrap();
		assert_eq!(timecard.approved_by_id, "");
		assert!(!timecard.is_approved);
		assert_eq!(timecard.revision, 0);
		assert!(timecard.cost_codes.is_empty());
		assert!(timecard.employees[0].regular_hours.is_empty());
		assert_eq!(timecard.employees[0].overtime_hours[0].tag_code, "");
		assert_eq!(timecard.employees[0].overtime_hours[0].hours, 0.0);

		let jobs: Vec<Job> = serde_json::from_str(r#"[{"id": "job-1", "description": null, "code": "J1"}]"#).unwrap();
		assert_eq!(jobs[0].description, "");
		assert_eq!(jobs[0].code, "J1");

		let page: Page<TimecardSummary> = serde_json::from_str(r#"{"results": null, "metadata": {"nextCursor": null}}"#).unwrap();
		assert!(page.results.is_empty());
		assert_eq!(page.metadata.next_cursor, None);
	}
}
