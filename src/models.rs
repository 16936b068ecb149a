//! Entities as persisted by the local store.
//!
//! Ids are the HeavyJob ids, except for [`EmployeeHours::id`] which is
//! generated when the record is transformed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
	pub id: String,
	pub description: String,
	pub job_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
	pub id: String,
	pub employee_number: String,
	pub first_name: String,
	pub last_name: String,
	pub is_foreman: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
	pub id: String,
	pub equipment_number: String,
	pub description: String,
	pub make: String,
	pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timecard {
	pub id: String,
	pub job_id: String,
	pub foreman_id: String,
	pub business_unit_id: String,
	pub date: String,
	pub revision: i64,
	pub is_approved: bool,
	pub approved_by_id: String,
	pub is_reviewed: bool,
	pub reviewed_by_id: String,
	pub is_accepted: bool,
	pub accepted_by_id: String,
	pub is_rejected: bool,
	pub rejected_by_id: String,
	pub sent_to_payroll_revision: i64,
	pub sent_to_payroll_date_time: String,
	pub last_modified_date_time: String,
	pub cost_codes: Vec<TimecardCostCode>,
	pub employees: Vec<TimecardEmployee>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimecardCostCode {
	pub id: String,
	pub timecard_id: String,
	pub cost_code_id: String,
	pub code: String,
	pub description: String,
	pub is_rework: bool,
	pub is_tm: bool,
	pub quantity: f64,
	pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimecardEmployee {
	pub id: String,
	pub timecard_id: String,
	pub employee_id: String,
	pub pay_class_id: String,
	pub regular_hours: Vec<EmployeeHours>,
	pub overtime_hours: Vec<EmployeeHours>,
	pub doubletime_hours: Vec<EmployeeHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeHours {
	pub id: Uuid,
	pub timecard_employee_id: String,
	pub timecard_cost_code_id: String,
	pub tag_code: String,
	pub hours: f64,
	#[serde(rename = "type")]
	pub kind: HoursKind,
}

/// The hour bucket an [`EmployeeHours`] entry was reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoursKind {
	Regular,
	Overtime,
	Doubletime,
}
