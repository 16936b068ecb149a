//! Mapping from HeavyJob records to local entities.
//!
//! Everything here is pure apart from the ids generated for hours entries.

use crate::models::{self, HoursKind};
use crate::types;
use uuid::Uuid;

pub fn transform_jobs(jobs: Vec<types::Job>) -> Vec<models::Job> {
	jobs.into_iter()
		.map(|job| models::Job {
			id: job.id,
			description: job.description,
			job_number: job.code,
		})
		.collect()
}

pub fn transform_employees(employees: Vec<types::Employee>) -> Vec<models::Employee> {
	employees.into_iter()
		.map(|employee| models::Employee {
			id: employee.id,
			employee_number: employee.code,
			first_name: employee.first_name,
			last_name: employee.last_name,
			is_foreman: employee.is_foreman,
		})
		.collect()
}

pub fn transform_equipment(equipment: Vec<types::Equipment>) -> Vec<models::Equipment> {
	equipment.into_iter()
		.map(|equipment| models::Equipment {
			id: equipment.id,
			equipment_number: equipment.code,
			description: equipment.description,
			make: equipment.make,
			model: equipment.model,
		})
		.collect()
}

pub fn transform_timecards(timecards: Vec<types::Timecard>) -> Vec<models::Timecard> {
	timecards.into_iter().map(transform_timecard).collect()
}

pub fn transform_timecard(timecard: types::Timecard) -> models::Timecard {
	let cost_codes = transform_cost_codes(timecard.cost_codes, &timecard.id);
	let employees = transform_timecard_employees(timecard.employees, &timecard.id);
	models::Timecard {
		id: timecard.id,
		job_id: timecard.job_id,
		foreman_id: timecard.foreman_id,
		business_unit_id: timecard.business_unit_id,
		date: timecard.date,
		revision: timecard.revision,
		is_approved: timecard.is_approved,
		approved_by_id: timecard.approved_by_id,
		is_reviewed: timecard.is_reviewed,
		reviewed_by_id: timecard.reviewed_by_id,
		is_accepted: timecard.is_accepted,
		accepted_by_id: timecard.accepted_by_id,
		is_rejected: timecard.is_rejected,
		rejected_by_id: timecard.rejected_by_id,
		sent_to_payroll_revision: timecard.sent_to_payroll_revision,
		sent_to_payroll_date_time: timecard.sent_to_payroll_date_time,
		last_modified_date_time: timecard.last_modified_date_time,
		cost_codes,
		employees,
	}
}

fn transform_cost_codes(cost_codes: Vec<types::CostCode>, timecard_id: &str) -> Vec<models::TimecardCostCode> {
	cost_codes.into_iter()
		.map(|cost_code| models::TimecardCostCode {
			id: cost_code.timecard_cost_code_id,
			timecard_id: timecard_id.to_string(),
			cost_code_id: cost_code.cost_code_id,
			code: cost_code.code,
			description: cost_code.description,
			is_rework: cost_code.is_rework,
			is_tm: cost_code.is_tm,
			quantity: cost_code.quantity,
			unit: cost_code.unit,
		})
		.collect()
}

fn transform_timecard_employees(employees: Vec<types::TimecardEmployee>, timecard_id: &str) -> Vec<models::TimecardEmployee> {
	employees.into_iter()
		.map(|employee| {
			let id = employee.timecard_employee_id;
			models::TimecardEmployee {
				regular_hours: transform_hours(employee.regular_hours, &id, HoursKind::Regular),
				overtime_hours: transform_hours(employee.overtime_hours, &id, HoursKind::Overtime),
				doubletime_hours: transform_hours(employee.doubletime_hours, &id, HoursKind::Doubletime),
				id,
				timecard_id: timecard_id.to_string(),
				employee_id: employee.employee_id,
				pay_class_id: employee.pay_class_id,
			}
		})
		.collect()
}

fn transform_hours(hours: Vec<types::EmployeeHours>, timecard_employee_id: &str, kind: HoursKind) -> Vec<models::EmployeeHours> {
	hours.into_iter()
		.map(|hours| models::EmployeeHours {
			id: Uuid::new_v4(),
			timecard_employee_id: timecard_employee_id.to_string(),
			timecard_cost_code_id: hours.timecard_cost_code_id,
			tag_code: hours.tag_code,
			hours: hours.hours,
			kind,
		})
		.collect()
}
