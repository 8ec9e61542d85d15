//! Raw form payloads as browsers submit them, and their conversion into
//! validated write records.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::{CONDITIONS_MAX_LEN, CONTACT_MAX_LEN, DATE_FORMAT, NAME_MAX_LEN};
use crate::db::{DriverRecord, RouteRecord, StudentRecord};
use crate::error::RosterError;

#[derive(Debug, Clone, Deserialize)]
pub struct StudentForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    #[serde(default)]
    pub conditions: String,
    #[serde(default)]
    pub contact_info: String,
    /// Blank while the student is unassigned.
    #[serde(default)]
    pub route_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteForm {
    pub route: String,
    #[serde(default)]
    pub driver_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriverForm {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    #[serde(default)]
    pub conditions: String,
    #[serde(default)]
    pub contact_info: String,
}

/// Body of `POST /overridestudent/{route_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct OverrideForm {
    pub student: String,
}

impl TryFrom<StudentForm> for StudentRecord {
    type Error = RosterError;

    fn try_from(form: StudentForm) -> Result<Self, Self::Error> {
        Ok(StudentRecord {
            first_name: required_name("first_name", &form.first_name)?,
            last_name: required_name("last_name", &form.last_name)?,
            dob: parse_dob(&form.dob)?,
            conditions: optional_text("conditions", &form.conditions, CONDITIONS_MAX_LEN)?,
            contact_info: optional_text("contact_info", &form.contact_info, CONTACT_MAX_LEN)?,
            route_id: optional_id("route_id", &form.route_id)?,
        })
    }
}

impl TryFrom<RouteForm> for RouteRecord {
    type Error = RosterError;

    fn try_from(form: RouteForm) -> Result<Self, Self::Error> {
        Ok(RouteRecord {
            route: required_int("route", &form.route)?,
            driver_id: optional_id("driver_id", &form.driver_id)?,
        })
    }
}

impl TryFrom<DriverForm> for DriverRecord {
    type Error = RosterError;

    fn try_from(form: DriverForm) -> Result<Self, Self::Error> {
        Ok(DriverRecord {
            first_name: required_name("first_name", &form.first_name)?,
            last_name: required_name("last_name", &form.last_name)?,
            dob: parse_dob(&form.dob)?,
            conditions: optional_text("conditions", &form.conditions, CONDITIONS_MAX_LEN)?,
            contact_info: optional_text("contact_info", &form.contact_info, CONTACT_MAX_LEN)?,
        })
    }
}

impl OverrideForm {
    pub fn student_id(&self) -> Result<i64, RosterError> {
        required_int("student", &self.student)
    }
}

pub fn parse_dob(raw: &str) -> Result<NaiveDate, RosterError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| RosterError::validation(format!("dob `{raw}` is not a YYYY-MM-DD date")))
}

fn required_name(field: &str, raw: &str) -> Result<String, RosterError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RosterError::validation(format!("{field} is required")));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(RosterError::validation(format!(
            "{field} exceeds {NAME_MAX_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

fn optional_text(field: &str, raw: &str, max_len: usize) -> Result<Option<String>, RosterError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max_len {
        return Err(RosterError::validation(format!(
            "{field} exceeds {max_len} characters"
        )));
    }
    Ok(Some(value.to_string()))
}

fn required_int(field: &str, raw: &str) -> Result<i64, RosterError> {
    raw.trim()
        .parse()
        .map_err(|_| RosterError::validation(format!("{field} `{raw}` is not a whole number")))
}

fn optional_id(field: &str, raw: &str) -> Result<Option<i64>, RosterError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    required_int(field, raw).map(Some)
}
