use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub on_bus: bool,
    pub dob: NaiveDate,
    pub conditions: Option<String>,
    pub contact_info: Option<String>,
    pub route_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Route {
    pub id: i64,
    /// Route number shown to staff; not unique.
    pub route: i64,
    pub driver_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Driver {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub conditions: Option<String>,
    pub contact_info: Option<String>,
}

/// Validated student fields, as written on create and on full-record edit.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub conditions: Option<String>,
    pub contact_info: Option<String>,
    pub route_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRecord {
    pub route: i64,
    pub driver_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverRecord {
    pub first_name: String,
    pub last_name: String,
    pub dob: NaiveDate,
    pub conditions: Option<String>,
    pub contact_info: Option<String>,
}
