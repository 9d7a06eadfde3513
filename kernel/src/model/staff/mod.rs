pub mod event;

use crate::model::{id::UserId, location::Location, role::Role};
use chrono::NaiveDate;

/// A staff profile row joined with the role record it is keyed against.
#[derive(Debug)]
pub struct StaffMember {
    pub user_id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<Location>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
    pub role: Role,
}

/// Outcome of a completed provisioning run: the identity exists, the
/// profile row exists, and `role` is the role that was requested.
#[derive(Debug)]
pub struct ProvisionedStaff {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<Location>,
    pub role: Role,
}
