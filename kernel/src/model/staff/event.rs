use crate::model::{id::UserId, location::Location, role::Role};
use derive_new::new;

/// Validated command to provision one staff account end to end.
#[derive(Debug)]
pub struct CreateStaff {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<Location>,
    pub role: Role,
}

/// Insert event for the profile row. Position, hire date and notes start
/// out empty and are filled in later by other tooling; the row is active
/// from the start.
#[derive(Debug, new)]
pub struct CreateStaffProfile {
    pub user_id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<Location>,
}
