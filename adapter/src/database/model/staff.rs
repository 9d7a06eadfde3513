use chrono::NaiveDate;
use kernel::model::{id::UserId, location::Location, role::Role, staff::StaffMember};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(FromRow)]
pub struct StaffMemberRow {
    pub user_id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
    pub role: String,
}

impl TryFrom<StaffMemberRow> for StaffMember {
    type Error = AppError;

    fn try_from(value: StaffMemberRow) -> Result<Self, Self::Error> {
        let StaffMemberRow {
            user_id,
            name,
            phone,
            location,
            position,
            hire_date,
            notes,
            active,
            role,
        } = value;
        let location = location
            .map(|l| Location::from_str(&l))
            .transpose()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let role =
            Role::from_str(&role).map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        Ok(StaffMember {
            user_id,
            name,
            phone,
            location,
            position,
            hire_date,
            notes,
            active,
            role,
        })
    }
}
