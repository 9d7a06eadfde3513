use chrono::NaiveDate;
use garde::Validate;
use kernel::model::id::UserId;
use kernel::model::location::Location;
use kernel::model::role::Role;
use kernel::model::staff::event::CreateStaff;
use kernel::model::staff::{ProvisionedStaff, StaffMember};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use std::str::FromStr;
use strum::VariantNames;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RoleName {
    Admin,
    Staff,
    SiteLead,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => Self::Admin,
            Role::Staff => Self::Staff,
            Role::SiteLead => Self::SiteLead,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Admin => Self::Admin,
            RoleName::Staff => Self::Staff,
            RoleName::SiteLead => Self::SiteLead,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocationName {
    LocationA,
    LocationB,
    Both,
}

impl From<Location> for LocationName {
    fn from(value: Location) -> Self {
        match value {
            Location::LocationA => Self::LocationA,
            Location::LocationB => Self::LocationB,
            Location::Both => Self::Both,
        }
    }
}

impl From<LocationName> for Location {
    fn from(value: LocationName) -> Self {
        match value {
            LocationName::LocationA => Self::LocationA,
            LocationName::LocationB => Self::LocationB,
            LocationName::Both => Self::Both,
        }
    }
}

/// Body of the provisioning call. Enumerated fields arrive as plain
/// strings and are validated against the accepted values so the caller
/// gets back the field name and the allowed set, not a serde error.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffRequest {
    #[garde(custom(valid_email))]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(custom(|v: &Option<String>, ctx: &()| v.as_deref().map_or(Ok(()), |v| valid_location(v, ctx))))]
    pub location: Option<String>,
    #[garde(custom(|v: &Option<String>, ctx: &()| v.as_deref().map_or(Ok(()), |v| valid_requested_role(v, ctx))))]
    pub role: Option<String>,
}

pub(crate) fn valid_email(value: &str, _ctx: &()) -> garde::Result {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if well_formed {
        Ok(())
    } else {
        Err(garde::Error::new("must be a valid email address"))
    }
}

pub(crate) fn valid_location(value: &str, _ctx: &()) -> garde::Result {
    if Location::VARIANTS.contains(&value) {
        Ok(())
    } else {
        Err(garde::Error::new(
            "must be one of location_a, location_b, both",
        ))
    }
}

fn valid_requested_role(value: &str, _ctx: &()) -> garde::Result {
    // Admin accounts are seeded at startup, never requested over the API.
    match Role::from_str(value) {
        Ok(Role::Staff) | Ok(Role::SiteLead) => Ok(()),
        _ => Err(garde::Error::new("must be one of staff, site-lead")),
    }
}

impl TryFrom<CreateStaffRequest> for CreateStaff {
    type Error = AppError;

    fn try_from(value: CreateStaffRequest) -> Result<Self, Self::Error> {
        let CreateStaffRequest {
            email,
            password,
            name,
            phone,
            location,
            role,
        } = value;
        let location = location
            .map(|l| Location::from_str(&l))
            .transpose()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?;
        let role = role
            .map(|r| Role::from_str(&r))
            .transpose()
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))?
            .unwrap_or_default();
        Ok(CreateStaff {
            email,
            password,
            name,
            phone,
            location,
            role,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreatedResponse {
    pub success: bool,
    pub user: ProvisionedStaffResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedStaffResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<LocationName>,
    pub role: RoleName,
}

impl From<ProvisionedStaff> for StaffCreatedResponse {
    fn from(value: ProvisionedStaff) -> Self {
        let ProvisionedStaff {
            user_id,
            email,
            name,
            phone,
            location,
            role,
        } = value;
        Self {
            success: true,
            user: ProvisionedStaffResponse {
                id: user_id,
                email,
                name,
                phone,
                location: location.map(LocationName::from),
                role: RoleName::from(role),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffListResponse {
    pub items: Vec<StaffResponse>,
}

impl From<Vec<StaffMember>> for StaffListResponse {
    fn from(value: Vec<StaffMember>) -> Self {
        Self {
            items: value.into_iter().map(StaffResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffResponse {
    pub user_id: UserId,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<LocationName>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
    pub role: RoleName,
}

impl From<StaffMember> for StaffResponse {
    fn from(value: StaffMember) -> Self {
        let StaffMember {
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
        Self {
            user_id,
            name,
            phone,
            location: location.map(LocationName::from),
            position,
            hire_date,
            notes,
            active,
            role: RoleName::from(role),
        }
    }
}
