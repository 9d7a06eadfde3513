use kernel::model::role::Role;
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(FromRow)]
pub struct UserRoleRow {
    pub role: String,
}

impl TryFrom<UserRoleRow> for Role {
    type Error = AppError;

    fn try_from(value: UserRoleRow) -> Result<Self, Self::Error> {
        Role::from_str(&value.role)
            .map_err(|e| AppError::ConversionEntityError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_role_row_parses_into_the_domain_role() {
        let row = UserRoleRow {
            role: "site-lead".into(),
        };
        assert_eq!(Role::try_from(row).unwrap(), Role::SiteLead);
    }

    #[test]
    fn an_unknown_role_string_is_a_conversion_error() {
        let row = UserRoleRow {
            role: "janitor".into(),
        };
        assert!(matches!(
            Role::try_from(row),
            Err(AppError::ConversionEntityError(_))
        ));
    }
}
