use strum::{AsRefStr, EnumString};

/// Access-control role stored in the side table keyed by user id. The
/// identity provider inserts the default when an identity is created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    Admin,
    #[default]
    Staff,
    SiteLead,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn roles_use_kebab_case_strings() {
        assert_eq!(Role::Admin.as_ref(), "admin");
        assert_eq!(Role::Staff.as_ref(), "staff");
        assert_eq!(Role::SiteLead.as_ref(), "site-lead");
    }

    #[test]
    fn roles_parse_from_their_wire_form() {
        assert_eq!(Role::from_str("site-lead").unwrap(), Role::SiteLead);
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert!(Role::from_str("manager").is_err());
    }

    #[test]
    fn the_default_role_is_staff() {
        assert_eq!(Role::default(), Role::Staff);
    }
}
