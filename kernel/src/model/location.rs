use strum::{AsRefStr, EnumString, VariantNames};

/// One of the two daycare sites, or both for staff who rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum Location {
    LocationA,
    LocationB,
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn locations_use_snake_case_strings() {
        assert_eq!(Location::LocationA.as_ref(), "location_a");
        assert_eq!(Location::LocationB.as_ref(), "location_b");
        assert_eq!(Location::Both.as_ref(), "both");
    }

    #[test]
    fn locations_parse_from_their_wire_form() {
        assert_eq!(Location::from_str("location_b").unwrap(), Location::LocationB);
        assert!(Location::from_str("location_c").is_err());
    }

    #[test]
    fn variants_list_matches_the_accepted_values() {
        assert_eq!(Location::VARIANTS, ["location_a", "location_b", "both"]);
    }
}
