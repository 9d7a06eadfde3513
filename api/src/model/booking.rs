use crate::model::staff::{valid_email, valid_location};
use garde::Validate;
use serde::{Deserialize, Serialize};

/// Booking form forwarded to the business inbox. Nothing is stored; the
/// mail relay is the system of record for these.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(custom(valid_email))]
    pub email: String,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(custom(|v: &Option<String>, ctx: &()| v.as_deref().map_or(Ok(()), |v| valid_location(v, ctx))))]
    pub location: Option<String>,
    #[garde(length(min = 1))]
    pub dog_name: String,
    #[garde(skip)]
    pub start_date: Option<String>,
    #[garde(skip)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingAcceptedResponse {
    pub success: bool,
}
