use crate::extractor::AppJson;
use crate::model::booking::{BookingAcceptedResponse, BookingRequest};
use axum::extract::State;
use axum::Json;
use garde::Validate;
use kernel::model::mail::OutgoingEmail;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn submit_booking(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<BookingRequest>,
) -> AppResult<Json<BookingAcceptedResponse>> {
    req.validate(&())?;

    // Replies from the inbox go straight back to the visitor.
    let email = OutgoingEmail::new(
        registry.mail_config().booking_inbox.clone(),
        Some(req.email.clone()),
        format!("Booking request from {}", req.name),
        booking_body(&req),
    );
    registry.mailer().send(email).await?;

    Ok(Json(BookingAcceptedResponse { success: true }))
}

fn booking_body(req: &BookingRequest) -> String {
    let mut lines = vec![
        format!("Name: {}", req.name),
        format!("Email: {}", req.email),
    ];
    if let Some(phone) = &req.phone {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(location) = &req.location {
        lines.push(format!("Location: {location}"));
    }
    lines.push(format!("Dog: {}", req.dog_name));
    if let Some(start_date) = &req.start_date {
        lines.push(format!("Requested start: {start_date}"));
    }
    if let Some(message) = &req.message {
        lines.push(String::new());
        lines.push(message.clone());
    }
    lines.join("\n")
}
