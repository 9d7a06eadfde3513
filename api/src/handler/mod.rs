pub mod auth;
pub mod booking;
pub mod health;
pub mod review;
pub mod staff;
