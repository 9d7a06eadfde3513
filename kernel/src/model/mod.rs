pub mod auth;
pub mod id;
pub mod location;
pub mod mail;
pub mod review;
pub mod role;
pub mod staff;
