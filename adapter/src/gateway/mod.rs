pub mod identity;
pub mod mail;
pub mod review;
