pub mod auth;
pub mod claims;
pub mod crm;
pub mod finance;
pub mod sales;
