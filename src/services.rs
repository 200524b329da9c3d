pub mod access;
pub use access::{authorize, AccessDecision, Route};
pub mod auth;
pub use auth::{AuthEvent, AuthProvider, RoleResolver};
pub mod claims_service;
pub use claims_service::ClaimsService;
pub mod finance_service;
pub use finance_service::{FinanceService, Settlement};
pub mod sales_service;
pub use sales_service::{QuoteConversion, SalesService};
pub mod session;
pub use session::SessionStore;
