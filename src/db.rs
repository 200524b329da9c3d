pub mod claims_repo;
pub use claims_repo::{ClaimRepository, MissionRepository};
pub mod crm_repo;
pub use crm_repo::{ClientRepository, PartnerRepository};
pub mod sales_repo;
pub use sales_repo::{ContractRepository, QuoteRepository};
pub mod finance_repo;
pub use finance_repo::{InvoiceRepository, PaymentRepository, TransactionRepository};
