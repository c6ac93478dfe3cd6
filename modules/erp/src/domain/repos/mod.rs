//! Repository traits.
//!
//! Every method takes a `C: ConnectionTrait` runner so a service can run the
//! same call against the pooled connection or inside an open transaction.
//! Implementations live in `infra/storage/repos`.

pub mod amc_repo;
pub mod complaints_repo;
pub mod customers_repo;
pub mod finance_repo;
pub mod notifications_repo;
pub mod payments_repo;
pub mod services_repo;
pub mod users_repo;

pub use amc_repo::AmcRepository;
pub use complaints_repo::ComplaintsRepository;
pub use customers_repo::CustomersRepository;
pub use finance_repo::FinanceRepository;
pub use notifications_repo::NotificationsRepository;
pub use payments_repo::PaymentsRepository;
pub use services_repo::ServicesRepository;
pub use users_repo::UsersRepository;
