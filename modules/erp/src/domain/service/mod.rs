//! Business services.
//!
//! Each service is generic over the repository traits it needs and holds the
//! shared [`sea_orm::DatabaseConnection`]. Dependent writes (payment plus
//! ledger entry, complaint plus notification) run inside one transaction.
//! Role gates live in the REST handlers; data-dependent rules such as
//! technician ownership live here.

pub mod amc;
pub mod complaints;
pub mod customers;
pub mod dashboard;
pub mod installations;
pub mod notifications;
pub mod payments;
pub mod time;
pub mod validate;

pub use amc::AmcService;
pub use complaints::ComplaintsService;
pub use customers::CustomersService;
pub use dashboard::DashboardService;
pub use installations::InstallationsService;
pub use notifications::NotificationsService;
pub use payments::PaymentsService;
