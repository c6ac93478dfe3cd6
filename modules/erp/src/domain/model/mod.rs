//! Plain domain models.
//!
//! These structs carry no persistence or wire concerns; `infra/storage`
//! maps them to entities and `api/rest` maps them to DTOs. Status enums
//! double as `sea-orm` active enums so the stored strings stay in one place.

pub mod amc;
pub mod complaint;
pub mod customer;
pub mod dashboard;
pub mod finance;
pub mod notification;
pub mod payment;
pub mod refs;
pub mod service;
pub mod staff;

pub use amc::{
    AmcContract, AmcDetail, AmcListQuery, AmcPatch, AmcRenewal, AmcStatus, AmcWithRefs,
    AmcWithService, NewAmcContract,
};
pub use complaint::{
    Complaint, ComplaintDetail, ComplaintListQuery, ComplaintPatch, ComplaintStatus,
    ComplaintWithRefs, NewComplaint,
};
pub use customer::{
    Customer, CustomerCounts, CustomerDetail, CustomerListQuery, CustomerPatch, CustomerWithCounts,
    NewCustomer,
};
pub use dashboard::{DashboardStats, RecentComplaint};
pub use finance::{FinanceKind, FinanceLog};
pub use notification::{
    NewNotification, Notification, NotificationListQuery, NotificationWithCustomer,
};
pub use payment::{
    NewPayment, Payment, PaymentDetail, PaymentListQuery, PaymentMode, PaymentPatch, PaymentStats,
    PaymentStatus, PaymentWithRefs, RecentPayment,
};
pub use refs::{AmcRef, CustomerRef, ServiceRef, TechnicianRef};
pub use service::{
    InstalledService, InstalledServicePatch, NewInstalledService, ServiceCounts, ServiceDetail,
    ServiceWithCustomer,
};
pub use staff::StaffUser;
