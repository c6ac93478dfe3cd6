//! Wire DTOs.
//!
//! Entity DTOs convert from domain models via `From`; composed responses
//! flatten the entity next to its relation projections, which is the shape
//! the dashboard UI consumes. Field names are camelCase on the wire, and
//! nullable fields serialize as explicit `null` rather than being omitted.

use serde::Serialize;
use utoipa::ToSchema;

pub mod amc;
pub mod complaints;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod payments;
pub mod services;

pub use amc::{
    AmcCreatedDto, AmcDetailDto, AmcDto, AmcListItemDto, AmcListParams, AmcRefDto,
    AmcRenewedResponse, AmcWithServiceDto, CreateAmcRequest, RenewAmcRequest, UpdateAmcRequest,
};
pub use complaints::{
    AssignComplaintRequest, ComplaintAssignedDto, ComplaintCreatedDto, ComplaintDetailDto,
    ComplaintDto, ComplaintListItemDto, ComplaintListParams, ComplaintUpdatedDto,
    CreateComplaintRequest, TechnicianBriefDto, TechnicianRefDto, UpdateComplaintRequest,
};
pub use customers::{
    CreateCustomerRequest, CustomerBriefDto, CustomerCountsDto, CustomerDetailDto, CustomerDto,
    CustomerListItemDto, CustomerListParams, CustomerNameDto, CustomerRefDto,
    UpdateCustomerRequest,
};
pub use dashboard::{
    AmcTotalsDto, ComplaintTotalsDto, CustomerTotalsDto, DashboardStatsDto, PaymentTotalsDto,
    RecentActivityDto, RecentComplaintDto,
};
pub use notifications::{
    CreateNotificationRequest, MarkReadRequest, NotificationDto, NotificationListItemDto,
    NotificationListParams, NotificationsMarkedResponse,
};
pub use payments::{
    CreatePaymentRequest, FinanceLogDto, PaymentCreatedDto, PaymentDetailDto, PaymentDto,
    PaymentListItemDto, PaymentListParams, PaymentStatsDto, RecentPaymentDto, UpdatePaymentRequest,
};
pub use services::{
    CreateServiceRequest, ServiceCountsDto, ServiceCreatedDto, ServiceDetailDto, ServiceDto,
    ServiceListItemDto, ServiceListParams, ServiceListResponse, ServiceRefDto, ServiceTypeDto,
    UpdateServiceRequest,
};

/// `{"success": true}` envelope returned by delete endpoints.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self { success: true }
    }
}
