use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::model::{DashboardStats, RecentComplaint};

use super::complaints::ComplaintDto;
use super::customers::CustomerNameDto;
use super::payments::RecentPaymentDto;
use super::services::ServiceTypeDto;

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CustomerTotalsDto {
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmcTotalsDto {
    pub active: u64,
    pub expiring_soon: u64,
    pub expired: u64,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintTotalsDto {
    pub open: u64,
    pub in_progress: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotalsDto {
    pub monthly_revenue: Decimal,
    pub pending_amount: Decimal,
    pub pending_count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentComplaintDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerNameDto,
    pub service: ServiceTypeDto,
}

impl From<RecentComplaint> for RecentComplaintDto {
    fn from(row: RecentComplaint) -> Self {
        Self {
            complaint: row.complaint.into(),
            customer: CustomerNameDto {
                name: row.customer_name,
            },
            service: ServiceTypeDto {
                service_type: row.service_type,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentActivityDto {
    pub complaints: Vec<RecentComplaintDto>,
    pub payments: Vec<RecentPaymentDto>,
}

/// `GET /dashboard/stats` body, grouped the way the overview screen reads
/// it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStatsDto {
    pub customers: CustomerTotalsDto,
    pub amc: AmcTotalsDto,
    pub complaints: ComplaintTotalsDto,
    pub payments: PaymentTotalsDto,
    pub recent: RecentActivityDto,
}

impl From<DashboardStats> for DashboardStatsDto {
    fn from(s: DashboardStats) -> Self {
        Self {
            customers: CustomerTotalsDto {
                total: s.customers_total,
            },
            amc: AmcTotalsDto {
                active: s.amc_active,
                expiring_soon: s.amc_expiring_soon,
                expired: s.amc_expired,
            },
            complaints: ComplaintTotalsDto {
                open: s.complaints_open,
                in_progress: s.complaints_in_progress,
            },
            payments: PaymentTotalsDto {
                monthly_revenue: s.monthly_revenue,
                pending_amount: s.pending_amount,
                pending_count: s.pending_count,
            },
            recent: RecentActivityDto {
                complaints: s.recent_complaints.into_iter().map(Into::into).collect(),
                payments: s.recent_payments.into_iter().map(Into::into).collect(),
            },
        }
    }
}
