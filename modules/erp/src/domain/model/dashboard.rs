use rust_decimal::Decimal;

use super::complaint::Complaint;
use super::payment::RecentPayment;

/// A complaint with just enough context for the dashboard activity strip.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentComplaint {
    pub complaint: Complaint,
    pub customer_name: String,
    pub service_type: String,
}

/// Aggregates behind `GET /dashboard/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub customers_total: u64,
    pub amc_active: u64,
    pub amc_expiring_soon: u64,
    pub amc_expired: u64,
    pub complaints_open: u64,
    pub complaints_in_progress: u64,
    pub monthly_revenue: Decimal,
    pub pending_amount: Decimal,
    pub pending_count: u64,
    pub recent_complaints: Vec<RecentComplaint>,
    pub recent_payments: Vec<RecentPayment>,
}
