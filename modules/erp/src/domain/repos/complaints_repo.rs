use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{
    Complaint, ComplaintDetail, ComplaintListQuery, ComplaintPatch, ComplaintStatus,
    ComplaintWithRefs, RecentComplaint,
};

/// Persistence operations for complaints.
#[async_trait]
pub trait ComplaintsRepository: Send + Sync {
    /// Page of complaints, newest first.
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &ComplaintListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<ComplaintWithRefs>>;

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<Complaint>>;

    /// One complaint with its projections, the shape write responses use.
    async fn get_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ComplaintWithRefs>>;

    /// Complaint expanded with full customer and service records.
    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ComplaintDetail>>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        complaint: Complaint,
    ) -> DomainResult<Complaint>;

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &ComplaintPatch,
    ) -> DomainResult<Option<Complaint>>;

    /// Sets the technician and forces the status to in-progress.
    async fn assign<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        technician_id: Uuid,
    ) -> DomainResult<Option<Complaint>>;

    /// Complaint counts grouped by status.
    async fn status_counts<C: ConnectionTrait>(
        &self,
        runner: &C,
    ) -> DomainResult<Vec<(ComplaintStatus, u64)>>;

    /// Most recent complaints with customer name and service type.
    async fn recent_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        limit: u64,
    ) -> DomainResult<Vec<RecentComplaint>>;
}
