//! Module assembly.
//!
//! One service instance per resource, all sharing the same database handle
//! and the same stateless repository set. The host binary constructs an
//! [`ErpModule`] and mounts [`ErpModule::router`].

use std::sync::Arc;

use aquaserve_auth::SessionResolver;
use axum::Router;
use sea_orm::DatabaseConnection;

use crate::api::rest::routes;
use crate::domain::service::{
    AmcService, ComplaintsService, CustomersService, DashboardService, InstallationsService,
    NotificationsService, PaymentsService,
};
use crate::infra::storage::repos::{
    SeaOrmAmcRepository, SeaOrmComplaintsRepository, SeaOrmCustomersRepository,
    SeaOrmFinanceRepository, SeaOrmNotificationsRepository, SeaOrmPaymentsRepository,
    SeaOrmServicesRepository, SeaOrmUsersRepository,
};

/// Concrete service types over the sea-orm repositories. Handlers extract
/// these from request extensions.
pub type CustomersSvc = CustomersService<SeaOrmCustomersRepository>;
pub type ServicesSvc = InstallationsService<SeaOrmServicesRepository, SeaOrmCustomersRepository>;
pub type AmcSvc = AmcService<
    SeaOrmAmcRepository,
    SeaOrmCustomersRepository,
    SeaOrmServicesRepository,
    SeaOrmPaymentsRepository,
>;
pub type PaymentsSvc = PaymentsService<
    SeaOrmPaymentsRepository,
    SeaOrmCustomersRepository,
    SeaOrmAmcRepository,
    SeaOrmFinanceRepository,
>;
pub type ComplaintsSvc = ComplaintsService<
    SeaOrmComplaintsRepository,
    SeaOrmCustomersRepository,
    SeaOrmServicesRepository,
    SeaOrmUsersRepository,
    SeaOrmNotificationsRepository,
>;
pub type NotificationsSvc =
    NotificationsService<SeaOrmNotificationsRepository, SeaOrmCustomersRepository>;
pub type DashboardSvc = DashboardService<
    SeaOrmCustomersRepository,
    SeaOrmAmcRepository,
    SeaOrmComplaintsRepository,
    SeaOrmPaymentsRepository,
>;

pub struct ErpModule {
    pub(crate) customers: Arc<CustomersSvc>,
    pub(crate) services: Arc<ServicesSvc>,
    pub(crate) amc: Arc<AmcSvc>,
    pub(crate) payments: Arc<PaymentsSvc>,
    pub(crate) complaints: Arc<ComplaintsSvc>,
    pub(crate) notifications: Arc<NotificationsSvc>,
    pub(crate) dashboard: Arc<DashboardSvc>,
}

impl ErpModule {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let customers_repo = Arc::new(SeaOrmCustomersRepository);
        let services_repo = Arc::new(SeaOrmServicesRepository);
        let amc_repo = Arc::new(SeaOrmAmcRepository);
        let payments_repo = Arc::new(SeaOrmPaymentsRepository);
        let complaints_repo = Arc::new(SeaOrmComplaintsRepository);
        let notifications_repo = Arc::new(SeaOrmNotificationsRepository);
        let users_repo = Arc::new(SeaOrmUsersRepository);
        let finance_repo = Arc::new(SeaOrmFinanceRepository);

        Self {
            customers: Arc::new(CustomersService::new(db.clone(), customers_repo.clone())),
            services: Arc::new(InstallationsService::new(
                db.clone(),
                services_repo.clone(),
                customers_repo.clone(),
            )),
            amc: Arc::new(AmcService::new(
                db.clone(),
                amc_repo.clone(),
                customers_repo.clone(),
                services_repo.clone(),
                payments_repo.clone(),
            )),
            payments: Arc::new(PaymentsService::new(
                db.clone(),
                payments_repo.clone(),
                customers_repo.clone(),
                amc_repo.clone(),
                finance_repo,
            )),
            complaints: Arc::new(ComplaintsService::new(
                db.clone(),
                complaints_repo.clone(),
                customers_repo.clone(),
                services_repo,
                users_repo,
                notifications_repo.clone(),
            )),
            notifications: Arc::new(NotificationsService::new(
                db.clone(),
                notifications_repo,
                customers_repo.clone(),
            )),
            dashboard: Arc::new(DashboardService::new(
                db,
                customers_repo,
                amc_repo,
                complaints_repo,
                payments_repo,
            )),
        }
    }

    /// Module router with the session middleware attached.
    #[must_use]
    pub fn router(&self, resolver: Arc<dyn SessionResolver>) -> Router {
        routes::router(self, resolver)
    }
}
