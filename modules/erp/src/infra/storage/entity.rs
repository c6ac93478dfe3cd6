//! SeaORM entities for the ERP tables.
//!
//! Status columns reuse the domain enums directly; they derive
//! `ActiveEnum`, so the stored strings are defined in one place.

pub use amc::Entity as AmcEntity;
pub use complaint::Entity as ComplaintEntity;
pub use customer::Entity as CustomerEntity;
pub use finance::Entity as FinanceLogEntity;
pub use notification::Entity as NotificationEntity;
pub use payment::Entity as PaymentEntity;
pub use service::Entity as ServiceEntity;
pub use user::Entity as UserEntity;

/// Customer entity for the `customers` table.
pub mod customer {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub phone: String,
        #[sea_orm(unique)]
        pub email: Option<String>,
        pub address: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::service::Entity")]
        Services,
        #[sea_orm(has_many = "super::amc::Entity")]
        Contracts,
        #[sea_orm(has_many = "super::payment::Entity")]
        Payments,
        #[sea_orm(has_many = "super::complaint::Entity")]
        Complaints,
        #[sea_orm(has_many = "super::notification::Entity")]
        Notifications,
    }

    impl Related<super::service::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Services.def()
        }
    }

    impl Related<super::amc::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Contracts.def()
        }
    }

    impl Related<super::payment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Payments.def()
        }
    }

    impl Related<super::complaint::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Complaints.def()
        }
    }

    impl Related<super::notification::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Notifications.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Installed service entity for the `services` table.
pub mod service {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "services")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub service_type: String,
        pub installation_date: DateTime<Utc>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(has_many = "super::amc::Entity")]
        Contracts,
        #[sea_orm(has_many = "super::complaint::Entity")]
        Complaints,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::amc::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Contracts.def()
        }
    }

    impl Related<super::complaint::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Complaints.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// AMC contract entity for the `amc_contracts` table.
pub mod amc {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    use crate::domain::model::AmcStatus;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "amc_contracts")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub service_id: Uuid,
        pub start_date: DateTime<Utc>,
        pub end_date: DateTime<Utc>,
        pub renewal_date: DateTime<Utc>,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub amount: Decimal,
        pub status: AmcStatus,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(
            belongs_to = "super::service::Entity",
            from = "Column::ServiceId",
            to = "super::service::Column::Id"
        )]
        Service,
        #[sea_orm(has_many = "super::payment::Entity")]
        Payments,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::service::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Service.def()
        }
    }

    impl Related<super::payment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Payments.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Payment entity for the `payments` table.
pub mod payment {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    use crate::domain::model::{PaymentMode, PaymentStatus};

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "payments")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub amc_id: Option<Uuid>,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub amount: Decimal,
        pub payment_mode: PaymentMode,
        pub payment_date: Option<DateTime<Utc>>,
        pub status: PaymentStatus,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(
            belongs_to = "super::amc::Entity",
            from = "Column::AmcId",
            to = "super::amc::Column::Id"
        )]
        Amc,
        #[sea_orm(has_one = "super::finance::Entity")]
        FinanceLog,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::amc::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Amc.def()
        }
    }

    impl Related<super::finance::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::FinanceLog.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Complaint entity for the `complaints` table.
pub mod complaint {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    use crate::domain::model::ComplaintStatus;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "complaints")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub service_id: Uuid,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub status: ComplaintStatus,
        pub technician_id: Option<Uuid>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
        #[sea_orm(
            belongs_to = "super::service::Entity",
            from = "Column::ServiceId",
            to = "super::service::Column::Id"
        )]
        Service,
        #[sea_orm(
            belongs_to = "super::user::Entity",
            from = "Column::TechnicianId",
            to = "super::user::Column::Id"
        )]
        Technician,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::service::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Service.def()
        }
    }

    impl Related<super::user::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Technician.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Notification entity for the `notifications` table.
pub mod notification {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "notifications")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub customer_id: Uuid,
        pub kind: String,
        #[sea_orm(column_type = "Text")]
        pub message: String,
        pub is_read: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id"
        )]
        Customer,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Staff account entity for the `users` table. The role is stored as its
/// wire string and parsed at the mapper boundary.
pub mod user {
    use chrono::{DateTime, Utc};
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub role: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::complaint::Entity")]
        Complaints,
    }

    impl Related<super::complaint::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Complaints.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Finance ledger entity for the `finance_logs` table.
pub mod finance {
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use sea_orm::entity::prelude::*;
    use uuid::Uuid;

    use crate::domain::model::FinanceKind;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "finance_logs")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub kind: FinanceKind,
        #[sea_orm(unique)]
        pub payment_id: Uuid,
        #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
        pub amount: Decimal,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::payment::Entity",
            from = "Column::PaymentId",
            to = "super::payment::Column::Id"
        )]
        Payment,
    }

    impl Related<super::payment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Payment.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
