//! Initial migration for the ERP tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create customers table
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Customers::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Customers::Name).string().not_null())
                    .col(ColumnDef::new(Customers::Phone).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string().unique_key())
                    .col(ColumnDef::new(Customers::Address).text().not_null())
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create services table
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Services::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Services::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Services::ServiceType).string().not_null())
                    .col(
                        ColumnDef::new(Services::InstallationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Services::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Services::Table, Services::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on services.customer_id
        manager
            .create_index(
                Index::create()
                    .name("idx_services_customer")
                    .table(Services::Table)
                    .col(Services::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Create amc_contracts table
        manager
            .create_table(
                Table::create()
                    .table(AmcContracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AmcContracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AmcContracts::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(AmcContracts::ServiceId).uuid().not_null())
                    .col(
                        ColumnDef::new(AmcContracts::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmcContracts::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmcContracts::RenewalDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AmcContracts::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AmcContracts::Status).string().not_null())
                    .col(
                        ColumnDef::new(AmcContracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AmcContracts::Table, AmcContracts::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AmcContracts::Table, AmcContracts::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on amc_contracts.customer_id
        manager
            .create_index(
                Index::create()
                    .name("idx_amc_contracts_customer")
                    .table(AmcContracts::Table)
                    .col(AmcContracts::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Create index on amc_contracts (status, end_date) for expiry scans
        manager
            .create_index(
                Index::create()
                    .name("idx_amc_contracts_status_end_date")
                    .table(AmcContracts::Table)
                    .col(AmcContracts::Status)
                    .col(AmcContracts::EndDate)
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Payments::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Payments::AmcId).uuid())
                    .col(
                        ColumnDef::new(Payments::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::PaymentMode).string().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::AmcId)
                            .to(AmcContracts::Table, AmcContracts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on payments.customer_id
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_customer")
                    .table(Payments::Table)
                    .col(Payments::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Create index on payments (status, payment_date) for revenue queries
        manager
            .create_index(
                Index::create()
                    .name("idx_payments_status_payment_date")
                    .table(Payments::Table)
                    .col(Payments::Status)
                    .col(Payments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        // Create complaints table
        manager
            .create_table(
                Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaints::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaints::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Complaints::Description).text().not_null())
                    .col(ColumnDef::new(Complaints::Status).string().not_null())
                    .col(ColumnDef::new(Complaints::TechnicianId).uuid())
                    .col(
                        ColumnDef::new(Complaints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Complaints::Table, Complaints::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Complaints::Table, Complaints::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Complaints::Table, Complaints::TechnicianId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on complaints.customer_id
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_customer")
                    .table(Complaints::Table)
                    .col(Complaints::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Create index on complaints.technician_id
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_technician")
                    .table(Complaints::Table)
                    .col(Complaints::TechnicianId)
                    .to_owned(),
            )
            .await?;

        // Create index on complaints.status
        manager
            .create_index(
                Index::create()
                    .name("idx_complaints_status")
                    .table(Complaints::Table)
                    .col(Complaints::Status)
                    .to_owned(),
            )
            .await?;

        // Create notifications table
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index on notifications (customer_id, is_read)
        manager
            .create_index(
                Index::create()
                    .name("idx_notifications_customer_is_read")
                    .table(Notifications::Table)
                    .col(Notifications::CustomerId)
                    .col(Notifications::IsRead)
                    .to_owned(),
            )
            .await?;

        // Create finance_logs table
        manager
            .create_table(
                Table::create()
                    .table(FinanceLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FinanceLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FinanceLogs::Kind).string().not_null())
                    .col(
                        ColumnDef::new(FinanceLogs::PaymentId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FinanceLogs::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FinanceLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(FinanceLogs::Table, FinanceLogs::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FinanceLogs::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AmcContracts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    Name,
    Phone,
    Email,
    Address,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum Services {
    Table,
    Id,
    CustomerId,
    ServiceType,
    InstallationDate,
    CreatedAt,
}

#[derive(Iden)]
enum AmcContracts {
    Table,
    Id,
    CustomerId,
    ServiceId,
    StartDate,
    EndDate,
    RenewalDate,
    Amount,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    CustomerId,
    AmcId,
    Amount,
    PaymentMode,
    PaymentDate,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Complaints {
    Table,
    Id,
    CustomerId,
    ServiceId,
    Description,
    Status,
    TechnicianId,
    CreatedAt,
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    CustomerId,
    Kind,
    Message,
    IsRead,
    CreatedAt,
}

#[derive(Iden)]
enum FinanceLogs {
    Table,
    Id,
    Kind,
    PaymentId,
    Amount,
    CreatedAt,
}
