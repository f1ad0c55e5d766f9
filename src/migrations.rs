//! Database schema migrations.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(CreateComplaintsTable),
            Box::new(CreateComplaintEvidencesTable),
            Box::new(CreateUsersTable),
        ]
    }
}

#[derive(DeriveIden)]
enum Complaints {
    Table,
    Id,
    ComplaintNumber,
    ReporterName,
    ReporterContact,
    ReporterIdentityType,
    ReporterIdentityNumber,
    IncidentTitle,
    IncidentDescription,
    IncidentTime,
    ReportedPerson,
    Status,
    Priority,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ComplaintEvidences {
    Table,
    Id,
    ComplaintId,
    Title,
    FilePath,
    FileType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Nip,
    Name,
    PhoneNumber,
    Email,
    HomeAddress,
    Role,
    Password,
    CreatedAt,
    UpdatedAt,
}

pub struct CreateComplaintsTable;

impl MigrationName for CreateComplaintsTable {
    fn name(&self) -> &'static str {
        "m20250712_000001_create_complaints_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateComplaintsTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Complaints::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Complaints::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(Complaints::ComplaintNumber)
                    .string()
                    .null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Complaints::ReporterName).string().not_null())
            .col(
                ColumnDef::new(Complaints::ReporterContact)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Complaints::ReporterIdentityType)
                    .string_len(10)
                    .not_null(),
            )
            .col(
                ColumnDef::new(Complaints::ReporterIdentityNumber)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(Complaints::IncidentTitle).text().not_null())
            .col(
                ColumnDef::new(Complaints::IncidentDescription)
                    .text()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Complaints::IncidentTime)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(Complaints::ReportedPerson).string().not_null())
            .col(
                ColumnDef::new(Complaints::Status)
                    .string_len(20)
                    .not_null()
                    .default("pending"),
            )
            .col(
                ColumnDef::new(Complaints::Priority)
                    .string_len(10)
                    .not_null()
                    .default("medium"),
            )
            .col(
                ColumnDef::new(Complaints::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Complaints::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaints::Table).to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateComplaintEvidencesTable;

impl MigrationName for CreateComplaintEvidencesTable {
    fn name(&self) -> &'static str {
        "m20250712_000002_create_complaint_evidences_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateComplaintEvidencesTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(ComplaintEvidences::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(ComplaintEvidences::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(
                ColumnDef::new(ComplaintEvidences::ComplaintId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(ComplaintEvidences::Title).string().not_null())
            .col(
                ColumnDef::new(ComplaintEvidences::FilePath)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(ComplaintEvidences::FileType).string().null())
            .col(
                ColumnDef::new(ComplaintEvidences::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ComplaintEvidences::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .foreign_key(
                // ownership only, no cascade: complaints are deleted through
                // the service layer which removes evidence first
                ForeignKey::create()
                    .name("fk_complaint_evidences_complaint")
                    .from(ComplaintEvidences::Table, ComplaintEvidences::ComplaintId)
                    .to(Complaints::Table, Complaints::Id),
            )
            .to_owned();

        manager.create_table(table).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_evidences_complaint_id")
                    .table(ComplaintEvidences::Table)
                    .col(ComplaintEvidences::ComplaintId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ComplaintEvidences::Table).to_owned())
            .await?;
        Ok(())
    }
}

pub struct CreateUsersTable;

impl MigrationName for CreateUsersTable {
    fn name(&self) -> &'static str {
        "m20250712_000003_create_users_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateUsersTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Users::Table)
            .if_not_exists()
            .col(ColumnDef::new(Users::Nip).string().not_null().primary_key())
            .col(ColumnDef::new(Users::Name).string().not_null())
            .col(ColumnDef::new(Users::PhoneNumber).string().not_null())
            .col(ColumnDef::new(Users::Email).string().not_null())
            .col(ColumnDef::new(Users::HomeAddress).string().not_null())
            .col(
                ColumnDef::new(Users::Role)
                    .string_len(20)
                    .not_null()
                    .default("employee"),
            )
            .col(ColumnDef::new(Users::Password).string().not_null())
            .col(
                ColumnDef::new(Users::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Users::UpdatedAt)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .to_owned();

        manager.create_table(table).await?;

        // Partial unique index backing the single-super-admin invariant.
        // MySQL has no partial indexes; there the service-level check is the
        // only guard.
        let backend = manager.get_database_backend();
        if matches!(backend, DbBackend::Sqlite | DbBackend::Postgres) {
            manager
                .get_connection()
                .execute_unprepared(
                    "CREATE UNIQUE INDEX IF NOT EXISTS uniq_users_single_super_admin \
                     ON users (role) WHERE role = 'super_admin'",
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
