use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessEvents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessEvents::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(AccessEvents::FacilityId).integer())
                    .col(ColumnDef::new(AccessEvents::Kind).string_len(3).not_null())
                    .col(ColumnDef::new(AccessEvents::Distance).float().not_null())
                    .col(
                        ColumnDef::new(AccessEvents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::cust("kind IN ('in', 'out')"))
                    .foreign_key(
                        ForeignKey::create()
                            .from(AccessEvents::Table, AccessEvents::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-event lookup per employee.
        manager
            .create_index(
                Index::create()
                    .table(AccessEvents::Table)
                    .col(AccessEvents::EmployeeId)
                    .col(AccessEvents::OccurredAt)
                    .name("idx_access_events_employee_id_occurred_at")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AccessEvents::Table)
                    .col(AccessEvents::OccurredAt)
                    .name("idx_access_events_occurred_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccessEvents {
    Table,
    Id,
    EmployeeId,
    FacilityId,
    Kind,
    Distance,
    OccurredAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
