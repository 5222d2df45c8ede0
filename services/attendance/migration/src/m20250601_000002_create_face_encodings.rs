use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FaceEncodings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FaceEncodings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FaceEncodings::EmployeeId).uuid().not_null())
                    .col(
                        ColumnDef::new(FaceEncodings::ModelVersion)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FaceEncodings::Dimension)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FaceEncodings::Vector)
                            .array(ColumnType::Float)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FaceEncodings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::cust("cardinality(vector) = dimension"))
                    .foreign_key(
                        ForeignKey::create()
                            .from(FaceEncodings::Table, FaceEncodings::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-employee scans and oldest-first eviction.
        manager
            .create_index(
                Index::create()
                    .table(FaceEncodings::Table)
                    .col(FaceEncodings::EmployeeId)
                    .col(FaceEncodings::CreatedAt)
                    .name("idx_face_encodings_employee_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FaceEncodings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FaceEncodings {
    Table,
    Id,
    EmployeeId,
    ModelVersion,
    Dimension,
    Vector,
    CreatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
