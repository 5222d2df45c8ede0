use sea_orm_migration::prelude::*;

mod m20250601_000001_create_employees;
mod m20250601_000002_create_face_encodings;
mod m20250601_000003_create_access_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_employees::Migration),
            Box::new(m20250601_000002_create_face_encodings::Migration),
            Box::new(m20250601_000003_create_access_events::Migration),
        ]
    }
}
