use sea_orm::entity::prelude::*;

/// Employee registered under a facility (warehouse).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub facility_id: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::face_encodings::Entity")]
    FaceEncodings,
    #[sea_orm(has_many = "super::access_events::Entity")]
    AccessEvents,
}

impl Related<super::face_encodings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FaceEncodings.def()
    }
}

impl Related<super::access_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
