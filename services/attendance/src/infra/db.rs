use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SelectTwo,
    TransactionTrait,
};
use uuid::Uuid;

use attendance_core::sea_ext::SelectExt;
use attendance_domain::event::EventKind;
use attendance_domain::id::{AccessEventId, EmployeeId, FacilityId};
use attendance_domain::matcher::Candidate;
use attendance_domain::pagination::{PageRequest, Sort};
use attendance_schema::{access_events, employees, face_encodings};

use crate::domain::repository::{AccessEventRepository, EmployeeRepository, EncodingRepository};
use crate::domain::types::{
    AccessEvent, AccessEventFilter, Employee, EmployeeChanges, Encoding, EncodingCap,
};
use crate::error::AttendanceError;

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, AttendanceError> {
        let model = employees::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn create(&self, employee: &Employee) -> Result<(), AttendanceError> {
        employees::ActiveModel {
            id: Set(employee.id.0),
            name: Set(employee.name.clone()),
            facility_id: Set(employee.facility_id.0),
            is_active: Set(employee.is_active),
            created_at: Set(employee.created_at),
            updated_at: Set(employee.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create employee")?;
        Ok(())
    }

    async fn update(
        &self,
        id: EmployeeId,
        changes: &EmployeeChanges,
    ) -> Result<bool, AttendanceError> {
        let mut am = employees::ActiveModel {
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = &changes.name {
            am.name = Set(name.clone());
        }
        if let Some(facility_id) = changes.facility_id {
            am.facility_id = Set(facility_id.0);
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
        }
        let result = employees::Entity::update_many()
            .set(am)
            .filter(employees::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("update employee")?;
        Ok(result.rows_affected > 0)
    }

    // Encodings and access events go with the row via ON DELETE CASCADE.
    async fn delete(&self, id: EmployeeId) -> Result<bool, AttendanceError> {
        let result = employees::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete employee")?;
        Ok(result.rows_affected > 0)
    }

    async fn list(
        &self,
        facility_id: Option<FacilityId>,
        page: PageRequest,
    ) -> Result<Vec<Employee>, AttendanceError> {
        let mut query = employees::Entity::find();
        if let Some(facility_id) = facility_id {
            query = query.filter(employees::Column::FacilityId.eq(facility_id.0));
        }
        let models = query
            .order_by_sort(employees::Column::CreatedAt, Sort::Asc)
            .order_by_asc(employees::Column::Id)
            .paginate_by(page)
            .all(&self.db)
            .await
            .context("list employees")?;
        Ok(models.into_iter().map(employee_from_model).collect())
    }
}

fn employee_from_model(model: employees::Model) -> Employee {
    Employee {
        id: EmployeeId(model.id),
        name: model.name,
        facility_id: FacilityId(model.facility_id),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Encoding repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEncodingRepository {
    pub db: DatabaseConnection,
}

impl EncodingRepository for DbEncodingRepository {
    async fn enroll(&self, encoding: &Encoding, cap: EncodingCap) -> Result<(), AttendanceError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                let encoding = encoding.clone();
                Box::pin(async move {
                    insert_encoding(txn, &encoding).await?;
                    evict_beyond_cap(txn, encoding.employee_id, cap).await?;
                    Ok(())
                })
            })
            .await
            .context("enroll face encoding")?;
        Ok(())
    }

    async fn candidates(
        &self,
        facility_id: Option<FacilityId>,
        model_version: &str,
    ) -> Result<Vec<Candidate>, AttendanceError> {
        let rows = candidate_query(facility_id, model_version)
            .all(&self.db)
            .await
            .context("list candidate encodings")?;
        Ok(group_candidates(rows))
    }

    async fn delete_for_employee(&self, employee_id: EmployeeId) -> Result<u64, AttendanceError> {
        let result = face_encodings::Entity::delete_many()
            .filter(face_encodings::Column::EmployeeId.eq(employee_id.0))
            .exec(&self.db)
            .await
            .context("delete employee face encodings")?;
        Ok(result.rows_affected)
    }
}

/// Encodings of `model_version` joined to their active owner, grouped by employee.
///
/// One statement regardless of how many employees match.
fn candidate_query(
    facility_id: Option<FacilityId>,
    model_version: &str,
) -> SelectTwo<face_encodings::Entity, employees::Entity> {
    let mut query = face_encodings::Entity::find()
        .join(JoinType::InnerJoin, face_encodings::Relation::Employee.def())
        .select_also(employees::Entity)
        .filter(employees::Column::IsActive.eq(true))
        .filter(face_encodings::Column::ModelVersion.eq(model_version));
    if let Some(facility_id) = facility_id {
        query = query.filter(employees::Column::FacilityId.eq(facility_id.0));
    }
    query
        .order_by_asc(face_encodings::Column::EmployeeId)
        .order_by_asc(face_encodings::Column::CreatedAt)
}

/// Rows must arrive ordered by employee id.
fn group_candidates(
    rows: Vec<(face_encodings::Model, Option<employees::Model>)>,
) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();
    for (encoding, employee) in rows {
        let Some(employee) = employee else {
            continue;
        };
        match candidates.last_mut() {
            Some(last) if last.employee_id.0 == employee.id => last.vectors.push(encoding.vector),
            _ => candidates.push(Candidate {
                employee_id: EmployeeId(employee.id),
                name: employee.name,
                vectors: vec![encoding.vector],
            }),
        }
    }
    candidates
}

async fn insert_encoding<C: ConnectionTrait>(conn: &C, encoding: &Encoding) -> Result<(), DbErr> {
    face_encodings::ActiveModel {
        id: Set(encoding.id.0),
        employee_id: Set(encoding.employee_id.0),
        model_version: Set(encoding.embedding.model_version.clone()),
        dimension: Set(encoding.embedding.dimension() as i32),
        vector: Set(encoding.embedding.values.clone()),
        created_at: Set(encoding.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

/// Delete the employee's oldest encodings so at most `cap` remain.
async fn evict_beyond_cap<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
    cap: EncodingCap,
) -> Result<u64, DbErr> {
    let Some(limit) = cap.limit() else {
        return Ok(0);
    };
    let stale: Vec<Uuid> = face_encodings::Entity::find()
        .select_only()
        .column(face_encodings::Column::Id)
        .filter(face_encodings::Column::EmployeeId.eq(employee_id.0))
        .order_by_desc(face_encodings::Column::CreatedAt)
        .order_by_desc(face_encodings::Column::Id)
        .offset(limit as u64)
        .into_tuple()
        .all(conn)
        .await?;
    if stale.is_empty() {
        return Ok(0);
    }
    let result = face_encodings::Entity::delete_many()
        .filter(face_encodings::Column::Id.is_in(stale))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

// ── Access event repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccessEventRepository {
    pub db: DatabaseConnection,
}

impl AccessEventRepository for DbAccessEventRepository {
    async fn latest(&self, employee_id: EmployeeId) -> Result<Option<AccessEvent>, AttendanceError> {
        let model = latest_event(&self.db, employee_id)
            .await
            .context("find latest access event")?;
        model.map(access_event_from_model).transpose()
    }

    async fn create_with_reinforcement(
        &self,
        event: &AccessEvent,
        reinforcement: &Encoding,
        cap: EncodingCap,
        expected_last: Option<AccessEventId>,
    ) -> Result<(), AttendanceError> {
        let txn = self.db.begin().await.context("begin access event transaction")?;

        // Serializes writers for one employee until commit.
        employees::Entity::find_by_id(event.employee_id.0)
            .lock_exclusive()
            .one(&txn)
            .await
            .context("lock employee row")?
            .ok_or(AttendanceError::EmployeeNotFound)?;

        let current = latest_event(&txn, event.employee_id)
            .await
            .context("re-read latest access event")?
            .map(|m| AccessEventId(m.id));
        if current != expected_last {
            txn.rollback().await.context("rollback access event transaction")?;
            return Err(AttendanceError::Conflict);
        }

        insert_encoding(&txn, reinforcement)
            .await
            .context("insert reinforcement encoding")?;
        evict_beyond_cap(&txn, reinforcement.employee_id, cap)
            .await
            .context("evict encodings beyond cap")?;
        access_events::ActiveModel {
            id: Set(event.id.0),
            employee_id: Set(event.employee_id.0),
            facility_id: Set(event.facility_id.map(|f| f.0)),
            kind: Set(event.kind.as_str().to_owned()),
            distance: Set(event.distance),
            occurred_at: Set(event.occurred_at),
        }
        .insert(&txn)
        .await
        .context("insert access event")?;

        txn.commit().await.context("commit access event")?;
        Ok(())
    }

    async fn list(
        &self,
        filter: AccessEventFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<Vec<AccessEvent>, AttendanceError> {
        let mut query = access_events::Entity::find();
        if let Some(employee_id) = filter.employee_id {
            query = query.filter(access_events::Column::EmployeeId.eq(employee_id.0));
        }
        if let Some(facility_id) = filter.facility_id {
            query = query.filter(access_events::Column::FacilityId.eq(facility_id.0));
        }
        let models = query
            .order_by_sort(access_events::Column::OccurredAt, sort)
            .order_by_sort(access_events::Column::Id, sort)
            .paginate_by(page)
            .all(&self.db)
            .await
            .context("list access events")?;
        models.into_iter().map(access_event_from_model).collect()
    }
}

/// Max-timestamp event; UUID v7 ids break timestamp ties.
async fn latest_event<C: ConnectionTrait>(
    conn: &C,
    employee_id: EmployeeId,
) -> Result<Option<access_events::Model>, DbErr> {
    access_events::Entity::find()
        .filter(access_events::Column::EmployeeId.eq(employee_id.0))
        .order_by_desc(access_events::Column::OccurredAt)
        .order_by_desc(access_events::Column::Id)
        .one(conn)
        .await
}

fn access_event_from_model(model: access_events::Model) -> Result<AccessEvent, AttendanceError> {
    Ok(AccessEvent {
        id: AccessEventId(model.id),
        employee_id: EmployeeId(model.employee_id),
        facility_id: model.facility_id.map(FacilityId),
        kind: model
            .kind
            .parse::<EventKind>()
            .context("decode access event kind")?,
        distance: model.distance,
        occurred_at: model.occurred_at,
    })
}
