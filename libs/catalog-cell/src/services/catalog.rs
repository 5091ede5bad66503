use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use shared_database::begin_immediate;
use shared_database::error::constraint_violation;
use shared_models::auth::{Role, Session};
use shared_models::error::AppError;
use shared_models::hospital::{Department, Treatment};
use shared_utils::state::AppState;
use shared_utils::validation::{optional, required};

use crate::models::{CreateDepartmentRequest, CreateTreatmentRequest};

/// Admin-managed reference data: departments and treatments.
pub struct CatalogService {
    db: SqlitePool,
}

impl CatalogService {
    pub fn new(state: &AppState) -> Self {
        Self { db: state.db.clone() }
    }

    pub fn with_pool(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, description FROM departments ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        debug!("Listed {} departments", departments.len());
        Ok(departments)
    }

    pub async fn find_department(&self, department_id: i64) -> Result<Option<Department>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, description FROM departments WHERE id = ?",
        )
        .bind(department_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(department)
    }

    #[instrument(skip(self, session, request), fields(name = %request.name))]
    pub async fn create_department(
        &self,
        session: &Session,
        request: CreateDepartmentRequest,
    ) -> Result<Department, AppError> {
        session.require_role(&[Role::Admin])?;

        let name = required("name", &request.name)?;
        let description = optional(request.description.as_deref());

        let mut tx = begin_immediate(&self.db).await?;

        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name, description) VALUES (?, ?) RETURNING id, name, description",
        )
        .bind(&name)
        .bind(&description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match constraint_violation(&e) {
            Some(v) if v.is_unique_on("departments.name") => AppError::DuplicateName(name.clone()),
            _ => AppError::from(e),
        })?;

        tx.commit().await?;

        info!("Department '{}' created with id {}", department.name, department.id);
        Ok(department)
    }

    pub async fn list_treatments(&self) -> Result<Vec<Treatment>, AppError> {
        let treatments = sqlx::query_as::<_, Treatment>(
            "SELECT id, treatment_name, description FROM treatments ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        debug!("Listed {} treatments", treatments.len());
        Ok(treatments)
    }

    /// Treatment names are not unique; creating a second "EKG" is allowed.
    #[instrument(skip(self, session, request), fields(name = %request.name))]
    pub async fn create_treatment(
        &self,
        session: &Session,
        request: CreateTreatmentRequest,
    ) -> Result<Treatment, AppError> {
        session.require_role(&[Role::Admin])?;

        let name = required("name", &request.name)?;
        let description = optional(request.description.as_deref());

        let mut tx = begin_immediate(&self.db).await?;

        let treatment = sqlx::query_as::<_, Treatment>(
            "INSERT INTO treatments (treatment_name, description) VALUES (?, ?) \
             RETURNING id, treatment_name, description",
        )
        .bind(&name)
        .bind(&description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Treatment '{}' created with id {}", treatment.name, treatment.id);
        Ok(treatment)
    }
}
