use crate::database::{model::staff::StaffMemberRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::staff::{event::CreateStaffProfile, StaffMember};
use kernel::repository::staff::StaffRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct StaffRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl StaffRepository for StaffRepositoryImpl {
    async fn create(&self, event: CreateStaffProfile) -> AppResult<()> {
        let location = event.location.map(|l| l.as_ref().to_string());
        let res = sqlx::query(
            r#"
                INSERT INTO staff_profiles (user_id, name, phone, location)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.user_id)
        .bind(&event.name)
        .bind(&event.phone)
        .bind(location)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No staff profile has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<StaffMember>> {
        let rows: Vec<StaffMemberRow> = sqlx::query_as(
            r#"
                SELECT
                    p.user_id,
                    p.name,
                    p.phone,
                    p.location,
                    p.position,
                    p.hire_date,
                    p.notes,
                    p.active,
                    r.role
                FROM staff_profiles AS p
                INNER JOIN user_roles AS r ON p.user_id = r.user_id
                ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(StaffMember::try_from).collect()
    }
}
