use crate::database::{model::role::UserRoleRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::UserId, role::Role};
use kernel::repository::role::RoleRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoleRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoleRepository for RoleRepositoryImpl {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Role>> {
        let row: Option<UserRoleRow> = sqlx::query_as(
            r#"
                SELECT role
                FROM user_roles
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Role::try_from).transpose()
    }

    async fn update(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE user_roles
                SET role = $1
                WHERE user_id = $2
            "#,
        )
        .bind(role.as_ref())
        .bind(user_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No role record has been updated".into(),
            ));
        }

        Ok(())
    }
}
