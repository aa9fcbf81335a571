use async_trait::async_trait;
use sqlx::SqlitePool;
use studio_core::{
    Error, UserId,
    repositories::AdminRepository,
    user::{AdminAccount, NewAdmin},
};

use crate::database_error;

#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteAdmin {
    id: String,
    email: String,
    username: String,
    password_hash: String,
    role: String,
}

impl From<SqliteAdmin> for AdminAccount {
    fn from(admin: SqliteAdmin) -> Self {
        AdminAccount {
            id: UserId::new(&admin.id),
            email: admin.email,
            username: admin.username,
            password_hash: admin.password_hash,
            role: admin.role,
        }
    }
}

pub struct SqliteAdminRepository {
    pool: SqlitePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for SqliteAdminRepository {
    async fn create(&self, admin: NewAdmin) -> Result<AdminAccount, Error> {
        let sqlite_admin = sqlx::query_as::<_, SqliteAdmin>(
            r#"
            INSERT INTO admins (id, email, username, password_hash, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, email, username, password_hash, role
            "#,
        )
        .bind(admin.id.as_str())
        .bind(&admin.email)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(sqlite_admin.into())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<AdminAccount>, Error> {
        let sqlite_admin = sqlx::query_as::<_, SqliteAdmin>(
            "SELECT id, email, username, password_hash, role FROM admins WHERE id = ?1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(sqlite_admin.map(AdminAccount::from))
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AdminAccount>, Error> {
        let sqlite_admin = sqlx::query_as::<_, SqliteAdmin>(
            r#"
            SELECT id, email, username, password_hash, role
            FROM admins
            WHERE email = ?1 OR username = ?1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(sqlite_admin.map(AdminAccount::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::migrated_provider;
    use studio_core::{AdminRole, error::StorageError, repositories::AdminRepositoryProvider};

    fn new_admin(email: &str, username: &str) -> NewAdmin {
        NewAdmin {
            id: UserId::new_admin(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: AdminRole::Admin,
        }
    }

    #[tokio::test]
    async fn test_find_by_email_username_or_id() {
        let provider = migrated_provider().await;
        let repo = provider.admins();
        let created = repo.create(new_admin("s@studio.test", "staff")).await.unwrap();
        assert_eq!(created.role, "Admin");

        let by_email = repo.find_by_identifier("s@studio.test").await.unwrap();
        let by_username = repo.find_by_identifier("staff").await.unwrap();
        let by_id = repo.find_by_id(&created.id).await.unwrap();

        assert_eq!(by_email.as_ref(), Some(&created));
        assert_eq!(by_username.as_ref(), Some(&created));
        assert_eq!(by_id, Some(created));
        assert_eq!(repo.find_by_identifier("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_error() {
        let provider = migrated_provider().await;
        let repo = provider.admins();
        repo.create(new_admin("a@studio.test", "staff")).await.unwrap();

        let err = repo
            .create(new_admin("b@studio.test", "staff"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Constraint(_))));
    }
}
