use async_trait::async_trait;
use sqlx::SqlitePool;
use studio_core::{
    Error, UserId,
    error::StorageError,
    repositories::UserRepository,
    user::{ClientUser, NewClientUser},
};

use crate::{database_error, decimal_column};

#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
    role: Option<String>,
    status: Option<String>,
    amount: Option<String>,
}

impl From<SqliteUser> for ClientUser {
    fn from(user: SqliteUser) -> Self {
        ClientUser {
            id: UserId::new(&user.id),
            email: user.email,
            name: user.name,
            role: user.role.unwrap_or_else(|| "User".to_string()),
            status: user.status.unwrap_or_else(|| "Active".to_string()),
            amount: decimal_column(user.amount.as_deref()),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewClientUser) -> Result<ClientUser, Error> {
        let sqlite_user = sqlx::query_as::<_, SqliteUser>(
            r#"
            INSERT INTO users (id, email, name, role, status, amount)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, email, name, role, status, amount
            "#,
        )
        .bind(UserId::new_client().as_str())
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role)
        .bind(&user.status)
        .bind(user.amount.map(|a| a.to_string()))
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(sqlite_user.into())
    }

    async fn list(&self) -> Result<Vec<ClientUser>, Error> {
        let users = sqlx::query_as::<_, SqliteUser>(
            "SELECT id, email, name, role, status, amount FROM users ORDER BY created_at, rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(users.into_iter().map(ClientUser::from).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::migrated_provider;
    use rust_decimal::Decimal;
    use studio_core::repositories::UserRepositoryProvider;

    #[tokio::test]
    async fn test_create_list_delete() {
        let provider = migrated_provider().await;
        let repo = provider.users();

        let plain = repo
            .create(NewClientUser {
                email: Some("u@studio.test".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(plain.id.as_str().starts_with("usr_"));
        assert_eq!(plain.role, "User");
        assert_eq!(plain.status, "Active");
        assert_eq!(plain.amount, Decimal::ZERO);

        let vip = repo
            .create(NewClientUser {
                name: Some("Vee".to_string()),
                role: Some("Member".to_string()),
                amount: Some(Decimal::new(4500, 2)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(vip.amount, Decimal::new(4500, 2));

        assert_eq!(repo.list().await.unwrap(), vec![plain.clone(), vip.clone()]);

        repo.delete(&plain.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), vec![vip]);
        assert!(repo.delete(&plain.id).await.unwrap_err().is_not_found());
    }
}
