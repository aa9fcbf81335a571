use std::sync::Arc;

use crate::{
    Error,
    id::UserId,
    repositories::UserRepository,
    user::{ClientUser, NewClientUser},
    validation::{validate_email, validate_user_id},
};

/// Client user management for the dashboard user table.
pub struct UserService<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }

    pub async fn create_user(&self, user: NewClientUser) -> Result<ClientUser, Error> {
        if let Some(email) = user.email.as_deref() {
            validate_email(email)?;
        }
        self.users.create(user).await
    }

    pub async fn users(&self) -> Result<Vec<ClientUser>, Error> {
        self.users.list().await
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<(), Error> {
        validate_user_id(id)?;
        self.users.delete(id).await?;
        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
