use async_trait::async_trait;

use crate::{
    Error,
    id::UserId,
    user::{ClientUser, NewClientUser},
};

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn create(&self, user: NewClientUser) -> Result<ClientUser, Error>;

    async fn list(&self) -> Result<Vec<ClientUser>, Error>;

    /// Returns `StorageError::NotFound` when no user has this id.
    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
