//! Repository trait for admin accounts.

use async_trait::async_trait;

use crate::{
    Error,
    id::UserId,
    user::{AdminAccount, NewAdmin},
};

#[async_trait]
pub trait AdminRepository: Send + Sync + 'static {
    async fn create(&self, admin: NewAdmin) -> Result<AdminAccount, Error>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<AdminAccount>, Error>;

    /// Look an admin up by email or by username, whichever matches.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AdminAccount>, Error>;
}
