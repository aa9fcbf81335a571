//! Adapters that expose one repository of a [`RepositoryProvider`] as a
//! standalone repository, so services can own an `Arc` to it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    Error,
    id::{RecordId, UserId},
    record::{NewRequest, RecordKind, RequestStatus, TransactionRecord},
    repositories::{
        AdminRepository, RecordRepository, RepositoryProvider, SlotRepository, UserRepository,
    },
    slot::{ScheduleSlot, SlotKind, ValidatedSlot},
    user::{AdminAccount, ClientUser, NewAdmin, NewClientUser},
};

pub struct RecordRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> RecordRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> RecordRepository for RecordRepositoryAdapter<R> {
    async fn create(&self, request: NewRequest) -> Result<TransactionRecord, Error> {
        self.provider.records().create(request).await
    }

    async fn fetch_all(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>, Error> {
        self.provider.records().fetch_all(kind).await
    }

    async fn fetch_by_status(
        &self,
        kind: RecordKind,
        status: RequestStatus,
    ) -> Result<Vec<TransactionRecord>, Error> {
        self.provider.records().fetch_by_status(kind, status).await
    }

    async fn update_status(
        &self,
        kind: RecordKind,
        id: RecordId,
        status: RequestStatus,
    ) -> Result<TransactionRecord, Error> {
        self.provider.records().update_status(kind, id, status).await
    }

    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), Error> {
        self.provider.records().delete(kind, id).await
    }
}

pub struct UserRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> UserRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> UserRepository for UserRepositoryAdapter<R> {
    async fn create(&self, user: NewClientUser) -> Result<ClientUser, Error> {
        self.provider.users().create(user).await
    }

    async fn list(&self) -> Result<Vec<ClientUser>, Error> {
        self.provider.users().list().await
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        self.provider.users().delete(id).await
    }
}

pub struct AdminRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> AdminRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> AdminRepository for AdminRepositoryAdapter<R> {
    async fn create(&self, admin: NewAdmin) -> Result<AdminAccount, Error> {
        self.provider.admins().create(admin).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<AdminAccount>, Error> {
        self.provider.admins().find_by_id(id).await
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AdminAccount>, Error> {
        self.provider.admins().find_by_identifier(identifier).await
    }
}

pub struct SlotRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> SlotRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> SlotRepository for SlotRepositoryAdapter<R> {
    async fn create(&self, slot: ValidatedSlot) -> Result<ScheduleSlot, Error> {
        self.provider.slots().create(slot).await
    }

    async fn list_available(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error> {
        self.provider.slots().list_available(kind).await
    }

    async fn mark_booked(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
        self.provider.slots().mark_booked(kind, id).await
    }

    async fn delete(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
        self.provider.slots().delete(kind, id).await
    }
}
