//! In-memory repositories for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::{
    Error,
    error::StorageError,
    id::{RecordId, UserId},
    record::{NewRequest, RecordKind, RequestStatus, TransactionRecord},
    repositories::{AdminRepository, RecordRepository, SlotRepository, UserRepository},
    slot::{ScheduleSlot, SlotKind, ValidatedSlot},
    user::{AdminAccount, ClientUser, NewAdmin, NewClientUser},
};

#[derive(Default)]
pub struct MockRecordRepository {
    records: Mutex<Vec<TransactionRecord>>,
}

impl MockRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for MockRecordRepository {
    async fn create(&self, request: NewRequest) -> Result<TransactionRecord, Error> {
        let mut records = self.records.lock().unwrap();
        let record = TransactionRecord {
            id: Some(RecordId::new(records.len() as i64 + 1)),
            kind: request.kind,
            email: request.email,
            name: request.name,
            duration: request.duration,
            participants: request.participants,
            price: request.price,
            scheduled_for: request.scheduled_for,
            payment: request.payment,
            status: Some(request.status),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn fetch_all(&self, kind: RecordKind) -> Result<Vec<TransactionRecord>, Error> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter(|r| r.kind == kind).cloned().collect())
    }

    async fn fetch_by_status(
        &self,
        kind: RecordKind,
        status: RequestStatus,
    ) -> Result<Vec<TransactionRecord>, Error> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.kind == kind && r.status == Some(status))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        kind: RecordKind,
        id: RecordId,
        status: RequestStatus,
    ) -> Result<TransactionRecord, Error> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.kind == kind && r.id == Some(id))
            .ok_or(StorageError::NotFound)?;
        record.status = Some(status);
        Ok(record.clone())
    }

    async fn delete(&self, kind: RecordKind, id: RecordId) -> Result<(), Error> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.kind == kind && r.id == Some(id)));
        if records.len() == before {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<Vec<ClientUser>>,
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, user: NewClientUser) -> Result<ClientUser, Error> {
        let user = ClientUser {
            id: UserId::new_client(),
            email: user.email,
            name: user.name,
            role: user.role.unwrap_or_else(|| "User".to_string()),
            status: user.status.unwrap_or_else(|| "Active".to_string()),
            amount: user.amount.unwrap_or(Decimal::ZERO),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<ClientUser>, Error> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| &u.id != id);
        if users.len() == before {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockAdminRepository {
    admins: Mutex<Vec<AdminAccount>>,
}

impl MockAdminRepository {
    /// Insert an account with an arbitrary stored role string.
    pub fn insert_raw(&self, account: AdminAccount) {
        self.admins.lock().unwrap().push(account);
    }
}

#[async_trait]
impl AdminRepository for MockAdminRepository {
    async fn create(&self, admin: NewAdmin) -> Result<AdminAccount, Error> {
        let mut admins = self.admins.lock().unwrap();
        if admins
            .iter()
            .any(|a| a.email == admin.email || a.username == admin.username)
        {
            return Err(StorageError::Constraint("admin already exists".to_string()).into());
        }
        let account = AdminAccount {
            id: admin.id,
            email: admin.email,
            username: admin.username,
            password_hash: admin.password_hash,
            role: admin.role.as_str().to_string(),
        };
        admins.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<AdminAccount>, Error> {
        let admins = self.admins.lock().unwrap();
        Ok(admins.iter().find(|a| &a.id == id).cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<AdminAccount>, Error> {
        let admins = self.admins.lock().unwrap();
        Ok(admins
            .iter()
            .find(|a| a.email == identifier || a.username == identifier)
            .cloned())
    }
}

#[derive(Default)]
pub struct MockSlotRepository {
    slots: Mutex<Vec<ScheduleSlot>>,
}

#[async_trait]
impl SlotRepository for MockSlotRepository {
    async fn create(&self, slot: ValidatedSlot) -> Result<ScheduleSlot, Error> {
        let mut slots = self.slots.lock().unwrap();
        let slot = ScheduleSlot {
            id: RecordId::new(slots.len() as i64 + 1),
            kind: slot.kind,
            class_date: slot.class_date,
            style: slot.style,
            level: slot.level,
            duration: slot.duration,
            price: slot.price,
            booked: false,
        };
        slots.push(slot.clone());
        Ok(slot)
    }

    async fn list_available(&self, kind: SlotKind) -> Result<Vec<ScheduleSlot>, Error> {
        let slots = self.slots.lock().unwrap();
        let mut available: Vec<_> = slots
            .iter()
            .filter(|s| s.kind == kind && !s.booked)
            .cloned()
            .collect();
        available.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(available)
    }

    async fn mark_booked(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots
            .iter_mut()
            .find(|s| s.kind == kind && s.id == id)
            .ok_or(StorageError::NotFound)?;
        slot.booked = true;
        Ok(())
    }

    async fn delete(&self, kind: SlotKind, id: RecordId) -> Result<(), Error> {
        let mut slots = self.slots.lock().unwrap();
        let before = slots.len();
        slots.retain(|s| !(s.kind == kind && s.id == id));
        if slots.len() == before {
            return Err(StorageError::NotFound.into());
        }
        Ok(())
    }
}
