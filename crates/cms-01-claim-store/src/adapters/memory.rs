//! In-memory store adapter.
//!
//! A single `RwLock` over all tables gives the single-writer-per-claim
//! discipline for free: `commit` holds the write lock for its whole critical
//! section, so concurrent writers are serialized and the loser observes the
//! winner's version.

use crate::domain::{parse_claim_number, ClaimMutation, StoreError};
use crate::ports::{CatalogStore, ClaimStore, DocumentBlobStore, UserStore};
use rust_decimal::Decimal;
use shared_types::{
    Claim, ClaimId, ClaimItem, ClaimMonth, ClaimStatus, Document, DocumentId, LecturerAssignment,
    Module, ModuleId, Programme, ProgrammeId, StatusHistoryEntry, User, UserId,
};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    programmes: HashMap<ProgrammeId, Programme>,
    modules: HashMap<ModuleId, Module>,
    assignments: HashMap<(UserId, ModuleId), LecturerAssignment>,
    claims: HashMap<ClaimId, Claim>,
    items: HashMap<ClaimId, Vec<ClaimItem>>,
    history: HashMap<ClaimId, Vec<StatusHistoryEntry>>,
    documents: HashMap<DocumentId, Document>,

    next_user_id: UserId,
    next_programme_id: ProgrammeId,
    next_module_id: ModuleId,
    next_claim_id: ClaimId,
    next_item_id: u64,
    next_document_id: DocumentId,
    next_history_id: u64,
}

impl Tables {
    fn new() -> Self {
        Self {
            next_user_id: 1,
            next_programme_id: 1,
            next_module_id: 1,
            next_claim_id: 1,
            next_item_id: 1,
            next_document_id: 1,
            next_history_id: 1,
            ..Self::default()
        }
    }

    fn month_taken(
        &self,
        lecturer_id: UserId,
        month: ClaimMonth,
        exclude: Option<ClaimId>,
    ) -> bool {
        self.claims.values().any(|c| {
            c.lecturer_id == lecturer_id
                && c.claim_month == month
                && c.status != ClaimStatus::Cancelled
                && Some(c.id) != exclude
        })
    }
}

/// In-memory implementation of all store ports.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryStore {
    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn insert_user(&self, mut user: User) -> Result<User, StoreError> {
        let mut tables = self.write()?;
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::ConstraintViolation(format!(
                "email already registered: {}",
                user.email
            )));
        }
        user.id = tables.next_user_id;
        tables.next_user_id += 1;
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl CatalogStore for InMemoryStore {
    fn programme(&self, id: ProgrammeId) -> Result<Option<Programme>, StoreError> {
        Ok(self.read()?.programmes.get(&id).cloned())
    }

    fn programmes_for_coordinator(
        &self,
        coordinator_id: UserId,
    ) -> Result<Vec<Programme>, StoreError> {
        Ok(self
            .read()?
            .programmes
            .values()
            .filter(|p| p.coordinator_id == coordinator_id)
            .cloned()
            .collect())
    }

    fn insert_programme(&self, mut programme: Programme) -> Result<Programme, StoreError> {
        let mut tables = self.write()?;
        if tables.programmes.values().any(|p| p.code == programme.code) {
            return Err(StoreError::ConstraintViolation(format!(
                "programme code already exists: {}",
                programme.code
            )));
        }
        programme.id = tables.next_programme_id;
        tables.next_programme_id += 1;
        tables.programmes.insert(programme.id, programme.clone());
        Ok(programme)
    }

    fn module(&self, id: ModuleId) -> Result<Option<Module>, StoreError> {
        Ok(self.read()?.modules.get(&id).cloned())
    }

    fn modules_in_programme(&self, programme_id: ProgrammeId) -> Result<Vec<Module>, StoreError> {
        Ok(self
            .read()?
            .modules
            .values()
            .filter(|m| m.programme_id == programme_id)
            .cloned()
            .collect())
    }

    fn insert_module(&self, mut module: Module) -> Result<Module, StoreError> {
        let mut tables = self.write()?;
        if tables.modules.values().any(|m| m.code == module.code) {
            return Err(StoreError::ConstraintViolation(format!(
                "module code already exists: {}",
                module.code
            )));
        }
        if !tables.programmes.contains_key(&module.programme_id) {
            return Err(StoreError::NotFound {
                entity: "programme",
                id: module.programme_id,
            });
        }
        module.id = tables.next_module_id;
        tables.next_module_id += 1;
        tables.modules.insert(module.id, module.clone());
        Ok(module)
    }

    fn set_module_rate(&self, module_id: ModuleId, hourly_rate: Decimal) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        let module = tables.modules.get_mut(&module_id).ok_or(StoreError::NotFound {
            entity: "module",
            id: module_id,
        })?;
        module.hourly_rate = hourly_rate;
        Ok(())
    }

    fn assignments_for_lecturer(
        &self,
        lecturer_id: UserId,
    ) -> Result<Vec<LecturerAssignment>, StoreError> {
        Ok(self
            .read()?
            .assignments
            .values()
            .filter(|a| a.lecturer_id == lecturer_id)
            .cloned()
            .collect())
    }

    fn is_actively_assigned(
        &self,
        lecturer_id: UserId,
        module_id: ModuleId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .read()?
            .assignments
            .get(&(lecturer_id, module_id))
            .is_some_and(|a| a.is_active))
    }

    fn upsert_assignment(&self, assignment: LecturerAssignment) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables
            .assignments
            .insert((assignment.lecturer_id, assignment.module_id), assignment);
        Ok(())
    }
}

impl ClaimStore for InMemoryStore {
    fn claim(&self, id: ClaimId) -> Result<Option<Claim>, StoreError> {
        Ok(self.read()?.claims.get(&id).cloned())
    }

    fn claims(&self) -> Result<Vec<Claim>, StoreError> {
        Ok(self.read()?.claims.values().cloned().collect())
    }

    fn claims_for_lecturer(&self, lecturer_id: UserId) -> Result<Vec<Claim>, StoreError> {
        Ok(self
            .read()?
            .claims
            .values()
            .filter(|c| c.lecturer_id == lecturer_id)
            .cloned()
            .collect())
    }

    fn items_for_claim(&self, claim_id: ClaimId) -> Result<Vec<ClaimItem>, StoreError> {
        Ok(self.read()?.items.get(&claim_id).cloned().unwrap_or_default())
    }

    fn history_for_claim(&self, claim_id: ClaimId) -> Result<Vec<StatusHistoryEntry>, StoreError> {
        Ok(self
            .read()?
            .history
            .get(&claim_id)
            .cloned()
            .unwrap_or_default())
    }

    fn document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self.read()?.documents.get(&id).cloned())
    }

    fn documents_for_claim(&self, claim_id: ClaimId) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = self
            .read()?
            .documents
            .values()
            .filter(|d| d.claim_id == claim_id)
            .cloned()
            .collect();
        docs.sort_by_key(|d| d.id);
        Ok(docs)
    }

    fn insert_document(&self, mut document: Document) -> Result<Document, StoreError> {
        let mut tables = self.write()?;
        if !tables.claims.contains_key(&document.claim_id) {
            return Err(StoreError::NotFound {
                entity: "claim",
                id: document.claim_id,
            });
        }
        document.id = tables.next_document_id;
        tables.next_document_id += 1;
        tables.documents.insert(document.id, document.clone());
        Ok(document)
    }

    fn delete_document(&self, id: DocumentId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        tables
            .documents
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: "document",
                id,
            })
    }

    fn has_claim_for_month(
        &self,
        lecturer_id: UserId,
        month: ClaimMonth,
        exclude: Option<ClaimId>,
    ) -> Result<bool, StoreError> {
        Ok(self.read()?.month_taken(lecturer_id, month, exclude))
    }

    fn max_claim_sequence(&self, year: i32) -> Result<u32, StoreError> {
        Ok(self
            .read()?
            .claims
            .values()
            .filter_map(|c| parse_claim_number(&c.claim_number))
            .filter(|(y, _)| *y == year)
            .map(|(_, seq)| seq)
            .max()
            .unwrap_or(0))
    }

    fn commit(&self, mutation: ClaimMutation) -> Result<Claim, StoreError> {
        let mut tables = self.write()?;
        let ClaimMutation {
            mut claim,
            expected_version,
            replace_items,
            mut history,
        } = mutation;

        // Validate everything before touching any table: a failed commit must
        // leave zero rows behind.
        let inserting = claim.id == 0;
        if inserting {
            if tables.month_taken(claim.lecturer_id, claim.claim_month, None) {
                return Err(StoreError::DuplicateClaim {
                    lecturer_id: claim.lecturer_id,
                    month: claim.claim_month,
                });
            }
            if tables
                .claims
                .values()
                .any(|c| c.claim_number == claim.claim_number)
            {
                return Err(StoreError::ConstraintViolation(format!(
                    "claim number already issued: {}",
                    claim.claim_number
                )));
            }
            claim.id = tables.next_claim_id;
            claim.version = 1;
        } else {
            let current = tables.claims.get(&claim.id).ok_or(StoreError::NotFound {
                entity: "claim",
                id: claim.id,
            })?;
            let expected = expected_version.ok_or_else(|| {
                StoreError::ConstraintViolation(
                    "update without expected version".to_string(),
                )
            })?;
            if current.version != expected {
                return Err(StoreError::VersionConflict {
                    claim_id: claim.id,
                    expected,
                    found: current.version,
                });
            }
            if claim.claim_month != current.claim_month
                && tables.month_taken(claim.lecturer_id, claim.claim_month, Some(claim.id))
            {
                return Err(StoreError::DuplicateClaim {
                    lecturer_id: claim.lecturer_id,
                    month: claim.claim_month,
                });
            }
            claim.version = current.version + 1;
        }

        // Point of no return: apply all rows.
        if inserting {
            tables.next_claim_id += 1;
        }

        if let Some(items) = replace_items {
            let mut fresh = Vec::with_capacity(items.len());
            for mut item in items {
                item.id = tables.next_item_id;
                tables.next_item_id += 1;
                item.claim_id = claim.id;
                fresh.push(item);
            }
            tables.items.insert(claim.id, fresh);
        }

        history.id = tables.next_history_id;
        tables.next_history_id += 1;
        history.claim_id = claim.id;
        tables.history.entry(claim.id).or_default().push(history);

        tables.claims.insert(claim.id, claim.clone());

        debug!(
            claim_id = claim.id,
            claim_number = %claim.claim_number,
            status = %claim.status,
            version = claim.version,
            "Claim mutation committed"
        );
        Ok(claim)
    }
}

/// In-memory blob storage for supporting documents.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<DocumentId, Vec<u8>>>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBlobStore for InMemoryBlobStore {
    fn put_blob(&self, document_id: DocumentId, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut blobs = self.blobs.write().map_err(|_| StoreError::LockPoisoned)?;
        blobs.insert(document_id, bytes);
        Ok(())
    }

    fn get_blob(&self, document_id: DocumentId) -> Result<Option<Vec<u8>>, StoreError> {
        let blobs = self.blobs.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(blobs.get(&document_id).cloned())
    }

    fn delete_blob(&self, document_id: DocumentId) -> Result<(), StoreError> {
        let mut blobs = self.blobs.write().map_err(|_| StoreError::LockPoisoned)?;
        blobs.remove(&document_id);
        Ok(())
    }
}
