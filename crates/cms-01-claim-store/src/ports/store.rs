//! Store port traits.
//!
//! The workflow engine, dashboard and verification subsystems depend on these
//! abstractions only; the adapter behind them decides durability.

use crate::domain::{ClaimMutation, StoreError};
use shared_types::{
    Claim, ClaimId, ClaimItem, ClaimMonth, Document, DocumentId, LecturerAssignment, Module,
    ModuleId, Programme, ProgrammeId, StatusHistoryEntry, User, UserId,
};

/// User lookups and registration.
pub trait UserStore: Send + Sync {
    fn user(&self, id: UserId) -> Result<Option<User>, StoreError>;
    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// Inserts a user, assigning its id. Email is unique.
    fn insert_user(&self, user: User) -> Result<User, StoreError>;
}

/// Programmes, modules and lecturer-module assignments.
pub trait CatalogStore: Send + Sync {
    fn programme(&self, id: ProgrammeId) -> Result<Option<Programme>, StoreError>;
    fn programmes_for_coordinator(
        &self,
        coordinator_id: UserId,
    ) -> Result<Vec<Programme>, StoreError>;
    /// Inserts a programme, assigning its id. Code is unique.
    fn insert_programme(&self, programme: Programme) -> Result<Programme, StoreError>;

    fn module(&self, id: ModuleId) -> Result<Option<Module>, StoreError>;
    fn modules_in_programme(&self, programme_id: ProgrammeId) -> Result<Vec<Module>, StoreError>;
    /// Inserts a module, assigning its id. Code is unique.
    fn insert_module(&self, module: Module) -> Result<Module, StoreError>;
    /// Replaces a module's canonical hourly rate (drift-detection fixture).
    fn set_module_rate(
        &self,
        module_id: ModuleId,
        hourly_rate: rust_decimal::Decimal,
    ) -> Result<(), StoreError>;

    fn assignments_for_lecturer(
        &self,
        lecturer_id: UserId,
    ) -> Result<Vec<LecturerAssignment>, StoreError>;
    /// Whether the lecturer holds an active assignment to the module.
    fn is_actively_assigned(
        &self,
        lecturer_id: UserId,
        module_id: ModuleId,
    ) -> Result<bool, StoreError>;
    fn upsert_assignment(&self, assignment: LecturerAssignment) -> Result<(), StoreError>;
}

/// Claims, their items, the status ledger and document metadata.
pub trait ClaimStore: Send + Sync {
    fn claim(&self, id: ClaimId) -> Result<Option<Claim>, StoreError>;
    /// All claims, unordered. Callers scope and sort.
    fn claims(&self) -> Result<Vec<Claim>, StoreError>;
    fn claims_for_lecturer(&self, lecturer_id: UserId) -> Result<Vec<Claim>, StoreError>;

    fn items_for_claim(&self, claim_id: ClaimId) -> Result<Vec<ClaimItem>, StoreError>;
    /// Ledger entries for the claim in append order.
    fn history_for_claim(&self, claim_id: ClaimId) -> Result<Vec<StatusHistoryEntry>, StoreError>;

    fn document(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;
    fn documents_for_claim(&self, claim_id: ClaimId) -> Result<Vec<Document>, StoreError>;
    fn insert_document(&self, document: Document) -> Result<Document, StoreError>;
    fn delete_document(&self, id: DocumentId) -> Result<(), StoreError>;

    /// Whether a non-cancelled claim exists for the lecturer in the month,
    /// optionally excluding one claim id (for edits).
    fn has_claim_for_month(
        &self,
        lecturer_id: UserId,
        month: ClaimMonth,
        exclude: Option<ClaimId>,
    ) -> Result<bool, StoreError>;

    /// Highest claim-number sequence issued for the year (0 if none).
    fn max_claim_sequence(&self, year: i32) -> Result<u32, StoreError>;

    /// Applies one atomic mutation. See [`ClaimMutation`] for the contract.
    /// Returns the persisted claim with assigned ids and bumped version.
    fn commit(&self, mutation: ClaimMutation) -> Result<Claim, StoreError>;
}

/// Opaque blob storage for supporting documents. The core only tracks
/// metadata; bytes live behind this port.
pub trait DocumentBlobStore: Send + Sync {
    fn put_blob(&self, document_id: DocumentId, bytes: Vec<u8>) -> Result<(), StoreError>;
    fn get_blob(&self, document_id: DocumentId) -> Result<Option<Vec<u8>>, StoreError>;
    fn delete_blob(&self, document_id: DocumentId) -> Result<(), StoreError>;
}
