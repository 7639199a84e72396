//! # Core Domain Entities
//!
//! Defines the claim-system entities. All references between entities are by
//! surrogate id; resolution happens through the store ports.
//!
//! ## Clusters
//!
//! - **People**: `User`, `RoleProfile`, `UserRole`
//! - **Catalog**: `Programme`, `Module`, `LecturerAssignment`
//! - **Claims**: `Claim`, `ClaimItem`, `StatusHistoryEntry`, `Document`

use crate::month::ClaimMonth;
use crate::status::ClaimStatus;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// CLUSTER A: PEOPLE
// =============================================================================

pub type UserId = u64;
pub type ProgrammeId = u64;
pub type ModuleId = u64;
pub type ClaimId = u64;
pub type ClaimItemId = u64;
pub type DocumentId = u64;
pub type HistoryId = u64;

/// The fixed role of a user. Roles never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Lecturer,
    Coordinator,
    Manager,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Lecturer => "Lecturer",
            Self::Coordinator => "Programme Coordinator",
            Self::Manager => "Academic Manager",
            Self::Admin => "System Administrator",
        };
        f.write_str(label)
    }
}

/// Role-specific payload. The variant is the user's role; lecturer-only
/// contract fields live on the lecturer variant rather than on a subclass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoleProfile {
    Lecturer {
        employee_number: String,
        default_hourly_rate: Decimal,
    },
    Coordinator,
    Manager,
    Admin,
}

impl RoleProfile {
    #[must_use]
    pub fn role(&self) -> UserRole {
        match self {
            Self::Lecturer { .. } => UserRole::Lecturer,
            Self::Coordinator => UserRole::Coordinator,
            Self::Manager => UserRole::Manager,
            Self::Admin => UserRole::Admin,
        }
    }
}

/// A system user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_active: bool,
    pub profile: RoleProfile,
}

impl User {
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    /// "First Last", as rendered in ledgers and dashboards.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// =============================================================================
// CLUSTER B: CATALOG
// =============================================================================

/// An academic programme. Exactly one coordinator owns each programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programme {
    pub id: ProgrammeId,
    pub code: String,
    pub name: String,
    pub coordinator_id: UserId,
    pub is_active: bool,
}

/// A module within a programme, with its canonical hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub code: String,
    pub name: String,
    pub programme_id: ProgrammeId,
    pub hourly_rate: Decimal,
    pub credit_hours: u32,
    pub is_active: bool,
}

/// Assignment of a lecturer to a module. Only active assignments may be
/// billed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LecturerAssignment {
    pub lecturer_id: UserId,
    pub module_id: ModuleId,
    pub assigned_at: DateTime<Utc>,
    pub is_active: bool,
}

// =============================================================================
// CLUSTER C: CLAIMS
// =============================================================================

/// A lecturer's monthly claim. Totals are derived from the items and are
/// never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub lecturer_id: UserId,
    /// `CLM-{year}-{seq:04}`; unique, consumed verbatim by reports.
    pub claim_number: String,
    pub claim_month: ClaimMonth,
    pub submission_date: DateTime<Utc>,
    pub total_hours: Decimal,
    pub total_amount: Decimal,
    pub status: ClaimStatus,
    pub notes: String,

    // Stage 1 decision fields, set when the coordinator acts.
    pub coordinator_id: Option<UserId>,
    pub coordinator_decision_date: Option<DateTime<Utc>>,
    pub coordinator_notes: Option<String>,

    // Stage 2 decision fields, set when the manager acts.
    pub manager_id: Option<UserId>,
    pub manager_decision_date: Option<DateTime<Utc>>,
    pub manager_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version, bumped by the store on every commit.
    pub version: u64,
}

/// One module/hours/rate line within a claim. The rate is snapshotted from
/// the module at creation, not live-linked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimItem {
    pub id: ClaimItemId,
    pub claim_id: ClaimId,
    pub module_id: ModuleId,
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub line_total: Decimal,
    pub description: String,
    pub work_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Immutable record of one status transition. Appended exactly once per
/// transition; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: HistoryId,
    pub claim_id: ClaimId,
    pub previous_status: ClaimStatus,
    pub new_status: ClaimStatus,
    pub changed_at: DateTime<Utc>,
    pub changed_by: UserId,
    pub comments: String,
    pub system_notes: String,
}

/// Metadata for a supporting document. The blob itself lives behind the
/// document blob store, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub claim_id: ClaimId,
    pub file_name: String,
    pub content_type: String,
    pub file_size: u64,
    pub uploaded_at: DateTime<Utc>,
    pub description: String,
    pub is_required: bool,
    pub uploaded_by: UserId,
}
