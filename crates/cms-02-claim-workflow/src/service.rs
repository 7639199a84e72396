//! The workflow engine.
//!
//! One struct owns every lifecycle operation. Each mutation follows the same
//! shape: load, authorize, validate, build the [`ClaimMutation`], commit, then
//! publish a notification. The commit is the transaction boundary; the
//! publish happens after it and its outcome is ignored.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use cms_01_claim_store::{
    format_claim_number, CatalogStore, ClaimMutation, ClaimStore, DocumentBlobStore, UserStore,
};
use cms_03_authorization::{claim_programme_ids, ClaimScope, Principal};
use shared_bus::{ClaimEvent, NotificationSender};
use shared_types::{
    policy, Claim, ClaimId, ClaimItem, ClaimStatus, Document, DocumentId, StatusHistoryEntry, User,
    UserId, UserRole, WorkflowError,
};

use crate::domain::{
    validate_comments, validate_draft, ClaimDraft, WorkflowAction,
};
use crate::ports::{ClaimWorkflowApi, NewDocument};

/// Claim lifecycle engine. Cheap to clone; all state lives behind the ports.
#[derive(Clone)]
pub struct ClaimWorkflowEngine {
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn CatalogStore>,
    claims: Arc<dyn ClaimStore>,
    blobs: Arc<dyn DocumentBlobStore>,
    notifier: Arc<dyn NotificationSender>,
}

impl ClaimWorkflowEngine {
    pub fn new(
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
        claims: Arc<dyn ClaimStore>,
        blobs: Arc<dyn DocumentBlobStore>,
        notifier: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            users,
            catalog,
            claims,
            blobs,
            notifier,
        }
    }

    fn load_claim(&self, id: ClaimId) -> Result<Claim, WorkflowError> {
        self.claims
            .claim(id)
            .map_err(WorkflowError::from)?
            .ok_or(WorkflowError::NotFound { entity: "claim", id })
    }

    fn load_user(&self, id: UserId) -> Result<User, WorkflowError> {
        self.users
            .user(id)
            .map_err(WorkflowError::from)?
            .ok_or(WorkflowError::NotFound { entity: "user", id })
    }

    /// Resolves draft lines into claim items with rates snapshotted from the
    /// module catalog, returning the items and the derived totals.
    fn build_items(
        &self,
        lecturer_id: UserId,
        draft: &ClaimDraft,
        now: DateTime<Utc>,
    ) -> Result<(Vec<ClaimItem>, Decimal, Decimal), WorkflowError> {
        let mut items = Vec::with_capacity(draft.items.len());
        let mut total_hours = Decimal::ZERO;
        let mut total_amount = Decimal::ZERO;

        for line in &draft.items {
            let module = self
                .catalog
                .module(line.module_id)
                .map_err(WorkflowError::from)?
                .ok_or(WorkflowError::NotFound {
                    entity: "module",
                    id: line.module_id,
                })?;
            if !module.is_active {
                return Err(WorkflowError::ValidationFailed(format!(
                    "module {} is not active",
                    module.code
                )));
            }
            let assigned = self
                .catalog
                .is_actively_assigned(lecturer_id, module.id)
                .map_err(WorkflowError::from)?;
            if !assigned {
                return Err(WorkflowError::ValidationFailed(format!(
                    "lecturer is not assigned to module {}",
                    module.code
                )));
            }

            let line_total = line.hours_worked * module.hourly_rate;
            total_hours += line.hours_worked;
            total_amount += line_total;
            items.push(ClaimItem {
                id: 0,
                claim_id: 0,
                module_id: module.id,
                hours_worked: line.hours_worked,
                hourly_rate: module.hourly_rate,
                line_total,
                description: line.description.clone().unwrap_or_default(),
                work_date: line.work_date,
                created_at: now,
            });
        }

        Ok((items, total_hours, total_amount))
    }

    /// Ensures the acting coordinator covers every programme billed on the
    /// claim. Partial coverage is not enough to decide a claim.
    fn require_full_coverage(
        &self,
        actor: Principal,
        claim_id: ClaimId,
    ) -> Result<(), WorkflowError> {
        let items = self
            .claims
            .items_for_claim(claim_id)
            .map_err(WorkflowError::from)?;
        let programmes =
            claim_programme_ids(self.catalog.as_ref(), &items).map_err(WorkflowError::from)?;
        let scope =
            ClaimScope::for_principal(actor, self.catalog.as_ref()).map_err(WorkflowError::from)?;
        if !scope.covers_all(&programmes) {
            return Err(WorkflowError::Unauthorized(
                "coordinator does not cover every programme on this claim".into(),
            ));
        }
        Ok(())
    }

    /// Publishes a status-changed event. Outcome is logged, never propagated.
    async fn notify(&self, claim: &Claim, comments: Option<String>) {
        let event = ClaimEvent::status_changed(
            claim.id,
            claim.claim_number.clone(),
            claim.status,
            comments,
        );
        let receivers = self.notifier.publish(event).await;
        debug!(
            claim_id = claim.id,
            status = %claim.status,
            receivers,
            "published status change"
        );
    }
}

#[async_trait]
impl ClaimWorkflowApi for ClaimWorkflowEngine {
    async fn create_claim(
        &self,
        actor: Principal,
        draft: ClaimDraft,
    ) -> Result<Claim, WorkflowError> {
        let now = Utc::now();
        let lecturer = self.load_user(actor.user_id)?;
        if lecturer.role() != UserRole::Lecturer {
            return Err(WorkflowError::Unauthorized(
                "only lecturers submit claims".into(),
            ));
        }
        if !lecturer.is_active {
            return Err(WorkflowError::ValidationFailed(
                "lecturer account is inactive".into(),
            ));
        }

        validate_draft(&draft, now)?;
        if self
            .claims
            .has_claim_for_month(lecturer.id, draft.claim_month, None)
            .map_err(WorkflowError::from)?
        {
            return Err(WorkflowError::DuplicateClaim {
                lecturer_id: lecturer.id,
                month: draft.claim_month,
            });
        }

        let (items, total_hours, total_amount) = self.build_items(lecturer.id, &draft, now)?;

        let year = now.year();
        let sequence = self
            .claims
            .max_claim_sequence(year)
            .map_err(WorkflowError::from)?
            + 1;
        let claim = Claim {
            id: 0,
            lecturer_id: lecturer.id,
            claim_number: format_claim_number(year, sequence),
            claim_month: draft.claim_month,
            submission_date: now,
            total_hours,
            total_amount,
            status: ClaimStatus::Submitted,
            notes: draft.notes.clone().unwrap_or_default(),
            coordinator_id: None,
            coordinator_decision_date: None,
            coordinator_notes: None,
            manager_id: None,
            manager_decision_date: None,
            manager_notes: None,
            created_at: now,
            updated_at: now,
            version: 0,
        };
        let item_count = items.len();
        let history = StatusHistoryEntry {
            id: 0,
            claim_id: 0,
            previous_status: ClaimStatus::Draft,
            new_status: ClaimStatus::Submitted,
            changed_at: now,
            changed_by: lecturer.id,
            comments: "Claim submitted for approval".into(),
            system_notes: format!("Created with {item_count} items totaling {total_amount}"),
        };

        let committed = self
            .claims
            .commit(ClaimMutation::insert(claim, items, history))
            .map_err(WorkflowError::from)?;
        info!(
            claim_id = committed.id,
            claim_number = %committed.claim_number,
            lecturer_id = lecturer.id,
            %total_amount,
            "claim created"
        );
        self.notify(&committed, None).await;
        Ok(committed)
    }

    async fn update_claim(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        draft: ClaimDraft,
    ) -> Result<Claim, WorkflowError> {
        let now = Utc::now();
        let existing = self.load_claim(claim_id)?;
        if existing.lecturer_id != actor.user_id {
            return Err(WorkflowError::Unauthorized(
                "only the owning lecturer may edit a claim".into(),
            ));
        }
        if !existing.status.is_editable() {
            return Err(WorkflowError::InvalidState {
                action: "edit",
                status: existing.status,
            });
        }

        validate_draft(&draft, now)?;
        if self
            .claims
            .has_claim_for_month(existing.lecturer_id, draft.claim_month, Some(claim_id))
            .map_err(WorkflowError::from)?
        {
            return Err(WorkflowError::DuplicateClaim {
                lecturer_id: existing.lecturer_id,
                month: draft.claim_month,
            });
        }

        let (items, total_hours, total_amount) =
            self.build_items(existing.lecturer_id, &draft, now)?;

        let previous_status = existing.status;
        let mut claim = existing.clone();
        claim.claim_month = draft.claim_month;
        claim.notes = draft.notes.clone().unwrap_or_default();
        claim.total_hours = total_hours;
        claim.total_amount = total_amount;
        claim.status = ClaimStatus::Submitted;
        claim.submission_date = now;
        claim.updated_at = now;
        // Resubmission restarts the review; stale decisions are cleared.
        claim.coordinator_id = None;
        claim.coordinator_decision_date = None;
        claim.coordinator_notes = None;
        claim.manager_id = None;
        claim.manager_decision_date = None;
        claim.manager_notes = None;

        let item_count = items.len();
        let history = StatusHistoryEntry {
            id: 0,
            claim_id,
            previous_status,
            new_status: ClaimStatus::Submitted,
            changed_at: now,
            changed_by: actor.user_id,
            comments: "Claim updated and resubmitted".into(),
            system_notes: format!("Updated with {item_count} items totaling {total_amount}"),
        };

        let committed = self
            .claims
            .commit(ClaimMutation::update_with_items(
                claim,
                existing.version,
                items,
                history,
            ))
            .map_err(WorkflowError::from)?;
        info!(claim_id, %total_amount, "claim resubmitted");
        self.notify(&committed, None).await;
        Ok(committed)
    }

    async fn process_action(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        action: WorkflowAction,
        comments: Option<&str>,
    ) -> Result<Claim, WorkflowError> {
        let now = Utc::now();
        let existing = self.load_claim(claim_id)?;

        match action {
            WorkflowAction::CoordinatorApprove | WorkflowAction::CoordinatorReject => {
                if actor.role != UserRole::Coordinator {
                    return Err(WorkflowError::Unauthorized(format!(
                        "role {} cannot perform coordinator decisions",
                        actor.role
                    )));
                }
                self.require_full_coverage(actor, claim_id)?;
            }
            WorkflowAction::ManagerApprove | WorkflowAction::ManagerReject => {
                if actor.role != UserRole::Manager {
                    return Err(WorkflowError::Unauthorized(format!(
                        "role {} cannot perform manager decisions",
                        actor.role
                    )));
                }
            }
            WorkflowAction::Cancel => {
                let is_owner = existing.lecturer_id == actor.user_id;
                if !is_owner && actor.role != UserRole::Admin {
                    return Err(WorkflowError::Unauthorized(
                        "only the owning lecturer or an administrator may cancel a claim".into(),
                    ));
                }
            }
            WorkflowAction::MarkPaid => {
                if actor.role != UserRole::Admin {
                    return Err(WorkflowError::Unauthorized(
                        "only an administrator may mark a claim paid".into(),
                    ));
                }
            }
        }

        let decision_comments = if action.requires_comments() {
            Some(validate_comments(comments)?)
        } else {
            comments
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };

        if !action.permitted(existing.status) {
            return Err(WorkflowError::InvalidState {
                action: action.verb(),
                status: existing.status,
            });
        }

        let previous_status = existing.status;
        let mut claim = existing.clone();
        claim.status = action.resulting_status();
        claim.updated_at = now;
        match action {
            WorkflowAction::CoordinatorApprove | WorkflowAction::CoordinatorReject => {
                claim.coordinator_id = Some(actor.user_id);
                claim.coordinator_decision_date = Some(now);
                claim.coordinator_notes = decision_comments.clone();
            }
            WorkflowAction::ManagerApprove | WorkflowAction::ManagerReject => {
                claim.manager_id = Some(actor.user_id);
                claim.manager_decision_date = Some(now);
                claim.manager_notes = decision_comments.clone();
            }
            WorkflowAction::Cancel | WorkflowAction::MarkPaid => {}
        }

        let history = StatusHistoryEntry {
            id: 0,
            claim_id,
            previous_status,
            new_status: claim.status,
            changed_at: now,
            changed_by: actor.user_id,
            comments: decision_comments.clone().unwrap_or_default(),
            system_notes: format!("Processed by {}: {}", actor.role, action.verb()),
        };

        let committed = self
            .claims
            .commit(ClaimMutation::update(claim, existing.version, history))
            .map_err(WorkflowError::from)?;
        info!(
            claim_id,
            actor_id = actor.user_id,
            action = action.verb(),
            from = %previous_status,
            to = %committed.status,
            "claim action processed"
        );
        self.notify(&committed, decision_comments).await;
        Ok(committed)
    }

    async fn advance_claim(
        &self,
        actor: Principal,
        claim_id: ClaimId,
    ) -> Result<Claim, WorkflowError> {
        let now = Utc::now();
        let existing = self.load_claim(claim_id)?;

        let next = match (existing.status, actor.role) {
            (ClaimStatus::Submitted, UserRole::Coordinator) => {
                self.require_full_coverage(actor, claim_id)?;
                ClaimStatus::UnderCoordinatorReview
            }
            (ClaimStatus::CoordinatorApproved, UserRole::Manager) => {
                ClaimStatus::UnderManagerReview
            }
            (status, _) => {
                return Err(WorkflowError::InvalidState {
                    action: "advance",
                    status,
                })
            }
        };

        let previous_status = existing.status;
        let mut claim = existing.clone();
        claim.status = next;
        claim.updated_at = now;

        let history = StatusHistoryEntry {
            id: 0,
            claim_id,
            previous_status,
            new_status: next,
            changed_at: now,
            changed_by: actor.user_id,
            comments: String::new(),
            system_notes: format!(
                "Status changed from {} to {}",
                previous_status.display_name(),
                next.display_name()
            ),
        };

        let committed = self
            .claims
            .commit(ClaimMutation::update(claim, existing.version, history))
            .map_err(WorkflowError::from)?;
        debug!(claim_id, to = %next, "claim taken into review");
        self.notify(&committed, None).await;
        Ok(committed)
    }

    async fn attach_document(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        meta: NewDocument,
        content: Vec<u8>,
    ) -> Result<Document, WorkflowError> {
        let claim = self.load_claim(claim_id)?;
        if claim.lecturer_id != actor.user_id && actor.role != UserRole::Admin {
            return Err(WorkflowError::Unauthorized(
                "only the owning lecturer or an administrator may attach documents".into(),
            ));
        }
        if claim.status.is_terminal() {
            return Err(WorkflowError::InvalidState {
                action: "attach documents to",
                status: claim.status,
            });
        }

        let is_required =
            claim.total_amount > Decimal::from(policy::DOCUMENT_REQUIRED_THRESHOLD);
        let document = Document {
            id: 0,
            claim_id,
            file_name: meta.file_name,
            content_type: meta.content_type,
            file_size: content.len() as u64,
            uploaded_at: Utc::now(),
            description: meta.description.unwrap_or_default(),
            is_required,
            uploaded_by: actor.user_id,
        };
        let inserted = self
            .claims
            .insert_document(document)
            .map_err(WorkflowError::from)?;
        self.blobs
            .put_blob(inserted.id, content)
            .map_err(WorkflowError::from)?;
        info!(
            claim_id,
            document_id = inserted.id,
            file_name = %inserted.file_name,
            is_required,
            "document attached"
        );
        Ok(inserted)
    }

    async fn delete_document(
        &self,
        actor: Principal,
        document_id: DocumentId,
    ) -> Result<(), WorkflowError> {
        let document = self
            .claims
            .document(document_id)
            .map_err(WorkflowError::from)?
            .ok_or(WorkflowError::NotFound {
                entity: "document",
                id: document_id,
            })?;
        let claim = self.load_claim(document.claim_id)?;
        // Evidence behind a finalized approval stays put.
        if matches!(
            claim.status,
            ClaimStatus::ManagerApproved | ClaimStatus::Paid
        ) {
            return Err(WorkflowError::InvalidState {
                action: "remove documents from",
                status: claim.status,
            });
        }
        let allowed = document.uploaded_by == actor.user_id
            || claim.lecturer_id == actor.user_id
            || actor.role == UserRole::Admin;
        if !allowed {
            return Err(WorkflowError::Unauthorized(
                "only the uploader, the claim owner or an administrator may remove documents"
                    .into(),
            ));
        }

        self.claims
            .delete_document(document_id)
            .map_err(WorkflowError::from)?;
        self.blobs
            .delete_blob(document_id)
            .map_err(WorkflowError::from)?;
        info!(claim_id = claim.id, document_id, "document removed");
        Ok(())
    }

    async fn has_required_documents(&self, claim_id: ClaimId) -> Result<bool, WorkflowError> {
        let claim = self.load_claim(claim_id)?;
        if claim.total_amount <= Decimal::from(policy::DOCUMENT_REQUIRED_THRESHOLD) {
            return Ok(true);
        }
        let documents = self
            .claims
            .documents_for_claim(claim_id)
            .map_err(WorkflowError::from)?;
        Ok(!documents.is_empty())
    }
}
