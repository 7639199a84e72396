//! Inbound API of the workflow engine.

use async_trait::async_trait;
use cms_03_authorization::Principal;
use shared_types::{Claim, ClaimId, Document, DocumentId, WorkflowError};

use crate::domain::{ClaimDraft, WorkflowAction};

/// Metadata for a document being attached to a claim.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub file_name: String,
    pub content_type: String,
    pub description: Option<String>,
}

/// The operations a caller may perform on the claim lifecycle.
///
/// Every method takes the acting [`Principal`]; authorization is decided
/// here, not at the call site.
#[async_trait]
pub trait ClaimWorkflowApi: Send + Sync {
    /// Creates a new claim in `Submitted` state and returns it.
    async fn create_claim(
        &self,
        actor: Principal,
        draft: ClaimDraft,
    ) -> Result<Claim, WorkflowError>;

    /// Replaces the content of an editable claim and resubmits it.
    async fn update_claim(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        draft: ClaimDraft,
    ) -> Result<Claim, WorkflowError>;

    /// Applies a reviewer or owner action to a claim.
    async fn process_action(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        action: WorkflowAction,
        comments: Option<&str>,
    ) -> Result<Claim, WorkflowError>;

    /// Moves a pending claim into the in-review state for the actor's stage.
    async fn advance_claim(
        &self,
        actor: Principal,
        claim_id: ClaimId,
    ) -> Result<Claim, WorkflowError>;

    /// Attaches a supporting document and its content to a claim.
    async fn attach_document(
        &self,
        actor: Principal,
        claim_id: ClaimId,
        meta: NewDocument,
        content: Vec<u8>,
    ) -> Result<Document, WorkflowError>;

    /// Removes a document, refused once the claim is finally approved or paid.
    async fn delete_document(
        &self,
        actor: Principal,
        document_id: DocumentId,
    ) -> Result<(), WorkflowError>;

    /// Whether the claim's documentation requirement is satisfied.
    async fn has_required_documents(&self, claim_id: ClaimId) -> Result<bool, WorkflowError>;
}
