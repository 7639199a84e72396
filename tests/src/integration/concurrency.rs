//! Concurrent writers against one claim.

#[cfg(test)]
mod tests {
    use crate::support::system;
    use cms_01_claim_store::{ClaimMutation, ClaimStore, StoreError};
    use cms_02_claim_workflow::{ClaimWorkflowApi, WorkflowAction};
    use shared_types::{ClaimStatus, StatusHistoryEntry};

    #[tokio::test(flavor = "multi_thread")]
    async fn test_racing_coordinator_decisions_serialize() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();

        let approve = {
            let engine = sys.engine.clone();
            let coordinator = sys.coordinator_comp;
            let claim_id = claim.id;
            tokio::spawn(async move {
                engine
                    .process_action(
                        coordinator,
                        claim_id,
                        WorkflowAction::CoordinatorApprove,
                        Some("verified"),
                    )
                    .await
            })
        };
        let reject = {
            let engine = sys.engine.clone();
            let coordinator = sys.coordinator_comp;
            let claim_id = claim.id;
            tokio::spawn(async move {
                engine
                    .process_action(
                        coordinator,
                        claim_id,
                        WorkflowAction::CoordinatorReject,
                        Some("hours look wrong"),
                    )
                    .await
            })
        };

        let outcomes = [approve.await.unwrap(), reject.await.unwrap()];
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1, "exactly one decision wins the race");

        // One submission entry plus exactly one decision entry.
        let history = sys.store.history_for_claim(claim.id).unwrap();
        assert_eq!(history.len(), 2);

        let stored = sys.store.claim(claim.id).unwrap().unwrap();
        assert!(matches!(
            stored.status,
            ClaimStatus::CoordinatorApproved | ClaimStatus::CoordinatorRejected
        ));
    }

    #[tokio::test]
    async fn test_stale_version_commit_is_refused_without_side_effects() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();

        // Two writers read version 1; the first commit bumps it.
        let mut first = claim.clone();
        first.status = ClaimStatus::UnderCoordinatorReview;
        let history = |new_status| StatusHistoryEntry {
            id: 0,
            claim_id: claim.id,
            previous_status: claim.status,
            new_status,
            changed_at: chrono::Utc::now(),
            changed_by: sys.coordinator_comp.user_id,
            comments: String::new(),
            system_notes: String::new(),
        };
        sys.store
            .commit(ClaimMutation::update(
                first,
                claim.version,
                history(ClaimStatus::UnderCoordinatorReview),
            ))
            .unwrap();

        let mut second = claim.clone();
        second.status = ClaimStatus::CoordinatorApproved;
        let err = sys
            .store
            .commit(ClaimMutation::update(
                second,
                claim.version,
                history(ClaimStatus::CoordinatorApproved),
            ))
            .unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { .. }));

        // The losing commit left neither a status change nor a ledger row.
        let stored = sys.store.claim(claim.id).unwrap().unwrap();
        assert_eq!(stored.status, ClaimStatus::UnderCoordinatorReview);
        assert_eq!(sys.store.history_for_claim(claim.id).unwrap().len(), 2);
    }
}
