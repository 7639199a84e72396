//! Visibility and decision-authority scoping across roles.

#[cfg(test)]
mod tests {
    use crate::support::{draft, item, system};
    use cms_02_claim_workflow::{ClaimWorkflowApi, WorkflowAction};
    use cms_04_dashboard::{ClaimSearchFilter, ClaimSortKey};
    use shared_types::WorkflowError;

    #[tokio::test]
    async fn test_lecturer_sees_only_own_claims() {
        let sys = system();
        let own = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let other = sys.submit(sys.lecturer_b, sys.module_math, 8).await.unwrap();

        let page = sys.dashboard.search_claims(
            sys.lecturer_a,
            &ClaimSearchFilter::default(),
            ClaimSortKey::default(),
            1,
            10,
        );
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].claim.id, own.id);

        // Nor can the lecturer open someone else's detail view.
        assert!(sys.dashboard.claim_detail(sys.lecturer_a, other.id).is_none());
    }

    #[tokio::test]
    async fn test_coordinator_queue_is_limited_to_their_programmes() {
        let sys = system();
        let computing = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let engineering = sys.submit(sys.lecturer_b, sys.module_math, 8).await.unwrap();

        let comp_queue = sys.dashboard.pending_approvals(sys.coordinator_comp);
        assert_eq!(comp_queue.len(), 1);
        assert_eq!(comp_queue[0].claim.id, computing.id);

        let eng_queue = sys.dashboard.pending_approvals(sys.coordinator_eng);
        assert_eq!(eng_queue.len(), 1);
        assert_eq!(eng_queue[0].claim.id, engineering.id);

        // Search agrees with the queue.
        let page = sys.dashboard.search_claims(
            sys.coordinator_comp,
            &ClaimSearchFilter::default(),
            ClaimSortKey::default(),
            1,
            10,
        );
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].claim.id, computing.id);
    }

    #[tokio::test]
    async fn test_partial_programme_coverage_cannot_decide() {
        let sys = system();
        // Lecturer B bills modules from both programmes in one claim.
        let claim = sys
            .engine
            .create_claim(
                sys.lecturer_b,
                draft(vec![item(sys.module_prog, 6), item(sys.module_math, 6)]),
            )
            .await
            .unwrap();

        // Each coordinator sees the claim (their programme is on it)...
        assert!(sys
            .dashboard
            .claim_detail(sys.coordinator_comp, claim.id)
            .is_some());
        assert!(sys
            .dashboard
            .claim_detail(sys.coordinator_eng, claim.id)
            .is_some());

        // ...but neither covers all of it, so neither may decide.
        for coordinator in [sys.coordinator_comp, sys.coordinator_eng] {
            let err = sys
                .engine
                .process_action(
                    coordinator,
                    claim.id,
                    WorkflowAction::CoordinatorApprove,
                    Some("fine"),
                )
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn test_manager_and_admin_are_unrestricted() {
        let sys = system();
        let a = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let b = sys.submit(sys.lecturer_b, sys.module_math, 8).await.unwrap();

        for principal in [sys.manager, sys.admin] {
            let page = sys.dashboard.search_claims(
                principal,
                &ClaimSearchFilter::default(),
                ClaimSortKey::default(),
                1,
                10,
            );
            assert_eq!(page.total, 2);
        }
        assert!(sys.dashboard.claim_detail(sys.manager, a.id).is_some());
        assert!(sys.dashboard.claim_detail(sys.admin, b.id).is_some());
    }

    #[tokio::test]
    async fn test_manager_queue_holds_only_coordinator_approved_claims() {
        let sys = system();
        let waiting = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let ready = sys.submit(sys.lecturer_b, sys.module_math, 8).await.unwrap();
        sys.engine
            .process_action(
                sys.coordinator_eng,
                ready.id,
                WorkflowAction::CoordinatorApprove,
                Some("verified"),
            )
            .await
            .unwrap();

        let queue = sys.dashboard.pending_approvals(sys.manager);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].claim.id, ready.id);
        assert_ne!(queue[0].claim.id, waiting.id);
    }
}
