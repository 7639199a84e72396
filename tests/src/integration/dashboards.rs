//! Dashboard read models over real workflow output.

#[cfg(test)]
mod tests {
    use crate::support::system;
    use cms_02_claim_workflow::{ClaimWorkflowApi, NewDocument, WorkflowAction};
    use cms_04_dashboard::{ClaimSearchFilter, ClaimSortKey, Priority, StepState};
    use rust_decimal::Decimal;
    use shared_types::ClaimStatus;

    #[tokio::test]
    async fn test_dashboard_stats_track_the_pipeline() {
        let sys = system();
        let stats = sys.dashboard.dashboard_stats(sys.lecturer_a);
        assert_eq!(stats.total_claims, 0);
        // No claims: the average guards against dividing by zero.
        assert_eq!(stats.average_claim_amount, Decimal::ZERO);

        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let stats = sys.dashboard.dashboard_stats(sys.lecturer_a);
        assert_eq!(stats.total_claims, 1);
        assert_eq!(stats.pending_count, 1);
        // Nothing earned or averaged until the manager approves.
        assert_eq!(stats.total_earned, Decimal::ZERO);
        assert_eq!(stats.average_claim_amount, Decimal::ZERO);

        sys.approve_fully(sys.coordinator_comp, &claim).await.unwrap();
        let stats = sys.dashboard.dashboard_stats(sys.lecturer_a);
        assert_eq!(stats.pending_count, 0);
        assert_eq!(stats.approved_count, 1);
        assert_eq!(stats.total_earned, Decimal::from(4500));
        // The average covers approved claims only.
        assert_eq!(stats.average_claim_amount, Decimal::from(4500));
    }

    #[tokio::test]
    async fn test_dashboard_stats_follow_the_principals_scope() {
        let sys = system();
        // One claim billed to each programme.
        let comp = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        sys.submit(sys.lecturer_b, sys.module_math, 5).await.unwrap();

        // Lecturers count only their own claims.
        assert_eq!(sys.dashboard.dashboard_stats(sys.lecturer_a).total_claims, 1);

        // Coordinators count the claims billed to their programmes.
        assert_eq!(
            sys.dashboard.dashboard_stats(sys.coordinator_comp).total_claims,
            1
        );
        assert_eq!(
            sys.dashboard.dashboard_stats(sys.coordinator_eng).total_claims,
            1
        );

        // Managers and admins count everything.
        assert_eq!(sys.dashboard.dashboard_stats(sys.manager).total_claims, 2);
        assert_eq!(sys.dashboard.dashboard_stats(sys.admin).total_claims, 2);

        sys.approve_fully(sys.coordinator_comp, &comp).await.unwrap();
        let stats = sys.dashboard.dashboard_stats(sys.manager);
        assert_eq!(stats.approved_count, 1);
        assert_eq!(stats.total_earned, Decimal::from(4500));
        assert_eq!(stats.average_claim_amount, Decimal::from(4500));
    }

    #[tokio::test]
    async fn test_cancelled_claims_count_towards_the_total_but_earn_nothing() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        sys.engine
            .process_action(
                sys.coordinator_comp,
                claim.id,
                WorkflowAction::CoordinatorReject,
                Some("wrong month"),
            )
            .await
            .unwrap();
        sys.engine
            .process_action(sys.lecturer_a, claim.id, WorkflowAction::Cancel, None)
            .await
            .unwrap();

        let stats = sys.dashboard.dashboard_stats(sys.lecturer_a);
        assert_eq!(stats.total_claims, 1);
        assert_eq!(stats.pending_count, 0);
        assert_eq!(stats.rejected_count, 0);
        assert_eq!(stats.total_earned, Decimal::ZERO);
        assert_eq!(stats.average_claim_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_pending_queue_is_fifo_with_fresh_claims_low_priority() {
        let sys = system();
        let first = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let second = sys.submit(sys.lecturer_b, sys.module_prog, 6).await.unwrap();

        let queue = sys.dashboard.pending_approvals(sys.coordinator_comp);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].claim.id, first.id);
        assert_eq!(queue[1].claim.id, second.id);
        assert_eq!(queue[0].priority, Priority::Low);
        assert_eq!(queue[0].lecturer_name, "Thandi Nkosi");
    }

    #[tokio::test]
    async fn test_queue_flags_missing_required_documents() {
        let sys = system();
        // 150h at 450 = 67,500: documentation required.
        let large = sys.submit(sys.lecturer_a, sys.module_prog, 150).await.unwrap();
        // 10h at 450 = 4,500: under the threshold.
        sys.submit(sys.lecturer_b, sys.module_prog, 10).await.unwrap();

        let queue = sys.dashboard.pending_approvals(sys.coordinator_comp);
        let large_row = queue.iter().find(|r| r.claim.id == large.id).unwrap();
        assert!(!large_row.has_required_documents);
        let small_row = queue.iter().find(|r| r.claim.id != large.id).unwrap();
        assert!(small_row.has_required_documents);

        sys.engine
            .attach_document(
                sys.lecturer_a,
                large.id,
                NewDocument {
                    file_name: "timesheet.pdf".into(),
                    content_type: "application/pdf".into(),
                    description: None,
                },
                vec![0u8; 128],
            )
            .await
            .unwrap();
        let queue = sys.dashboard.pending_approvals(sys.coordinator_comp);
        let large_row = queue.iter().find(|r| r.claim.id == large.id).unwrap();
        assert!(large_row.has_required_documents);
    }

    #[tokio::test]
    async fn test_detail_view_renders_progress_and_timeline() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let claim = sys.approve_fully(sys.coordinator_comp, &claim).await.unwrap();

        let detail = sys.dashboard.claim_detail(sys.lecturer_a, claim.id).unwrap();
        assert_eq!(detail.progress_percent, 90);
        assert_eq!(detail.current_stage, "Awaiting Payment");
        assert_eq!(detail.items.len(), 1);

        // Newest first, with actor display names resolved.
        assert_eq!(detail.timeline.len(), 3);
        assert_eq!(detail.timeline[0].new_status, ClaimStatus::ManagerApproved);
        assert_eq!(detail.timeline[0].actor_name, "Lerato Dlamini");
        assert_eq!(detail.timeline[2].new_status, ClaimStatus::Submitted);

        // Tracker: first three steps complete, payment current.
        assert!(detail.tracker[..3]
            .iter()
            .all(|s| s.state == StepState::Complete));
        assert_eq!(detail.tracker[3].state, StepState::Current);
    }

    #[tokio::test]
    async fn test_rejected_claim_resets_progress() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        sys.engine
            .process_action(
                sys.coordinator_comp,
                claim.id,
                WorkflowAction::CoordinatorReject,
                Some("incorrect hours"),
            )
            .await
            .unwrap();

        let detail = sys.dashboard.claim_detail(sys.lecturer_a, claim.id).unwrap();
        assert_eq!(detail.progress_percent, 0);
        assert_eq!(detail.current_stage, "Rejected by Coordinator");
        assert_eq!(detail.tracker[1].state, StepState::Failed);
    }

    #[tokio::test]
    async fn test_search_filters_and_pagination() {
        let sys = system();
        let claim = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        sys.submit(sys.lecturer_b, sys.module_prog, 6).await.unwrap();

        // By claim number.
        let filter = ClaimSearchFilter {
            term: Some(claim.claim_number.clone()),
            ..ClaimSearchFilter::default()
        };
        let page =
            sys.dashboard
                .search_claims(sys.admin, &filter, ClaimSortKey::default(), 1, 10);
        assert_eq!(page.total, 1);

        // By lecturer name fragment, case-insensitive.
        let filter = ClaimSearchFilter {
            term: Some("sipho".into()),
            ..ClaimSearchFilter::default()
        };
        let page =
            sys.dashboard
                .search_claims(sys.admin, &filter, ClaimSortKey::default(), 1, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].lecturer_name, "Sipho Mokoena");

        // By status after a decision.
        sys.engine
            .process_action(
                sys.coordinator_comp,
                claim.id,
                WorkflowAction::CoordinatorApprove,
                Some("verified"),
            )
            .await
            .unwrap();
        let filter = ClaimSearchFilter {
            status: Some(ClaimStatus::CoordinatorApproved),
            ..ClaimSearchFilter::default()
        };
        let page =
            sys.dashboard
                .search_claims(sys.admin, &filter, ClaimSortKey::default(), 1, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].claim.id, claim.id);

        // Pagination: one result per page, two pages.
        let page = sys.dashboard.search_claims(
            sys.admin,
            &ClaimSearchFilter::default(),
            ClaimSortKey::ClaimNumber,
            2,
            1,
        );
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.page_count(), 2);
    }

    #[tokio::test]
    async fn test_reviewer_statistics_count_this_months_decisions() {
        let sys = system();
        let approved = sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let rejected = sys.submit(sys.lecturer_b, sys.module_prog, 6).await.unwrap();
        sys.engine
            .process_action(
                sys.coordinator_comp,
                approved.id,
                WorkflowAction::CoordinatorApprove,
                Some("verified"),
            )
            .await
            .unwrap();
        sys.engine
            .process_action(
                sys.coordinator_comp,
                rejected.id,
                WorkflowAction::CoordinatorReject,
                Some("incorrect"),
            )
            .await
            .unwrap();

        let stats = sys.dashboard.reviewer_statistics(sys.coordinator_comp);
        assert_eq!(stats.approved_this_month, 1);
        assert_eq!(stats.rejected_this_month, 1);
        assert_eq!(stats.pending_count, 0);

        // The manager now has one pending claim worth 4,500.
        let stats = sys.dashboard.reviewer_statistics(sys.manager);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.pending_amount, Decimal::from(4500));
        assert_eq!(stats.overdue_count, 0);
    }

    #[tokio::test]
    async fn test_recent_claims_are_newest_first() {
        let sys = system();
        sys.submit(sys.lecturer_a, sys.module_prog, 10).await.unwrap();
        let newer = sys.submit(sys.lecturer_b, sys.module_prog, 6).await.unwrap();

        let recent = sys.dashboard.recent_claims(sys.admin, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].claim.id, newer.id);
    }
}
