//! Runtime wiring smoke checks.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use cms_02_claim_workflow::{ClaimDraft, ClaimItemDraft, ClaimWorkflowApi};
    use cms_03_authorization::Principal;
    use cms_runtime::seed::seed_demo_data;
    use cms_runtime::{AppContext, CmsConfig};
    use rust_decimal::Decimal;
    use shared_types::{ClaimMonth, ClaimStatus, UserRole};

    #[tokio::test]
    async fn test_built_context_serves_a_seeded_claim() {
        let config = CmsConfig::default();
        config.validate().unwrap();
        let ctx = AppContext::build(&config);
        let ids = seed_demo_data(&ctx).unwrap();

        let lecturer = Principal::new(ids.lecturer, UserRole::Lecturer);
        let draft = ClaimDraft::new(
            ClaimMonth::containing(Utc::now()),
            vec![ClaimItemDraft {
                module_id: ids.programming_module,
                hours_worked: Decimal::from(10),
                work_date: Utc::now().date_naive(),
                description: None,
            }],
        );
        let claim = ctx.workflow.create_claim(lecturer, draft).await.unwrap();
        assert_eq!(claim.status, ClaimStatus::Submitted);
        assert_eq!(claim.total_amount, Decimal::from(4500));

        let stats = ctx.dashboard.dashboard_stats(lecturer);
        assert_eq!(stats.total_claims, 1);
        assert!(ctx.verifier.verify_claim(claim.id).is_empty());
    }
}
