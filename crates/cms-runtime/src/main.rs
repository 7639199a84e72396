//! # Claim System Runtime
//!
//! Entry point for the claim approval system. Wires the in-memory stores,
//! the workflow engine, the dashboards and the verifier, seeds demonstration
//! data and walks one claim through the full lifecycle:
//!
//! ```text
//! Submitted → UnderCoordinatorReview → CoordinatorApproved
//!           → UnderManagerReview(*) → ManagerApproved → Paid
//! ```
//!
//! (*) the demo manager decides straight from CoordinatorApproved.
//!
//! A subscriber on the notification bus prints every status change as it
//! happens, demonstrating the fire-and-forget event path.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use cms_02_claim_workflow::{
    ClaimDraft, ClaimItemDraft, ClaimWorkflowApi, NewDocument, WorkflowAction,
};
use cms_03_authorization::Principal;
use cms_runtime::seed::seed_demo_data;
use cms_runtime::{AppContext, CmsConfig};
use shared_bus::EventFilter;
use shared_types::{ClaimMonth, UserRole};

#[tokio::main]
async fn main() -> Result<()> {
    let config = CmsConfig::from_env();
    config.validate()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.max_level()?)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ctx = AppContext::build(&config);
    if !config.seed_demo_data {
        info!("demo seeding disabled, nothing to run");
        return Ok(());
    }
    let ids = seed_demo_data(&ctx).context("failed to seed demonstration data")?;

    // Print every status change as it is published.
    let mut subscription = ctx.bus.subscribe(EventFilter::all());
    let listener = tokio::spawn(async move {
        while let Some(event) = subscription.recv().await {
            info!(
                claim_id = event.claim_id(),
                status = %event.new_status(),
                "notification received"
            );
        }
    });

    let lecturer = Principal::new(ids.lecturer, UserRole::Lecturer);
    let coordinator = Principal::new(ids.coordinator, UserRole::Coordinator);
    let manager = Principal::new(ids.manager, UserRole::Manager);
    let admin = Principal::new(ids.admin, UserRole::Admin);

    // Lecturer submits a claim for the current month.
    let draft = ClaimDraft::new(
        ClaimMonth::containing(Utc::now()),
        vec![
            ClaimItemDraft {
                module_id: ids.programming_module,
                hours_worked: Decimal::from(12),
                work_date: Utc::now().date_naive() - Duration::days(3),
                description: Some("Lectures and practical sessions".into()),
            },
            ClaimItemDraft {
                module_id: ids.web_module,
                hours_worked: Decimal::from(8),
                work_date: Utc::now().date_naive() - Duration::days(2),
                description: Some("Project supervision".into()),
            },
        ],
    )
    .with_notes("October contract hours");
    let claim = ctx.workflow.create_claim(lecturer, draft).await?;
    info!(
        claim_number = %claim.claim_number,
        total_hours = %claim.total_hours,
        total_amount = %claim.total_amount,
        "claim submitted"
    );

    // Supporting document.
    ctx.workflow
        .attach_document(
            lecturer,
            claim.id,
            NewDocument {
                file_name: "timesheet.pdf".into(),
                content_type: "application/pdf".into(),
                description: Some("Signed timesheet".into()),
            },
            b"%PDF-1.4 demo timesheet".to_vec(),
        )
        .await?;

    // Coordinator queue, then the two-stage approval.
    let queue = ctx.dashboard.pending_approvals(coordinator);
    info!(pending = queue.len(), "coordinator queue");

    let claim = ctx
        .workflow
        .advance_claim(coordinator, claim.id)
        .await
        .context("taking the claim into coordinator review")?;
    let claim = ctx
        .workflow
        .process_action(
            coordinator,
            claim.id,
            WorkflowAction::CoordinatorApprove,
            Some("Hours match the timetable"),
        )
        .await?;
    let claim = ctx
        .workflow
        .process_action(
            manager,
            claim.id,
            WorkflowAction::ManagerApprove,
            Some("Within budget, approved for payment"),
        )
        .await?;
    let claim = ctx
        .workflow
        .process_action(admin, claim.id, WorkflowAction::MarkPaid, None)
        .await?;
    info!(status = %claim.status, "claim settled");

    // Read models after the run.
    let stats = ctx.dashboard.dashboard_stats(lecturer);
    info!(
        total = stats.total_claims,
        earned = %stats.total_earned,
        average = %stats.average_claim_amount,
        "lecturer dashboard"
    );
    if let Some(detail) = ctx.dashboard.claim_detail(lecturer, claim.id) {
        info!(
            progress = detail.progress_percent,
            stage = detail.current_stage,
            timeline = detail.timeline.len(),
            "claim detail"
        );
    }
    for finding in ctx.verifier.verify_claim(claim.id) {
        info!(%finding, "verification finding");
    }

    // The listener ends once the bus sender side is dropped with the context;
    // nothing left to publish, stop it directly.
    listener.abort();
    info!("demonstration run complete");
    Ok(())
}
