//! The application context.
//!
//! One struct owns every wired service. Construction order follows the
//! dependency graph: stores first, then the bus, then the engine and the
//! read models on top.

use std::sync::Arc;

use cms_01_claim_store::{InMemoryBlobStore, InMemoryStore};
use cms_02_claim_workflow::ClaimWorkflowEngine;
use cms_04_dashboard::DashboardService;
use cms_05_verification::ClaimVerifier;
use shared_bus::InMemoryNotificationBus;

use crate::config::CmsConfig;

/// All wired services behind one handle.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<InMemoryStore>,
    pub blobs: Arc<InMemoryBlobStore>,
    pub bus: Arc<InMemoryNotificationBus>,
    pub workflow: ClaimWorkflowEngine,
    pub dashboard: DashboardService,
    pub verifier: ClaimVerifier,
}

impl AppContext {
    /// Builds the full context from configuration.
    #[must_use]
    pub fn build(config: &CmsConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let blobs = Arc::new(InMemoryBlobStore::new());
        let bus = Arc::new(InMemoryNotificationBus::with_capacity(
            config.notification_capacity,
        ));

        let workflow = ClaimWorkflowEngine::new(
            store.clone(),
            store.clone(),
            store.clone(),
            blobs.clone(),
            bus.clone(),
        );
        let dashboard = DashboardService::new(store.clone(), store.clone(), store.clone());
        let verifier = ClaimVerifier::new(store.clone(), store.clone());

        Self {
            store,
            blobs,
            bus,
            workflow,
            dashboard,
            verifier,
        }
    }
}
