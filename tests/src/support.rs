//! Shared fixture for the integration suite.
//!
//! Two programmes with distinct coordinators, two lecturers with overlapping
//! module assignments, one manager and one admin. Claims must use the current
//! month to pass submission validation, so helpers derive it from the clock.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use cms_01_claim_store::{CatalogStore, InMemoryBlobStore, InMemoryStore, UserStore};
use cms_02_claim_workflow::{
    ClaimDraft, ClaimItemDraft, ClaimWorkflowApi, ClaimWorkflowEngine, WorkflowAction,
};
use cms_03_authorization::Principal;
use cms_04_dashboard::DashboardService;
use cms_05_verification::ClaimVerifier;
use shared_bus::InMemoryNotificationBus;
use shared_types::{
    Claim, ClaimMonth, LecturerAssignment, Module, ModuleId, Programme, RoleProfile, User,
    UserRole, WorkflowError,
};

pub struct TestSystem {
    pub store: Arc<InMemoryStore>,
    pub bus: Arc<InMemoryNotificationBus>,
    pub engine: ClaimWorkflowEngine,
    pub dashboard: DashboardService,
    pub verifier: ClaimVerifier,

    pub lecturer_a: Principal,
    pub lecturer_b: Principal,
    pub coordinator_comp: Principal,
    pub coordinator_eng: Principal,
    pub manager: Principal,
    pub admin: Principal,

    /// BCAD programme, coordinated by `coordinator_comp`. Rate 450.
    pub module_prog: ModuleId,
    /// BCAD programme. Rate 380.
    pub module_web: ModuleId,
    /// BSENG programme, coordinated by `coordinator_eng`. Rate 400.
    pub module_math: ModuleId,
}

fn user(first: &str, last: &str, email: &str, profile: RoleProfile) -> User {
    User {
        id: 0,
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        is_active: true,
        profile,
    }
}

fn lecturer_profile() -> RoleProfile {
    RoleProfile::Lecturer {
        employee_number: "EMP-0001".into(),
        default_hourly_rate: Decimal::from(450),
    }
}

pub fn system() -> TestSystem {
    let store = Arc::new(InMemoryStore::new());
    let blobs = Arc::new(InMemoryBlobStore::new());
    let bus = Arc::new(InMemoryNotificationBus::with_capacity(64));

    let lecturer_a = store
        .insert_user(user(
            "Thandi",
            "Nkosi",
            "thandi@cmcs.example",
            lecturer_profile(),
        ))
        .unwrap();
    let lecturer_b = store
        .insert_user(user(
            "Sipho",
            "Mokoena",
            "sipho@cmcs.example",
            lecturer_profile(),
        ))
        .unwrap();
    let coordinator_comp = store
        .insert_user(user(
            "Pieter",
            "Botha",
            "pieter@cmcs.example",
            RoleProfile::Coordinator,
        ))
        .unwrap();
    let coordinator_eng = store
        .insert_user(user(
            "Nomvula",
            "Khumalo",
            "nomvula@cmcs.example",
            RoleProfile::Coordinator,
        ))
        .unwrap();
    let manager = store
        .insert_user(user(
            "Lerato",
            "Dlamini",
            "lerato@cmcs.example",
            RoleProfile::Manager,
        ))
        .unwrap();
    let admin = store
        .insert_user(user("Sam", "Naidoo", "sam@cmcs.example", RoleProfile::Admin))
        .unwrap();

    let comp = store
        .insert_programme(Programme {
            id: 0,
            code: "BCAD".into(),
            name: "Bachelor of Computing".into(),
            coordinator_id: coordinator_comp.id,
            is_active: true,
        })
        .unwrap();
    let eng = store
        .insert_programme(Programme {
            id: 0,
            code: "BSENG".into(),
            name: "Bachelor of Engineering".into(),
            coordinator_id: coordinator_eng.id,
            is_active: true,
        })
        .unwrap();

    let module = |code: &str, programme, rate: i64| Module {
        id: 0,
        code: code.into(),
        name: code.into(),
        programme_id: programme,
        hourly_rate: Decimal::from(rate),
        credit_hours: 15,
        is_active: true,
    };
    let module_prog = store.insert_module(module("PROG6212", comp.id, 450)).unwrap();
    let module_web = store.insert_module(module("WEDE6020", comp.id, 380)).unwrap();
    let module_math = store.insert_module(module("MATH6011", eng.id, 400)).unwrap();

    // Lecturer A works the computing modules; lecturer B straddles both
    // programmes.
    for (lecturer, module_id) in [
        (lecturer_a.id, module_prog.id),
        (lecturer_a.id, module_web.id),
        (lecturer_b.id, module_prog.id),
        (lecturer_b.id, module_math.id),
    ] {
        store
            .upsert_assignment(LecturerAssignment {
                lecturer_id: lecturer,
                module_id,
                assigned_at: Utc::now(),
                is_active: true,
            })
            .unwrap();
    }

    let engine = ClaimWorkflowEngine::new(
        store.clone(),
        store.clone(),
        store.clone(),
        blobs,
        bus.clone(),
    );
    let dashboard = DashboardService::new(store.clone(), store.clone(), store.clone());
    let verifier = ClaimVerifier::new(store.clone(), store.clone());

    TestSystem {
        store,
        bus,
        engine,
        dashboard,
        verifier,
        lecturer_a: Principal::new(lecturer_a.id, UserRole::Lecturer),
        lecturer_b: Principal::new(lecturer_b.id, UserRole::Lecturer),
        coordinator_comp: Principal::new(coordinator_comp.id, UserRole::Coordinator),
        coordinator_eng: Principal::new(coordinator_eng.id, UserRole::Coordinator),
        manager: Principal::new(manager.id, UserRole::Manager),
        admin: Principal::new(admin.id, UserRole::Admin),
        module_prog: module_prog.id,
        module_web: module_web.id,
        module_math: module_math.id,
    }
}

pub fn this_month() -> ClaimMonth {
    ClaimMonth::containing(Utc::now())
}

pub fn item(module_id: ModuleId, hours: i64) -> ClaimItemDraft {
    ClaimItemDraft {
        module_id,
        hours_worked: Decimal::from(hours),
        work_date: Utc::now().date_naive() - Duration::days(1),
        description: Some("Contract teaching".into()),
    }
}

pub fn draft(items: Vec<ClaimItemDraft>) -> ClaimDraft {
    ClaimDraft::new(this_month(), items)
}

impl TestSystem {
    /// Submits a single-module claim for the lecturer.
    pub async fn submit(
        &self,
        lecturer: Principal,
        module_id: ModuleId,
        hours: i64,
    ) -> Result<Claim, WorkflowError> {
        self.engine
            .create_claim(lecturer, draft(vec![item(module_id, hours)]))
            .await
    }

    /// Runs a claim through both approval stages.
    pub async fn approve_fully(
        &self,
        coordinator: Principal,
        claim: &Claim,
    ) -> Result<Claim, WorkflowError> {
        let claim = self
            .engine
            .process_action(
                coordinator,
                claim.id,
                WorkflowAction::CoordinatorApprove,
                Some("verified"),
            )
            .await?;
        self.engine
            .process_action(
                self.manager,
                claim.id,
                WorkflowAction::ManagerApprove,
                Some("approved"),
            )
            .await
    }
}
