//! Demonstration data.
//!
//! Seeds one user per role plus a small catalog, mirroring the accounts a
//! fresh deployment ships with.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use cms_01_claim_store::{CatalogStore, UserStore};
use shared_types::{
    LecturerAssignment, Module, ModuleId, Programme, RoleProfile, User, UserId,
};

use crate::container::AppContext;

/// Ids of the seeded principals and catalog rows.
#[derive(Debug, Clone, Copy)]
pub struct SeedIds {
    pub lecturer: UserId,
    pub coordinator: UserId,
    pub manager: UserId,
    pub admin: UserId,
    pub programming_module: ModuleId,
    pub web_module: ModuleId,
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

/// Inserts the demonstration users, programme, modules and assignments.
pub fn seed_demo_data(ctx: &AppContext) -> Result<SeedIds> {
    let lecturer = ctx.store.insert_user(user(
        "Thandi",
        "Nkosi",
        "thandi.nkosi@cmcs.example",
        RoleProfile::Lecturer {
            employee_number: "EMP-0042".into(),
            default_hourly_rate: Decimal::from(450),
        },
    ))?;
    let coordinator = ctx.store.insert_user(user(
        "Pieter",
        "Botha",
        "pieter.botha@cmcs.example",
        RoleProfile::Coordinator,
    ))?;
    let manager = ctx.store.insert_user(user(
        "Lerato",
        "Dlamini",
        "lerato.dlamini@cmcs.example",
        RoleProfile::Manager,
    ))?;
    let admin = ctx.store.insert_user(user(
        "Sam",
        "Naidoo",
        "sam.naidoo@cmcs.example",
        RoleProfile::Admin,
    ))?;

    let programme = ctx.store.insert_programme(Programme {
        id: 0,
        code: "BCAD".into(),
        name: "Bachelor of Computer and Information Sciences".into(),
        coordinator_id: coordinator.id,
        is_active: true,
    })?;
    let programming = ctx.store.insert_module(Module {
        id: 0,
        code: "PROG6212".into(),
        name: "Programming 2B".into(),
        programme_id: programme.id,
        hourly_rate: Decimal::from(450),
        credit_hours: 15,
        is_active: true,
    })?;
    let web = ctx.store.insert_module(Module {
        id: 0,
        code: "WEDE6020".into(),
        name: "Web Development".into(),
        programme_id: programme.id,
        hourly_rate: Decimal::from(380),
        credit_hours: 10,
        is_active: true,
    })?;

    for module_id in [programming.id, web.id] {
        ctx.store.upsert_assignment(LecturerAssignment {
            lecturer_id: lecturer.id,
            module_id,
            assigned_at: Utc::now(),
            is_active: true,
        })?;
    }

    info!(
        lecturer = lecturer.id,
        coordinator = coordinator.id,
        manager = manager.id,
        admin = admin.id,
        "demonstration data seeded"
    );

    Ok(SeedIds {
        lecturer: lecturer.id,
        coordinator: coordinator.id,
        manager: manager.id,
        admin: admin.id,
        programming_module: programming.id,
        web_module: web.id,
    })
}
