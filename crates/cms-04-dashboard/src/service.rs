//! Dashboard read-model assembly.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use cms_01_claim_store::{CatalogStore, ClaimStore, StoreError, UserStore};
use cms_03_authorization::{claim_programme_ids, pending_states, ClaimScope, Principal};
use shared_types::{policy, Claim, ClaimId, ClaimStatus, UserId, UserRole};

use crate::views::{
    current_stage, progress_percent, tracker_steps, ClaimDetailView, ClaimSearchFilter,
    ClaimSortKey, ClaimSummary, DashboardStats, PagedResult, PendingApproval, Priority,
    ReviewerStatistics, TimelineEntry,
};

/// Days a claim may sit awaiting a coordinator before it is overdue.
const COORDINATOR_SERVICE_DAYS: i64 = 7;
/// Days a coordinator-approved claim may await a manager before it is overdue.
const MANAGER_SERVICE_DAYS: i64 = 5;

/// Read-only dashboard queries. All methods degrade to empty results on
/// store failure; mutations never happen here.
#[derive(Clone)]
pub struct DashboardService {
    users: Arc<dyn UserStore>,
    catalog: Arc<dyn CatalogStore>,
    claims: Arc<dyn ClaimStore>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserStore>,
        catalog: Arc<dyn CatalogStore>,
        claims: Arc<dyn ClaimStore>,
    ) -> Self {
        Self {
            users,
            catalog,
            claims,
        }
    }

    /// Headline claim numbers for the principal's dashboard. Lecturers see
    /// their own claims, coordinators their programmes, managers and admins
    /// everything; the same visibility predicate as search and the queues.
    pub fn dashboard_stats(&self, principal: Principal) -> DashboardStats {
        self.try_dashboard_stats(principal).unwrap_or_else(|err| {
            warn!(user_id = principal.user_id, %err, "dashboard stats degraded to empty");
            DashboardStats::default()
        })
    }

    fn try_dashboard_stats(&self, principal: Principal) -> Result<DashboardStats, StoreError> {
        let scope = ClaimScope::for_principal(principal, self.catalog.as_ref())?;

        let mut stats = DashboardStats::default();
        for claim in self.claims.claims()? {
            if !self.visible(&scope, &claim)? {
                continue;
            }
            // Cancelled claims still count towards the total.
            stats.total_claims += 1;
            if claim.status.is_pending() {
                stats.pending_count += 1;
            }
            if claim.status.is_rejected() {
                stats.rejected_count += 1;
            }
            if claim.status.is_approved() {
                stats.approved_count += 1;
                stats.total_earned += claim.total_amount;
            }
        }
        // Average over approved claims only; zero when nothing is approved.
        if stats.approved_count > 0 {
            stats.average_claim_amount =
                stats.total_earned / Decimal::from(stats.approved_count as u64);
        }
        Ok(stats)
    }

    /// The reviewer's pending queue, oldest submission first.
    pub fn pending_approvals(&self, principal: Principal) -> Vec<PendingApproval> {
        self.try_pending_approvals(principal).unwrap_or_else(|err| {
            warn!(user_id = principal.user_id, %err, "pending queue degraded to empty");
            Vec::new()
        })
    }

    fn try_pending_approvals(
        &self,
        principal: Principal,
    ) -> Result<Vec<PendingApproval>, StoreError> {
        let states = pending_states(principal.role);
        if states.is_empty() {
            return Ok(Vec::new());
        }
        let scope = ClaimScope::for_principal(principal, self.catalog.as_ref())?;
        let now = Utc::now();

        let mut rows = Vec::new();
        for claim in self.claims.claims()? {
            if !states.contains(&claim.status) {
                continue;
            }
            if !self.visible(&scope, &claim)? {
                continue;
            }
            let days_pending = (now - claim.submission_date).num_days();
            let has_required_documents = self.documentation_satisfied(&claim)?;
            let lecturer_name = self.display_name(claim.lecturer_id)?;
            rows.push(PendingApproval {
                claim,
                lecturer_name,
                days_pending,
                priority: Priority::from_days_pending(days_pending),
                has_required_documents,
            });
        }
        // First in, first out.
        rows.sort_by_key(|row| row.claim.submission_date);
        Ok(rows)
    }

    /// Full detail view for one claim, if it exists and the principal may
    /// see it. Absence and denial are indistinguishable to the caller.
    pub fn claim_detail(&self, principal: Principal, claim_id: ClaimId) -> Option<ClaimDetailView> {
        match self.try_claim_detail(principal, claim_id) {
            Ok(view) => view,
            Err(err) => {
                warn!(claim_id, %err, "claim detail degraded to none");
                None
            }
        }
    }

    fn try_claim_detail(
        &self,
        principal: Principal,
        claim_id: ClaimId,
    ) -> Result<Option<ClaimDetailView>, StoreError> {
        let Some(claim) = self.claims.claim(claim_id)? else {
            return Ok(None);
        };
        let scope = ClaimScope::for_principal(principal, self.catalog.as_ref())?;
        if !self.visible(&scope, &claim)? {
            return Ok(None);
        }

        let items = self.claims.items_for_claim(claim_id)?;
        let documents = self.claims.documents_for_claim(claim_id)?;
        let mut timeline = Vec::new();
        for entry in self.claims.history_for_claim(claim_id)? {
            timeline.push(TimelineEntry {
                changed_at: entry.changed_at,
                previous_status: entry.previous_status,
                new_status: entry.new_status,
                actor_name: self.display_name(entry.changed_by)?,
                comments: entry.comments,
                system_notes: entry.system_notes,
            });
        }
        timeline.reverse();

        let lecturer_name = self.display_name(claim.lecturer_id)?;
        let status = claim.status;
        Ok(Some(ClaimDetailView {
            lecturer_name,
            items,
            documents,
            timeline,
            progress_percent: progress_percent(status),
            current_stage: current_stage(status),
            tracker: tracker_steps(status),
            claim,
        }))
    }

    /// The principal's most recently submitted claims.
    pub fn recent_claims(&self, principal: Principal, limit: usize) -> Vec<ClaimSummary> {
        let filter = ClaimSearchFilter::default();
        let page = self.search_claims(principal, &filter, ClaimSortKey::SubmissionDateDesc, 1, limit);
        page.items
    }

    /// Scoped claim search with filtering, sorting and pagination.
    /// Page numbers are 1-based; page size 0 yields an empty page.
    pub fn search_claims(
        &self,
        principal: Principal,
        filter: &ClaimSearchFilter,
        sort: ClaimSortKey,
        page: usize,
        page_size: usize,
    ) -> PagedResult<ClaimSummary> {
        self.try_search_claims(principal, filter, sort, page, page_size)
            .unwrap_or_else(|err| {
                warn!(user_id = principal.user_id, %err, "claim search degraded to empty");
                PagedResult {
                    items: Vec::new(),
                    total: 0,
                    page,
                    page_size,
                }
            })
    }

    fn try_search_claims(
        &self,
        principal: Principal,
        filter: &ClaimSearchFilter,
        sort: ClaimSortKey,
        page: usize,
        page_size: usize,
    ) -> Result<PagedResult<ClaimSummary>, StoreError> {
        let scope = ClaimScope::for_principal(principal, self.catalog.as_ref())?;
        let term = filter
            .term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut rows = Vec::new();
        for claim in self.claims.claims()? {
            if !self.visible(&scope, &claim)? {
                continue;
            }
            if let Some(status) = filter.status {
                if claim.status != status {
                    continue;
                }
            }
            if let Some(lecturer_id) = filter.lecturer_id {
                if claim.lecturer_id != lecturer_id {
                    continue;
                }
            }
            if let Some(from) = filter.submitted_from {
                if claim.submission_date < from {
                    continue;
                }
            }
            if let Some(to) = filter.submitted_to {
                if claim.submission_date > to {
                    continue;
                }
            }
            let lecturer_name = self.display_name(claim.lecturer_id)?;
            if let Some(term) = &term {
                let matches = claim.claim_number.to_lowercase().contains(term)
                    || lecturer_name.to_lowercase().contains(term);
                if !matches {
                    continue;
                }
            }
            rows.push(ClaimSummary {
                claim,
                lecturer_name,
            });
        }

        match sort {
            ClaimSortKey::SubmissionDateDesc => {
                rows.sort_by(|a, b| b.claim.submission_date.cmp(&a.claim.submission_date));
            }
            ClaimSortKey::SubmissionDateAsc => {
                rows.sort_by_key(|r| r.claim.submission_date);
            }
            ClaimSortKey::AmountDesc => {
                rows.sort_by(|a, b| b.claim.total_amount.cmp(&a.claim.total_amount));
            }
            ClaimSortKey::ClaimNumber => {
                rows.sort_by(|a, b| a.claim.claim_number.cmp(&b.claim.claim_number));
            }
        }

        let total = rows.len();
        let page = page.max(1);
        let start = (page - 1).saturating_mul(page_size).min(total);
        let end = start.saturating_add(page_size).min(total);
        let items = rows.into_iter().skip(start).take(end - start).collect();

        Ok(PagedResult {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Workload statistics for a coordinator or manager. Other roles get
    /// zeroes.
    pub fn reviewer_statistics(&self, principal: Principal) -> ReviewerStatistics {
        self.try_reviewer_statistics(principal)
            .unwrap_or_else(|err| {
                warn!(user_id = principal.user_id, %err, "reviewer stats degraded to empty");
                ReviewerStatistics::default()
            })
    }

    fn try_reviewer_statistics(
        &self,
        principal: Principal,
    ) -> Result<ReviewerStatistics, StoreError> {
        let states = pending_states(principal.role);
        if states.is_empty() {
            return Ok(ReviewerStatistics::default());
        }
        let scope = ClaimScope::for_principal(principal, self.catalog.as_ref())?;
        let now = Utc::now();

        let mut stats = ReviewerStatistics::default();
        for claim in self.claims.claims()? {
            if !self.visible(&scope, &claim)? {
                continue;
            }

            // This month's decisions, counted off the ledger so later
            // transitions cannot erase them.
            for entry in self.claims.history_for_claim(claim.id)? {
                if entry.changed_by != principal.user_id {
                    continue;
                }
                if entry.changed_at.year() != now.year()
                    || entry.changed_at.month() != now.month()
                {
                    continue;
                }
                match (principal.role, entry.new_status) {
                    (UserRole::Coordinator, ClaimStatus::CoordinatorApproved)
                    | (UserRole::Manager, ClaimStatus::ManagerApproved) => {
                        stats.approved_this_month += 1;
                    }
                    (UserRole::Coordinator, ClaimStatus::CoordinatorRejected)
                    | (UserRole::Manager, ClaimStatus::ManagerRejected) => {
                        stats.rejected_this_month += 1;
                    }
                    _ => {}
                }
            }

            if !states.contains(&claim.status) {
                continue;
            }
            stats.pending_count += 1;
            stats.pending_amount += claim.total_amount;

            let overdue = match principal.role {
                UserRole::Coordinator => {
                    (now - claim.submission_date).num_days() > COORDINATOR_SERVICE_DAYS
                }
                UserRole::Manager => claim
                    .coordinator_decision_date
                    .map(|decided| (now - decided).num_days() > MANAGER_SERVICE_DAYS)
                    .unwrap_or(false),
                _ => false,
            };
            if overdue {
                stats.overdue_count += 1;
            }
        }
        Ok(stats)
    }

    /// One scoping predicate for every read path.
    fn visible(&self, scope: &ClaimScope, claim: &Claim) -> Result<bool, StoreError> {
        // Coordinator scope needs the programmes billed on the claim; the
        // cheaper scopes never touch the items.
        if matches!(scope, ClaimScope::Programmes(_)) {
            let items = self.claims.items_for_claim(claim.id)?;
            let programmes = claim_programme_ids(self.catalog.as_ref(), &items)?;
            Ok(scope.permits(claim, &programmes))
        } else {
            Ok(scope.permits(claim, &[]))
        }
    }

    fn documentation_satisfied(&self, claim: &Claim) -> Result<bool, StoreError> {
        if claim.total_amount <= Decimal::from(policy::DOCUMENT_REQUIRED_THRESHOLD) {
            return Ok(true);
        }
        Ok(!self.claims.documents_for_claim(claim.id)?.is_empty())
    }

    fn display_name(&self, user_id: UserId) -> Result<String, StoreError> {
        Ok(self
            .users
            .user(user_id)?
            .map(|u| u.display_name())
            .unwrap_or_else(|| format!("User {user_id}")))
    }
}
