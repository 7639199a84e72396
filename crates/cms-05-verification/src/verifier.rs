//! The verification checks.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use cms_01_claim_store::{CatalogStore, ClaimStore, StoreError};
use shared_types::{policy, ClaimId, ClaimStatus};

/// Runs advisory checks over stored claims.
#[derive(Clone)]
pub struct ClaimVerifier {
    catalog: Arc<dyn CatalogStore>,
    claims: Arc<dyn ClaimStore>,
}

impl ClaimVerifier {
    pub fn new(catalog: Arc<dyn CatalogStore>, claims: Arc<dyn ClaimStore>) -> Self {
        Self { catalog, claims }
    }

    /// Runs every check against one claim and returns the findings.
    ///
    /// An unknown claim id yields no findings, and a store failure degrades
    /// the same way; verification is a read path.
    pub fn verify_claim(&self, claim_id: ClaimId) -> Vec<String> {
        self.try_verify(claim_id).unwrap_or_else(|err| {
            warn!(claim_id, %err, "verification degraded to no findings");
            Vec::new()
        })
    }

    fn try_verify(&self, claim_id: ClaimId) -> Result<Vec<String>, StoreError> {
        let Some(claim) = self.claims.claim(claim_id)? else {
            return Ok(Vec::new());
        };
        let items = self.claims.items_for_claim(claim_id)?;
        let mut findings = Vec::new();

        // Rate drift: the snapshotted item rate no longer matches the
        // module's canonical rate. Expected after a catalog update, worth a
        // reviewer's eye.
        for item in &items {
            if let Some(module) = self.catalog.module(item.module_id)? {
                if module.hourly_rate != item.hourly_rate {
                    findings.push(format!(
                        "[Rate Mismatch] Module {}: claim rate {} differs from current rate {}",
                        module.code, item.hourly_rate, module.hourly_rate
                    ));
                }
            }
        }

        if claim.total_hours > Decimal::from(policy::MAX_HOURS_PER_MONTH) {
            findings.push(format!(
                "[Policy Breach] Total hours {} exceed the monthly limit of {}",
                claim.total_hours,
                policy::MAX_HOURS_PER_MONTH
            ));
        }

        if claim.total_amount > Decimal::from(policy::AUDIT_THRESHOLD) {
            findings.push(format!(
                "[Audit Required] Total amount {} exceeds the audit threshold of {}",
                claim.total_amount,
                policy::AUDIT_THRESHOLD
            ));
        }

        // Another live claim for the same lecturer and month. The store
        // refuses these at commit time; this catches rows that predate the
        // rule or slipped in through imports.
        for other in self.claims.claims_for_lecturer(claim.lecturer_id)? {
            if other.id == claim.id {
                continue;
            }
            if other.claim_month == claim.claim_month && other.status != ClaimStatus::Cancelled {
                findings.push(format!(
                    "[Duplicate] Another claim ({}) exists for {}",
                    other.claim_number, claim.claim_month
                ));
            }
        }

        debug!(claim_id, findings = findings.len(), "claim verified");
        Ok(findings)
    }
}
