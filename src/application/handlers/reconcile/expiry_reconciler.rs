//! ExpiryReconciler - Sweeps Active members whose window has elapsed.
//!
//! Each expiry is a conditional write against the version seen by the scan,
//! so a member renewed or edited after the scan is left alone and counted as
//! skipped. A failing member is logged and counted; the sweep continues.
//!
//! Between sweeps a member may still read Active after its end date. Readers
//! that need the live answer use `Member::effective_status`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::membership::MembershipError;
use crate::ports::{Clock, MemberRepository};

/// Outcome of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Members found lapsed by the scan.
    pub scanned: usize,
    /// Members transitioned to Expired.
    pub expired: usize,
    /// Members that changed between scan and write.
    pub skipped: usize,
    /// Members whose write failed.
    pub failures: usize,
}

pub struct ExpiryReconciler {
    members: Arc<dyn MemberRepository>,
    clock: Arc<dyn Clock>,
}

impl ExpiryReconciler {
    pub fn new(members: Arc<dyn MemberRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { members, clock }
    }

    /// Sweeps as of the clock's current time.
    pub async fn handle(&self) -> Result<ReconcileReport, MembershipError> {
        self.reconcile(self.clock.now()).await
    }

    /// Expires every member that is Active with `end_date < now`.
    ///
    /// # Errors
    ///
    /// Only a failed scan is an error. Per-member failures are reported in
    /// `ReconcileReport::failures`.
    pub async fn reconcile(&self, now: Timestamp) -> Result<ReconcileReport, MembershipError> {
        let lapsed = self.members.find_lapsed(now).await?;
        let mut report = ReconcileReport {
            scanned: lapsed.len(),
            ..Default::default()
        };

        for member in lapsed {
            match self.members.expire_if_lapsed(&member.id, member.version, now).await {
                Ok(true) => report.expired += 1,
                Ok(false) => report.skipped += 1,
                Err(e) => {
                    warn!(member_id = %member.id, error = %e, "Failed to expire member");
                    report.failures += 1;
                }
            }
        }

        info!(
            scanned = report.scanned,
            expired = report.expired,
            skipped = report.skipped,
            failures = report.failures,
            "Expiry reconciliation complete"
        );
        Ok(report)
    }
}
