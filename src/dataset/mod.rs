//! Snapshot data structures and CSV loading

mod data;
pub mod loader;

pub use data::{
    Claim, ClaimStatus, ClaimType, Gender, Policy, PolicyStatus, PolicyType, Policyholder,
};
pub use loader::{load_dataset, load_default_dataset, SkippedRow};

use crate::error::{AnalyticsError, Result};
use log::warn;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A foreign key that points at a record missing from the snapshot
///
/// Reports tolerate these (the missing parent is treated as absent), so they
/// are surfaced as findings instead of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// Claim references a policy id not present in the policies table
    OrphanClaim { claim_id: u32, policy_id: u32 },
    /// Policy references a policyholder id not present in the policyholders table
    OrphanPolicy { policy_id: u32, policyholder_id: u32 },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::OrphanClaim { claim_id, policy_id } => {
                write!(f, "claim {} references missing policy {}", claim_id, policy_id)
            }
            IntegrityIssue::OrphanPolicy { policy_id, policyholder_id } => {
                write!(
                    f,
                    "policy {} references missing policyholder {}",
                    policy_id, policyholder_id
                )
            }
        }
    }
}

/// Immutable in-memory snapshot of the three tables
///
/// Holds the records in input order plus id indexes for the joins.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    policyholders: Vec<Policyholder>,
    policies: Vec<Policy>,
    claims: Vec<Claim>,

    holder_index: HashMap<u32, usize>,
    policy_index: HashMap<u32, usize>,

    /// Rows the loader could not parse
    skipped: Vec<SkippedRow>,
}

impl Dataset {
    /// Build a dataset; when ids repeat the index points at the first record
    pub fn new(
        policyholders: Vec<Policyholder>,
        policies: Vec<Policy>,
        claims: Vec<Claim>,
    ) -> Self {
        let mut holder_index = HashMap::with_capacity(policyholders.len());
        for (i, holder) in policyholders.iter().enumerate() {
            holder_index.entry(holder.policyholder_id).or_insert(i);
        }

        let mut policy_index = HashMap::with_capacity(policies.len());
        for (i, policy) in policies.iter().enumerate() {
            policy_index.entry(policy.policy_id).or_insert(i);
        }

        Self {
            policyholders,
            policies,
            claims,
            holder_index,
            policy_index,
            skipped: Vec::new(),
        }
    }

    /// Attach the rows dropped while loading
    pub fn with_skipped_rows(mut self, skipped: Vec<SkippedRow>) -> Self {
        self.skipped = skipped;
        self
    }

    pub fn skipped_rows(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn policyholders(&self) -> &[Policyholder] {
        &self.policyholders
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Look up a policyholder by id
    pub fn policyholder(&self, policyholder_id: u32) -> Option<&Policyholder> {
        self.holder_index
            .get(&policyholder_id)
            .map(|&i| &self.policyholders[i])
    }

    /// Look up a policy by id
    pub fn policy(&self, policy_id: u32) -> Option<&Policy> {
        self.policy_index.get(&policy_id).map(|&i| &self.policies[i])
    }

    /// Check record-level invariants and report dangling foreign keys
    ///
    /// Fails with the first of [`Dataset::invalid_records`]. Missing parents
    /// are returned as [`IntegrityIssue`]s and logged.
    pub fn validate(&self) -> Result<Vec<IntegrityIssue>> {
        if let Some(err) = self.invalid_records().into_iter().next() {
            return Err(err);
        }
        Ok(self.integrity_issues())
    }

    /// Every record that breaks an invariant
    ///
    /// Duplicate ids, negative or non-finite amounts, over-approved claims and
    /// inverted policy terms. Reports still run over these records.
    pub fn invalid_records(&self) -> Vec<AnalyticsError> {
        let mut errors = Vec::new();

        let holder_ids = self.policyholders.iter().map(|h| h.policyholder_id);
        errors.extend(duplicates("policyholder", holder_ids));
        errors.extend(duplicates("policy", self.policies.iter().map(|p| p.policy_id)));
        errors.extend(duplicates("claim", self.claims.iter().map(|c| c.claim_id)));

        for policy in &self.policies {
            let id = policy.policy_id;
            errors.extend(check_amount("policy", id, "premium_amount", policy.premium_amount));
            errors.extend(check_amount("policy", id, "coverage_amount", policy.coverage_amount));
            if policy.end_date < policy.start_date {
                errors.push(AnalyticsError::invalid(
                    "policy",
                    id,
                    format!(
                        "end date {} precedes start date {}",
                        policy.end_date, policy.start_date
                    ),
                ));
            }
        }

        for claim in &self.claims {
            let id = claim.claim_id;
            errors.extend(check_amount("claim", id, "claim_amount", claim.claim_amount));
            errors.extend(check_amount("claim", id, "approved_amount", claim.approved_amount));
            if claim.is_approved() && claim.approved_amount > claim.claim_amount {
                errors.push(AnalyticsError::invalid(
                    "claim",
                    id,
                    format!(
                        "approved amount {:.2} exceeds claim amount {:.2}",
                        claim.approved_amount, claim.claim_amount
                    ),
                ));
            }
        }

        errors
    }

    /// Foreign keys that point at missing records, each logged as a warning
    pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for policy in &self.policies {
            if self.policyholder(policy.policyholder_id).is_none() {
                issues.push(IntegrityIssue::OrphanPolicy {
                    policy_id: policy.policy_id,
                    policyholder_id: policy.policyholder_id,
                });
            }
        }

        for claim in &self.claims {
            if self.policy(claim.policy_id).is_none() {
                issues.push(IntegrityIssue::OrphanClaim {
                    claim_id: claim.claim_id,
                    policy_id: claim.policy_id,
                });
            }
        }

        for issue in &issues {
            warn!("Referential integrity: {}", issue);
        }

        issues
    }
}

fn duplicates(table: &'static str, ids: impl Iterator<Item = u32>) -> Vec<AnalyticsError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.filter(|&id| !seen.insert(id) && reported.insert(id))
        .map(|id| AnalyticsError::invalid(table, id, "duplicate id"))
        .collect()
}

fn check_amount(table: &'static str, id: u32, field: &str, amount: f64) -> Option<AnalyticsError> {
    if !amount.is_finite() || amount < 0.0 {
        return Some(AnalyticsError::invalid(
            table,
            id,
            format!("{} must be a non-negative number, got {}", field, amount),
        ));
    }
    None
}
