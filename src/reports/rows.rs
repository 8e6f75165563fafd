//! Typed result rows, one struct per report
//!
//! Undefined values (a ratio over a zero denominator, an average over no
//! claims, a policyholder missing from the snapshot) are `None`.

use crate::aggregate::AgeBucket;
use crate::dataset::{ClaimType, Gender, PolicyType};
use serde::Serialize;

/// Report 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageClaimRow {
    pub policy_type: PolicyType,
    pub claim_count: usize,
    pub average_claim_amount: f64,
}

/// Report 2
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedClaimsRow {
    pub claim_type: ClaimType,
    pub rejected_claims: usize,
}

/// Report 3
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPolicyholderRow {
    pub policyholder_id: u32,
    pub full_name: Option<String>,
    pub total_approved_amount: f64,
}

/// Report 4
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicRow {
    pub gender: Gender,
    pub age_group: AgeBucket,
    pub policyholders: usize,
}

/// Report 5
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DormantPoliciesRow {
    pub active_policies: usize,
    pub with_recent_claims: usize,
    /// Active policies with no claim in the window
    pub without_recent_claims: usize,
}

/// Report 6
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalRateRow {
    pub claim_type: ClaimType,
    pub total_claims: usize,
    pub approved_claims: usize,
    pub approval_rate_pct: Option<f64>,
}

/// Report 7
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyStatusRow {
    pub policy_type: PolicyType,
    pub policies: usize,
    pub expired_pct: Option<f64>,
    pub cancelled_pct: Option<f64>,
    pub average_premium: f64,
}

/// Report 8
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstClaimLagRow {
    pub policies_with_claims: usize,
    pub average_days_to_first_claim: Option<f64>,
}

/// Report 9
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumClaimRatioRow {
    pub policy_type: PolicyType,
    pub average_premium: f64,
    pub average_claim_amount: Option<f64>,
    pub premium_to_claim_ratio: Option<f64>,
}

/// Report 10
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiPolicyHolderRow {
    pub policyholder_id: u32,
    pub full_name: Option<String>,
    pub policy_count: usize,
    pub total_premium: f64,
    pub total_claim_amount: f64,
}
