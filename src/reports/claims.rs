//! Claim-level reports: severity, rejections, payouts and approval rates

use super::rows::{AverageClaimRow, ApprovalRateRow, RejectedClaimsRow, TopPolicyholderRow};
use crate::aggregate::{descending, group_average, group_count, ratio, round2, top_n};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::join::{join_claims, HolderJoin};

/// Report 1: average claim amount per policy type, highest first
pub fn average_claim_by_policy_type(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> Result<Vec<AverageClaimRow>> {
    let averages = group_average(
        join_claims(dataset, HolderJoin::Left),
        |row| row.policy.policy_type,
        |row| row.claim.claim_amount,
    )?;
    let counts = group_count(
        join_claims(dataset, HolderJoin::Left),
        |row| row.policy.policy_type,
        |_| true,
    );

    let mut rows: Vec<AverageClaimRow> = averages
        .into_iter()
        .map(|(policy_type, average_claim_amount)| AverageClaimRow {
            policy_type,
            claim_count: counts.get(&policy_type).copied().unwrap_or(0),
            average_claim_amount,
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(a.average_claim_amount, b.average_claim_amount)
            .then_with(|| a.policy_type.cmp(&b.policy_type))
    });
    Ok(rows)
}

/// Report 2: rejected claims per claim type within the recent window
///
/// The window is a direct date comparison `[as_of - window_days, as_of]`.
/// Types with no rejections in the window are omitted.
pub fn rejected_claims_by_type(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Vec<RejectedClaimsRow> {
    let recent = dataset.claims().iter().filter(|c| config.in_window(c.claim_date));
    let counts = group_count(recent, |c| c.claim_type, |c| c.is_rejected());

    let mut rows: Vec<RejectedClaimsRow> = counts
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(claim_type, rejected_claims)| RejectedClaimsRow {
            claim_type,
            rejected_claims,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.rejected_claims
            .cmp(&a.rejected_claims)
            .then_with(|| a.claim_type.cmp(&b.claim_type))
    });
    rows
}

/// Report 3: policyholders ranked by total approved payout
///
/// Keeps `config.top_n` entries; ties go to the lower policyholder id.
pub fn top_policyholders_by_approved_amount(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Vec<TopPolicyholderRow> {
    let approved = join_claims(dataset, HolderJoin::Left).filter(|row| row.claim.is_approved());
    let ranked = top_n(
        approved,
        |row| row.policy.policyholder_id,
        |row| row.claim.approved_amount,
        config.top_n,
    );

    ranked
        .into_iter()
        .map(|(policyholder_id, total)| TopPolicyholderRow {
            policyholder_id,
            full_name: dataset.policyholder(policyholder_id).map(|h| h.full_name.clone()),
            total_approved_amount: round2(total),
        })
        .collect()
}

/// Report 6: share of claims approved per claim type
pub fn approval_rate_by_claim_type(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> Vec<ApprovalRateRow> {
    let totals = group_count(dataset.claims(), |c| c.claim_type, |_| true);
    let approved = group_count(dataset.claims(), |c| c.claim_type, |c| c.is_approved());

    let mut rows: Vec<ApprovalRateRow> = totals
        .into_iter()
        .map(|(claim_type, total_claims)| {
            let approved_claims = approved.get(&claim_type).copied().unwrap_or(0);
            ApprovalRateRow {
                claim_type,
                total_claims,
                approved_claims,
                approval_rate_pct: ratio(approved_claims as f64, total_claims as f64),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(
            a.approval_rate_pct.unwrap_or(f64::NEG_INFINITY),
            b.approval_rate_pct.unwrap_or(f64::NEG_INFINITY),
        )
        .then_with(|| a.claim_type.cmp(&b.claim_type))
    });
    rows
}
