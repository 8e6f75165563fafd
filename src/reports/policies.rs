//! Policy-level reports: dormancy, status mix, time to first claim, pricing adequacy

use super::rows::{DormantPoliciesRow, FirstClaimLagRow, PolicyStatusRow, PremiumClaimRatioRow};
use crate::aggregate::{group_average, group_count, group_sum, mean, ratio, round2, safe_divide};
use crate::config::AnalysisConfig;
use crate::dataset::{Dataset, PolicyStatus, PolicyType};
use crate::error::Result;
use crate::join::{claims_by_policy, join_claims, HolderJoin};
use log::warn;
use std::collections::BTreeMap;

/// Report 5: active policies with no claim in the recent window (anti-join)
pub fn active_policies_without_recent_claims(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> DormantPoliciesRow {
    let claims = claims_by_policy(dataset);

    let active: Vec<_> = dataset.policies().iter().filter(|p| p.is_active()).collect();
    let with_recent_claims = active
        .iter()
        .filter(|p| {
            claims
                .get(&p.policy_id)
                .is_some_and(|cs| cs.iter().any(|c| config.in_window(c.claim_date)))
        })
        .count();

    DormantPoliciesRow {
        active_policies: active.len(),
        with_recent_claims,
        without_recent_claims: active.len() - with_recent_claims,
    }
}

/// Report 7: share of Expired and Cancelled policies and average premium, per policy type
pub fn policy_status_by_type(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> Result<Vec<PolicyStatusRow>> {
    let policies = dataset.policies();
    let totals = group_count(policies, |p| p.policy_type, |_| true);
    let expired = group_count(policies, |p| p.policy_type, |p| p.status == PolicyStatus::Expired);
    let cancelled =
        group_count(policies, |p| p.policy_type, |p| p.status == PolicyStatus::Cancelled);
    let premiums = group_average(policies, |p| p.policy_type, |p| p.premium_amount)?;

    Ok(totals
        .into_iter()
        .map(|(policy_type, count)| {
            let total = count as f64;
            PolicyStatusRow {
                policy_type,
                policies: count,
                expired_pct: ratio(count_of(&expired, policy_type), total),
                cancelled_pct: ratio(count_of(&cancelled, policy_type), total),
                average_premium: premiums.get(&policy_type).copied().unwrap_or(0.0),
            }
        })
        .collect())
}

fn count_of(counts: &BTreeMap<PolicyType, usize>, policy_type: PolicyType) -> f64 {
    counts.get(&policy_type).copied().unwrap_or(0) as f64
}

/// Report 8: mean days from policy start to its earliest claim
///
/// Only policies with at least one claim take part. A claim dated before its
/// policy started yields a negative lag, which is kept and logged.
pub fn average_days_to_first_claim(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> FirstClaimLagRow {
    let claims = claims_by_policy(dataset);

    let lags: Vec<f64> = dataset
        .policies()
        .iter()
        .filter_map(|policy| {
            let first = claims.get(&policy.policy_id)?.iter().map(|c| c.claim_date).min()?;
            let days = first.signed_duration_since(policy.start_date).num_days();
            if days < 0 {
                warn!(
                    "Policy {} has a claim on {} before its start date {}",
                    policy.policy_id, first, policy.start_date
                );
            }
            Some(days as f64)
        })
        .collect();

    FirstClaimLagRow {
        policies_with_claims: lags.len(),
        average_days_to_first_claim: mean(lags).map(round2),
    }
}

/// Report 9: average premium divided by average claim amount, per policy type
///
/// Premiums average over the type's policies, claim amounts over the claims
/// filed against them. The ratio is undefined for types whose average claim
/// is zero or that have no claims.
pub fn premium_to_claim_ratio_by_type(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> Vec<PremiumClaimRatioRow> {
    let policies = dataset.policies();
    let premium_totals = group_sum(policies, |p| p.policy_type, |p| p.premium_amount);
    let policy_counts = group_count(policies, |p| p.policy_type, |_| true);

    let claim_totals = group_sum(
        join_claims(dataset, HolderJoin::Left),
        |row| row.policy.policy_type,
        |row| row.claim.claim_amount,
    );
    let claim_counts = group_count(
        join_claims(dataset, HolderJoin::Left),
        |row| row.policy.policy_type,
        |_| true,
    );

    premium_totals
        .into_iter()
        .map(|(policy_type, premium_total)| {
            let average_premium = premium_total / policy_counts[&policy_type] as f64;
            let average_claim = claim_counts
                .get(&policy_type)
                .map(|&n| claim_totals[&policy_type] / n as f64);

            PremiumClaimRatioRow {
                policy_type,
                average_premium: round2(average_premium),
                average_claim_amount: average_claim.map(round2),
                premium_to_claim_ratio: average_claim
                    .and_then(|claim| safe_divide(average_premium, claim)),
            }
        })
        .collect()
}
