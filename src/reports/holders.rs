//! Policyholder-level reports: demographics and multi-policy customers

use super::rows::{DemographicRow, MultiPolicyHolderRow};
use crate::aggregate::{age_bucket, descending, group_count, round2};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::join::{claims_by_policy, policies_with_holders};
use std::collections::BTreeMap;

/// Report 4: policyholder counts per gender and age group on the as-of date
pub fn policyholders_by_gender_and_age(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Vec<DemographicRow> {
    group_count(
        dataset.policyholders(),
        |h| (h.gender, age_bucket(h.date_of_birth, config.as_of)),
        |_| true,
    )
    .into_iter()
    .map(|((gender, age_group), policyholders)| DemographicRow {
        gender,
        age_group,
        policyholders,
    })
    .collect()
}

#[derive(Default)]
struct HolderTotals<'a> {
    name: Option<&'a str>,
    /// Premium per distinct policy id
    premiums: BTreeMap<u32, f64>,
}

/// Report 10: policyholders owning more than one distinct policy
///
/// Premium is summed once per policy; claim amounts over every claim filed
/// against those policies. Highest total premium first, ties by id.
pub fn multi_policy_holders(
    dataset: &Dataset,
    _config: &AnalysisConfig,
) -> Vec<MultiPolicyHolderRow> {
    let claims = claims_by_policy(dataset);

    let mut holders: BTreeMap<u32, HolderTotals<'_>> = BTreeMap::new();
    for (policy, holder) in policies_with_holders(dataset) {
        let totals = holders.entry(policy.policyholder_id).or_default();
        totals.name = holder.map(|h| h.full_name.as_str());
        totals.premiums.entry(policy.policy_id).or_insert(policy.premium_amount);
    }

    let mut rows: Vec<MultiPolicyHolderRow> = holders
        .into_iter()
        .filter(|(_, totals)| totals.premiums.len() > 1)
        .map(|(policyholder_id, totals)| {
            let total_claim_amount: f64 = totals
                .premiums
                .keys()
                .filter_map(|policy_id| claims.get(policy_id))
                .flatten()
                .map(|c| c.claim_amount)
                .sum();

            MultiPolicyHolderRow {
                policyholder_id,
                full_name: totals.name.map(str::to_string),
                policy_count: totals.premiums.len(),
                total_premium: round2(totals.premiums.values().sum()),
                total_claim_amount: round2(total_claim_amount),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(a.total_premium, b.total_premium)
            .then_with(|| a.policyholder_id.cmp(&b.policyholder_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AgeBucket;
    use crate::dataset::{ClaimStatus, ClaimType, Gender, PolicyStatus, PolicyType};
    use crate::fixtures::{claim, config, date, holder, policy, sample_dataset};

    #[test]
    fn test_policyholders_by_gender_and_age() {
        let rows = policyholders_by_gender_and_age(&sample_dataset(), &config());
        let cells: Vec<(Gender, AgeBucket, usize)> =
            rows.iter().map(|r| (r.gender, r.age_group, r.policyholders)).collect();
        assert_eq!(
            cells,
            vec![
                (Gender::Male, AgeBucket::From18To25, 1),
                (Gender::Male, AgeBucket::From36To45, 1),
                (Gender::Male, AgeBucket::From46To60, 1),
                (Gender::Female, AgeBucket::Under18, 1),
                (Gender::Female, AgeBucket::From26To35, 1),
                (Gender::Female, AgeBucket::Over60, 1),
            ]
        );
    }

    #[test]
    fn test_demographics_follow_as_of_date() {
        let dataset = Dataset::new(
            vec![
                holder(1, "A", Gender::Male, date(1999, 1, 1)),
                holder(2, "B", Gender::Male, date(1998, 12, 30)),
            ],
            vec![],
            vec![],
        );

        let mut cfg = config();
        cfg.as_of = date(2024, 12, 30);
        let rows = policyholders_by_gender_and_age(&dataset, &cfg);
        assert_eq!(
            rows,
            vec![
                DemographicRow {
                    gender: Gender::Male,
                    age_group: AgeBucket::From18To25,
                    policyholders: 1,
                },
                DemographicRow {
                    gender: Gender::Male,
                    age_group: AgeBucket::From26To35,
                    policyholders: 1,
                },
            ]
        );
    }

    #[test]
    fn test_multi_policy_holders() {
        let rows = multi_policy_holders(&sample_dataset(), &config());
        assert_eq!(
            rows,
            vec![
                MultiPolicyHolderRow {
                    policyholder_id: 4,
                    full_name: Some("Dana Fischer".to_string()),
                    policy_count: 3,
                    total_premium: 5300.0,
                    total_claim_amount: 10650.0,
                },
                MultiPolicyHolderRow {
                    policyholder_id: 1,
                    full_name: Some("Alice Moreau".to_string()),
                    policy_count: 2,
                    total_premium: 3600.0,
                    total_claim_amount: 13350.0,
                },
            ]
        );
    }

    #[test]
    fn test_removing_second_policy_drops_holder() {
        let full = sample_dataset();
        let policies = full.policies().iter().filter(|p| p.policy_id != 102).cloned().collect();
        let dataset = Dataset::new(full.policyholders().to_vec(), policies, full.claims().to_vec());

        let ids: Vec<u32> = multi_policy_holders(&dataset, &config())
            .iter()
            .map(|r| r.policyholder_id)
            .collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_premium_not_multiplied_by_claims() {
        let dataset = Dataset::new(
            vec![holder(1, "Ann Lee", Gender::Female, date(1980, 1, 1))],
            vec![
                policy(10, 1, PolicyType::Individual, PolicyStatus::Active, 100.0),
                policy(11, 1, PolicyType::Family, PolicyStatus::Active, 200.0),
            ],
            vec![
                claim(1, 10, ClaimType::Consultation, 40.0, ClaimStatus::Approved),
                claim(2, 10, ClaimType::Medication, 60.0, ClaimStatus::Rejected),
                claim(3, 10, ClaimType::Surgery, 500.0, ClaimStatus::Pending),
            ],
        );

        let rows = multi_policy_holders(&dataset, &config());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_premium, 300.0);
        assert_eq!(rows[0].total_claim_amount, 600.0);
    }

    #[test]
    fn test_holder_missing_from_snapshot_is_kept_without_name() {
        let dataset = Dataset::new(
            vec![],
            vec![
                policy(10, 9, PolicyType::Individual, PolicyStatus::Active, 100.0),
                policy(11, 9, PolicyType::Group, PolicyStatus::Expired, 50.0),
            ],
            vec![],
        );

        let rows = multi_policy_holders(&dataset, &config());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].full_name, None);
        assert_eq!(rows[0].total_claim_amount, 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        assert!(policyholders_by_gender_and_age(&dataset, &config()).is_empty());
        assert!(multi_policy_holders(&dataset, &config()).is_empty());
    }
}
