//! Foreign-key joins across the snapshot tables
//!
//! Claims join to policies with inner-join semantics (a claim whose policy is
//! missing has no policy type, premium or owner, so it drops out). Policies
//! join to policyholders with either inner or left semantics depending on
//! whether the report needs holder attributes or just the holder id.

use crate::dataset::{Claim, Dataset, Policy, Policyholder};
use std::collections::HashMap;

/// How to treat a policy whose policyholder is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderJoin {
    /// Drop the row
    Inner,
    /// Keep the row with no holder attached
    Left,
}

/// One claim with its policy and (possibly missing) policyholder
#[derive(Debug, Clone, Copy)]
pub struct JoinedClaim<'a> {
    pub claim: &'a Claim,
    pub policy: &'a Policy,
    pub holder: Option<&'a Policyholder>,
}

/// Claim x Policy x Policyholder, one row per claim in claim input order
pub fn join_claims(
    dataset: &Dataset,
    holder_join: HolderJoin,
) -> impl Iterator<Item = JoinedClaim<'_>> {
    dataset.claims().iter().filter_map(move |claim| {
        let policy = dataset.policy(claim.policy_id)?;
        let holder = dataset.policyholder(policy.policyholder_id);
        if holder.is_none() && holder_join == HolderJoin::Inner {
            return None;
        }
        Some(JoinedClaim { claim, policy, holder })
    })
}

/// Policy x Policyholder (left join), in policy input order
pub fn policies_with_holders(
    dataset: &Dataset,
) -> impl Iterator<Item = (&Policy, Option<&Policyholder>)> {
    dataset
        .policies()
        .iter()
        .map(move |policy| (policy, dataset.policyholder(policy.policyholder_id)))
}

/// Index claims by policy id, keeping claim input order within each policy
///
/// Claims pointing at unknown policies are included under their policy id;
/// callers iterate policies and look up, so those entries are never reached.
pub fn claims_by_policy(dataset: &Dataset) -> HashMap<u32, Vec<&Claim>> {
    let mut index: HashMap<u32, Vec<&Claim>> = HashMap::new();
    for claim in dataset.claims() {
        index.entry(claim.policy_id).or_default().push(claim);
    }
    index
}
