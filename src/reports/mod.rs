//! The ten-report catalog
//!
//! Each report is a pure function of the dataset and the analysis config.
//! `ReportKind` names them; `run_report` dispatches to the right one and wraps
//! its rows in a `ReportOutput`.

mod claims;
mod holders;
mod policies;
pub mod rows;

pub use claims::{
    approval_rate_by_claim_type, average_claim_by_policy_type, rejected_claims_by_type,
    top_policyholders_by_approved_amount,
};
pub use holders::{multi_policy_holders, policyholders_by_gender_and_age};
pub use policies::{
    active_policies_without_recent_claims, average_days_to_first_claim, policy_status_by_type,
    premium_to_claim_ratio_by_type,
};
pub use rows::*;

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;
use crate::error::{AnalyticsError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the ten reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportKind {
    AverageClaimByPolicyType,
    RejectedClaimsByType,
    TopPolicyholders,
    PolicyholderDemographics,
    DormantActivePolicies,
    ApprovalRateByClaimType,
    PolicyStatusByType,
    DaysToFirstClaim,
    PremiumToClaimRatio,
    MultiPolicyHolders,
}

impl ReportKind {
    /// All reports in catalog order
    pub const ALL: [ReportKind; 10] = [
        ReportKind::AverageClaimByPolicyType,
        ReportKind::RejectedClaimsByType,
        ReportKind::TopPolicyholders,
        ReportKind::PolicyholderDemographics,
        ReportKind::DormantActivePolicies,
        ReportKind::ApprovalRateByClaimType,
        ReportKind::PolicyStatusByType,
        ReportKind::DaysToFirstClaim,
        ReportKind::PremiumToClaimRatio,
        ReportKind::MultiPolicyHolders,
    ];

    /// Catalog number, 1-10
    pub fn number(&self) -> u8 {
        match self {
            ReportKind::AverageClaimByPolicyType => 1,
            ReportKind::RejectedClaimsByType => 2,
            ReportKind::TopPolicyholders => 3,
            ReportKind::PolicyholderDemographics => 4,
            ReportKind::DormantActivePolicies => 5,
            ReportKind::ApprovalRateByClaimType => 6,
            ReportKind::PolicyStatusByType => 7,
            ReportKind::DaysToFirstClaim => 8,
            ReportKind::PremiumToClaimRatio => 9,
            ReportKind::MultiPolicyHolders => 10,
        }
    }

    pub fn from_number(number: u8) -> Result<Self> {
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.number() == number)
            .ok_or(AnalyticsError::UnknownReport(number))
    }

    /// Short machine-friendly name, also used for export file names
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::AverageClaimByPolicyType => "avg-claim-by-policy-type",
            ReportKind::RejectedClaimsByType => "rejected-claims-by-type",
            ReportKind::TopPolicyholders => "top-policyholders",
            ReportKind::PolicyholderDemographics => "demographics",
            ReportKind::DormantActivePolicies => "dormant-active-policies",
            ReportKind::ApprovalRateByClaimType => "approval-rate-by-claim-type",
            ReportKind::PolicyStatusByType => "policy-status-by-type",
            ReportKind::DaysToFirstClaim => "days-to-first-claim",
            ReportKind::PremiumToClaimRatio => "premium-to-claim-ratio",
            ReportKind::MultiPolicyHolders => "multi-policy-holders",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::AverageClaimByPolicyType => "Average claim amount by policy type",
            ReportKind::RejectedClaimsByType => "Rejected claims by claim type (recent window)",
            ReportKind::TopPolicyholders => "Top policyholders by approved claim amount",
            ReportKind::PolicyholderDemographics => "Policyholders by gender and age group",
            ReportKind::DormantActivePolicies => "Active policies without recent claims",
            ReportKind::ApprovalRateByClaimType => "Claim approval rate by claim type",
            ReportKind::PolicyStatusByType => "Expired and cancelled share by policy type",
            ReportKind::DaysToFirstClaim => "Average days from policy start to first claim",
            ReportKind::PremiumToClaimRatio => "Premium to claim ratio by policy type",
            ReportKind::MultiPolicyHolders => "Policyholders with multiple policies",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Accepts either the catalog number ("3") or the slug ("top-policyholders")
impl FromStr for ReportKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(number) = s.parse::<u8>() {
            return ReportKind::from_number(number);
        }
        ReportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| AnalyticsError::unknown_variant("report", s))
    }
}

/// Rows produced by one report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutput {
    AverageClaimByPolicyType(Vec<AverageClaimRow>),
    RejectedClaimsByType(Vec<RejectedClaimsRow>),
    TopPolicyholders(Vec<TopPolicyholderRow>),
    PolicyholderDemographics(Vec<DemographicRow>),
    DormantActivePolicies(DormantPoliciesRow),
    ApprovalRateByClaimType(Vec<ApprovalRateRow>),
    PolicyStatusByType(Vec<PolicyStatusRow>),
    DaysToFirstClaim(FirstClaimLagRow),
    PremiumToClaimRatio(Vec<PremiumClaimRatioRow>),
    MultiPolicyHolders(Vec<MultiPolicyHolderRow>),
}

impl ReportOutput {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportOutput::AverageClaimByPolicyType(_) => ReportKind::AverageClaimByPolicyType,
            ReportOutput::RejectedClaimsByType(_) => ReportKind::RejectedClaimsByType,
            ReportOutput::TopPolicyholders(_) => ReportKind::TopPolicyholders,
            ReportOutput::PolicyholderDemographics(_) => ReportKind::PolicyholderDemographics,
            ReportOutput::DormantActivePolicies(_) => ReportKind::DormantActivePolicies,
            ReportOutput::ApprovalRateByClaimType(_) => ReportKind::ApprovalRateByClaimType,
            ReportOutput::PolicyStatusByType(_) => ReportKind::PolicyStatusByType,
            ReportOutput::DaysToFirstClaim(_) => ReportKind::DaysToFirstClaim,
            ReportOutput::PremiumToClaimRatio(_) => ReportKind::PremiumToClaimRatio,
            ReportOutput::MultiPolicyHolders(_) => ReportKind::MultiPolicyHolders,
        }
    }

    /// Number of result rows
    pub fn len(&self) -> usize {
        match self {
            ReportOutput::AverageClaimByPolicyType(rows) => rows.len(),
            ReportOutput::RejectedClaimsByType(rows) => rows.len(),
            ReportOutput::TopPolicyholders(rows) => rows.len(),
            ReportOutput::PolicyholderDemographics(rows) => rows.len(),
            ReportOutput::DormantActivePolicies(_) => 1,
            ReportOutput::ApprovalRateByClaimType(rows) => rows.len(),
            ReportOutput::PolicyStatusByType(rows) => rows.len(),
            ReportOutput::DaysToFirstClaim(_) => 1,
            ReportOutput::PremiumToClaimRatio(rows) => rows.len(),
            ReportOutput::MultiPolicyHolders(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run a single report
pub fn run_report(
    kind: ReportKind,
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<ReportOutput> {
    let output = match kind {
        ReportKind::AverageClaimByPolicyType => {
            ReportOutput::AverageClaimByPolicyType(average_claim_by_policy_type(dataset, config)?)
        }
        ReportKind::RejectedClaimsByType => {
            ReportOutput::RejectedClaimsByType(rejected_claims_by_type(dataset, config))
        }
        ReportKind::TopPolicyholders => {
            ReportOutput::TopPolicyholders(top_policyholders_by_approved_amount(dataset, config))
        }
        ReportKind::PolicyholderDemographics => {
            ReportOutput::PolicyholderDemographics(policyholders_by_gender_and_age(dataset, config))
        }
        ReportKind::DormantActivePolicies => {
            let row = active_policies_without_recent_claims(dataset, config);
            ReportOutput::DormantActivePolicies(row)
        }
        ReportKind::ApprovalRateByClaimType => {
            ReportOutput::ApprovalRateByClaimType(approval_rate_by_claim_type(dataset, config))
        }
        ReportKind::PolicyStatusByType => {
            ReportOutput::PolicyStatusByType(policy_status_by_type(dataset, config)?)
        }
        ReportKind::DaysToFirstClaim => {
            ReportOutput::DaysToFirstClaim(average_days_to_first_claim(dataset, config))
        }
        ReportKind::PremiumToClaimRatio => {
            ReportOutput::PremiumToClaimRatio(premium_to_claim_ratio_by_type(dataset, config))
        }
        ReportKind::MultiPolicyHolders => {
            ReportOutput::MultiPolicyHolders(multi_policy_holders(dataset, config))
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{config, sample_dataset};

    #[test]
    fn test_report_numbers_round_trip() {
        for (i, kind) in ReportKind::ALL.iter().enumerate() {
            assert_eq!(kind.number() as usize, i + 1);
            assert_eq!(ReportKind::from_number(kind.number()).unwrap(), *kind);
            assert_eq!(kind.slug().parse::<ReportKind>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_parse_report_selector() {
        assert_eq!("9".parse::<ReportKind>().unwrap(), ReportKind::PremiumToClaimRatio);
        assert!(matches!("11".parse::<ReportKind>(), Err(AnalyticsError::UnknownReport(11))));
        assert!(matches!("0".parse::<ReportKind>(), Err(AnalyticsError::UnknownReport(0))));
        assert!(matches!(
            "bogus".parse::<ReportKind>(),
            Err(AnalyticsError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_every_report_runs_independently() {
        let dataset = sample_dataset();
        let config = config();
        for kind in ReportKind::ALL {
            let output = run_report(kind, &dataset, &config).unwrap();
            assert_eq!(output.kind(), kind);
            assert!(!output.is_empty(), "{} returned no rows", kind);
        }
    }
}
