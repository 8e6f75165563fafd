//! Shared test fixtures
//!
//! `sample_dataset()` is a small hand-checked snapshot; expected report values
//! in the tests are derived from it with an as-of date of 2024-06-30.

use crate::config::AnalysisConfig;
use crate::dataset::{
    Claim, ClaimStatus, ClaimType, Dataset, Gender, Policy, PolicyStatus, PolicyType, Policyholder,
};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn as_of() -> NaiveDate {
    date(2024, 6, 30)
}

pub fn config() -> AnalysisConfig {
    AnalysisConfig::new(as_of())
}

pub fn holder(id: u32, name: &str, gender: Gender, dob: NaiveDate) -> Policyholder {
    Policyholder::new(id, name, gender, dob)
}

/// Policy running 2022-01-01 to 2025-01-01 with coverage at 50x premium
pub fn policy(
    id: u32,
    holder_id: u32,
    policy_type: PolicyType,
    status: PolicyStatus,
    premium: f64,
) -> Policy {
    dated_policy(id, holder_id, policy_type, date(2022, 1, 1), date(2025, 1, 1), premium, status)
}

pub fn dated_policy(
    id: u32,
    holder_id: u32,
    policy_type: PolicyType,
    start: NaiveDate,
    end: NaiveDate,
    premium: f64,
    status: PolicyStatus,
) -> Policy {
    Policy {
        policy_id: id,
        policyholder_id: holder_id,
        policy_type,
        start_date: start,
        end_date: end,
        premium_amount: premium,
        coverage_amount: premium * 50.0,
        status,
    }
}

/// Claim dated 2023-01-01; approved claims are paid in full
pub fn claim(
    id: u32,
    policy_id: u32,
    claim_type: ClaimType,
    amount: f64,
    status: ClaimStatus,
) -> Claim {
    dated_claim(id, policy_id, date(2023, 1, 1), claim_type, amount, status)
}

pub fn dated_claim(
    id: u32,
    policy_id: u32,
    claim_date: NaiveDate,
    claim_type: ClaimType,
    amount: f64,
    status: ClaimStatus,
) -> Claim {
    Claim {
        claim_id: id,
        policy_id,
        claim_date,
        claim_type,
        claim_amount: amount,
        approved_amount: if status == ClaimStatus::Approved { amount } else { 0.0 },
        claim_status: status,
    }
}

pub fn sample_dataset() -> Dataset {
    use ClaimStatus::*;
    use ClaimType::*;
    use PolicyStatus::*;
    use PolicyType::*;

    let holders = vec![
        holder(1, "Alice Moreau", Gender::Female, date(1990, 5, 20)),
        holder(2, "Ben Okafor", Gender::Male, date(1970, 2, 10)),
        holder(3, "Chen Wei", Gender::Male, date(2001, 8, 1)),
        holder(4, "Dana Fischer", Gender::Female, date(1955, 12, 1)),
        holder(5, "Eli Novak", Gender::Male, date(1985, 7, 1)),
        holder(6, "Farah Haddad", Gender::Female, date(2008, 1, 15)),
    ];

    let policies = vec![
        dated_policy(101, 1, Individual, date(2022, 1, 1), date(2025, 1, 1), 1200.0, Active),
        dated_policy(102, 1, Family, date(2023, 3, 1), date(2026, 3, 1), 2400.0, Active),
        dated_policy(103, 2, Group, date(2021, 6, 1), date(2023, 6, 1), 900.0, Expired),
        dated_policy(104, 3, Individual, date(2023, 9, 15), date(2026, 9, 15), 1000.0, Active),
        dated_policy(105, 4, Family, date(2020, 1, 1), date(2023, 1, 1), 3000.0, Cancelled),
        dated_policy(106, 4, Group, date(2022, 5, 1), date(2025, 5, 1), 800.0, Active),
        dated_policy(107, 4, Individual, date(2019, 2, 1), date(2022, 2, 1), 1500.0, Expired),
        dated_policy(108, 5, Group, date(2024, 1, 1), date(2027, 1, 1), 700.0, Active),
    ];

    let mut claims = vec![
        dated_claim(1, 101, date(2022, 3, 11), Consultation, 200.0, Approved),
        dated_claim(2, 101, date(2023, 8, 20), Medication, 150.0, Rejected),
        dated_claim(3, 102, date(2023, 4, 10), Surgery, 5000.0, Approved),
        dated_claim(4, 102, date(2024, 2, 14), Hospitalization, 8000.0, Pending),
        dated_claim(5, 103, date(2022, 1, 5), Consultation, 100.0, Rejected),
        dated_claim(6, 104, date(2023, 10, 1), Consultation, 300.0, Approved),
        dated_claim(7, 104, date(2024, 5, 5), Surgery, 6000.0, Rejected),
        dated_claim(8, 105, date(2021, 7, 19), Hospitalization, 10000.0, Approved),
        dated_claim(9, 106, date(2022, 12, 1), Medication, 400.0, Approved),
        dated_claim(10, 107, date(2020, 2, 1), Medication, 250.0, Rejected),
    ];
    // Partial approvals
    claims[2].approved_amount = 4500.0;
    claims[7].approved_amount = 9000.0;

    Dataset::new(holders, policies, claims)
}
