//! Record types for the policyholder / policy / claim snapshot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyticsError;

/// Gender of the policyholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(AnalyticsError::unknown_variant("gender", other)),
        }
    }
}

/// Product category of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyType {
    Individual,
    Family,
    Group,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Individual => "Individual",
            PolicyType::Family => "Family",
            PolicyType::Group => "Group",
        }
    }
}

impl FromStr for PolicyType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Individual" => Ok(PolicyType::Individual),
            "Family" => Ok(PolicyType::Family),
            "Group" => Ok(PolicyType::Group),
            other => Err(AnalyticsError::unknown_variant("policy type", other)),
        }
    }
}

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Expired => "Expired",
            PolicyStatus::Cancelled => "Cancelled",
        }
    }
}

impl FromStr for PolicyStatus {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(PolicyStatus::Active),
            "Expired" => Ok(PolicyStatus::Expired),
            "Cancelled" => Ok(PolicyStatus::Cancelled),
            other => Err(AnalyticsError::unknown_variant("policy status", other)),
        }
    }
}

/// Kind of medical service a claim was filed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimType {
    Consultation,
    Medication,
    Surgery,
    Hospitalization,
}

impl ClaimType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Consultation => "Consultation",
            ClaimType::Medication => "Medication",
            ClaimType::Surgery => "Surgery",
            ClaimType::Hospitalization => "Hospitalization",
        }
    }
}

impl FromStr for ClaimType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Consultation" => Ok(ClaimType::Consultation),
            "Medication" => Ok(ClaimType::Medication),
            "Surgery" => Ok(ClaimType::Surgery),
            "Hospitalization" => Ok(ClaimType::Hospitalization),
            other => Err(AnalyticsError::unknown_variant("claim type", other)),
        }
    }
}

/// Adjudication outcome of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Approved,
    Rejected,
    Pending,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Rejected => "Rejected",
            ClaimStatus::Pending => "Pending",
        }
    }
}

impl FromStr for ClaimStatus {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approved" => Ok(ClaimStatus::Approved),
            "Rejected" => Ok(ClaimStatus::Rejected),
            "Pending" => Ok(ClaimStatus::Pending),
            other => Err(AnalyticsError::unknown_variant("claim status", other)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.pad(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Gender, PolicyType, PolicyStatus, ClaimType, ClaimStatus);

/// A person holding one or more policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policyholder {
    /// Unique policyholder identifier
    pub policyholder_id: u32,

    pub full_name: String,

    pub gender: Gender,

    pub date_of_birth: NaiveDate,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub address: Option<String>,
}

impl Policyholder {
    /// Create a policyholder without contact details
    pub fn new(
        policyholder_id: u32,
        full_name: &str,
        gender: Gender,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            policyholder_id,
            full_name: full_name.to_string(),
            gender,
            date_of_birth,
            email: None,
            phone: None,
            address: None,
        }
    }
}

/// A single insurance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique policy identifier
    pub policy_id: u32,

    /// Owning policyholder (may be absent from the snapshot)
    pub policyholder_id: u32,

    pub policy_type: PolicyType,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// Annual premium
    pub premium_amount: f64,

    /// Maximum coverage
    pub coverage_amount: f64,

    pub status: PolicyStatus,
}

impl Policy {
    pub fn is_active(&self) -> bool {
        matches!(self.status, PolicyStatus::Active)
    }
}

/// A claim filed against a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique claim identifier
    pub claim_id: u32,

    /// Policy the claim was filed against
    pub policy_id: u32,

    pub claim_date: NaiveDate,

    pub claim_type: ClaimType,

    /// Amount requested
    pub claim_amount: f64,

    /// Amount paid out (zero unless approved)
    pub approved_amount: f64,

    pub claim_status: ClaimStatus,
}

impl Claim {
    pub fn is_approved(&self) -> bool {
        matches!(self.claim_status, ClaimStatus::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.claim_status, ClaimStatus::Rejected)
    }
}
