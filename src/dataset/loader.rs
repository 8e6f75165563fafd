//! Load the three snapshot tables from CSV

use super::{Claim, Dataset, Policy, Policyholder};
use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use csv::Reader;
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default directory holding policyholders.csv, policies.csv and claims.csv
pub const DEFAULT_DATA_PATH: &str = "data";

pub const POLICYHOLDERS_FILE: &str = "policyholders.csv";
pub const POLICIES_FILE: &str = "policies.csv";
pub const CLAIMS_FILE: &str = "claims.csv";

/// Raw row of policyholders.csv
#[derive(Debug, serde::Deserialize)]
struct PolicyholderRow {
    policyholder_id: u32,
    full_name: String,
    gender: String,
    date_of_birth: NaiveDate,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl PolicyholderRow {
    fn into_policyholder(self) -> Result<Policyholder> {
        Ok(Policyholder {
            policyholder_id: self.policyholder_id,
            full_name: self.full_name,
            gender: self.gender.parse()?,
            date_of_birth: self.date_of_birth,
            email: self.email,
            phone: self.phone,
            address: self.address,
        })
    }
}

/// Raw row of policies.csv
#[derive(Debug, serde::Deserialize)]
struct PolicyRow {
    policy_id: u32,
    policyholder_id: u32,
    policy_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    premium_amount: f64,
    coverage_amount: f64,
    status: String,
}

impl PolicyRow {
    fn into_policy(self) -> Result<Policy> {
        Ok(Policy {
            policy_id: self.policy_id,
            policyholder_id: self.policyholder_id,
            policy_type: self.policy_type.parse()?,
            start_date: self.start_date,
            end_date: self.end_date,
            premium_amount: self.premium_amount,
            coverage_amount: self.coverage_amount,
            status: self.status.parse()?,
        })
    }
}

/// Raw row of claims.csv
#[derive(Debug, serde::Deserialize)]
struct ClaimRow {
    claim_id: u32,
    policy_id: u32,
    claim_date: NaiveDate,
    claim_type: String,
    claim_amount: f64,
    approved_amount: f64,
    claim_status: String,
}

impl ClaimRow {
    fn into_claim(self) -> Result<Claim> {
        Ok(Claim {
            claim_id: self.claim_id,
            policy_id: self.policy_id,
            claim_date: self.claim_date,
            claim_type: self.claim_type.parse()?,
            claim_amount: self.claim_amount,
            approved_amount: self.approved_amount,
            claim_status: self.claim_status.parse()?,
        })
    }
}

/// A CSV row that was dropped because it could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub table: &'static str,

    /// 1-based line number in the source file (0 when unknown)
    pub line: u64,

    pub reason: String,
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} line {}: {}", self.table, self.line, self.reason)
    }
}

/// Records parsed from one table plus the rows that were skipped
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

/// Read every row of a table, skipping rows that fail to parse or convert
///
/// Only I/O errors and an unreadable header row abort the load.
fn read_table<R, Row, T, F>(reader: R, table: &'static str, convert: F) -> Result<Loaded<T>>
where
    R: Read,
    Row: DeserializeOwned,
    F: Fn(Row) -> Result<T>,
{
    let mut csv_reader = Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for result in csv_reader.records() {
        let parsed = match result {
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                let row: Result<Row> =
                    record.deserialize(Some(&headers)).map_err(AnalyticsError::from);
                (line, row.and_then(&convert))
            }
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                (line, Err(err.into()))
            }
        };

        match parsed {
            (_, Ok(value)) => records.push(value),
            (line, Err(err)) => {
                let row = SkippedRow {
                    table,
                    line,
                    reason: err.to_string(),
                };
                warn!("Skipping {}", row);
                skipped.push(row);
            }
        }
    }

    Ok(Loaded { records, skipped })
}

/// Load policyholders from any reader
pub fn load_policyholders_from_reader<R: Read>(reader: R) -> Result<Loaded<Policyholder>> {
    read_table(reader, "policyholders", PolicyholderRow::into_policyholder)
}

/// Load policies from any reader
pub fn load_policies_from_reader<R: Read>(reader: R) -> Result<Loaded<Policy>> {
    read_table(reader, "policies", PolicyRow::into_policy)
}

/// Load claims from any reader
pub fn load_claims_from_reader<R: Read>(reader: R) -> Result<Loaded<Claim>> {
    read_table(reader, "claims", ClaimRow::into_claim)
}

fn open(dir: &Path, file: &str) -> Result<File> {
    let path = dir.join(file);
    File::open(&path).map_err(|err| AnalyticsError::open(path, err))
}

/// Load the full dataset from a directory of CSV files
pub fn load_dataset<P: AsRef<Path>>(dir: P) -> Result<Dataset> {
    let dir = dir.as_ref();

    let policyholders = load_policyholders_from_reader(open(dir, POLICYHOLDERS_FILE)?)?;
    let policies = load_policies_from_reader(open(dir, POLICIES_FILE)?)?;
    let claims = load_claims_from_reader(open(dir, CLAIMS_FILE)?)?;

    info!(
        "Loaded {} policyholders, {} policies, {} claims from {}",
        policyholders.records.len(),
        policies.records.len(),
        claims.records.len(),
        dir.display()
    );

    let mut skipped = policyholders.skipped;
    skipped.extend(policies.skipped);
    skipped.extend(claims.skipped);
    if !skipped.is_empty() {
        warn!("Skipped {} unreadable row(s) in {}", skipped.len(), dir.display());
    }

    let dataset = Dataset::new(policyholders.records, policies.records, claims.records);
    Ok(dataset.with_skipped_rows(skipped))
}

/// Load the dataset from the default data/ location
pub fn load_default_dataset() -> Result<Dataset> {
    load_dataset(DEFAULT_DATA_PATH)
}
