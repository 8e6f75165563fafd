//! Rendering report rows as an aligned text table, CSV or JSON

use crate::error::{AnalyticsError, Result};
use crate::reports::{
    ApprovalRateRow, AverageClaimRow, DemographicRow, DormantPoliciesRow, FirstClaimLagRow,
    MultiPolicyHolderRow, PolicyStatusRow, PremiumClaimRatioRow, RejectedClaimsRow, ReportKind,
    ReportOutput, TopPolicyholderRow,
};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Marker printed in the text table for undefined values
const UNDEFINED: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalyticsError::unknown_variant("output format", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Table => "table",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

/// A report row that can be laid out as table cells
///
/// `HEADERS` matches the serialized field names so CSV and table output share
/// column names.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

fn maybe_amount(value: Option<f64>) -> String {
    value.map(amount).unwrap_or_else(|| UNDEFINED.to_string())
}

fn maybe_name(name: &Option<String>) -> String {
    name.clone().unwrap_or_else(|| UNDEFINED.to_string())
}

impl TableRow for AverageClaimRow {
    const HEADERS: &'static [&'static str] =
        &["policy_type", "claim_count", "average_claim_amount"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policy_type.to_string(),
            self.claim_count.to_string(),
            amount(self.average_claim_amount),
        ]
    }
}

impl TableRow for RejectedClaimsRow {
    const HEADERS: &'static [&'static str] = &["claim_type", "rejected_claims"];

    fn cells(&self) -> Vec<String> {
        vec![self.claim_type.to_string(), self.rejected_claims.to_string()]
    }
}

impl TableRow for TopPolicyholderRow {
    const HEADERS: &'static [&'static str] =
        &["policyholder_id", "full_name", "total_approved_amount"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policyholder_id.to_string(),
            maybe_name(&self.full_name),
            amount(self.total_approved_amount),
        ]
    }
}

impl TableRow for DemographicRow {
    const HEADERS: &'static [&'static str] = &["gender", "age_group", "policyholders"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.gender.to_string(),
            self.age_group.to_string(),
            self.policyholders.to_string(),
        ]
    }
}

impl TableRow for DormantPoliciesRow {
    const HEADERS: &'static [&'static str] =
        &["active_policies", "with_recent_claims", "without_recent_claims"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.active_policies.to_string(),
            self.with_recent_claims.to_string(),
            self.without_recent_claims.to_string(),
        ]
    }
}

impl TableRow for ApprovalRateRow {
    const HEADERS: &'static [&'static str] =
        &["claim_type", "total_claims", "approved_claims", "approval_rate_pct"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.claim_type.to_string(),
            self.total_claims.to_string(),
            self.approved_claims.to_string(),
            maybe_amount(self.approval_rate_pct),
        ]
    }
}

impl TableRow for PolicyStatusRow {
    const HEADERS: &'static [&'static str] =
        &["policy_type", "policies", "expired_pct", "cancelled_pct", "average_premium"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policy_type.to_string(),
            self.policies.to_string(),
            maybe_amount(self.expired_pct),
            maybe_amount(self.cancelled_pct),
            amount(self.average_premium),
        ]
    }
}

impl TableRow for FirstClaimLagRow {
    const HEADERS: &'static [&'static str] =
        &["policies_with_claims", "average_days_to_first_claim"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policies_with_claims.to_string(),
            maybe_amount(self.average_days_to_first_claim),
        ]
    }
}

impl TableRow for PremiumClaimRatioRow {
    const HEADERS: &'static [&'static str] =
        &["policy_type", "average_premium", "average_claim_amount", "premium_to_claim_ratio"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policy_type.to_string(),
            amount(self.average_premium),
            maybe_amount(self.average_claim_amount),
            maybe_amount(self.premium_to_claim_ratio),
        ]
    }
}

impl TableRow for MultiPolicyHolderRow {
    const HEADERS: &'static [&'static str] =
        &["policyholder_id", "full_name", "policy_count", "total_premium", "total_claim_amount"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.policyholder_id.to_string(),
            maybe_name(&self.full_name),
            self.policy_count.to_string(),
            amount(self.total_premium),
            amount(self.total_claim_amount),
        ]
    }
}

#[derive(Serialize)]
struct JsonReport<'a, T> {
    report: u8,
    slug: &'static str,
    title: &'static str,
    rows: &'a [T],
}

/// Write one report's rows in the requested format
pub fn write_report<W: Write>(
    output: &ReportOutput,
    format: OutputFormat,
    writer: W,
) -> Result<()> {
    let kind = output.kind();
    match output {
        ReportOutput::AverageClaimByPolicyType(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::RejectedClaimsByType(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::TopPolicyholders(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::PolicyholderDemographics(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::DormantActivePolicies(row) => {
            write_rows(kind, std::slice::from_ref(row), format, writer)
        }
        ReportOutput::ApprovalRateByClaimType(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::PolicyStatusByType(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::DaysToFirstClaim(row) => {
            write_rows(kind, std::slice::from_ref(row), format, writer)
        }
        ReportOutput::PremiumToClaimRatio(rows) => write_rows(kind, rows, format, writer),
        ReportOutput::MultiPolicyHolders(rows) => write_rows(kind, rows, format, writer),
    }
}

fn write_rows<T: TableRow, W: Write>(
    kind: ReportKind,
    rows: &[T],
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(kind, rows, writer),
        OutputFormat::Csv => {
            let mut csv_writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
            csv_writer.write_record(T::HEADERS)?;
            for row in rows {
                csv_writer.serialize(row)?;
            }
            csv_writer.flush()?;
            Ok(())
        }
        OutputFormat::Json => {
            let report = JsonReport {
                report: kind.number(),
                slug: kind.slug(),
                title: kind.title(),
                rows,
            };
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_table<T: TableRow, W: Write>(kind: ReportKind, rows: &[T], mut writer: W) -> Result<()> {
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(writer, "Report {}: {}", kind.number(), kind.title())?;

    let header: Vec<String> = T::HEADERS
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<w$}", h, w = w))
        .collect();
    writeln!(writer, "{}", header.join("  ").trim_end())?;
    let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    writeln!(writer, "{}", "-".repeat(rule_width))?;

    if cells.is_empty() {
        writeln!(writer, "(no rows)")?;
    }
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect();
        writeln!(writer, "{}", line.join("  ").trim_end())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{config, sample_dataset};
    use crate::reports::run_report;

    fn render(kind: ReportKind, format: OutputFormat) -> String {
        let output = run_report(kind, &sample_dataset(), &config()).unwrap();
        let mut buf = Vec::new();
        write_report(&output, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_headers_match_cells() {
        let dataset = sample_dataset();
        let config = config();
        for kind in ReportKind::ALL {
            let text = {
                let output = run_report(kind, &dataset, &config).unwrap();
                let mut buf = Vec::new();
                write_report(&output, OutputFormat::Csv, &mut buf).unwrap();
                String::from_utf8(buf).unwrap()
            };
            let mut reader = csv::Reader::from_reader(text.as_bytes());
            let width = reader.headers().unwrap().len();
            for record in reader.records() {
                assert_eq!(record.unwrap().len(), width, "ragged CSV for {}", kind);
            }
        }
    }

    #[test]
    fn test_csv_output() {
        let text = render(ReportKind::AverageClaimByPolicyType, OutputFormat::Csv);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "policy_type,claim_count,average_claim_amount");
        assert_eq!(lines[1], "Family,3,7666.67");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_age_group_labels() {
        let text = render(ReportKind::PolicyholderDemographics, OutputFormat::Csv);
        assert!(text.contains("Male,18-25,1"));
        assert!(text.contains("Female,Under 18,1"));
        assert!(text.contains("Female,60+,1"));
    }

    #[test]
    fn test_json_output() {
        let text = render(ReportKind::ApprovalRateByClaimType, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["report"], 6);
        assert_eq!(value["slug"], "approval-rate-by-claim-type");
        assert_eq!(value["rows"][0]["claim_type"], "Consultation");
        assert_eq!(value["rows"][0]["approval_rate_pct"], 66.67);
    }

    #[test]
    fn test_table_marks_undefined_values() {
        let output = ReportOutput::DaysToFirstClaim(FirstClaimLagRow {
            policies_with_claims: 0,
            average_days_to_first_claim: None,
        });
        let mut buf = Vec::new();
        write_report(&output, OutputFormat::Table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Report 8: Average days from policy start to first claim");
        assert_eq!(lines[1], "policies_with_claims  average_days_to_first_claim");
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), vec!["0", "-"]);
    }

    #[test]
    fn test_table_empty_report() {
        let output = ReportOutput::RejectedClaimsByType(Vec::new());
        let mut buf = Vec::new();
        write_report(&output, OutputFormat::Table, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("(no rows)"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
