use crate::domain::model::{ProjectionResult, RecapturePoint};
use crate::utils::error::{Result, RoiError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Table => "txt",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn file_name(&self) -> String {
        format!("roi_report.{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(RoiError::invalid(
                "output.format",
                other,
                "Unsupported format. Valid formats: table, csv, json",
            )),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    period_label: &'a str,
    rows: &'a [crate::domain::model::PeriodResult],
    summary: &'a crate::domain::model::Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    recapture: Option<&'a [RecapturePoint]>,
}

pub fn render(
    result: &ProjectionResult,
    recapture: Option<&[RecapturePoint]>,
    format: OutputFormat,
    period_label: &str,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(result, recapture, period_label)),
        OutputFormat::Csv => render_csv(result),
        OutputFormat::Json => render_json(result, recapture, period_label),
    }
}

fn render_table(
    result: &ProjectionResult,
    recapture: Option<&[RecapturePoint]>,
    period_label: &str,
) -> String {
    let summary = &result.summary;
    let mut out = String::new();

    // 寫入 String 不會失敗，忽略 fmt::Result
    let _ = writeln!(
        out,
        "📋 ROI Summary ({} {}s)",
        result.rows.len(),
        period_label
    );
    let _ = writeln!(out, "  Cost Without Automation: {}", format_currency(summary.cost_before));
    let _ = writeln!(out, "  Cost With Automation:    {}", format_currency(summary.cost_after));
    let _ = writeln!(out, "  Vendor Price:            {}", format_currency(summary.vendor_price));
    let _ = writeln!(out, "  Total Savings:           {}", format_currency(summary.total_savings));
    let _ = writeln!(
        out,
        "  Time Saved:              {:.0} minutes ({:.1} hours of wages)",
        summary.time_saved_minutes, summary.time_saved_hours
    );
    let _ = writeln!(out, "  ROI:                     {:.1}%", summary.roi_percent);

    if !result.rows.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>8} {:>16} {:>16} {:>16} {:>18} {:>9}",
            period_label, "cost_before", "cost_after", "savings", "cumulative", "percent"
        );
        for row in &result.rows {
            let _ = writeln!(
                out,
                "{:>8} {:>16} {:>16} {:>16} {:>18} {:>8.1}%",
                row.period_index,
                format_currency(row.cost_before),
                format_currency(row.cost_after),
                format_currency(row.savings),
                format_currency(row.cumulative_savings),
                row.percent_savings
            );
        }
    }

    if let Some(points) = recapture {
        let _ = writeln!(out);
        let _ = writeln!(out, "💰 Revenue Recapture");
        for point in points {
            let _ = writeln!(
                out,
                "  {:>5.1} pts -> {}",
                point.improvement_point,
                format_currency(point.recaptured_revenue)
            );
        }
    }

    out
}

fn render_csv(result: &ProjectionResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "period",
        "cost_before",
        "cost_after",
        "savings",
        "cumulative_savings",
        "percent_savings",
    ])?;

    for row in &result.rows {
        writer.write_record([
            row.period_index.to_string(),
            format!("{:.2}", row.cost_before),
            format!("{:.2}", row.cost_after),
            format!("{:.2}", row.savings),
            format!("{:.2}", row.cumulative_savings),
            format!("{:.2}", row.percent_savings),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| RoiError::CsvIntoInner {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| RoiError::CsvIntoInner {
        message: e.to_string(),
    })
}

fn render_json(
    result: &ProjectionResult,
    recapture: Option<&[RecapturePoint]>,
    period_label: &str,
) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        period_label,
        rows: &result.rows,
        summary: &result.summary,
        recapture,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `1234567.891` -> `$1,234,567.89`
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}
