use crate::domain::model::{RecaptureParams, ScenarioParams};
use crate::utils::error::Result;

/// Anything that can produce scenario inputs: CLI flags, a TOML file, a test fixture.
pub trait ScenarioSource: Send + Sync {
    fn scenario(&self) -> Result<ScenarioParams>;

    fn recapture(&self) -> Option<RecaptureParams> {
        None
    }

    fn period_label(&self) -> &str {
        "period"
    }
}

/// Destination for a rendered report.
pub trait ReportSink: Send + Sync {
    /// 回傳實際寫入的位置 (檔案路徑或 "stdout")
    fn write_report(&self, file_name: &str, content: &str) -> Result<String>;
}
