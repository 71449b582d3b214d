use crate::app::report::{self, OutputFormat};
use crate::core::projection::project;
use crate::core::recapture::recapture_from;
use crate::domain::model::{ProjectionResult, RecapturePoint};
use crate::domain::ports::{ReportSink, ScenarioSource};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub projection: ProjectionResult,
    pub recapture: Option<Vec<RecapturePoint>>,
    pub location: String,
}

pub struct RoiEngine<S: ScenarioSource, K: ReportSink> {
    source: S,
    sink: K,
    format: OutputFormat,
}

impl<S: ScenarioSource, K: ReportSink> RoiEngine<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting ROI projection");

        let params = self.source.scenario()?;
        tracing::debug!("Scenario: {:?}", params);

        let projection = project(&params)?;
        tracing::info!(
            "📊 Projected {} {}(s): savings {:.2}, ROI {:.1}%",
            projection.rows.len(),
            self.source.period_label(),
            projection.summary.total_savings,
            projection.summary.roi_percent
        );

        let recapture = match self.source.recapture() {
            Some(recapture_params) => {
                let points = recapture_from(&recapture_params)?;
                tracing::info!("💰 Computed {} recapture point(s)", points.len());
                Some(points)
            }
            None => None,
        };

        let content = report::render(
            &projection,
            recapture.as_deref(),
            self.format,
            self.source.period_label(),
        )?;

        let location = self.sink.write_report(&self.format.file_name(), &content)?;
        tracing::info!("📁 Report written to: {}", location);

        Ok(RunOutcome {
            projection,
            recapture,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ModuleConfig, RecaptureParams, ScenarioParams};
    use crate::utils::error::RoiError;
    use std::sync::Mutex;

    struct FixedSource {
        params: ScenarioParams,
        recapture: Option<RecaptureParams>,
    }

    impl ScenarioSource for FixedSource {
        fn scenario(&self) -> Result<ScenarioParams> {
            Ok(self.params.clone())
        }

        fn recapture(&self) -> Option<RecaptureParams> {
            self.recapture.clone()
        }

        fn period_label(&self) -> &str {
            "month"
        }
    }

    #[derive(Default)]
    struct MemorySink {
        written: Mutex<Vec<(String, String)>>,
    }

    impl ReportSink for MemorySink {
        fn write_report(&self, file_name: &str, content: &str) -> Result<String> {
            self.written
                .lock()
                .unwrap()
                .push((file_name.to_string(), content.to_string()));
            Ok(format!("memory://{}", file_name))
        }
    }

    fn source(horizon: i64) -> FixedSource {
        FixedSource {
            params: ScenarioParams {
                patients_per_period: 200.0,
                hourly_wage: 22.0,
                horizon_periods: horizon,
                platform_fee_per_period: 0.0,
                modules: vec![ModuleConfig::flat_price("fax", 15.0, 2.0)],
            },
            recapture: None,
        }
    }

    #[test]
    fn test_run_writes_report_to_sink() {
        let engine = RoiEngine::new(source(12), MemorySink::default()).with_format(OutputFormat::Csv);
        let outcome = engine.run().unwrap();

        assert_eq!(outcome.location, "memory://roi_report.csv");
        assert_eq!(outcome.projection.rows.len(), 12);
        assert!(outcome.recapture.is_none());

        let written = engine.sink.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1.lines().count(), 13);
    }

    #[test]
    fn test_run_includes_recapture() {
        let mut src = source(1);
        src.recapture = Some(RecaptureParams {
            patients_per_period: 200.0,
            periods_per_year: 12.0,
            revenue_per_patient: 80_000.0,
            improvement_points: vec![10.0],
        });

        let outcome = RoiEngine::new(src, MemorySink::default()).run().unwrap();
        let points = outcome.recapture.unwrap();
        assert!((points[0].recaptured_revenue - 19_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_run_propagates_invalid_horizon() {
        let engine = RoiEngine::new(source(-5), MemorySink::default());
        let err = engine.run().unwrap_err();

        assert!(matches!(err, RoiError::InvalidConfiguration { .. }));
        assert!(engine.sink.written.lock().unwrap().is_empty());
    }
}
