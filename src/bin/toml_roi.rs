use anyhow::Context;
use clap::Parser;
use roi_calc::core::{ReportSink, ScenarioSource};
use roi_calc::utils::logger::{self, LogFormat};
use roi_calc::utils::validation::Validate;
use roi_calc::{LocalStorage, OutputFormat, RoiEngine, RoiError, StdoutSink, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-roi")]
#[command(about = "ROI projection driven by a TOML scenario file")]
struct Args {
    /// Path to TOML scenario file
    #[arg(short, long, default_value = "roi-scenario.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override output format from config
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Override output directory from config
    #[arg(long)]
    output_path: Option<String>,

    /// Show the scenario without computing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, LogFormat::Compact);

    tracing::info!("🚀 Starting TOML-based ROI projection");
    tracing::info!("📁 Loading scenario from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load scenario file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Scenario loaded and validated successfully");

    let format = args.format.unwrap_or_else(|| config.output_format());
    let output_path = args
        .output_path
        .clone()
        .or_else(|| config.output_path().map(str::to_string));

    display_config_summary(&config, format, output_path.as_deref());

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No projection will be computed");
        return Ok(());
    }

    let result = match output_path {
        Some(path) => run(config, LocalStorage::new(path.clone()), format)
            .with_context(|| format!("writing report under '{}'", path)),
        None => run(config, StdoutSink, format).context("printing report"),
    };

    if let Err(e) = result {
        let exit_code = e
            .downcast_ref::<RoiError>()
            .map(RoiError::exit_code)
            .unwrap_or(2);
        tracing::error!("❌ ROI projection failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(exit_code);
    }

    Ok(())
}

fn run<K: ReportSink>(config: TomlConfig, sink: K, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = RoiEngine::new(config, sink).with_format(format).run()?;
    if outcome.location != "stdout" {
        println!("✅ Report saved to: {}", outcome.location);
    }
    Ok(())
}

fn display_config_summary(config: &TomlConfig, format: OutputFormat, output_path: Option<&str>) {
    // 摘要走 stderr，stdout 保留給報表內容
    eprintln!("📋 Scenario Summary:");
    eprintln!("  Name: {}", config.scenario.name);
    if let Some(description) = &config.scenario.description {
        eprintln!("  Description: {}", description);
    }
    eprintln!(
        "  Horizon: {} {}(s)",
        config.scenario.horizon_periods,
        config.period_label()
    );
    eprintln!("  Patients per period: {}", config.scenario.patients_per_period);
    eprintln!("  Hourly wage: {}", config.scenario.hourly_wage);
    eprintln!(
        "  Platform fee per period: {}",
        config.scenario.platform_fee_per_period.unwrap_or(0.0)
    );
    eprintln!("  Enabled modules: {}", config.enabled_module_names().join(", "));
    if config.recapture.is_some() {
        eprintln!("  Revenue recapture: enabled");
    }
    eprintln!("  Format: {:?}", format);
    eprintln!("  Output: {}", output_path.unwrap_or("stdout"));
    eprintln!();
}
