use clap::Parser;
use roi_calc::core::ReportSink;
use roi_calc::utils::logger::{self, LogFormat};
use roi_calc::utils::validation::Validate;
use roi_calc::{CliConfig, LocalStorage, RoiEngine, StdoutSink};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    let log_format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(config.verbose, log_format);

    tracing::info!("Starting roi-calc");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證輸入範圍
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let exit_code = match config.output_path.clone() {
        Some(path) => run(config, LocalStorage::new(path)),
        None => run(config, StdoutSink),
    };

    if exit_code > 0 {
        std::process::exit(exit_code);
    }
}

fn run<K: ReportSink>(config: CliConfig, sink: K) -> i32 {
    let format = config.format;
    let engine = RoiEngine::new(config, sink).with_format(format);

    match engine.run() {
        Ok(outcome) => {
            if outcome.location != "stdout" {
                println!("✅ Report saved to: {}", outcome.location);
            }
            0
        }
        Err(e) => {
            tracing::error!("❌ ROI projection failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            e.exit_code()
        }
    }
}
