use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    /// 給日誌收集器使用
    Json,
}

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "roi_calc=debug,info"
    } else {
        "roi_calc=info"
    }
}

/// 日誌一律寫到 stderr，stdout 留給報表。`RUST_LOG` 優先於預設過濾條件。
pub fn init_logger(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "roi_calc=info");
        assert_eq!(default_directive(true), "roi_calc=debug,info");
        assert_eq!(LogFormat::default(), LogFormat::Compact);
    }
}
