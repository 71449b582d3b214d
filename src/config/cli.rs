use crate::core::ReportSink;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ReportSink for LocalStorage {
    fn write_report(&self, file_name: &str, content: &str) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(file_name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, content)?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}

/// 沒有指定輸出路徑時直接印到 stdout
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn write_report(&self, _file_name: &str, content: &str) -> Result<String> {
        print!("{}", content);
        Ok("stdout".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("reports");
        let storage = LocalStorage::new(base.to_string_lossy().into_owned());

        let location = storage.write_report("roi_report.csv", "period\n").unwrap();

        assert!(location.ends_with("roi_report.csv"));
        assert_eq!(std::fs::read_to_string(base.join("roi_report.csv")).unwrap(), "period\n");
    }
}
