use std::{fmt, path::PathBuf};

use serde::Deserialize;

use super::Config;

pub const DEFAULT_DATA_PATH: &str = "performance_results.csv";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportConfig {
    /// Results table loaded at start, relative to the working directory.
    pub data_path: PathBuf,
    pub surface: SurfaceKind,
    /// max/min ratio above which a chart axis switches to log scale.
    pub log_ratio: f64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap_derive", derive(clap::ValueEnum))]
pub enum SurfaceKind {
    /// Open every chart in the default browser.
    Browser,
    /// Log charts instead of displaying them.
    Headless,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Browser => write!(f, "browser"),
            SurfaceKind::Headless => write!(f, "headless"),
        }
    }
}

impl Config for ReportConfig {
    const PREFIX: &'static str = "REPORT";

    const DEFAULTS: &'static [(&'static str, &'static str)] = &[
        ("data_path", DEFAULT_DATA_PATH),
        ("surface", "browser"),
        ("log_ratio", "10"),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 3] = [
        "MATMUL_REPORT_DATA_PATH",
        "MATMUL_REPORT_SURFACE",
        "MATMUL_REPORT_LOG_RATIO",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn read_defaults() {
        clear_env();

        let config = <ReportConfig as Config>::from_env().unwrap();
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.surface, SurfaceKind::Browser);
        assert_eq!(config.log_ratio, 10.0);
    }

    #[test]
    #[serial]
    fn read_config() {
        clear_env();
        std::env::set_var("MATMUL_REPORT_DATA_PATH", "/tmp/results.csv");
        std::env::set_var("MATMUL_REPORT_SURFACE", "headless");
        std::env::set_var("MATMUL_REPORT_LOG_RATIO", "100");

        let config = <ReportConfig as Config>::from_env().unwrap();
        clear_env();

        assert_eq!(config.data_path, PathBuf::from("/tmp/results.csv"));
        assert_eq!(config.surface, SurfaceKind::Headless);
        assert_eq!(config.log_ratio, 100.0);
    }

    #[test]
    #[serial]
    fn reject_unknown_surface() {
        clear_env();
        std::env::set_var("MATMUL_REPORT_SURFACE", "printer");

        let result = <ReportConfig as Config>::from_env();
        clear_env();

        assert!(matches!(result, Err(crate::Error::Config(_))));
    }
}
