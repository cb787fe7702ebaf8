//! Environment-driven configuration for the matmul benchmark report.
//!
//! Every config type reads variables named `MATMUL_<PREFIX>_<FIELD>`, after an
//! optional `.env` file from the working directory has been loaded.

use std::path::Path;

use serde::de::DeserializeOwned;

mod error;

pub mod report;

pub use error::Error;
pub use report::{ReportConfig, SurfaceKind};

const CONFIG_ENV_PREFIX: &str = "MATMUL";

/// Only the working directory is searched, never its ancestors.
fn config_env_path() -> &'static Path {
    Path::new(".env")
}

pub trait Config: DeserializeOwned {
    const PREFIX: &'static str;

    /// Values used when the environment doesn't set a key.
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[];

    fn from_env() -> Result<Self, Error> {
        let prefix = format!("{}_{}", CONFIG_ENV_PREFIX, Self::PREFIX);

        // a missing .env file is fine, a malformed one is not.
        if let Err(err) = dotenvy::from_path(config_env_path()) {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let mut builder = config::Config::builder();
        for (key, value) in Self::DEFAULTS {
            builder = builder.set_default(*key, *value)?;
        }

        Ok(builder
            .add_source(
                config::Environment::with_prefix(&prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use serial_test::serial;

    use super::*;

    const SURFACE_VAR: &str = "MATMUL_REPORT_SURFACE";

    /// Run `f` with `dir` as the working directory.
    fn in_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
        let previous: PathBuf = env::current_dir().unwrap();
        env::set_current_dir(dir).unwrap();
        let out = f();
        env::set_current_dir(previous).unwrap();
        out
    }

    #[test]
    #[serial]
    fn load_env_file_from_working_directory() {
        env::remove_var(SURFACE_VAR);
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), format!("{SURFACE_VAR}=headless\n")).unwrap();

        let config = in_dir(dir.path(), ReportConfig::from_env).unwrap();
        env::remove_var(SURFACE_VAR);

        assert_eq!(config.surface, SurfaceKind::Headless);
    }

    #[test]
    #[serial]
    fn ignore_env_file_in_parent_directory() {
        env::remove_var(SURFACE_VAR);
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), format!("{SURFACE_VAR}=headless\n")).unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();

        let config = in_dir(&nested, ReportConfig::from_env).unwrap();
        env::remove_var(SURFACE_VAR);

        assert_eq!(config.surface, SurfaceKind::Browser);
    }

    #[test]
    #[serial]
    fn reject_malformed_env_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "MATMUL_REPORT_SURFACE='headless\n").unwrap();

        let result = in_dir(dir.path(), ReportConfig::from_env);
        env::remove_var(SURFACE_VAR);

        assert!(matches!(result, Err(Error::DotEnv(_))));
    }
}
