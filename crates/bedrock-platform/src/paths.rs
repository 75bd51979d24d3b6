use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

const APP_DIR: &str = "bedrock-tracker";

/// Points settings and logs at a single directory instead of the per-user
/// platform locations, e.g. for a cron job or a container volume.
const HOME_ENV: &str = "BEDROCK_TRACKER_HOME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Resolve where the tracker keeps its settings and log file.
    ///
    /// `BEDROCK_TRACKER_HOME` wins when set; otherwise the per-user platform
    /// directories are used.
    ///
    /// # Errors
    /// Returns an error when no override is set and the user's home, config or
    /// data directory cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        Self::resolve(std::env::var_os(HOME_ENV))
    }

    fn resolve(home_override: Option<OsString>) -> Result<Self, AppPathsError> {
        match home_override {
            Some(root) if !root.is_empty() => Ok(Self::from_root(root)),
            _ => Self::platform(),
        }
    }

    /// Keep settings at the top of `root` and logs under `root/logs`.
    #[must_use]
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("logs"),
            config_dir: root,
        }
    }

    fn platform() -> Result<Self, AppPathsError> {
        #[cfg(target_os = "macos")]
        {
            let home = dirs::home_dir().ok_or(AppPathsError::HomeDirUnavailable)?;
            let base = home.join("Library/Application Support").join(APP_DIR);
            Ok(Self {
                config_dir: base.clone(),
                data_dir: base,
            })
        }

        #[cfg(not(target_os = "macos"))]
        {
            Ok(Self {
                config_dir: dirs::config_dir()
                    .ok_or(AppPathsError::ConfigDirUnavailable)?
                    .join(APP_DIR),
                data_dir: dirs::data_dir()
                    .ok_or(AppPathsError::DataDirUnavailable)?
                    .join(APP_DIR),
            })
        }
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("tracker.log")
    }

    /// Create the settings and log directories if they are missing.
    ///
    /// # Errors
    /// Returns an error if either directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::Path;

    use super::AppPaths;

    #[test]
    fn override_root_holds_settings_and_logs() {
        let paths = AppPaths::resolve(Some(OsString::from("/srv/bedrock")))
            .expect("override should always resolve");

        assert_eq!(paths.settings_file(), Path::new("/srv/bedrock/settings.json"));
        assert_eq!(paths.log_file(), Path::new("/srv/bedrock/logs/tracker.log"));
    }

    #[test]
    fn empty_override_uses_platform_directories() {
        let resolved = AppPaths::resolve(Some(OsString::new()));

        if let Ok(paths) = resolved {
            assert!(paths.config_dir.ends_with("bedrock-tracker"));
            assert!(
                paths
                    .log_file()
                    .ends_with(Path::new("bedrock-tracker").join("tracker.log"))
            );
        }
    }

    #[test]
    fn ensure_dirs_creates_settings_and_log_directories() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let paths = AppPaths::from_root(temp_dir.path().join("tracker"));

        paths
            .ensure_dirs()
            .expect("ensure_dirs should create application directories");

        assert!(paths.config_dir.is_dir());
        assert!(paths.data_dir.is_dir());
        assert!(paths.log_file().parent().is_some_and(Path::is_dir));
    }
}
