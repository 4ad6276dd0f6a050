use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment-based path configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvPaths {
    pub data_path: PathBuf,
    pub configuration_path: PathBuf,
}

impl EnvPaths {
    /// Load paths from environment variables with defaults
    pub fn load() -> Result<Self> {
        Self::load_with_base(None)
    }

    /// Load paths from environment variables, resolving relative paths
    /// against `base_dir` instead of the current directory
    pub fn load_with_base(base_dir: Option<PathBuf>) -> Result<Self> {
        let base = match base_dir {
            Some(base) => base,
            None => {
                let current_dir = env::current_dir()?;
                let env_file = current_dir.join(".env");
                if env_file.exists() {
                    dotenv::from_path(&env_file).ok();
                }
                current_dir
            }
        };

        Ok(Self {
            data_path: Self::get_path_from_env("DATA_PATH", "./data", &base),
            configuration_path: Self::get_path_from_env("CONFIGURATION_PATH", "./config", &base),
        })
    }

    fn get_path_from_env(var_name: &str, default: &str, base_dir: &Path) -> PathBuf {
        let path = PathBuf::from(env::var(var_name).unwrap_or_else(|_| default.to_string()));

        if path.is_relative() {
            base_dir.join(path)
        } else {
            path
        }
    }

    /// Get the database path
    pub fn database_path(&self) -> PathBuf {
        self.data_path.join("content").join("portfolio.db")
    }

    /// Get the logs directory path
    pub fn logs_path(&self) -> PathBuf {
        self.data_path.join("logs")
    }

    /// Get the site configuration file path
    pub fn site_config_path(&self) -> PathBuf {
        self.configuration_path.join(SiteConfig::FILE_NAME)
    }
}

/// Get the current environment (dev, staging, production)
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .unwrap_or_else(|_| env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()))
}

/// Site-wide settings read from `site.yaml`
///
/// Every key is optional; absent keys keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Appended to page titles
    pub site_name: String,
    /// Featured posts shown on the home page
    pub featured_post_limit: usize,
    /// Certificates shown on the home page
    pub home_certificate_limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_email: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Portfolio".to_string(),
            featured_post_limit: 3,
            home_certificate_limit: 6,
            admin_email: None,
        }
    }
}

impl SiteConfig {
    pub const FILE_NAME: &'static str = "site.yaml";

    /// Load the site configuration from a configuration directory
    ///
    /// A missing or empty file yields the defaults.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let path = config_dir.join(Self::FILE_NAME);
        if !path.exists() {
            debug!("No site configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::from_yaml(&fs::read_to_string(&path)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests in this module share process environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_path_vars() {
        env::remove_var("DATA_PATH");
        env::remove_var("CONFIGURATION_PATH");
    }

    #[test]
    fn test_env_paths_with_base_dir() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_path_vars();

        let temp_dir = TempDir::new().unwrap();
        let base_path = temp_dir.path().to_path_buf();

        let paths = EnvPaths::load_with_base(Some(base_path.clone())).unwrap();

        assert_eq!(paths.data_path, base_path.join("data"));
        assert_eq!(paths.configuration_path, base_path.join("config"));
        assert_eq!(
            paths.database_path(),
            base_path.join("data/content/portfolio.db")
        );
        assert_eq!(paths.logs_path(), base_path.join("data/logs"));
        assert_eq!(paths.site_config_path(), base_path.join("config/site.yaml"));
    }

    #[test]
    fn test_env_paths_with_absolute_env_vars() {
        let _guard = ENV_MUTEX.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();

        env::set_var("DATA_PATH", temp_path.join("custom_data").to_str().unwrap());
        env::set_var(
            "CONFIGURATION_PATH",
            temp_path.join("custom_config").to_str().unwrap(),
        );

        let paths = EnvPaths::load_with_base(Some(PathBuf::from("/elsewhere"))).unwrap();

        assert_eq!(paths.data_path, temp_path.join("custom_data"));
        assert_eq!(paths.configuration_path, temp_path.join("custom_config"));

        clear_path_vars();
    }

    #[test]
    fn test_get_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();

        env::remove_var("ENVIRONMENT");
        env::remove_var("APP_ENV");
        assert_eq!(get_environment(), "dev");

        env::set_var("APP_ENV", "staging");
        assert_eq!(get_environment(), "staging");

        env::set_var("ENVIRONMENT", "production");
        assert_eq!(get_environment(), "production");

        env::remove_var("ENVIRONMENT");
        env::remove_var("APP_ENV");
    }

    #[test]
    fn test_site_config_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let config = SiteConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.featured_post_limit, 3);
        assert_eq!(config.home_certificate_limit, 6);
    }

    #[test]
    fn test_site_config_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("site.yaml"),
            "site_name: Jane Doe\nadmin_email: jane@example.com\n",
        )
        .unwrap();

        let config = SiteConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config.site_name, "Jane Doe");
        assert_eq!(config.admin_email.as_deref(), Some("jane@example.com"));
        assert_eq!(config.featured_post_limit, 3);
    }

    #[test]
    fn test_site_config_empty_and_invalid() {
        assert_eq!(SiteConfig::from_yaml("  \n").unwrap(), SiteConfig::default());
        assert!(SiteConfig::from_yaml("featured_post_limit: many").is_err());
    }
}
