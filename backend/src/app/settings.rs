//! Runtime settings loaded via OrthoConfig.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{Error, PageLimits};
use crate::outbound::persistence::PoolConfig;

const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings for the `bookshelf` binary.
///
/// Values come from configuration files and `BOOKSHELF_*` environment
/// variables. Command-line arguments belong to the CLI and are not read
/// here.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKSHELF")]
pub struct AppSettings {
    /// PostgreSQL URL; the in-memory backend is used when absent.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Largest page a caller may request.
    pub max_page_size: Option<usize>,
    /// Page size used when a caller does not pick one.
    pub default_page_size: Option<usize>,
}

/// Settings could not be loaded or are inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading files or environment failed.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// A value was rejected.
    #[error("invalid settings: {0}")]
    Invalid(#[from] Error),
}

impl AppSettings {
    /// Load settings from files and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a source cannot be parsed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("bookshelf")])
            .map_err(|err| SettingsError::Load(err.to_string()))
    }

    /// Page limits, falling back to the built-in defaults per field.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] for a zero size.
    pub fn page_limits(&self) -> Result<PageLimits, SettingsError> {
        let defaults = PageLimits::default();
        Ok(PageLimits::new(
            self.default_page_size.unwrap_or(defaults.default_size()),
            self.max_page_size.unwrap_or(defaults.max_size()),
        )?)
    }

    /// Pool configuration when a database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().filter(|url| !url.trim().is_empty())?;
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "BOOKSHELF_DATABASE_URL",
        "BOOKSHELF_POOL_MAX_SIZE",
        "BOOKSHELF_MAX_PAGE_SIZE",
        "BOOKSHELF_DEFAULT_PAGE_SIZE",
    ];

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_select_memory_backend() {
        let _guard = lock_env(cleared());

        let settings = AppSettings::load().expect("settings should load");
        assert!(settings.pool_config().is_none());
        assert_eq!(settings.page_limits().expect("limits"), PageLimits::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "BOOKSHELF_DATABASE_URL",
                Some("postgres://shelf@localhost/catalogue".to_owned()),
            ),
            ("BOOKSHELF_POOL_MAX_SIZE", Some("4".to_owned())),
            ("BOOKSHELF_MAX_PAGE_SIZE", Some("50".to_owned())),
            ("BOOKSHELF_DEFAULT_PAGE_SIZE", Some("10".to_owned())),
        ]);

        let settings = AppSettings::load().expect("settings should load");
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://shelf@localhost/catalogue");
        let limits = settings.page_limits().expect("limits");
        assert_eq!((limits.default_size(), limits.max_size()), (10, 50));
    }

    #[rstest]
    #[case(Some(500), Some(50), 50)]
    #[case(None, Some(5), 5)]
    #[case(Some(7), None, 7)]
    fn default_page_size_never_exceeds_maximum(
        #[case] default_size: Option<usize>,
        #[case] max_size: Option<usize>,
        #[case] expected: usize,
    ) {
        let settings = AppSettings {
            default_page_size: default_size,
            max_page_size: max_size,
            ..AppSettings::default()
        };
        assert_eq!(settings.page_limits().expect("limits").default_size(), expected);
    }

    #[rstest]
    fn zero_maximum_is_rejected() {
        let settings = AppSettings {
            max_page_size: Some(0),
            ..AppSettings::default()
        };
        assert!(matches!(
            settings.page_limits(),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[rstest]
    fn blank_database_url_means_memory() {
        let settings = AppSettings {
            database_url: Some("  ".to_owned()),
            ..AppSettings::default()
        };
        assert!(settings.pool_config().is_none());
    }
}
