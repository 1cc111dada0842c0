use std::str::FromStr;
use std::sync::OnceLock;

use crate::config::env::env;

static FACADE_CONFIG: OnceLock<FacadeConfig> = OnceLock::new();

/// What `patch` does when the backend can only report a row count
///
/// Backends without `RETURNING` (MySQL, SQLite before 3.35) run the update
/// but cannot hand back the affected records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountOnly {
    /// Return an empty list
    Empty,
    /// Log a warning, then return an empty list
    #[default]
    Warn,
    /// Fail with `ModelError::ReturningUnsupported`
    Error,
}

impl FromStr for CountOnly {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown count-only policy '{}'", other)),
        }
    }
}

/// Process-wide facade defaults
///
/// # Environment Variables
///
/// - `MODELKIT_PATCH_COUNT_ONLY` - `empty`, `warn` or `error` (default: `warn`)
#[derive(Debug, Clone, Default)]
pub struct FacadeConfig {
    /// Default policy for `patch` on backends without `RETURNING`
    pub count_only: CountOnly,
}

impl FacadeConfig {
    /// Build config from environment variables
    pub fn from_env() -> Self {
        Self {
            count_only: env("MODELKIT_PATCH_COUNT_ONLY", CountOnly::default()),
        }
    }

    /// Install the process-wide config
    ///
    /// Only the first install (or the first `current()` call) takes effect.
    /// Returns false if a config was already in place.
    pub fn install(config: FacadeConfig) -> bool {
        FACADE_CONFIG.set(config).is_ok()
    }

    /// The installed config, read from the environment on first use
    pub fn current() -> &'static FacadeConfig {
        FACADE_CONFIG.get_or_init(Self::from_env)
    }
}
