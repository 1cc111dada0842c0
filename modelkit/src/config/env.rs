use std::path::Path;

/// Load `.env` files from `project_root`
///
/// Files are read most specific first and `dotenvy` never overwrites a
/// variable that is already set, so the effective precedence is:
///
/// 1. real environment variables
/// 2. `.env.{APP_ENV}.local`
/// 3. `.env.{APP_ENV}`
/// 4. `.env.local`
/// 5. `.env`
///
/// Missing files are skipped. Returns the value of `APP_ENV` (default `local`).
pub fn load_dotenv(project_root: &Path) -> String {
    let app_env = env("APP_ENV", "local".to_string());

    let files = [
        format!(".env.{}.local", app_env),
        format!(".env.{}", app_env),
        ".env.local".to_string(),
        ".env".to_string(),
    ];

    for file in files {
        let path = project_root.join(&file);
        if dotenvy::from_path(&path).is_ok() {
            tracing::debug!(path = %path.display(), "loaded env file");
        }
    }

    app_env
}

/// Get an environment variable, falling back to `default` when it is unset
/// or does not parse
///
/// # Example
/// ```
/// use modelkit::config::env;
///
/// let max: u32 = env("DB_MAX_CONNECTIONS", 10);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_optional(key).unwrap_or(default)
}

/// Get an environment variable if it is set and parses
///
/// # Example
/// ```
/// use modelkit::config::env_optional;
///
/// let timeout: Option<u64> = env_optional("DB_CONNECT_TIMEOUT");
/// ```
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
