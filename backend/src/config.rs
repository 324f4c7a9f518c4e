//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `COURSES_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::CourseContentConfig;
use crate::domain::course_content::DEFAULT_MAX_SAVE_ATTEMPTS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

/// Raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr { value: String, message: String },
    #[error("course cache TTL must be positive")]
    ZeroCourseTtl,
}

/// Runtime configuration for the course content server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSES")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the server runs on fixtures.
    pub database_url: Option<String>,
    /// Maximum connections in the PostgreSQL pool.
    pub db_pool_size: Option<u32>,
    /// Redis connection string. Without it caching is disabled.
    pub redis_url: Option<String>,
    /// Maximum connections in the Redis pool.
    pub redis_pool_size: Option<u32>,
    /// Mail relay endpoint receiving templated messages.
    pub mail_relay_url: Option<String>,
    /// Request timeout for the mail relay.
    pub mail_timeout_secs: Option<u64>,
    /// Expiry of single-course preview snapshots.
    #[ortho_config(default = 604_800)]
    pub course_cache_ttl_secs: u64,
    /// Expiry of the catalogue snapshot. Unset keeps it until invalidated.
    pub catalogue_cache_ttl_secs: Option<u64>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Generate a throwaway session key when the key file is missing.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Set the `Secure` attribute on the session cookie. Unset means secure.
    pub cookie_secure: Option<bool>,
}

impl AppSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether session cookies carry `Secure`; only an explicit `false`
    /// turns it off.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn mail_timeout(&self) -> Duration {
        Duration::from_secs(self.mail_timeout_secs.unwrap_or(DEFAULT_MAIL_TIMEOUT_SECS))
    }

    /// Service tunables derived from the cache settings.
    pub fn course_content_config(&self) -> Result<CourseContentConfig, SettingsError> {
        if self.course_cache_ttl_secs == 0 {
            return Err(SettingsError::ZeroCourseTtl);
        }
        Ok(CourseContentConfig {
            course_ttl: Duration::from_secs(self.course_cache_ttl_secs),
            catalogue_ttl: self
                .catalogue_cache_ttl_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            max_save_attempts: DEFAULT_MAX_SAVE_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const ENV_KEYS: [&str; 6] = [
        "COURSES_BIND_ADDR",
        "COURSES_DATABASE_URL",
        "COURSES_REDIS_URL",
        "COURSES_COURSE_CACHE_TTL_SECS",
        "COURSES_CATALOGUE_CACHE_TTL_SECS",
        "COURSES_COOKIE_SECURE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("course-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(ENV_KEYS.map(|key| (key, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket addr")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.cookie_secure.is_none());
        assert!(settings.cookie_secure());
        let config = settings.course_content_config().expect("valid config");
        assert_eq!(config, CourseContentConfig::default());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COURSES_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "COURSES_DATABASE_URL",
                Some("postgres://localhost/courses".to_owned()),
            ),
            ("COURSES_REDIS_URL", Some("redis://localhost".to_owned())),
            ("COURSES_COURSE_CACHE_TTL_SECS", Some("60".to_owned())),
            ("COURSES_CATALOGUE_CACHE_TTL_SECS", Some("30".to_owned())),
            ("COURSES_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/courses")
        );
        assert!(!settings.cookie_secure());
        let config = settings.course_content_config().expect("valid config");
        assert_eq!(config.course_ttl, Duration::from_secs(60));
        assert_eq!(config.catalogue_ttl, Some(Duration::from_secs(30)));
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn session_cookie_is_secure_unless_disabled(
        #[case] flag: Option<bool>,
        #[case] expected: bool,
    ) {
        let _guard = lock_env([("COURSES_COOKIE_SECURE", flag.map(|value| value.to_string()))]);

        let settings = load_from_empty_args();
        assert_eq!(settings.cookie_secure(), expected);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env([("COURSES_BIND_ADDR", Some("localhost".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }

    #[rstest]
    fn zero_course_ttl_is_rejected() {
        let _guard = lock_env([("COURSES_COURSE_CACHE_TTL_SECS", Some("0".to_owned()))]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.course_content_config(),
            Err(SettingsError::ZeroCourseTtl)
        );
    }
}
