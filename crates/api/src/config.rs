use std::path::PathBuf;

use careline_core::media::DEFAULT_MAX_UPLOAD_BYTES;

use crate::auth::jwt::JwtConfig;

/// A configuration variable that is missing or does not parse.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines (default).
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Where uploaded media lives on disk and how it is exposed.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory for stored files (default: `./uploads`).
    pub dir: PathBuf,
    /// URL prefix the directory is served under (default: `/uploads`).
    pub public_path: String,
    /// Largest accepted upload in bytes (default: 10 MiB).
    pub max_bytes: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background tasks (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub upload: UploadConfig,
    /// Add `Secure` to auth cookies (default: `false`; set in production).
    pub cookie_secure: bool,
    /// Expired-session cleanup period in seconds (default: `3600`).
    pub session_cleanup_interval_secs: u64,
    pub log_format: LogFormat,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                         | Default                 |
    /// |---------------------------------|-------------------------|
    /// | `HOST`                          | `0.0.0.0`               |
    /// | `PORT`                          | `3000`                  |
    /// | `CORS_ORIGINS`                  | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`          | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`         | `30`                    |
    /// | `UPLOAD_DIR`                    | `./uploads`             |
    /// | `UPLOAD_PUBLIC_PATH`            | `/uploads`              |
    /// | `MAX_UPLOAD_BYTES`              | `10485760`              |
    /// | `COOKIE_SECURE`                 | `false`                 |
    /// | `SESSION_CLEANUP_INTERVAL_SECS` | `3600`                  |
    /// | `LOG_FORMAT`                    | `pretty` (or `json`)    |
    ///
    /// JWT variables are documented on [`JwtConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30)?;

        let public_path = lookup("UPLOAD_PUBLIC_PATH").unwrap_or_else(|| "/uploads".into());
        if !public_path.starts_with('/') || public_path.len() < 2 {
            return Err(ConfigError::Invalid {
                var: "UPLOAD_PUBLIC_PATH",
                value: public_path,
                reason: "must be an absolute URL path such as /uploads".into(),
            });
        }
        let upload = UploadConfig {
            dir: PathBuf::from(lookup("UPLOAD_DIR").unwrap_or_else(|| "./uploads".into())),
            public_path: public_path.trim_end_matches('/').to_string(),
            max_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        };

        let cookie_secure = parse_or(&lookup, "COOKIE_SECURE", false)?;
        let session_cleanup_interval_secs =
            parse_or(&lookup, "SESSION_CLEANUP_INTERVAL_SECS", 3600)?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                    reason: "expected 'pretty' or 'json'".into(),
                })
            }
        };

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            upload,
            cookie_secure,
            session_cleanup_interval_secs,
            log_format,
            jwt,
        })
    }
}

/// Parse `var` if set, otherwise return `default`.
pub(crate) fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_with_only_secret() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.upload.public_path, "/uploads");
        assert_eq!(config.upload.max_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(!config.cookie_secure);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.jwt.access_token_expiry_mins, 15);
    }

    #[test]
    fn missing_secret_fails() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_matches!(err, ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn bad_port_fails() {
        let err =
            ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "x"), ("PORT", "http")])).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", .. });
    }

    #[test]
    fn overrides_are_applied() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "x"),
            ("CORS_ORIGINS", "https://a.org, https://b.org,"),
            ("UPLOAD_PUBLIC_PATH", "/media/"),
            ("COOKIE_SECURE", "true"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["https://a.org", "https://b.org"]);
        assert_eq!(config.upload.public_path, "/media");
        assert!(config.cookie_secure);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_fails() {
        let err = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "x"), ("LOG_FORMAT", "xml")]))
            .unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "LOG_FORMAT", .. });
    }
}
