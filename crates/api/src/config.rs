use std::path::PathBuf;

/// When the administrative notification is attempted relative to the
/// HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Respond 201 immediately after persistence, then attempt the email
    /// on a detached task. Its outcome is only logged.
    Detached,
    /// Attempt the email before responding, bounded by the SMTP timeout.
    /// Success responds 200, failure responds 201 with a degraded-outcome
    /// message.
    Sync,
}

impl NotifyPolicy {
    /// Parse a `NOTIFY_POLICY` value. `None` (unset) means detached.
    ///
    /// Panics on an unknown value, which is the desired behaviour -- we
    /// want misconfiguration to fail fast at startup.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("detached") => Self::Detached,
            Some("sync") => Self::Sync,
            Some(other) => panic!("NOTIFY_POLICY must be 'detached' or 'sync', got '{other}'"),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory receiving uploaded documents, served at `/uploads`.
    pub upload_dir: PathBuf,
    /// Notification timing policy (default: detached).
    pub notify_policy: NotifyPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `public/uploads`           |
    /// | `NOTIFY_POLICY`        | `detached`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into()),
        );

        let notify_policy = NotifyPolicy::parse(std::env::var("NOTIFY_POLICY").ok().as_deref());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            notify_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_policy_defaults_to_detached() {
        assert_eq!(NotifyPolicy::parse(None), NotifyPolicy::Detached);
        assert_eq!(NotifyPolicy::parse(Some("detached")), NotifyPolicy::Detached);
    }

    #[test]
    fn notify_policy_parses_sync() {
        assert_eq!(NotifyPolicy::parse(Some("sync")), NotifyPolicy::Sync);
    }

    #[test]
    #[should_panic(expected = "NOTIFY_POLICY")]
    fn notify_policy_rejects_unknown_values() {
        NotifyPolicy::parse(Some("eventually"));
    }
}
