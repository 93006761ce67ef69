//! Session cookie configuration read from the environment.
//!
//! | Variable | Debug build | Release build |
//! |---|---|---|
//! | `SESSION_KEY_FILE` | falls back to a generated key | must name a file of at least 64 bytes |
//! | `SESSION_COOKIE_SECURE` | defaults to `true` with a warning | required |
//! | `SESSION_ALLOW_EPHEMERAL` | defaults to `false` | must be `0` if set |

use std::path::PathBuf;

use actix_web::cookie::Key;
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults are tolerated and logged.
    Debug,
    /// Every toggle must be explicit and valid.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    /// Signing and encryption key for the private session cookie.
    pub key: Key,
    /// Whether the cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

/// Errors raised while validating session configuration.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected 1|0|true|false|yes|no")]
    InvalidEnv { name: &'static str, value: String },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {SESSION_KEY_MIN_LEN} bytes, got {length}")]
    KeyTooShort { path: PathBuf, length: usize },
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from the environment.
///
/// # Examples
/// ```
/// use mockable::MockEnv;
/// use request_tracker::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = flag(env, COOKIE_SECURE_ENV, mode, true)?;
    let allow_ephemeral = flag(env, ALLOW_EPHEMERAL_ENV, mode, false)?;
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings { key, cookie_secure })
}

/// Read a boolean toggle; debug builds fall back to `debug_default`.
fn flag<E: Env>(
    env: &E,
    name: &'static str,
    mode: BuildMode,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode == BuildMode::Release {
            return Err(SessionConfigError::MissingEnv { name });
        }
        warn!(name, default = debug_default, "session toggle not set; using default");
        return Ok(debug_default);
    };
    match (parse_bool(&value), mode) {
        (Some(parsed), _) => Ok(parsed),
        (None, BuildMode::Release) => Err(SessionConfigError::InvalidEnv { name, value }),
        (None, BuildMode::Debug) => {
            warn!(name, %value, default = debug_default, "invalid session toggle; using default");
            Ok(debug_default)
        }
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if mode == BuildMode::Release && bytes.len() < SESSION_KEY_MIN_LEN {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length: bytes.len(),
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(source) if mode == BuildMode::Debug || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %source,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    fn release_env(key: &NamedTempFile, secure: &str) -> MockEnv {
        let path = key.path().to_str().expect("utf-8 path").to_owned();
        mock_env(&[
            (KEY_FILE_ENV, path.as_str()),
            (COOKIE_SECURE_ENV, secure),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ])
    }

    #[rstest]
    #[case("1", true)]
    #[case("false", false)]
    #[case(" YES ", true)]
    fn release_accepts_explicit_settings(#[case] secure: &str, #[case] expected: bool) {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let settings = session_settings_from_env(&release_env(&key, secure), BuildMode::Release)
            .expect("valid release settings");
        assert_eq!(settings.cookie_secure, expected);
    }

    #[rstest]
    fn release_requires_cookie_secure() {
        let err = session_settings_from_env(&mock_env(&[]), BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(
            err,
            SessionConfigError::MissingEnv {
                name: COOKIE_SECURE_ENV
            }
        ));
    }

    #[rstest]
    fn release_rejects_invalid_toggle() {
        let key = key_file(SESSION_KEY_MIN_LEN);
        let err = session_settings_from_env(&release_env(&key, "maybe"), BuildMode::Release)
            .err()
            .expect("invalid toggle");
        assert!(matches!(err, SessionConfigError::InvalidEnv { .. }));
    }

    #[rstest]
    fn release_rejects_short_keys() {
        let key = key_file(SESSION_KEY_MIN_LEN - 1);
        let err = session_settings_from_env(&release_env(&key, "1"), BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(
            err,
            SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
        ));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys() {
        let env = mock_env(&[(COOKIE_SECURE_ENV, "1"), (ALLOW_EPHEMERAL_ENV, "1")]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("ephemeral refused");
        assert!(matches!(err, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_requires_readable_key() {
        let env = mock_env(&[
            (KEY_FILE_ENV, "/nonexistent/session_key"),
            (COOKIE_SECURE_ENV, "1"),
            (ALLOW_EPHEMERAL_ENV, "0"),
        ]);
        let err = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("unreadable key");
        assert!(matches!(err, SessionConfigError::KeyRead { .. }));
    }

    #[rstest]
    fn debug_tolerates_missing_and_invalid_values() {
        let env = mock_env(&[
            (KEY_FILE_ENV, "/nonexistent/session_key"),
            (COOKIE_SECURE_ENV, "maybe"),
        ]);
        let settings =
            session_settings_from_env(&env, BuildMode::Debug).expect("debug falls back");
        assert!(settings.cookie_secure);
    }

    #[rstest]
    fn debug_accepts_short_keys() {
        let key = key_file(8);
        let settings = session_settings_from_env(&release_env(&key, "0"), BuildMode::Debug)
            .expect("short key allowed in debug");
        assert!(!settings.cookie_secure);
    }
}
