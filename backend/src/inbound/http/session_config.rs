//! Session configuration parsing and validation.
//!
//! Cookie sessions carry the signed-in shopper, so their key and cookie
//! attributes are read from `STOREFRONT_SESSION_*` variables and validated
//! here. Debug builds fall back to permissive defaults with a warning; release
//! builds refuse to start on anything missing or malformed.

mod parsing;

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

use parsing::{FLAG_EXPECTED, SAME_SITE_EXPECTED, parse_flag, parse_same_site};

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/storefront_session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "STOREFRONT_SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "STOREFRONT_SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "STOREFRONT_SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "STOREFRONT_SESSION_KEY_FILE";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use storefront::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Session settings derived from configuration toggles.
pub struct SessionSettings {
    /// Signing key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("{SAMESITE_ENV}=None requires {COOKIE_SECURE_ENV}=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("{ALLOW_EPHEMERAL_ENV} must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use storefront::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("storefront_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_string_lossy().into_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "STOREFRONT_SESSION_KEY_FILE" => Some(key_path.clone()),
///     "STOREFRONT_SESSION_COOKIE_SECURE" => Some("1".to_string()),
///     "STOREFRONT_SESSION_SAMESITE" => Some("Strict".to_string()),
///     "STOREFRONT_SESSION_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let source = SessionEnv { env, mode };
    let cookie_secure = source.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = source.same_site(cookie_secure)?;
    let allow_ephemeral = source.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = source.key(allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Environment view that applies the build mode's tolerance.
struct SessionEnv<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> SessionEnv<'_, E> {
    /// Debug builds log `problem` and carry on with `fallback`; release
    /// builds fail with it.
    fn tolerate<T>(&self, fallback: T, problem: SessionConfigError) -> Result<T, SessionConfigError> {
        if self.mode.is_debug() {
            warn!(%problem, "session setting defaulted in debug build");
            Ok(fallback)
        } else {
            Err(problem)
        }
    }

    fn flag(&self, name: &'static str, debug_default: bool) -> Result<bool, SessionConfigError> {
        let Some(raw) = self.env.string(name) else {
            return self.tolerate(debug_default, SessionConfigError::MissingEnv { name });
        };
        match parse_flag(&raw) {
            Some(flag) => Ok(flag),
            None => self.tolerate(
                debug_default,
                SessionConfigError::InvalidEnv {
                    name,
                    value: raw,
                    expected: FLAG_EXPECTED,
                },
            ),
        }
    }

    fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let default = if self.mode.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let Some(raw) = self.env.string(SAMESITE_ENV) else {
            return self.tolerate(default, SessionConfigError::MissingEnv { name: SAMESITE_ENV });
        };
        match parse_same_site(&raw) {
            Some(SameSite::None) if !cookie_secure => {
                self.tolerate(SameSite::None, SessionConfigError::InsecureSameSiteNone)
            }
            Some(policy) => Ok(policy),
            None => self.tolerate(
                default,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value: raw,
                    expected: SAME_SITE_EXPECTED,
                },
            ),
        }
    }

    fn key(&self, allow_ephemeral: bool) -> Result<Key, SessionConfigError> {
        let path = self
            .env
            .string(KEY_FILE_ENV)
            .map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), PathBuf::from);

        let mut bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(error) if self.mode.is_debug() || allow_ephemeral => {
                warn!(path = %path.display(), %error, "using temporary session key (dev only)");
                return Ok(Key::generate());
            }
            Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
        };

        let length = bytes.len();
        let key = if length < SESSION_KEY_MIN_LEN {
            let problem = SessionConfigError::KeyTooShort {
                path,
                length,
                min_len: SESSION_KEY_MIN_LEN,
            };
            self.tolerate((), problem).map(|()| Key::generate())
        } else {
            Ok(Key::derive_from(&bytes))
        };
        bytes.zeroize();
        key
    }
}

#[cfg(test)]
mod tests;
