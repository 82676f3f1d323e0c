//! Session cookie configuration.
//!
//! Settings come from the process environment (read through
//! [`mockable::Env`] so tests can inject values). Debug builds fall back to
//! permissive defaults with a warning; release builds reject anything
//! missing or malformed.

use std::path::PathBuf;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const SESSION_COOKIE_NAME: &str = "session";
/// Lifetime of a signed-in session.
pub const SESSION_TTL_HOURS: i64 = 2;

const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or invalid values fall back to defaults.
    Debug,
    /// Every value must be present and valid.
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

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Build the session middleware: private cookies, `HttpOnly`, and a
    /// persistent TTL of [`SESSION_TTL_HOURS`].
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .cookie_content_security(CookieContentSecurity::Private)
            .session_lifecycle(
                PersistentSession::default().session_ttl(Duration::hours(SESSION_TTL_HOURS)),
            )
            .build()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but holds an invalid value.
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
    /// The key file is shorter than the release minimum.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without a secure cookie.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys are only for local development.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// One environment toggle and how to interpret it.
struct Toggle<T> {
    name: &'static str,
    expected: &'static str,
    debug_default: T,
    parse: fn(&str) -> Option<T>,
}

impl<T: Copy> Toggle<T> {
    fn read<E: Env>(&self, env: &E, mode: BuildMode) -> Result<T, SessionConfigError> {
        let Some(value) = env.string(self.name) else {
            if mode.is_debug() {
                warn!(name = self.name, "session toggle not set; using default");
                return Ok(self.debug_default);
            }
            return Err(SessionConfigError::MissingEnv { name: self.name });
        };
        match (self.parse)(&value) {
            Some(parsed) => Ok(parsed),
            None if mode.is_debug() => {
                warn!(name = self.name, value = %value, "invalid session toggle; using default");
                Ok(self.debug_default)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name: self.name,
                value,
                expected: self.expected,
            }),
        }
    }
}

const COOKIE_SECURE: Toggle<bool> = Toggle {
    name: COOKIE_SECURE_ENV,
    expected: BOOL_EXPECTED,
    debug_default: true,
    parse: parse_bool,
};

const SAME_SITE: Toggle<SameSite> = Toggle {
    name: SAMESITE_ENV,
    expected: SAMESITE_EXPECTED,
    debug_default: SameSite::Lax,
    parse: parse_same_site,
};

const ALLOW_EPHEMERAL: Toggle<bool> = Toggle {
    name: ALLOW_EPHEMERAL_ENV,
    expected: BOOL_EXPECTED,
    debug_default: false,
    parse: parse_bool,
};

/// Build session settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use qa_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
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
    let cookie_secure = COOKIE_SECURE.read(env, mode)?;
    let same_site = SAME_SITE.read(env, mode)?;
    if same_site == SameSite::None && !cookie_secure {
        if mode.is_debug() {
            warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
        } else {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
    }
    let allow_ephemeral = ALLOW_EPHEMERAL.read(env, mode)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
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
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key; sessions end on restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
