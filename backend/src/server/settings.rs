//! Process settings loaded via OrthoConfig.
//!
//! Every field can come from a CLI flag (`--database-url`), a `COMPANION_*`
//! environment variable, or a configuration file. Session-key handling
//! follows the build mode: debug builds fall back to an ephemeral key,
//! release builds refuse to start without a sufficiently long key file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this length.
const DERIVE_MIN_LEN: usize = 32;

/// Build mode for session key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing keys are replaced by a random one.
    Debug,
    /// Keys must exist and be at least 64 bytes.
    Release,
}

impl BuildMode {
    /// Derive the mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while turning settings into server inputs.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid same_site '{value}'; expected Strict|Lax|None")]
    SameSite { value: String },
    #[error("same_site=None requires cookie_secure=true")]
    InsecureSameSiteNone,
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("session_allow_ephemeral must be false in release builds")]
    EphemeralNotAllowed,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPANION")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a random session key when the key file is missing.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// `SameSite` policy for the session cookie.
    pub same_site: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Cookie `SameSite` policy; Lax unless configured.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        let Some(value) = self.same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if self.cookie_secure => Ok(SameSite::None),
            "none" => Err(SettingsError::InsecureSameSiteNone),
            _ => Err(SettingsError::SameSite {
                value: value.to_owned(),
            }),
        }
    }

    /// Read and derive the session key.
    pub fn session_key(&self, mode: BuildMode) -> Result<Key, SettingsError> {
        if mode == BuildMode::Release && self.session_allow_ephemeral {
            return Err(SettingsError::EphemeralNotAllowed);
        }
        let path = self.session_key_file();
        let min_len = match mode {
            BuildMode::Debug => DERIVE_MIN_LEN,
            BuildMode::Release => SESSION_KEY_MIN_LEN,
        };
        match std::fs::read(path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < min_len {
                    bytes.zeroize();
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_path_buf(),
                        length,
                        min_len,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(error) if mode == BuildMode::Debug || self.session_allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
