//! Session context: bearer token storage and validation
//!
//! The session is an explicit value handed to [`super::ApiClient`]. Asking it
//! for authorization yields [`AuthState`]; an unusable token is reported as
//! [`AuthState::Unauthenticated`] and the caller decides what to do (the CLI
//! asks the user to run `login`).

use crate::config::{secret_string, SecretString};
use crate::domain::{AppError, Result, UnauthenticatedReason};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Persistent storage for the bearer token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, or `None` if there is none
    async fn load(&self) -> Result<Option<SecretString>>;

    async fn save(&self, token: &SecretString) -> Result<()>;

    /// Removes the stored token; a missing token is not an error
    async fn clear(&self) -> Result<()>;
}

/// Keeps the token in a file, created readable only by the owner on Unix
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn session_error(&self, action: &str, e: std::io::Error) -> AppError {
        AppError::Session(format!(
            "Failed to {action} session file {}: {e}",
            self.path.display()
        ))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<SecretString>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(secret_string(token.to_string())))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.session_error("read", e)),
        }
    }

    async fn save(&self, token: &SecretString) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::Session(format!(
                        "Failed to create session directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| self.session_error("open", e))?;

        // An existing file keeps its old mode through open()
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| self.session_error("protect", e))?;
        }

        file.write_all(token.expose_secret().as_ref().as_bytes())
            .await
            .map_err(|e| self.session_error("write", e))?;
        file.flush().await.map_err(|e| self.session_error("write", e))?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.session_error("remove", e)),
        }
    }
}

/// In-process token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(secret_string(token.into()))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<SecretString>>> {
        self.token
            .lock()
            .map_err(|_| AppError::Session("token store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<SecretString>> {
        Ok(self.lock()?.clone())
    }

    async fn save(&self, token: &SecretString) -> Result<()> {
        *self.lock()? = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}

/// Outcome of asking the session for a usable token
#[derive(Debug, Clone)]
pub enum AuthState {
    Authenticated(SecretString),
    Unauthenticated(UnauthenticatedReason),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Claims we read from the token; the signature is the server's concern
#[derive(Debug, Deserialize)]
struct TokenClaims {
    /// NumericDate: seconds, fractions allowed
    #[serde(default)]
    exp: Option<f64>,
}

/// Decodes a JWT without verifying its signature or registered claims
fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// Expiry of a token, if it carries a usable `exp` claim
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token)?.exp?;
    if !exp.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp(exp.floor() as i64, 0)
}

/// Shared session context
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Session backed by [`FileTokenStore`] at `path`
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileTokenStore::new(path)))
    }

    /// Session that starts empty and lives only in memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub async fn store_token(&self, token: &SecretString) -> Result<()> {
        self.store.save(token).await?;
        tracing::debug!("Session token stored");
        Ok(())
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.store.clear().await?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Checks the stored token against the current time
    pub async fn authorize(&self) -> Result<AuthState> {
        self.authorize_at(Utc::now()).await
    }

    /// Checks the stored token against `now`
    ///
    /// Expired and undecodable tokens are removed from the store. A token
    /// without `exp` never expires on the client side.
    pub async fn authorize_at(&self, now: DateTime<Utc>) -> Result<AuthState> {
        let Some(token) = self.store.load().await? else {
            return Ok(AuthState::Unauthenticated(UnauthenticatedReason::Missing));
        };

        let Some(claims) = decode_claims(token.expose_secret().as_ref()) else {
            tracing::warn!("Stored session token could not be decoded; clearing it");
            self.store.clear().await?;
            return Ok(AuthState::Unauthenticated(UnauthenticatedReason::Invalid));
        };

        if let Some(exp) = claims.exp {
            if exp < now.timestamp() as f64 {
                tracing::warn!(expired_at = exp, "Session expired; clearing token");
                self.store.clear().await?;
                return Ok(AuthState::Unauthenticated(UnauthenticatedReason::Expired));
            }
        }

        Ok(AuthState::Authenticated(token))
    }
}
