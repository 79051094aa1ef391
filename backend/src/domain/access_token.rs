//! Personal access tokens.
//!
//! Clients present the plaintext token as `Authorization: Bearer <token>`.
//! Only its SHA-256 digest is stored, so a leaked table cannot be replayed.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroize;

use super::ports::{AccessTokenRepository, CallerAuthenticator};
use super::{Caller, Error, UserId};

/// Length of generated plaintext tokens.
pub const TOKEN_LENGTH: usize = 40;

/// Hex-encoded SHA-256 digest of a plaintext token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenHash(String);

impl TokenHash {
    /// Digest `plaintext`.
    ///
    /// # Examples
    /// ```
    /// use office_listings::domain::TokenHash;
    ///
    /// let hash = TokenHash::of("secret");
    /// assert_eq!(hash.as_str().len(), 64);
    /// assert_eq!(hash, TokenHash::of("secret"));
    /// ```
    pub fn of(plaintext: &str) -> Self {
        Self(hex::encode(Sha256::digest(plaintext.as_bytes())))
    }

    /// Wrap a digest read back from storage.
    pub fn from_stored(hex_digest: impl Into<String>) -> Self {
        Self(hex_digest.into())
    }

    /// The hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A freshly generated plaintext token. The buffer is wiped on drop.
pub struct PlainToken(String);

impl PlainToken {
    /// Generate a random alphanumeric token.
    pub fn generate() -> Self {
        let token = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self(token)
    }

    /// The plaintext, to be shown to the token owner once.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Digest to store.
    pub fn hash(&self) -> TokenHash {
        TokenHash::of(&self.0)
    }
}

impl fmt::Debug for PlainToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainToken(..)")
    }
}

impl Drop for PlainToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A stored token as needed for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenRecord {
    /// Token owner.
    pub user_id: UserId,
    /// Granted abilities; `*` grants all.
    pub abilities: Vec<String>,
}

/// A token about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessToken {
    /// Token owner.
    pub user_id: UserId,
    /// Label chosen by the issuer, such as a device name.
    pub name: String,
    /// Digest of the plaintext.
    pub hash: TokenHash,
    /// Granted abilities.
    pub abilities: Vec<String>,
}

/// [`CallerAuthenticator`] backed by hashed token storage.
#[derive(Clone)]
pub struct AccessTokenAuthenticator {
    tokens: Arc<dyn AccessTokenRepository>,
}

impl AccessTokenAuthenticator {
    /// Build the authenticator over `tokens`.
    pub fn new(tokens: Arc<dyn AccessTokenRepository>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl CallerAuthenticator for AccessTokenAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Caller, Error> {
        let hash = TokenHash::of(token);
        match self.tokens.find_by_hash(&hash).await? {
            Some(record) => {
                debug!(user_id = %record.user_id, "access token accepted");
                Ok(Caller::new(record.user_id, record.abilities))
            }
            None => Err(Error::unauthorized("invalid access token")),
        }
    }
}
