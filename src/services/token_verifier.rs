use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AuthError;
use crate::models::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Trait for turning an opaque bearer credential into a stable user
/// identifier. The token format and signature scheme are the
/// implementation's business.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// HMAC-SHA256 signed bearer tokens of the form `user:expires:signature`,
/// where `expires` is a Unix timestamp and `signature` is the hex HMAC of
/// `user:expires`.
pub struct HmacTokenVerifier {
    secret: Vec<u8>,
    /// Token validity in seconds for minting (default: 1 hour).
    validity_secs: i64,
}

impl HmacTokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            validity_secs: 3600,
        }
    }

    /// Create a verifier with a random secret. Tokens minted against it do
    /// not survive a process restart.
    pub fn with_random_secret() -> Self {
        use rand::Rng;
        let secret: [u8; 32] = rand::thread_rng().gen();
        Self {
            secret: secret.to_vec(),
            validity_secs: 3600,
        }
    }

    pub fn with_validity_secs(mut self, validity_secs: i64) -> Self {
        self.validity_secs = validity_secs;
        self
    }

    /// Mint a token for a user, expiring `validity_secs` from now.
    pub fn mint(&self, user: &UserId) -> String {
        let expires = chrono::Utc::now().timestamp() + self.validity_secs;
        let signature = self.signature(user.as_str(), expires);
        format!("{user}:{expires}:{signature}")
    }

    fn signature(&self, user: &str, expires: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(format!("{user}:{expires}").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[async_trait]
impl TokenVerifier for HmacTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let (rest, signature) = token.rsplit_once(':').ok_or(AuthError::InvalidToken)?;
        let (user, expires) = rest.rsplit_once(':').ok_or(AuthError::InvalidToken)?;
        if user.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        let expires: i64 = expires.parse().map_err(|_| AuthError::InvalidToken)?;

        if chrono::Utc::now().timestamp() > expires {
            return Err(AuthError::ExpiredToken);
        }

        let signature = hex::decode(signature).map_err(|_| AuthError::InvalidToken)?;
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(format!("{user}:{expires}").as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(UserId::new(user))
    }
}
