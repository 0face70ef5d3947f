use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;

/// A password reset token: `token` goes to the user, `hash` to the database.
pub struct ResetToken {
    pub token: String,
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

impl ResetToken {
    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string();
        let minutes = config::config().security.reset_token_expiry_minutes;
        Self {
            hash: hash_reset_token(&token),
            token,
            expires_at: Utc::now() + Duration::minutes(minutes),
        }
    }
}

pub fn hash_reset_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_matches_handed_out_token() {
        let reset = ResetToken::generate();
        assert_eq!(reset.token.len(), 32);
        assert_eq!(reset.hash.len(), 64);
        assert_eq!(hash_reset_token(&reset.token), reset.hash);
        assert!(reset.expires_at > Utc::now());
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(ResetToken::generate().token, ResetToken::generate().token);
    }
}
