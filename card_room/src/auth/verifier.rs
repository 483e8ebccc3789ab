//! Bearer token verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::debug;

use super::{
    errors::{AuthError, AuthResult},
    models::{Identity, TokenClaims},
};

/// Verifies HS256 connection tokens signed with a shared secret.
pub struct TokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier").finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(jwt_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Verify a token and resolve it to an identity
    ///
    /// The display name falls back to the email address, then to the
    /// subject, when the token carries no name.
    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.sub.trim().is_empty() {
            return Err(AuthError::MissingIdentity);
        }
        debug!("verified token for {}", claims.sub);

        let display_name = claims
            .name
            .filter(|name| !name.trim().is_empty())
            .or(claims.email)
            .unwrap_or_else(|| claims.sub.clone());
        Ok(Identity {
            id: claims.sub.into(),
            display_name,
            avatar: claims.picture,
        })
    }

    /// Sign a token for an identity, valid for `ttl`
    pub fn issue(&self, identity: &Identity, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: identity.id.to_string(),
            name: Some(identity.display_name.clone()),
            email: None,
            picture: identity.avatar.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }
}
