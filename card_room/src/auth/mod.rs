//! Connection authentication.
//!
//! Clients present a signed bearer token when they connect. The
//! [`TokenVerifier`] checks it and resolves it to an [`Identity`], whose id
//! becomes the seat id at a table.
//!
//! ## Example
//!
//! ```
//! use card_room::auth::{Identity, TokenVerifier};
//! use chrono::Duration;
//!
//! let verifier = TokenVerifier::new("jwt_secret");
//! let identity = Identity::new("uid-1", "Player One");
//! let token = verifier.issue(&identity, Duration::minutes(15)).unwrap();
//! assert_eq!(verifier.verify(&token).unwrap(), identity);
//! ```

pub mod errors;
pub mod models;
pub mod verifier;

pub use errors::{AuthError, AuthResult};
pub use models::{Identity, TokenClaims};
pub use verifier::TokenVerifier;
