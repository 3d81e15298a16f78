//! Authentication adapters.
//!
//! - `jwt` - HS256 implementation of the `TokenCodec` port
//! - `google` - Google ID token implementation of `IdentityVerifier`
//! - `static_verifier` - Table-driven `IdentityVerifier` for tests and local runs

mod google;
mod jwt;
mod static_verifier;

pub use google::{GoogleIdentityVerifier, GoogleVerifierConfig};
pub use jwt::JwtTokenCodec;
pub use static_verifier::StaticIdentityVerifier;
