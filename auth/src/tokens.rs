//! Opaque token generation.
//!
//! Session tokens and OAuth state values are random strings with no
//! embedded claims. The database row is the source of truth for who a
//! session token belongs to and when it expires.

use base64::Engine;
use rand::RngCore;

/// Generate a cryptographically secure random token.
///
/// Returns a 256-bit random token encoded as base64url (43 characters).
#[must_use]
pub fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let mut random_bytes = [0u8; 32];
    rng.fill_bytes(&mut random_bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes)
}
