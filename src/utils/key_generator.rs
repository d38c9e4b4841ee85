//! Public key and secret key generation.
//!
//! Keys are drawn from the operating system CSPRNG and encoded as URL-safe
//! base64 without padding, so they are never sequential and never need escaping
//! in a path segment.

use base64::Engine as _;

/// Random bytes behind a public key (encodes to 7 characters).
const KEY_LENGTH_BYTES: usize = 5;

/// Random bytes behind the secret suffix (encodes to 11 characters).
const SECRET_LENGTH_BYTES: usize = 8;

/// Joins the public key and the secret suffix in a secret key.
pub const SECRET_KEY_SEPARATOR: char = '_';

/// Generates a short public key.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_key() -> String {
    random_token::<KEY_LENGTH_BYTES>()
}

/// Derives a secret key for `key`: the key, the separator, and a longer
/// random token.
///
/// The suffix is independent of `key`, so the secret cannot be guessed from
/// the public key while staying traceable to it by prefix.
///
/// ```ignore
/// let key = generate_key();
/// let secret = generate_secret_key(&key);
/// assert!(secret.starts_with(&format!("{key}_")));
/// ```
pub fn generate_secret_key(key: &str) -> String {
    let suffix = random_token::<SECRET_LENGTH_BYTES>();

    let mut secret = String::with_capacity(key.len() + 1 + suffix.len());
    secret.push_str(key);
    secret.push(SECRET_KEY_SEPARATOR);
    secret.push_str(&suffix);
    secret
}

fn random_token<const N: usize>() -> String {
    let mut buffer = [0u8; N];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}
