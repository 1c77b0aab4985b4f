use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

const RANDOM_BYTES: usize = 24;
const PASSWORD_LENGTH: usize = 16;

/// Generate a replacement password for a reset.
///
/// Draws from the operating system CSPRNG, so the result has no relation to
/// the account it is generated for.
pub fn generate_password() -> String {
    let mut random_bytes = [0u8; RANDOM_BYTES];
    OsRng.fill_bytes(&mut random_bytes);

    let mut encoded = URL_SAFE_NO_PAD.encode(random_bytes);
    encoded.truncate(PASSWORD_LENGTH);
    encoded
}
