use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Check a hex-encoded HMAC-SHA256 `signature` of `body`.
pub fn is_valid_signature(signature: &str, body: &[u8], secret: &str) -> bool {
    let Ok(decoded) = hex::decode(signature) else {
        return false;
    };

    match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mut hmac) => {
            hmac.update(body);
            hmac.verify_slice(&decoded).is_ok()
        }
        Err(_) => false,
    }
}

#[cfg(test)]
pub fn sign(body: &[u8], secret: &str) -> String {
    let mut hmac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    hmac.update(body);
    hex::encode(hmac.finalize().into_bytes())
}
