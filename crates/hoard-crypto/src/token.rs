use rand::rngs::OsRng;
use rand::RngCore;

/// 256 bits from the operating system's CSPRNG, hex-encoded.
///
/// Names staging artifacts only; never used as a content or pointer
/// identifier.
pub fn random_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let token = random_token();
        assert_eq!(token.len(), 64);
        assert!(hoard_types::is_valid(&token));
    }

    #[test]
    fn tokens_are_unique() {
        let a = random_token();
        let b = random_token();
        assert_ne!(a, b);
    }
}
