use subtle::ConstantTimeEq;

/// Fresh access key: 32 random bytes, hex-encoded (64 chars).
pub fn generate_key() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

/// Constant-time string comparison for shared secrets.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
