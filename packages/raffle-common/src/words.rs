use cosmwasm_std::Uint256;
use sha2::{Digest, Sha256};

/// Derive `num_words` deterministic 256-bit words for a request.
///
/// Word `i` is `sha256(be_bytes(request_id) || be_bytes(i))`. This is what
/// the mock coordinator delivers when no override words are supplied; tests
/// use the same function to predict its output.
pub fn derive_random_words(request_id: u64, num_words: u32) -> Vec<Uint256> {
    (0..num_words)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(request_id.to_be_bytes());
            hasher.update(i.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            Uint256::from_be_bytes(digest)
        })
        .collect()
}
