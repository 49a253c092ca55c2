use super::HashFunction;
use sha2::{
    digest::{FixedOutputReset, Reset},
    Digest, Sha256, Sha512,
};

/// Adapts any RustCrypto digest to [`HashFunction`].
#[derive(Debug, Clone, Default)]
pub struct DigestHasher<D> {
    inner: D,
}

impl<D: Digest + FixedOutputReset> DigestHasher<D> {
    pub fn new() -> Self {
        Self { inner: D::new() }
    }
}

impl<D: Digest + FixedOutputReset> HashFunction for DigestHasher<D> {
    fn reset(&mut self) {
        Reset::reset(&mut self.inner);
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        // RustCrypto digests always absorb the whole buffer
        Digest::update(&mut self.inner, bytes);
        bytes.len()
    }

    fn finalize(&mut self) -> Vec<u8> {
        Digest::finalize_reset(&mut self.inner).to_vec()
    }
}

pub type Sha256Hasher = DigestHasher<Sha256>;
pub type Sha512Hasher = DigestHasher<Sha512>;

/// One-shot SHA-256 of `data`.
pub fn hash_sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}
