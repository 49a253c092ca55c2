/// A stateful hash primitive that is reused across many independent digest
/// computations.
///
/// Every computation driven by the tree builder starts with [`reset`], so the
/// digests it produces never depend on what the instance hashed before.
///
/// [`reset`]: HashFunction::reset
pub trait HashFunction {
    /// Drop any accumulated input.
    fn reset(&mut self);

    /// Feed `bytes` into the primitive and return how many of them were consumed.
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Produce the fixed-size digest of everything written since the last reset.
    fn finalize(&mut self) -> Vec<u8>;
}

pub mod sha256;
