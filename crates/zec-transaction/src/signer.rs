//! Signing contract for sighash digests.

use zec_primitives::ec::PrivateKey;

use crate::TransactionError;

/// Produces DER signatures over 32-byte sighash digests.
///
/// The returned signature must not include the sighash-type byte; the
/// engine appends it when assembling unlocking scripts.
pub trait SighashSigner {
    fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>, TransactionError>;
}

impl SighashSigner for PrivateKey {
    fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>, TransactionError> {
        Ok(PrivateKey::sign_digest(self, digest)?)
    }
}

/// Sign every digest in order.
pub fn sign_sighashes<S: SighashSigner + ?Sized>(
    sighashes: &[[u8; 32]],
    signer: &S,
) -> Result<Vec<Vec<u8>>, TransactionError> {
    sighashes.iter().map(|h| signer.sign_digest(h)).collect()
}
