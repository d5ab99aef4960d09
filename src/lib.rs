//! A pure Rust implementation of the SHA-3 hash functions and SHAKE extendable-output functions
//! standardized in [FIPS 202](https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf).
//!
//! All six functions are one-shot: each call owns a private Keccak-f\[1600\] state which is
//! zeroized before the call returns.
//!
//! ```
//! let digest = fips202::sha3_256("abc");
//! assert_eq!(digest[..4], [0x3a, 0x98, 0x5d, 0xa7]);
//!
//! let output = fips202::shake128("abc", 64);
//! assert_eq!(output.len(), 64);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

use crate::keccak::KeccakF1600;
use crate::sponge::keccak_sponge;

pub mod keccak;
pub mod sponge;

mod fuzzing;

pub use crate::sponge::{DomainSuffix, Mode, ModeParameters};

pub trait Permutation<const WIDTH: usize>: Default {
    /// Returns an immutable pointer to the permutation's state.
    fn state(&self) -> &[u8; WIDTH];

    /// Returns a mutable pointer to the permutation's state.
    fn state_mut(&mut self) -> &mut [u8; WIDTH];

    /// Permutes the permutation's state.
    fn permute(&mut self);

    /// Adds the given byte to the permutation's state at the given offset.
    #[inline(always)]
    fn add_byte(&mut self, byte: u8, offset: usize) {
        self.state_mut()[offset] ^= byte;
    }

    /// Adds the given bytes to the beginning of the permutation's state.
    #[inline(always)]
    fn add_bytes(&mut self, bytes: &[u8]) {
        for (st_byte, byte) in self.state_mut().iter_mut().zip(bytes) {
            *st_byte ^= byte;
        }
    }

    /// Fills the given mutable slice with bytes from the permutation's state.
    #[inline(always)]
    fn extract_bytes(&mut self, out: &mut [u8]) {
        out.copy_from_slice(&self.state()[..out.len()]);
    }
}

/// The ways a hash request can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A fixed-digest mode was asked for an output of the wrong length.
    #[error("{mode} produces {expected}-byte digests, but {requested} bytes were requested")]
    OutputLength { mode: Mode, expected: usize, requested: usize },

    /// The output buffer could not be allocated.
    #[error("unable to allocate {requested} bytes of output")]
    Allocation { requested: usize },
}

#[inline(always)]
fn digest<const N: usize>(message: &[u8], params: &ModeParameters) -> [u8; N] {
    debug_assert_eq!(params.fixed_output_bytes(), Some(N));

    let mut out = [0u8; N];
    keccak_sponge::<KeccakF1600>(message, params, &mut out);
    out
}

/// SHA3-224: a 28-byte digest.
pub fn sha3_224(message: impl AsRef<[u8]>) -> [u8; 28] {
    digest(message.as_ref(), &sponge::SHA3_224)
}

/// SHA3-256: a 32-byte digest.
pub fn sha3_256(message: impl AsRef<[u8]>) -> [u8; 32] {
    digest(message.as_ref(), &sponge::SHA3_256)
}

/// SHA3-384: a 48-byte digest.
pub fn sha3_384(message: impl AsRef<[u8]>) -> [u8; 48] {
    digest(message.as_ref(), &sponge::SHA3_384)
}

/// SHA3-512: a 64-byte digest.
pub fn sha3_512(message: impl AsRef<[u8]>) -> [u8; 64] {
    digest(message.as_ref(), &sponge::SHA3_512)
}

/// SHAKE128, filling all of `out`.
pub fn shake128_into(message: impl AsRef<[u8]>, out: &mut [u8]) {
    keccak_sponge::<KeccakF1600>(message.as_ref(), &sponge::SHAKE128, out);
}

/// SHAKE256, filling all of `out`.
pub fn shake256_into(message: impl AsRef<[u8]>, out: &mut [u8]) {
    keccak_sponge::<KeccakF1600>(message.as_ref(), &sponge::SHAKE256, out);
}

/// SHAKE128 with `n` bytes of output.
#[cfg(feature = "std")]
pub fn shake128(message: impl AsRef<[u8]>, n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n];
    shake128_into(message, &mut out);
    out
}

/// SHAKE256 with `n` bytes of output.
#[cfg(feature = "std")]
pub fn shake256(message: impl AsRef<[u8]>, n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n];
    shake256_into(message, &mut out);
    out
}

/// Hashes `message` with `mode` into `out`.
///
/// Returns [`Error::OutputLength`] if `mode` has a fixed digest size which isn't `out.len()`.
pub fn hash_into(mode: Mode, message: impl AsRef<[u8]>, out: &mut [u8]) -> Result<(), Error> {
    sponge::sponge_hash_into(message.as_ref(), mode, out)
}

/// Hashes `message` with `mode`, returning `output_len` bytes.
///
/// Returns [`Error::OutputLength`] if `mode` has a fixed digest size which isn't `output_len`,
/// and [`Error::Allocation`] if the output can't be allocated.
#[cfg(feature = "std")]
pub fn hash(mode: Mode, message: impl AsRef<[u8]>, output_len: usize) -> Result<Vec<u8>, Error> {
    sponge::sponge_hash(message.as_ref(), mode, output_len)
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use sha3::digest::{ExtendableOutput, Update};
    use sha3::Digest;

    use super::*;

    #[test]
    fn empty_message_kats() {
        assert_eq!(
            hex::encode(sha3_224("")),
            "6b4e03423667dbb73b6e15454f0eb1abd4597f9a1b078e3f5b5a6bc7"
        );
        assert_eq!(
            hex::encode(sha3_256("")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(
            hex::encode(sha3_384("")),
            "0c63a75b845e4f7d01107d852e4c2485c51a50aaaa94fc61995e71bbee983a2a\
             c3713831264adb47fb6bd1e058d5f004"
        );
        assert_eq!(
            hex::encode(sha3_512("")),
            "a69f73cca23a9ac5c8b567dc185a756e97c982164fe25859e0d1dcc1475c80a6\
             15b2123af1f5f94c11e3e9402c3ac558f500199d95b6d3e301758586281dcd26"
        );
        assert_eq!(
            hex::encode(shake128("", 32)),
            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
        );
        assert_eq!(
            hex::encode(shake256("", 64)),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f\
             d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be"
        );
    }

    #[test]
    fn abc_kats() {
        assert_eq!(
            hex::encode(sha3_224("abc")),
            "e642824c3f8cf24ad09234ee7d3c766fc9a3a5168d0c94ad73b46fdf"
        );
        assert_eq!(
            hex::encode(sha3_256("abc")),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
        assert_eq!(
            hex::encode(sha3_384("abc")),
            "ec01498288516fc926459f58e2c6ad8df9b473cb0fc08c2596da7cf0e49be4b2\
             98d88cea927ac7f539f1edf228376d25"
        );
        assert_eq!(
            hex::encode(sha3_512("abc")),
            "b751850b1a57168a5693cd924b6b096e08f621827444f70d884f5d0240d2712e\
             10e116e9192af3c91a7ec57647e3934057340b4cf408d5a56592f8274eec53f0"
        );
        assert_eq!(
            hex::encode(shake128("abc", 32)),
            "5881092dd818bf5cf8a3ddb793fbcba74097d5c526a6d35f97b83351940f2cc8"
        );
        assert_eq!(
            hex::encode(shake256("abc", 64)),
            "483366601360a8771c6863080cc4114d8db44530f8f1e1ee4f94ea37e78b5739\
             d5a15bef186a5386c75744c0527e1faa9f8726e462a12a4feb06bd8801e751e4"
        );
    }

    #[test]
    fn matches_sha3_crate_across_block_boundaries() {
        for len in 0..=450 {
            let m: Vec<u8> = (0..len).map(|i| (i * 7 + 3) as u8).collect();

            assert_eq!(sha3_224(&m)[..], sha3::Sha3_224::digest(&m)[..], "len {len}");
            assert_eq!(sha3_256(&m)[..], sha3::Sha3_256::digest(&m)[..], "len {len}");
            assert_eq!(sha3_384(&m)[..], sha3::Sha3_384::digest(&m)[..], "len {len}");
            assert_eq!(sha3_512(&m)[..], sha3::Sha3_512::digest(&m)[..], "len {len}");
        }
    }

    #[test]
    fn matches_shake_across_squeeze_blocks() {
        for n in [0, 1, 64, 135, 136, 137, 167, 168, 169, 336, 1000] {
            let mut expected = vec![0u8; n];
            let mut h = sha3::Shake128::default();
            h.update(b"abc");
            h.finalize_xof_into(&mut expected);
            assert_eq!(shake128("abc", n), expected, "shake128 n={n}");

            let mut expected = vec![0u8; n];
            let mut h = sha3::Shake256::default();
            h.update(b"abc");
            h.finalize_xof_into(&mut expected);
            assert_eq!(shake256("abc", n), expected, "shake256 n={n}");
        }
    }

    #[test]
    fn text_is_hashed_as_utf8() {
        let text = "Ünïcödé ✓ 鍵";
        assert_eq!(sha3_256(text), sha3_256(text.as_bytes()));
        assert_eq!(sha3_256(text)[..], sha3::Sha3_256::digest(text.as_bytes())[..]);

        // No normalization: precomposed and decomposed forms differ.
        assert_ne!(sha3_256("\u{e9}"), sha3_256("e\u{301}"));
    }

    #[test]
    fn hash_dispatches_by_mode() {
        assert_eq!(hash(Mode::Sha3_224, "abc", 28), Ok(sha3_224("abc").to_vec()));
        assert_eq!(hash(Mode::Sha3_256, "abc", 32), Ok(sha3_256("abc").to_vec()));
        assert_eq!(hash(Mode::Sha3_384, "abc", 48), Ok(sha3_384("abc").to_vec()));
        assert_eq!(hash(Mode::Sha3_512, "abc", 64), Ok(sha3_512("abc").to_vec()));
        assert_eq!(hash(Mode::Shake128, "abc", 64), Ok(shake128("abc", 64)));
        assert_eq!(hash(Mode::Shake256, "abc", 7), Ok(shake256("abc", 7)));
    }

    #[test]
    fn mismatched_fixed_length_is_rejected() {
        let err = hash(Mode::Sha3_384, "abc", 32).unwrap_err();
        assert_eq!(err, Error::OutputLength { mode: Mode::Sha3_384, expected: 48, requested: 32 });
        assert_eq!(
            err.to_string(),
            "SHA3-384 produces 48-byte digests, but 32 bytes were requested"
        );

        let mut out = [0u8; 65];
        assert!(hash_into(Mode::Sha3_512, "abc", &mut out).is_err());
        assert_eq!(out, [0u8; 65]);
    }

    #[test]
    fn into_variants_match_allocating_ones() {
        let mut out = [0u8; 300];
        shake256_into("abc", &mut out);
        assert_eq!(out.to_vec(), shake256("abc", 300));

        let mut out = [0u8; 32];
        hash_into(Mode::Sha3_256, "abc", &mut out).unwrap();
        assert_eq!(out, sha3_256("abc"));
    }

    #[test]
    fn independent_calls_on_many_threads() {
        let expected = sha3_512("shared input");
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| sha3_512("shared input")))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
