#![cfg(all(test, feature = "std"))]

use proptest::collection::vec;
use proptest::prelude::*;
use sha3::digest::{ExtendableOutput, Update};
use sha3::Digest;

use crate::{hash, sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256, Error, Mode};

/// An arbitrary byte string with length 0..600, long enough to span several blocks of every mode.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..600)
}

/// An arbitrary mode.
fn arb_mode() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

/// A message with one of its bits flipped.
fn arb_bit_flip() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
    vec(any::<u8>(), 1..600).prop_flat_map(|m| {
        let bits = m.len() * 8;
        (Just(m), 0..bits).prop_map(|(m, bit)| {
            let mut flipped = m.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            (m, flipped)
        })
    })
}

fn shake_reference<X: Default + Update + ExtendableOutput>(m: &[u8], n: usize) -> Vec<u8> {
    let mut out = vec![0u8; n];
    let mut x = X::default();
    x.update(m);
    x.finalize_xof_into(&mut out);
    out
}

proptest! {
    /// Separate invocations on the same input produce the same output.
    #[test]
    fn deterministic(m in arb_data(), mode in arb_mode(), n in 0usize..400) {
        let n = mode.params().fixed_output_bytes().unwrap_or(n);
        prop_assert_eq!(hash(mode, &m, n), hash(mode, &m, n));
    }

    /// XOFs return exactly as many bytes as requested; digests always have their fixed size.
    #[test]
    fn output_lengths(m in arb_data(), n in 0usize..1000) {
        prop_assert_eq!(shake128(&m, n).len(), n);
        prop_assert_eq!(shake256(&m, n).len(), n);
        prop_assert_eq!(sha3_224(&m).len(), 28);
        prop_assert_eq!(sha3_256(&m).len(), 32);
        prop_assert_eq!(sha3_384(&m).len(), 48);
        prop_assert_eq!(sha3_512(&m).len(), 64);
    }

    /// A shorter XOF output is a prefix of a longer one.
    #[test]
    fn xof_prefix_consistency(m in arb_data(), n1 in 0usize..500, extra in 0usize..500) {
        let n2 = n1 + extra;
        prop_assert_eq!(&shake128(&m, n2)[..n1], &shake128(&m, n1)[..]);
        prop_assert_eq!(&shake256(&m, n2)[..n1], &shake256(&m, n1)[..]);
    }

    /// Fixed-digest modes never truncate or pad to a requested length.
    #[test]
    fn fixed_length_contract(m in arb_data(), mode in arb_mode(), n in 0usize..200) {
        match mode.params().fixed_output_bytes() {
            Some(expected) if expected != n => {
                prop_assert_eq!(
                    hash(mode, &m, n),
                    Err(Error::OutputLength { mode, expected, requested: n })
                );
            }
            _ => {
                prop_assert_eq!(hash(mode, &m, n).map(|o| o.len()), Ok(n));
            }
        }
    }

    /// Flipping one input bit changes roughly half of the output bits.
    #[test]
    fn avalanche((m, flipped) in arb_bit_flip()) {
        let a = sha3_256(&m);
        let b = sha3_256(&flipped);
        let changed: u32 = a.iter().zip(&b).map(|(x, y)| (x ^ y).count_ones()).sum();
        prop_assert!((64..=192).contains(&changed), "{} of 256 bits changed", changed);
    }

    /// Every mode agrees with the RustCrypto implementation.
    #[test]
    fn matches_reference(m in arb_data(), n in 0usize..400) {
        prop_assert_eq!(&sha3_224(&m)[..], &sha3::Sha3_224::digest(&m)[..]);
        prop_assert_eq!(&sha3_256(&m)[..], &sha3::Sha3_256::digest(&m)[..]);
        prop_assert_eq!(&sha3_384(&m)[..], &sha3::Sha3_384::digest(&m)[..]);
        prop_assert_eq!(&sha3_512(&m)[..], &sha3::Sha3_512::digest(&m)[..]);
        prop_assert_eq!(shake128(&m, n), shake_reference::<sha3::Shake128>(&m, n));
        prop_assert_eq!(shake256(&m, n), shake_reference::<sha3::Shake256>(&m, n));
    }
}
