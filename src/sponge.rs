//! The sponge construction and the parameters of the six FIPS 202 modes.
use core::fmt;

use zeroize::Zeroize;

use crate::keccak::{KeccakF1600, STATE_BYTES};
use crate::{Error, Permutation};

/// The domain separation bits appended to a message before padding.
///
/// Bits are stored in FIPS 202 order: the first bit appended is the least significant bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainSuffix {
    bits: u8,
    len: u32,
}

impl DomainSuffix {
    /// `01`, used by the SHA-3 fixed-length digests.
    pub const SHA3: DomainSuffix = DomainSuffix { bits: 0b10, len: 2 };

    /// `1111`, used by the SHAKE extendable-output functions.
    pub const SHAKE: DomainSuffix = DomainSuffix { bits: 0b1111, len: 4 };

    /// The suffix bits, first bit in the least significant position.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// The number of suffix bits.
    pub const fn bit_len(&self) -> u32 {
        self.len
    }

    /// The first padding byte: the suffix followed by the leading `1` of `pad10*1`.
    pub const fn delimiter(&self) -> u8 {
        self.bits | (1 << self.len)
    }
}

/// The immutable parameters of one sponge instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeParameters {
    rate_bytes: usize,
    suffix: DomainSuffix,
    fixed_output_bytes: Option<usize>,
}

impl ModeParameters {
    const fn new(rate_bytes: usize, suffix: DomainSuffix, fixed_output_bytes: Option<usize>) -> Self {
        assert!(rate_bytes > 0 && rate_bytes < STATE_BYTES);
        assert!(rate_bytes % 8 == 0, "rate must be lane-aligned");
        ModeParameters { rate_bytes, suffix, fixed_output_bytes }
    }

    /// The number of state bytes XORed with input and emitted as output per permutation.
    pub const fn rate_bytes(&self) -> usize {
        self.rate_bytes
    }

    /// The number of state bytes never directly exposed; always `200 - rate_bytes`.
    pub const fn capacity_bytes(&self) -> usize {
        STATE_BYTES - self.rate_bytes
    }

    pub const fn domain_suffix(&self) -> DomainSuffix {
        self.suffix
    }

    pub const fn output_is_fixed(&self) -> bool {
        self.fixed_output_bytes.is_some()
    }

    /// The digest length for fixed-output modes, or `None` for XOFs.
    pub const fn fixed_output_bytes(&self) -> Option<usize> {
        self.fixed_output_bytes
    }
}

pub const SHA3_224: ModeParameters = ModeParameters::new(144, DomainSuffix::SHA3, Some(28));
pub const SHA3_256: ModeParameters = ModeParameters::new(136, DomainSuffix::SHA3, Some(32));
pub const SHA3_384: ModeParameters = ModeParameters::new(104, DomainSuffix::SHA3, Some(48));
pub const SHA3_512: ModeParameters = ModeParameters::new(72, DomainSuffix::SHA3, Some(64));
pub const SHAKE128: ModeParameters = ModeParameters::new(168, DomainSuffix::SHAKE, None);
pub const SHAKE256: ModeParameters = ModeParameters::new(136, DomainSuffix::SHAKE, None);

/// One of the six standardized Keccak sponge instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Shake128,
    Shake256,
}

impl Mode {
    /// Every mode, in FIPS 202 order.
    pub const ALL: [Mode; 6] = [
        Mode::Sha3_224,
        Mode::Sha3_256,
        Mode::Sha3_384,
        Mode::Sha3_512,
        Mode::Shake128,
        Mode::Shake256,
    ];

    pub const fn params(self) -> &'static ModeParameters {
        match self {
            Mode::Sha3_224 => &SHA3_224,
            Mode::Sha3_256 => &SHA3_256,
            Mode::Sha3_384 => &SHA3_384,
            Mode::Sha3_512 => &SHA3_512,
            Mode::Shake128 => &SHAKE128,
            Mode::Shake256 => &SHAKE256,
        }
    }

    pub const fn is_xof(self) -> bool {
        !self.params().output_is_fixed()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Mode::Sha3_224 => "SHA3-224",
            Mode::Sha3_256 => "SHA3-256",
            Mode::Sha3_384 => "SHA3-384",
            Mode::Sha3_512 => "SHA3-512",
            Mode::Shake128 => "SHAKE128",
            Mode::Shake256 => "SHAKE256",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A single-use sponge over a `WIDTH`-byte permutation.
///
/// The state is zeroized when the sponge is dropped.
pub(crate) struct Sponge<P, const WIDTH: usize>
where
    P: Permutation<WIDTH>,
{
    state: P,
    rate: usize,
}

impl<P, const WIDTH: usize> Sponge<P, WIDTH>
where
    P: Permutation<WIDTH>,
{
    pub(crate) fn new(rate: usize) -> Self {
        debug_assert!(rate > 0 && rate < WIDTH);

        Sponge { state: P::default(), rate }
    }

    /// Absorbs the whole message followed by `delimiter` and `pad10*1`.
    pub(crate) fn absorb(&mut self, message: &[u8], delimiter: u8) {
        let mut blocks = message.chunks_exact(self.rate);
        for block in &mut blocks {
            self.state.add_bytes(block);
            self.state.permute();
        }

        let tail = blocks.remainder();
        self.state.add_bytes(tail);
        self.state.add_byte(delimiter, tail.len());
        self.state.add_byte(0x80, self.rate - 1);
        self.state.permute();
    }

    /// Fills `out` from the rate portion of the state, permuting between blocks.
    pub(crate) fn squeeze(&mut self, out: &mut [u8]) {
        let mut chunks = out.chunks_mut(self.rate);
        if let Some(chunk) = chunks.next() {
            self.state.extract_bytes(chunk);
        }
        for chunk in chunks {
            self.state.permute();
            self.state.extract_bytes(chunk);
        }
    }
}

impl<P, const WIDTH: usize> Drop for Sponge<P, WIDTH>
where
    P: Permutation<WIDTH>,
{
    fn drop(&mut self) {
        self.state.state_mut().zeroize();
    }
}

/// Checks `output_len` against the mode's fixed digest size, if it has one.
pub(crate) fn check_output_len(mode: Mode, output_len: usize) -> Result<(), Error> {
    match mode.params().fixed_output_bytes() {
        Some(expected) if expected != output_len => {
            Err(Error::OutputLength { mode, expected, requested: output_len })
        }
        _ => Ok(()),
    }
}

/// Hashes `message` with the given mode, filling all of `out`.
///
/// Fixed-digest modes require `out` to be exactly the digest length; XOF modes accept any
/// length, including zero.
pub fn sponge_hash_into(message: &[u8], mode: Mode, out: &mut [u8]) -> Result<(), Error> {
    check_output_len(mode, out.len())?;
    keccak_sponge::<KeccakF1600>(message, mode.params(), out);
    Ok(())
}

/// Hashes `message` with the given mode, returning `output_len` bytes.
#[cfg(feature = "std")]
pub fn sponge_hash(message: &[u8], mode: Mode, output_len: usize) -> Result<Vec<u8>, Error> {
    check_output_len(mode, output_len)?;

    let mut out = Vec::new();
    out.try_reserve_exact(output_len)
        .map_err(|_| Error::Allocation { requested: output_len })?;
    out.resize(output_len, 0);

    keccak_sponge::<KeccakF1600>(message, mode.params(), &mut out);
    Ok(out)
}

#[inline]
pub(crate) fn keccak_sponge<P>(message: &[u8], params: &ModeParameters, out: &mut [u8])
where
    P: Permutation<STATE_BYTES>,
{
    let mut sponge = Sponge::<P, STATE_BYTES>::new(params.rate_bytes());
    sponge.absorb(message, params.domain_suffix().delimiter());
    sponge.squeeze(out);
}
