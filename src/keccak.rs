//! The Keccak-f\[1600\] permutation.
//!
//! The 1600-bit state is a 5×5 matrix of 64-bit lanes. Lane `(x, y)` lives at index `x + 5y`
//! and is loaded from the byte state in little-endian order.
use byteorder::{ByteOrder, LittleEndian};
use zeroize::Zeroize;

use crate::Permutation;

/// The width of the Keccak-f\[1600\] state in bytes.
pub const STATE_BYTES: usize = 1600 / 8;

/// The number of rounds in Keccak-f\[1600\].
pub const ROUNDS: usize = 24;

/// The Keccak-f\[1600\] permutation from the SHA-3 hash algorithm.
#[derive(Clone)]
#[repr(align(8))]
pub struct KeccakF1600([u8; STATE_BYTES]);

impl Default for KeccakF1600 {
    fn default() -> Self {
        KeccakF1600([0u8; STATE_BYTES])
    }
}

impl Zeroize for KeccakF1600 {
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}

impl Permutation<STATE_BYTES> for KeccakF1600 {
    fn state(&self) -> &[u8; STATE_BYTES] {
        &self.0
    }

    fn state_mut(&mut self) -> &mut [u8; STATE_BYTES] {
        &mut self.0
    }

    #[inline(always)]
    fn permute(&mut self) {
        let mut lanes = [0u64; 25];
        LittleEndian::read_u64_into(&self.0, &mut lanes);
        keccak_f1600(&mut lanes);
        LittleEndian::write_u64_into(&lanes, &mut self.0);
        lanes.zeroize();
    }
}

/// The ι round constants.
#[allow(clippy::unreadable_literal)]
pub const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// The ρ rotation offsets, indexed by `x + 5y`.
pub const RHO_OFFSETS: [u32; 25] = [
    0, 1, 62, 28, 27, //
    36, 44, 6, 55, 20, //
    3, 10, 43, 25, 39, //
    41, 45, 15, 21, 8, //
    18, 2, 61, 56, 14, //
];

/// Applies all 24 rounds of Keccak-f\[1600\] to the given lanes.
#[inline(always)]
pub fn keccak_f1600(lanes: &mut [u64; 25]) {
    for &rc in &RC {
        theta(lanes);
        rho(lanes);
        pi(lanes);
        chi(lanes);
        iota(lanes, rc);
    }
}

/// θ: adds the parities of the two neighbouring columns to every lane.
#[inline(always)]
pub fn theta(lanes: &mut [u64; 25]) {
    let mut c = [0u64; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = lanes[x] ^ lanes[x + 5] ^ lanes[x + 10] ^ lanes[x + 15] ^ lanes[x + 20];
    }

    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in (0..25).step_by(5) {
            lanes[x + y] ^= d;
        }
    }
}

/// ρ: rotates each lane by its fixed offset.
#[inline(always)]
pub fn rho(lanes: &mut [u64; 25]) {
    for (lane, &offset) in lanes.iter_mut().zip(&RHO_OFFSETS) {
        *lane = lane.rotate_left(offset);
    }
}

/// π: moves the lane at `(x, y)` to `(y, 2x + 3y mod 5)`.
#[inline(always)]
pub fn pi(lanes: &mut [u64; 25]) {
    let a = *lanes;
    for y in 0..5 {
        for x in 0..5 {
            lanes[y + 5 * ((2 * x + 3 * y) % 5)] = a[x + 5 * y];
        }
    }
}

/// χ: the only non-linear step, applied to each row independently.
#[inline(always)]
pub fn chi(lanes: &mut [u64; 25]) {
    for y in (0..25).step_by(5) {
        let mut row = [0u64; 5];
        row.copy_from_slice(&lanes[y..y + 5]);
        for x in 0..5 {
            lanes[x + y] = row[x] ^ ((!row[(x + 1) % 5]) & row[(x + 2) % 5]);
        }
    }
}

/// ι: breaks the symmetry between rounds.
#[inline(always)]
pub fn iota(lanes: &mut [u64; 25], rc: u64) {
    lanes[0] ^= rc;
}
