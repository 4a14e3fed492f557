// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! [WordOps] for words of any positive bit width, backed by [BigUint].
//!

use crate::error::InitError;
use crate::magic::magic_constants;
use crate::type_traits::WordOps;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Arithmetic modulo `2^w` for an arbitrary word size `w`.
///
/// Every operation masks its result back to `w` bits, so words never grow beyond
/// the configured width. Rotation amounts are reduced modulo `w`, which keeps the
/// cipher correct for widths that are not a power of two.
#[derive(Debug, Clone)]
pub struct BigWord {
    bits: u32,
    modulus: BigUint,
    mask: BigUint,
}

impl BigWord {
    /// Creates the word arithmetic for `bits` wide words.
    ///
    /// Fails with [InitError::InvalidWordSize] for a zero width.
    pub fn new(bits: u32) -> Result<BigWord, InitError> {
        if bits == 0 {
            return Err(InitError::InvalidWordSize(bits));
        }
        let modulus = BigUint::one() << bits;
        let mask = &modulus - 1u32;
        Ok(BigWord {
            bits,
            modulus,
            mask,
        })
    }

    fn reduce(&self, x: BigUint) -> BigUint {
        x & &self.mask
    }
}

impl WordOps for BigWord {
    type Word = BigUint;

    fn bits(&self) -> u32 {
        self.bits
    }

    fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    fn magic_constants(&self) -> (BigUint, BigUint) {
        let magic = magic_constants(self.bits);
        (magic.p.clone(), magic.q.clone())
    }

    fn wrapping_add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        self.reduce(a + b)
    }

    fn wrapping_sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        // b < 2^w, so adding the modulus first keeps the difference non-negative
        self.reduce(a + &self.modulus - b)
    }

    fn xor(&self, a: &BigUint, b: &BigUint) -> BigUint {
        a ^ b
    }

    fn rotation(&self, x: &BigUint) -> u32 {
        (x % self.bits).iter_u32_digits().next().unwrap_or(0)
    }

    fn rotate_left(&self, x: &BigUint, n: u32) -> BigUint {
        let n = n % self.bits;
        if n == 0 {
            return x.clone();
        }
        self.reduce((x << n) | (x >> (self.bits - n)))
    }

    fn rotate_right(&self, x: &BigUint, n: u32) -> BigUint {
        let n = n % self.bits;
        if n == 0 {
            return x.clone();
        }
        self.reduce((x >> n) | (x << (self.bits - n)))
    }

    fn from_le_bytes(&self, bytes: &[u8]) -> BigUint {
        let len = bytes.len().min(self.byte_width());
        self.reduce(BigUint::from_bytes_le(&bytes[..len]))
    }

    fn write_le_bytes(&self, x: &BigUint, out: &mut [u8]) {
        let bytes = x.to_bytes_le();
        out.fill(0);
        out[..bytes.len()].copy_from_slice(&bytes);
    }
}
