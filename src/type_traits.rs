// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Traits describing w-bit modular word arithmetic and its little-endian byte encoding,
//! with the native `u16`, `u32` and `u64` implementations.
//!

use crate::magic;
use std::marker::PhantomData;

/// Arithmetic on w-bit unsigned words, all of it modulo 2^w.
///
/// The cipher engine is generic over this trait. An implementation owns everything
/// that depends on the word size: the word representation, the magic constants and
/// the byte encoding.
pub trait WordOps {
    type Word: Clone;

    /// The word size `w` in bits.
    fn bits(&self) -> u32;

    /// Number of bytes a word occupies in a block, `ceil(w / 8)`.
    fn byte_width(&self) -> usize {
        (self.bits() as usize).div_ceil(8)
    }

    fn zero(&self) -> Self::Word;

    /// Returns `(P_w, Q_w)`.
    fn magic_constants(&self) -> (Self::Word, Self::Word);

    fn wrapping_add(&self, a: &Self::Word, b: &Self::Word) -> Self::Word;
    fn wrapping_sub(&self, a: &Self::Word, b: &Self::Word) -> Self::Word;
    fn xor(&self, a: &Self::Word, b: &Self::Word) -> Self::Word;

    /// The rotation amount encoded by `x`, i.e. `x mod w`.
    fn rotation(&self, x: &Self::Word) -> u32;

    fn rotate_left(&self, x: &Self::Word, n: u32) -> Self::Word;
    fn rotate_right(&self, x: &Self::Word, n: u32) -> Self::Word;

    /// Whether the little-endian word in `bytes`, exactly `byte_width()` long, has no
    /// bits set above `w`. Only the top byte can hold such bits.
    fn fits_width(&self, bytes: &[u8]) -> bool {
        let used = self.bits() % 8;
        used == 0 || bytes.last().map_or(true, |top| top >> used == 0)
    }

    /// Reads a little-endian word. Input shorter than [byte_width](WordOps::byte_width)
    /// is zero padded, bits above `w` are dropped.
    fn from_le_bytes(&self, bytes: &[u8]) -> Self::Word;

    /// Writes `x` little-endian into `out`, which is exactly `byte_width()` long.
    fn write_le_bytes(&self, x: &Self::Word, out: &mut [u8]);
}

/// A machine word that can back an RC5 word directly.
pub trait NativeWord:
    num_traits::PrimInt + num_traits::WrappingAdd + num_traits::WrappingSub
{
    const BITS: u32;
    const P: Self;
    const Q: Self;

    fn from_le_slice(bytes: &[u8]) -> Self;
    fn write_le(self, out: &mut [u8]);
    fn rotation_amount(self) -> u32;
}

macro_rules! impl_native_word {
    ($t:ty, $p:expr, $q:expr) => {
        impl NativeWord for $t {
            const BITS: u32 = <$t>::BITS;
            const P: $t = $p;
            const Q: $t = $q;

            fn from_le_slice(bytes: &[u8]) -> $t {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                let len = bytes.len().min(buf.len());
                buf[..len].copy_from_slice(&bytes[..len]);
                <$t>::from_le_bytes(buf)
            }

            fn write_le(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }

            fn rotation_amount(self) -> u32 {
                (self % <$t>::BITS as $t) as u32
            }
        }
    };
}

impl_native_word!(u16, magic::P16, magic::Q16);
impl_native_word!(u32, magic::P32, magic::Q32);
impl_native_word!(u64, magic::P64, magic::Q64);

/// [WordOps] over a native unsigned integer type.
#[derive(Debug, Clone, Copy, Default)]
pub struct Native<T>(PhantomData<T>);

impl<T> Native<T> {
    pub const fn new() -> Native<T> {
        Native(PhantomData)
    }
}

impl<T: NativeWord> WordOps for Native<T> {
    type Word = T;

    fn bits(&self) -> u32 {
        T::BITS
    }

    fn zero(&self) -> T {
        T::zero()
    }

    fn magic_constants(&self) -> (T, T) {
        (T::P, T::Q)
    }

    #[inline]
    fn wrapping_add(&self, a: &T, b: &T) -> T {
        a.wrapping_add(b)
    }

    #[inline]
    fn wrapping_sub(&self, a: &T, b: &T) -> T {
        a.wrapping_sub(b)
    }

    #[inline]
    fn xor(&self, a: &T, b: &T) -> T {
        *a ^ *b
    }

    #[inline]
    fn rotation(&self, x: &T) -> u32 {
        x.rotation_amount()
    }

    #[inline]
    fn rotate_left(&self, x: &T, n: u32) -> T {
        x.rotate_left(n % T::BITS)
    }

    #[inline]
    fn rotate_right(&self, x: &T, n: u32) -> T {
        x.rotate_right(n % T::BITS)
    }

    fn from_le_bytes(&self, bytes: &[u8]) -> T {
        T::from_le_slice(bytes)
    }

    fn write_le_bytes(&self, x: &T, out: &mut [u8]) {
        x.write_le(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_amount_wrap() {
        let ops = Native::<u16>::new();
        assert_eq!(ops.rotation(&0xffff), 0xf);
        assert_eq!(ops.rotation(&4), 4);
    }

    #[test]
    fn rotation_amount_64() {
        let ops = Native::<u64>::new();
        assert_eq!(ops.rotation(&(64 * 7 + 5)), 5);
    }

    #[test]
    fn byte_width() {
        assert_eq!(Native::<u16>::new().byte_width(), 2);
        assert_eq!(Native::<u32>::new().byte_width(), 4);
        assert_eq!(Native::<u64>::new().byte_width(), 8);
    }

    #[test]
    fn from_short_slice_is_zero_padded() {
        let ops = Native::<u32>::new();
        assert_eq!(ops.from_le_bytes(&[0x01, 0x02]), 0x0201);
        assert_eq!(ops.from_le_bytes(&[]), 0);
        assert_eq!(ops.from_le_bytes(&[0x78, 0x56, 0x34, 0x12]), 0x12345678);
    }

    #[test]
    fn write_le() {
        let ops = Native::<u32>::new();
        let mut out = [0; 4];
        ops.write_le_bytes(&0x12345678, &mut out);
        assert_eq!(out, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn rotate_inverse() {
        let ops = Native::<u32>::new();
        let x = 0x8000_0001u32;
        assert_eq!(ops.rotate_left(&x, 1), 0x0000_0003);
        assert_eq!(ops.rotate_right(&ops.rotate_left(&x, 13), 13), x);
        assert_eq!(ops.rotate_left(&x, 32), x);
    }

    #[test]
    fn wrapping_arithmetic() {
        let ops = Native::<u16>::new();
        assert_eq!(ops.wrapping_add(&0xffff, &2), 1);
        assert_eq!(ops.wrapping_sub(&1, &2), 0xffff);
        assert_eq!(ops.xor(&0xff00, &0x0ff0), 0xf0f0);
    }

    #[test]
    fn native_words_always_fit() {
        assert!(Native::<u16>::new().fits_width(&[0xFF, 0xFF]));
        assert!(Native::<u64>::new().fits_width(&[0xFF; 8]));
    }
}
