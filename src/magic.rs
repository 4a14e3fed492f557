// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The RC5 magic constants `P_w = Odd((e - 2) * 2^w)` and `Q_w = Odd((phi - 1) * 2^w)`.
//!
//! Both constants are irrational numbers scaled to `w` bits, so they are derived by
//! squeezing the value between a lower and an upper rational bound until both bounds
//! agree on the first `w` fractional bits. The result is exact for any word size.

use num_bigint::BigUint;
use num_rational::Ratio;
use num_traits::One;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub const P16: u16 = 0xB7E1;
pub const Q16: u16 = 0x9E37;
pub const P32: u32 = 0xB7E15163;
pub const Q32: u32 = 0x9E3779B9;
pub const P64: u64 = 0xB7E151628AED2A6B;
pub const Q64: u64 = 0x9E3779B97F4A7C15;

/// The pair of odd `w`-bit constants that seed the key schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicConstants {
    pub p: BigUint,
    pub q: BigUint,
}

static CACHE: Lazy<Mutex<HashMap<u32, Arc<MagicConstants>>>> = Lazy::new(Default::default);

/// Returns the magic constants for a `bits` wide word.
///
/// The literal constants are used for 16, 32 and 64 bit words, every other size is
/// derived once and then served from a process wide cache.
///
/// # Examples
///
/// ```
/// use num_bigint::BigUint;
/// use rc5_generic::magic_constants;
///
/// let magic = magic_constants(32);
/// assert_eq!(magic.p, BigUint::from(0xB7E15163u32));
/// assert_eq!(magic.q, BigUint::from(0x9E3779B9u32));
/// ```
pub fn magic_constants(bits: u32) -> Arc<MagicConstants> {
    // A poisoned cache still only holds fully computed entries.
    let lock = || CACHE.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(magic) = lock().get(&bits) {
        return magic.clone();
    }

    // derived without holding the lock, a concurrent insert for the same width wins
    let magic = literal_magic_constants(bits).unwrap_or_else(|| derive_magic_constants(bits));
    lock().entry(bits).or_insert(Arc::new(magic)).clone()
}

/// The precomputed constants for the native word sizes.
pub fn literal_magic_constants(bits: u32) -> Option<MagicConstants> {
    let (p, q) = match bits {
        16 => (BigUint::from(P16), BigUint::from(Q16)),
        32 => (BigUint::from(P32), BigUint::from(Q32)),
        64 => (BigUint::from(P64), BigUint::from(Q64)),
        _ => return None,
    };
    Some(MagicConstants { p, q })
}

/// Derives `P_w` and `Q_w` from scratch, without consulting literals or the cache.
pub fn derive_magic_constants(bits: u32) -> MagicConstants {
    MagicConstants {
        p: derive_p(bits),
        q: derive_q(bits),
    }
}

/// `Odd((e - 2) * 2^w)`
fn derive_p(bits: u32) -> BigUint {
    // After n terms: e - 2 = numer / n! + tail, with 0 < tail < 1 / (n * n!)
    let mut numer = BigUint::from(0u32);
    let mut fact = BigUint::one();
    let mut n = 1u32;
    loop {
        n += 1;
        fact *= n;
        numer = numer * n + 1u32;

        let lower = Ratio::new_raw(numer.clone(), fact.clone());
        let upper = Ratio::new_raw(&numer * n + 1u32, &fact * n);
        if let Some(p) = common_floor(&lower, &upper, bits) {
            return odd(p);
        }
    }
}

/// `Odd((phi - 1) * 2^w)`
fn derive_q(bits: u32) -> BigUint {
    // Convergents F(k) / F(k + 1) of phi - 1 = [0; 1, 1, 1, ...] alternate around it.
    let mut lo = BigUint::one();
    let mut hi = BigUint::one();
    loop {
        let next = &lo + &hi;
        let current = Ratio::new_raw(lo, hi.clone());
        let following = Ratio::new_raw(hi.clone(), next.clone());
        if let Some(q) = common_floor(&current, &following, bits) {
            return odd(q);
        }
        lo = hi;
        hi = next;
    }
}

/// `floor(x * 2^bits)` if it is the same for both bounds of `x`.
fn common_floor(a: &Ratio<BigUint>, b: &Ratio<BigUint>, bits: u32) -> Option<BigUint> {
    let scaled_floor = |r: &Ratio<BigUint>| (r.numer() << bits) / r.denom();
    let floor = scaled_floor(a);
    (floor == scaled_floor(b)).then_some(floor)
}

fn odd(value: BigUint) -> BigUint {
    value | BigUint::one()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_matches_literals() {
        for bits in [16, 32, 64] {
            assert_eq!(
                Some(derive_magic_constants(bits)),
                literal_magic_constants(bits),
                "w = {bits}"
            );
        }
    }

    #[test]
    fn derived_8() {
        let magic = derive_magic_constants(8);
        assert_eq!(magic.p, BigUint::from(0xB7u32));
        assert_eq!(magic.q, BigUint::from(0x9Fu32));
    }

    #[test]
    fn derived_48_is_prefix_of_64() {
        let magic = derive_magic_constants(48);
        assert_eq!(magic.p, BigUint::from(P64 >> 16 | 1));
        assert_eq!(magic.q, BigUint::from(Q64 >> 16 | 1));
    }

    #[test]
    fn derived_128() {
        let magic = derive_magic_constants(128);
        assert_eq!(
            magic.p,
            BigUint::from(0xB7E151628AED2A6ABF7158809CF4F3C7u128)
        );
        assert_eq!(
            magic.q,
            BigUint::from(0x9E3779B97F4A7C15F39CC0605CEDC835u128)
        );
    }

    #[test]
    fn tiny_words() {
        let magic = derive_magic_constants(1);
        assert_eq!(magic.p, BigUint::one());
        assert_eq!(magic.q, BigUint::one());
    }

    #[test]
    fn always_odd_and_in_range() {
        for bits in [3, 12, 24, 40, 80, 100, 250] {
            let magic = derive_magic_constants(bits);
            assert_eq!(magic.p.trailing_zeros(), Some(0));
            assert_eq!(magic.q.trailing_zeros(), Some(0));
            assert!(magic.p.bits() <= bits as u64);
            assert!(magic.q.bits() <= bits as u64);
        }
    }

    #[test]
    fn cache_returns_same_instance() {
        let first = magic_constants(56);
        let second = magic_constants(56);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, derive_magic_constants(56));
    }

    #[test]
    fn cache_serves_literals() {
        let magic = magic_constants(64);
        assert_eq!(magic.p, BigUint::from(P64));
        assert_eq!(magic.q, BigUint::from(Q64));
    }

    #[test]
    fn cache_concurrent_callers_share_entry() {
        let all: Vec<Arc<MagicConstants>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| magic_constants(2048)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let cached = magic_constants(2048);
        for magic in &all {
            assert!(Arc::ptr_eq(magic, &cached));
        }
    }

    #[test]
    fn cache_not_blocked_by_other_widths() {
        std::thread::scope(|scope| {
            let large = scope.spawn(|| magic_constants(1024));
            assert_eq!(magic_constants(40).p, derive_magic_constants(40).p);
            assert_eq!(*large.join().unwrap(), derive_magic_constants(1024));
        });
    }
}
