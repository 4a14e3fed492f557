// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The RC5 key expansion: turns a secret key into the table of `2 * (r + 1)` round keys.
//!

use crate::type_traits::WordOps;
use std::cmp::max;

/// Expands `key` into the round key table `S` for `rounds` rounds.
///
/// The key must already be validated to at most 255 bytes.
pub fn expand_key<O: WordOps>(ops: &O, key: &[u8], rounds: u32) -> Vec<O::Word> {
    let mut s_arr = init_key_table(ops, rounds);
    let mut l_arr = key_words(ops, key);
    mix(ops, &mut s_arr, &mut l_arr);
    s_arr
}

/// `S[0] = P`, `S[i] = S[i - 1] + Q`
pub fn init_key_table<O: WordOps>(ops: &O, rounds: u32) -> Vec<O::Word> {
    let (p, q) = ops.magic_constants();
    let t = 2 * (rounds as usize + 1);
    std::iter::successors(Some(p), |x| Some(ops.wrapping_add(x, &q)))
        .take(t)
        .collect()
}

/// Packs the key into little-endian words, zero padding the last one.
///
/// An empty key yields a single zero word.
pub fn key_words<O: WordOps>(ops: &O, key: &[u8]) -> Vec<O::Word> {
    if key.is_empty() {
        return vec![ops.zero()];
    }
    key.chunks(ops.byte_width())
        .map(|chunk| ops.from_le_bytes(chunk))
        .collect()
}

fn mix<O: WordOps>(ops: &O, s_arr: &mut [O::Word], l_arr: &mut [O::Word]) {
    let total_count = 3 * max(s_arr.len(), l_arr.len());
    let indices = (0..s_arr.len()).cycle().zip((0..l_arr.len()).cycle());

    let mut a = ops.zero();
    let mut b = ops.zero();
    for (i, j) in indices.take(total_count) {
        // A = S[i] = (S[i] + A + B) <<< 3
        a = ops.rotate_left(&ops.wrapping_add(&ops.wrapping_add(&s_arr[i], &a), &b), 3);
        s_arr[i] = a.clone();
        // B = L[j] = (L[j] + A + B) <<< (A + B)
        let ab = ops.wrapping_add(&a, &b);
        b = ops.rotate_left(&ops.wrapping_add(&l_arr[j], &ab), ops.rotation(&ab));
        l_arr[j] = b.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::big_word::BigWord;
    use crate::magic::{P16, P32, Q16, Q32};
    use crate::type_traits::Native;
    use num_bigint::BigUint;

    #[test]
    fn key_words_pad_last_word() {
        let ops = Native::<u32>::new();
        let key = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        assert_eq!(key_words(&ops, &key), vec![0x04030201, 0x0605]);
    }

    #[test]
    fn key_words_empty_key() {
        assert_eq!(key_words(&Native::<u64>::new(), &[]), vec![0]);
        assert_eq!(
            key_words(&BigWord::new(48).unwrap(), &[]),
            vec![BigUint::from(0u32)]
        );
    }

    #[test]
    fn key_words_count() {
        let ops = BigWord::new(48).unwrap();
        assert_eq!(key_words(&ops, &[0xAA; 255]).len(), 43);
        assert_eq!(key_words(&ops, &[0xAA; 6]).len(), 1);
        assert_eq!(key_words(&ops, &[0xAA; 7]).len(), 2);
    }

    #[test]
    fn key_table_progression() {
        let ops = Native::<u16>::new();
        let table = init_key_table(&ops, 2);
        assert_eq!(table.len(), 6);
        assert_eq!(table[0], P16);
        assert_eq!(table[1], P16.wrapping_add(Q16));
        assert_eq!(table[5], P16.wrapping_add(Q16.wrapping_mul(5)));
    }

    #[test]
    fn key_table_zero_rounds() {
        let table = init_key_table(&Native::<u32>::new(), 0);
        assert_eq!(table, vec![P32, P32.wrapping_add(Q32)]);
    }

    #[test]
    fn expanded_len() {
        for rounds in [0, 1, 12, 32, 255] {
            let table = expand_key(&Native::<u32>::new(), b"secret", rounds);
            assert_eq!(table.len(), 2 * (rounds as usize + 1));
        }
    }

    #[test]
    fn native_and_big_agree() {
        let key = b"an arbitrary key of some length";
        let native = expand_key(&Native::<u64>::new(), key, 12);
        let big = expand_key(&BigWord::new(64).unwrap(), key, 12);
        let native: Vec<BigUint> = native.into_iter().map(BigUint::from).collect();
        assert_eq!(native, big);
    }

    #[test]
    fn key_changes_table() {
        let ops = Native::<u32>::new();
        assert_ne!(expand_key(&ops, &[0], 12), expand_key(&ops, &[1], 12));
        assert_ne!(expand_key(&ops, &[], 12), init_key_table(&ops, 12));
    }
}
