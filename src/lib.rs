// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC5 family of block ciphers
//!
//! The RC5 block cipher is a symmetric-key block cipher designed by Ron Rivest in 1994.
//! It is fully parameterized: the word size `w` (the block is two words), the number of
//! rounds `r` and the key length `b` (0 to 2040 bits) are all chosen by the user.
//!
//! The cipher engine [Rc5] is generic over the word arithmetic [WordOps]. The native
//! `u16`, `u32` and `u64` types back the common 16, 32 and 64 bit words through
//! [Native], while [BigWord] handles any other positive word size with arbitrary
//! precision integers. The magic constants `P_w` and `Q_w` that seed the key
//! schedule are derived exactly for every word size, see [magic_constants].
//!
//! [new_cipher] picks the right specialization at runtime:
//!
//! ```
//! use rc5_generic::{new_cipher, BlockCipher};
//!
//! let cipher = new_cipher(b"my secret key", 16, 48).unwrap();
//! assert_eq!(cipher.block_size(), 12);
//!
//! let mut block = *b"hello there!";
//! cipher.encrypt_in_place(&mut block).unwrap();
//! cipher.decrypt_in_place(&mut block).unwrap();
//! assert_eq!(&block, b"hello there!");
//! ```
//!
//! # Security
//!
//! The rotation amounts in RC5 depend on the data being encrypted, so the running time
//! of a block operation is not guaranteed to be constant. Only a single block
//! permutation is provided, no mode of operation.
//!

mod algorithm;
mod big_word;
mod dispatch;
mod error;
mod key_schedule;
mod magic;
mod type_traits;

pub use crate::algorithm::*;
pub use crate::big_word::BigWord;
pub use crate::dispatch::*;
pub use crate::error::*;
pub use crate::key_schedule::{expand_key, key_words};
pub use crate::magic::{
    derive_magic_constants, literal_magic_constants, magic_constants, MagicConstants,
};
pub use crate::type_traits::{Native, NativeWord, WordOps};
