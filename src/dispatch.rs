// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Runtime selection of an [Rc5] specialization from the requested word size.
//!

use crate::algorithm::{BlockCipher, Rc5};
use crate::big_word::BigWord;
use crate::error::*;
use crate::type_traits::Native;

/// A cipher instance whose word size was chosen at runtime.
pub type DynBlockCipher = Box<dyn BlockCipher + Send + Sync>;

/// Constructs a new [Rc5] encryption algorithm instance with runtime word size, rounds
/// and key.
///
/// # Arguments
///
/// * key - A slice of bytes representing the key, at most 255 bytes long.
/// * rounds - The number of rounds of encryption to be performed by the algorithm.
/// * word_size - The word size in bits. 16, 32 and 64 use the native integer types,
///   any other positive size falls back to arbitrary precision words.
///
/// # Returns
///
/// A Result containing a boxed dyn [BlockCipher] instance on success, or an [InitError]
/// on failure.
///
/// # Examples
///
/// ```
/// use rc5_generic::{new_cipher, BlockCipher};
///
/// let key = b"my secret key";
/// let cipher = new_cipher(key, 12, 32).unwrap();
/// let pt = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
/// let mut ct = [0; 8];
/// cipher.encrypt(&mut ct, &pt).unwrap();
/// assert_ne!(pt, ct);
/// let mut decrypted = [0; 8];
/// cipher.decrypt(&mut decrypted, &ct).unwrap();
/// assert_eq!(pt, decrypted);
/// ```
pub fn new_cipher(key: &[u8], rounds: u32, word_size: u32) -> Result<DynBlockCipher, InitError> {
    match word_size {
        16 => Ok(Box::new(Rc5::<Native<u16>>::new(key, rounds)?)),
        32 => Ok(Box::new(Rc5::<Native<u32>>::new(key, rounds)?)),
        64 => Ok(Box::new(Rc5::<Native<u64>>::new(key, rounds)?)),
        _ => Ok(Box::new(Rc5::<BigWord>::with_word_size(
            key, rounds, word_size,
        )?)),
    }
}

/// The only control block version defined for RC5.
pub const CONTROL_BLOCK_VERSION: u8 = 0x10;

/// An RC5 control block: `[version, word size, rounds, key length, key...]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlBlock<'a> {
    word_size: u8,
    rounds: u8,
    key: &'a [u8],
}

impl<'a> ControlBlock<'a> {
    /// Parses and validates a control block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::ControlBlock;
    ///
    /// let control_block = [0x10, 0x20, 0x0C, 0x02, 0xAB, 0xCD];
    /// let parsed = ControlBlock::parse(&control_block).unwrap();
    /// assert_eq!(parsed.word_size(), 32);
    /// assert_eq!(parsed.rounds(), 12);
    /// assert_eq!(parsed.key(), &[0xAB, 0xCD]);
    /// ```
    pub fn parse(control_block: &'a [u8]) -> Result<ControlBlock<'a>, ControlBlockError> {
        let [version, word_size, rounds, key_len, key @ ..] = control_block else {
            return Err(ControlBlockError::InvalidControlBlockLength(
                control_block.len(),
            ));
        };

        if *version != CONTROL_BLOCK_VERSION {
            return Err(ControlBlockError::UnsupportedVersion(*version));
        }

        if *key_len as usize != key.len() {
            return Err(ControlBlockError::InvalidControlBlockKeyLength(
                *key_len,
                key.len(),
            ));
        }

        Ok(ControlBlock {
            word_size: *word_size,
            rounds: *rounds,
            key,
        })
    }

    pub fn version(&self) -> u8 {
        CONTROL_BLOCK_VERSION
    }

    /// The word size in bits.
    pub fn word_size(&self) -> u8 {
        self.word_size
    }

    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    pub fn key(&self) -> &'a [u8] {
        self.key
    }

    /// Encodes the control block back to bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.key.len());
        // parse guarantees the key length fits in a byte
        bytes.extend_from_slice(&[
            CONTROL_BLOCK_VERSION,
            self.word_size,
            self.rounds,
            self.key.len() as u8,
        ]);
        bytes.extend_from_slice(self.key);
        bytes
    }

    /// Builds the cipher described by this control block.
    pub fn cipher(&self) -> Result<DynBlockCipher, InitError> {
        new_cipher(self.key, self.rounds.into(), self.word_size.into())
    }
}

/// Constructs a new [Rc5] encryption algorithm instance from an RC5 control block.
///
/// # Arguments
///
/// * control_block - The control block bytes, minimum length 4
///
/// # Returns
///
/// A Result containing a boxed dyn [BlockCipher] instance on success, or a
/// [ControlBlockError] on failure.
///
/// # Examples
///
/// ```
/// use rc5_generic::{new_cipher_from_control_block, BlockCipher};
///
/// let control_block = [
///     0x10, 0x20, 0x0C, 0x0A, 0x20, 0x33, 0x7D, 0x83, 0x05, 0x5F, 0x62, 0x51, 0xBB, 0x09
/// ];
/// let cipher = new_cipher_from_control_block(&control_block).unwrap();
/// let pt = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
/// let mut block = pt;
/// cipher.encrypt_in_place(&mut block).unwrap();
/// assert_ne!(pt, block);
/// cipher.decrypt_in_place(&mut block).unwrap();
/// assert_eq!(pt, block);
/// ```
pub fn new_cipher_from_control_block(
    control_block: &[u8],
) -> Result<DynBlockCipher, ControlBlockError> {
    Ok(ControlBlock::parse(control_block)?.cipher()?)
}
