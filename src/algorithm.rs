// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The implementaton details of the RC5 block cipher algorithm
//!
use crate::big_word::BigWord;
use crate::error::*;
use crate::key_schedule::expand_key;
use crate::type_traits::*;

/// The Rc5 struct represents an instance of the RC5 block cipher algorithm.
///
/// The word size is determined by the [WordOps] implementation `O`: [Native] for
/// 16, 32 and 64 bit words and [BigWord] for any other width. The expanded key table
/// is computed once in the constructor and never changes afterwards, so a single
/// instance can be shared between threads.
pub struct Rc5<O: WordOps> {
    ops: O,
    s0: O::Word,
    s1: O::Word,
    s_arr: Box<[[O::Word; 2]]>,
}

impl<T: NativeWord> Rc5<Native<T>> {
    /// Creates a new RC5 instance with the given key and number of rounds.
    ///
    /// The `key` parameter is a slice of bytes representing the secret key used to encrypt
    /// and decrypt the data, at most 255 bytes long. The `rounds` parameter specifies the
    /// number of rounds (typically 12, 16, or 20).
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::{Native, Rc5};
    ///
    /// let key = b"my secret key";
    /// let rc5 = Rc5::<Native<u32>>::new(key, 12);
    /// assert!(rc5.is_ok());
    /// ```
    pub fn new(key: &[u8], rounds: u32) -> Result<Rc5<Native<T>>, InitError> {
        Rc5::with_ops(Native::new(), key, rounds)
    }
}

impl Rc5<BigWord> {
    /// Creates a new RC5 instance with words of `bits` bits.
    ///
    /// Any positive word size is accepted, including sizes that are not a power of two
    /// or not a multiple of 8.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::{BigWord, Rc5};
    ///
    /// let rc5 = Rc5::<BigWord>::with_word_size(b"my secret key", 12, 48).unwrap();
    /// assert_eq!(rc5.block_size(), 12);
    /// ```
    pub fn with_word_size(key: &[u8], rounds: u32, bits: u32) -> Result<Rc5<BigWord>, InitError> {
        Rc5::with_ops(BigWord::new(bits)?, key, rounds)
    }
}

impl<O: WordOps> Rc5<O> {
    /// Creates a new RC5 instance for an explicit word arithmetic.
    pub fn with_ops(ops: O, key: &[u8], rounds: u32) -> Result<Rc5<O>, InitError> {
        check_key_len(key)?;

        let table = expand_key(&ops, key, rounds);
        // first 2 elements S[0] & S[1] are always present because of t = 2 + r*2
        let (whitening, rest) = table.split_at(2);
        let s_arr = rest
            .chunks_exact(2)
            .map(|pair| [pair[0].clone(), pair[1].clone()])
            .collect();

        Ok(Rc5 {
            s0: whitening[0].clone(),
            s1: whitening[1].clone(),
            s_arr,
            ops,
        })
    }

    /// The word size in bits.
    pub fn word_size(&self) -> u32 {
        self.ops.bits()
    }

    /// The number of rounds.
    pub fn rounds(&self) -> u32 {
        self.s_arr.len() as u32
    }

    /// The size of a block in bytes, two words.
    pub fn block_size(&self) -> usize {
        2 * self.ops.byte_width()
    }

    /// Returns a copy of the expanded key table `S[0..2 * (r + 1)]`.
    pub fn expanded_key(&self) -> Vec<O::Word> {
        let mut table = Vec::with_capacity(2 * (self.s_arr.len() + 1));
        table.push(self.s0.clone());
        table.push(self.s1.clone());
        for pair in self.s_arr.iter() {
            table.extend_from_slice(pair);
        }
        table
    }

    /// Encrypts the two-word block represented by the references `a` and `b`.
    ///
    /// The `a` and `b` parameters are mutable references to the two words to be
    /// encrypted. The encrypted values are written back to the same references.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::{InitError, Native, Rc5};
    ///
    /// # fn main() -> Result<(), InitError> {
    /// let key = b"my secret key";
    /// let rc5 = Rc5::<Native<u32>>::new(key, 12)?;
    ///
    /// let mut a = 0x12345678;
    /// let mut b = 0x9ABCDEF0;
    ///
    /// rc5.encrypt_words(&mut a, &mut b);
    ///
    /// assert_eq!(a, 0x92F4D0C5);
    /// assert_eq!(b, 0xEB0088E3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt_words(&self, a: &mut O::Word, b: &mut O::Word) {
        let ops = &self.ops;
        *a = ops.wrapping_add(a, &self.s0);
        *b = ops.wrapping_add(b, &self.s1);

        for [s1, s2] in self.s_arr.iter() {
            // A = ((A ^ B) <<< B) + S[2*i]
            *a = ops.wrapping_add(&ops.rotate_left(&ops.xor(a, b), ops.rotation(b)), s1);
            // B = ((B ^ A) <<< A) + S[2*i + 1]
            *b = ops.wrapping_add(&ops.rotate_left(&ops.xor(b, a), ops.rotation(a)), s2);
        }
    }

    /// Decrypts the two-word block represented by the references `a` and `b`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::{InitError, Native, Rc5};
    ///
    /// # fn main() -> Result<(), InitError> {
    /// let key = b"my secret key";
    /// let rc5 = Rc5::<Native<u32>>::new(key, 12)?;
    ///
    /// let mut a = 0x92F4D0C5;
    /// let mut b = 0xEB0088E3;
    ///
    /// rc5.decrypt_words(&mut a, &mut b);
    ///
    /// assert_eq!(a, 0x12345678);
    /// assert_eq!(b, 0x9ABCDEF0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn decrypt_words(&self, a: &mut O::Word, b: &mut O::Word) {
        let ops = &self.ops;
        for [s1, s2] in self.s_arr.iter().rev() {
            // B = ((B - S[2*i + 1]) >>> A) ^ A
            *b = ops.xor(&ops.rotate_right(&ops.wrapping_sub(b, s2), ops.rotation(a)), a);
            // A = ((A - S[2*i]) >>> B) ^ B
            *a = ops.xor(&ops.rotate_right(&ops.wrapping_sub(a, s1), ops.rotation(b)), b);
        }

        *b = ops.wrapping_sub(b, &self.s1);
        *a = ops.wrapping_sub(a, &self.s0);
    }

    /// Encrypts one block in place.
    ///
    /// The block must be exactly [block_size](Rc5::block_size) bytes long, the first
    /// half holding word `A` and the second half word `B`, both little-endian. When the
    /// word size is not a multiple of 8, the bits of each word above `w` must be zero,
    /// otherwise [BlockError::NonCanonicalBlock] is returned and the block is left as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc5_generic::{Native, Rc5};
    ///
    /// let rc5 = Rc5::<Native<u32>>::new(b"my secret key", 12).unwrap();
    ///
    /// let mut block = [0x78, 0x56, 0x34, 0x12, 0xF0, 0xDE, 0xBC, 0x9A];
    /// rc5.encrypt_block(&mut block).unwrap();
    /// assert_eq!(block, [0xC5, 0xD0, 0xF4, 0x92, 0xE3, 0x88, 0x00, 0xEB]);
    /// ```
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), BlockError> {
        self.transform_block(block, Self::encrypt_words)
    }

    /// Decrypts one block in place, the inverse of [encrypt_block](Rc5::encrypt_block).
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), BlockError> {
        self.transform_block(block, Self::decrypt_words)
    }

    /// Checks that `block` is one block long and that neither word has bits set
    /// above the word size.
    fn check_block(&self, block: &[u8]) -> Result<(), BlockError> {
        check_block_len(self.block_size(), block.len())?;

        let (a_bytes, b_bytes) = block.split_at(self.ops.byte_width());
        if !(self.ops.fits_width(a_bytes) && self.ops.fits_width(b_bytes)) {
            return Err(BlockError::NonCanonicalBlock(self.ops.bits()));
        }
        Ok(())
    }

    fn transform_block(
        &self,
        block: &mut [u8],
        transform: fn(&Self, &mut O::Word, &mut O::Word),
    ) -> Result<(), BlockError> {
        self.check_block(block)?;

        let (a_bytes, b_bytes) = block.split_at_mut(self.ops.byte_width());
        let mut a = self.ops.from_le_bytes(a_bytes);
        let mut b = self.ops.from_le_bytes(b_bytes);

        transform(self, &mut a, &mut b);

        self.ops.write_le_bytes(&a, a_bytes);
        self.ops.write_le_bytes(&b, b_bytes);
        Ok(())
    }
}

/// The `BlockCipher` trait provides methods for encrypting and decrypting data using
/// the RC5 block cipher algorithm. This trait is useful when the RC5 algorithm needs
/// to be constructed with a word size that is determined at runtime.
pub trait BlockCipher {
    /// The word size in bits.
    fn word_size(&self) -> u32;

    /// The number of rounds.
    fn rounds(&self) -> u32;

    /// The size of a block in bytes.
    fn block_size(&self) -> usize;

    /// Encrypts the block `src` into `dst`.
    ///
    /// Both buffers must be exactly [block_size](BlockCipher::block_size) bytes long and
    /// each word of `src` must fit in [word_size](BlockCipher::word_size) bits, otherwise
    /// a [BlockError] is returned and `dst` is left untouched.
    fn encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), BlockError>;

    /// Decrypts the block `src` into `dst`, the inverse of [encrypt](BlockCipher::encrypt).
    fn decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), BlockError>;

    /// Encrypts the given block in place. The block is checked the same way as the `src`
    /// of [encrypt](BlockCipher::encrypt).
    fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), BlockError>;

    /// Decrypts the given block in place.
    fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), BlockError>;
}

impl<O: WordOps> BlockCipher for Rc5<O> {
    fn word_size(&self) -> u32 {
        Rc5::word_size(self)
    }

    fn rounds(&self) -> u32 {
        Rc5::rounds(self)
    }

    fn block_size(&self) -> usize {
        Rc5::block_size(self)
    }

    fn encrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), BlockError> {
        self.check_block(src)?;
        check_block_len(self.block_size(), dst.len())?;
        dst.copy_from_slice(src);
        self.encrypt_block(dst)
    }

    fn decrypt(&self, dst: &mut [u8], src: &[u8]) -> Result<(), BlockError> {
        self.check_block(src)?;
        check_block_len(self.block_size(), dst.len())?;
        dst.copy_from_slice(src);
        self.decrypt_block(dst)
    }

    fn encrypt_in_place(&self, block: &mut [u8]) -> Result<(), BlockError> {
        self.encrypt_block(block)
    }

    fn decrypt_in_place(&self, block: &mut [u8]) -> Result<(), BlockError> {
        self.decrypt_block(block)
    }
}
