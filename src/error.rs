// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Error types returned while constructing and using an [RC5](crate::Rc5) instance.
//!

/// The largest supported key, 2040 bits.
pub const MAX_KEY_LEN: usize = 255;

/// The `InitError` enum represents the possible errors that can occur during the
/// [Rc5](crate::Rc5) initialization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("invalid key size: `{0}`; supported range is [0, 255]")]
    InvalidKeySize(usize),
    #[error("invalid word size `{0}`; the word size must be a positive number of bits")]
    InvalidWordSize(u32),
}

/// The `BlockError` enum represents the possible errors that can occur during the
/// encryption or decryption of a single block.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("invalid block size `{actual}`; expected a `{expected}` byte block")]
    InvalidBlockSize { expected: usize, actual: usize },
    #[error("block has bits set above the `{0}` bit word size")]
    NonCanonicalBlock(u32),
}

/// The `ControlBlockError` enum represents the possible errors that can occur while
/// constructing a cipher from an RC5 control block with
/// [new_cipher_from_control_block](crate::new_cipher_from_control_block).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlBlockError {
    #[error("invalid control block length `{0}`; should be at least 4 bytes long")]
    InvalidControlBlockLength(usize),
    #[error("unsupported rc5 algorithm version `{0}`; the only supported version is 0x10")]
    UnsupportedVersion(u8),
    #[error("specified key length `{0}` does not correspond to the provided key `{1}`")]
    InvalidControlBlockKeyLength(u8, usize),
    #[error(transparent)]
    Init(#[from] InitError),
}

pub(crate) fn check_key_len(key: &[u8]) -> Result<(), InitError> {
    if key.len() > MAX_KEY_LEN {
        return Err(InitError::InvalidKeySize(key.len()));
    }
    Ok(())
}

pub(crate) fn check_block_len(expected: usize, actual: usize) -> Result<(), BlockError> {
    if expected != actual {
        return Err(BlockError::InvalidBlockSize { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_len_limit() {
        assert!(check_key_len(&[0; MAX_KEY_LEN]).is_ok());
        assert_eq!(
            check_key_len(&[0; MAX_KEY_LEN + 1]),
            Err(InitError::InvalidKeySize(256))
        );
    }

    #[test]
    fn block_len_mismatch() {
        assert!(check_block_len(8, 8).is_ok());
        assert_eq!(
            check_block_len(8, 12),
            Err(BlockError::InvalidBlockSize {
                expected: 8,
                actual: 12
            })
        );
    }

    #[test]
    fn init_error_into_control_block_error() {
        let err: ControlBlockError = InitError::InvalidWordSize(0).into();
        assert_eq!(err, ControlBlockError::Init(InitError::InvalidWordSize(0)));
        assert_eq!(
            err.to_string(),
            "invalid word size `0`; the word size must be a positive number of bits"
        );
    }

    #[test]
    fn display_key_size() {
        assert_eq!(
            InitError::InvalidKeySize(300).to_string(),
            "invalid key size: `300`; supported range is [0, 255]"
        );
    }
}
