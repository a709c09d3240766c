use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Bounds-checked sequential reader over a borrowed account buffer.
///
/// All multi-byte integers are little-endian; strings are length-prefixed
/// with a u32, matching the on-chain borsh layouts this crate decodes.
pub struct BinaryReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            offset: 0,
        }
    }

    pub fn read_fixed_array(&mut self, length: usize) -> Result<&'a [u8], BinaryReaderError> {
        self.check_bounds(length)?;
        let slice = &self.buffer[self.offset..self.offset + length];
        self.offset += length;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, BinaryReaderError> {
        self.check_bounds(1)?;
        let value = self.buffer[self.offset];
        self.offset += 1;
        Ok(value)
    }

    pub fn read_u16(&mut self) -> Result<u16, BinaryReaderError> {
        self.check_bounds(2)?;
        let mut cursor = Cursor::new(&self.buffer[self.offset..self.offset + 2]);
        let value = cursor
            .read_u16::<LittleEndian>()
            .map_err(BinaryReaderError::Io)?;
        self.offset += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> Result<u32, BinaryReaderError> {
        self.check_bounds(4)?;
        let mut cursor = Cursor::new(&self.buffer[self.offset..self.offset + 4]);
        let value = cursor
            .read_u32::<LittleEndian>()
            .map_err(BinaryReaderError::Io)?;
        self.offset += 4;
        Ok(value)
    }

    pub fn read_u64(&mut self) -> Result<u64, BinaryReaderError> {
        self.check_bounds(8)?;
        let mut cursor = Cursor::new(&self.buffer[self.offset..self.offset + 8]);
        let value = cursor
            .read_u64::<LittleEndian>()
            .map_err(BinaryReaderError::Io)?;
        self.offset += 8;
        Ok(value)
    }

    /// Borsh string: u32 length prefix followed by that many UTF-8 bytes.
    pub fn read_string(&mut self) -> Result<String, BinaryReaderError> {
        let length = self.read_u32()? as usize;
        self.check_bounds(length)?;
        let bytes = self.buffer[self.offset..self.offset + length].to_vec();
        self.offset += length;
        String::from_utf8(bytes).map_err(BinaryReaderError::InvalidString)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey, BinaryReaderError> {
        let bytes: [u8; 32] = self
            .read_fixed_array(32)?
            .try_into()
            .expect("fixed array length is 32");
        Ok(Pubkey::new_from_array(bytes))
    }

    /// Borsh `Option<u64>`: u8 flag, payload present only when flag is 1.
    pub fn read_option_u64(&mut self) -> Result<Option<u64>, BinaryReaderError> {
        match self.read_u8()? {
            0 => Ok(None),
            _ => Ok(Some(self.read_u64()?)),
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    fn check_bounds(&self, length: usize) -> Result<(), BinaryReaderError> {
        if self.offset + length > self.buffer.len() {
            return Err(BinaryReaderError::BufferOverflow {
                length,
                offset: self.offset,
                buffer_len: self.buffer.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum BinaryReaderError {
    #[error("buffer overflow: trying to read {length} bytes at offset {offset} from buffer of length {buffer_len}")]
    BufferOverflow {
        length: usize,
        offset: usize,
        buffer_len: usize,
    },
    #[error("failed to read value: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read string: {0}")]
    InvalidString(#[from] std::string::FromUtf8Error),
}
