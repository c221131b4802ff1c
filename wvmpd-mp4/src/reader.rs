use std::io::{Cursor, Error, ErrorKind, Read, Result};

/// Big endian reader over a borrowed mp4 buffer.
#[derive(Clone)]
pub struct Reader<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> Reader<'a> {
    pub fn new_big_endian(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    pub fn has_more_data(&self) -> bool {
        self.inner.position() < self.get_length()
    }

    pub fn get_length(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    pub fn get_position(&self) -> u64 {
        self.inner.position()
    }

    pub fn seek(&mut self, position: u64) -> Result<()> {
        if position > self.get_length() {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                "Reader seeks out of memory bounds.",
            ));
        }

        self.inner.set_position(position);
        Ok(())
    }

    pub fn skip(&mut self, bytes: u64) -> Result<()> {
        self.seek(self.get_position() + bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read_array_16(&mut self) -> Result<[u8; 16]> {
        let mut buf = [0; 16];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_big_endian() {
        let mut reader = Reader::new_big_endian(&[0x00, 0x00, 0x00, 0x32, 0xff]);
        assert_eq!(reader.read_u32().unwrap(), 50);
        assert_eq!(reader.get_position(), 4);
        assert!(reader.has_more_data());
    }

    #[test]
    fn test_skip_out_of_bounds() {
        let mut reader = Reader::new_big_endian(&[0; 4]);
        assert!(reader.skip(5).is_err());
        assert!(reader.skip(4).is_ok());
        assert!(!reader.has_more_data());
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = Reader::new_big_endian(&[1, 2, 3]);
        assert!(reader.read_u32().is_err());
    }
}
