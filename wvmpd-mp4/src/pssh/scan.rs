/*
    LAYOUT
    ------

    offset  size  field
    0       4     box size (big endian, counted from offset 0)
    4       4     "pssh"
    8       4     version + flags
    12      16    system id
    28      4     data size
    32      2     widevine key id tag (0x12 0x10)
    34      16    key id

    Offsets in hex text are twice these values (size field 8 characters
    before the signature, key id at character 68).

*/

use super::KeyId;
use crate::{Error, Reader, Result};

const SIGNATURE: &[u8; 4] = b"pssh";
const SIZE_FIELD_LEN: usize = 4;
const SYSTEM_ID_OFFSET: usize = 12;
const KEY_ID_OFFSET: usize = 34;
const KEY_ID_LEN: usize = 16;

/// A `pssh` box located inside a larger buffer.
#[derive(Clone, Debug)]
pub struct ProtectionBox<'a> {
    /// Position of the box start (its size field) in the scanned buffer.
    pub offset: usize,
    data: &'a [u8],
}

impl<'a> ProtectionBox<'a> {
    /// Find the first `pssh` signature in `data` and bound the box around it.
    ///
    /// Boxes using the "extends to end of data" size (0) or a 64-bit size (1)
    /// are reported as malformed, as are boxes too short to hold a key id or
    /// declaring more bytes than `data` has.
    pub fn locate(data: &'a [u8]) -> Result<Self> {
        let signature = data
            .windows(SIGNATURE.len())
            .position(|x| x == SIGNATURE)
            .ok_or(Error::BoxNotFound(data.len()))?;

        let offset = signature
            .checked_sub(SIZE_FIELD_LEN)
            .ok_or_else(|| Error::malformed(signature, "size field is cut off"))?;

        let mut reader = Reader::new_big_endian(data);
        reader.seek(offset as u64)?;
        let size = reader.read_u32()? as usize;

        match size {
            0 => Err(Error::malformed(offset, "box extending to end of data is unsupported")),
            1 => Err(Error::malformed(offset, "64-bit box size is unsupported")),
            x if x < KEY_ID_OFFSET + KEY_ID_LEN => Err(Error::malformed(
                offset,
                format!("declared size {x} is too small to hold a key id"),
            )),
            x if offset + x > data.len() => Err(Error::malformed(
                offset,
                format!(
                    "declared size {x} exceeds the {} available bytes",
                    data.len() - offset
                ),
            )),
            x => Ok(Self {
                offset,
                data: &data[offset..offset + x],
            }),
        }
    }

    /// Declared size of the box in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn system_id(&self) -> Result<[u8; 16]> {
        let mut reader = Reader::new_big_endian(self.data);
        reader.skip(SYSTEM_ID_OFFSET as u64)?;
        Ok(reader.read_array_16()?)
    }

    pub fn key_id(&self) -> Result<KeyId> {
        let mut reader = Reader::new_big_endian(self.data);
        reader.skip(KEY_ID_OFFSET as u64)?;
        Ok(KeyId(reader.read_array_16()?))
    }
}

/// Key id of the first `pssh` box found in an init segment.
pub fn extract_key_id(data: &[u8]) -> Result<KeyId> {
    ProtectionBox::locate(data)?.key_id()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ftyp box followed by a widevine pssh box carrying the key id below
    const INIT_HEX: &str = concat!(
        "0000001866747970697336360000000169736f366d703431",
        "0000003270737368",
        "00000000",
        "edef8ba979d64acea3c827dcd51d21ed",
        "000000121210",
        "63cb5f7184dd4b689a5c5ff11ee6a328",
    );

    #[test]
    fn test_extract_after_other_boxes() {
        let data = hex::decode(INIT_HEX).unwrap();
        let pssh = ProtectionBox::locate(&data).unwrap();
        assert_eq!(pssh.offset, 24);
        assert_eq!(pssh.size(), 50);
        assert_eq!(pssh.as_bytes(), &data[24..]);
        assert_eq!(
            hex::encode(pssh.system_id().unwrap()),
            "edef8ba979d64acea3c827dcd51d21ed"
        );

        let kid = pssh.key_id().unwrap();
        assert_eq!(kid.to_string(), "63cb5f7184dd4b689a5c5ff11ee6a328");
        assert_eq!(kid.uuid(), "63cb5f71-84dd-4b68-9a5c-5ff11ee6a328");
    }

    #[test]
    fn test_not_found() {
        let data = hex::decode("0000001866747970697336360000000169736f366d703431").unwrap();
        assert!(matches!(
            extract_key_id(&data),
            Err(Error::BoxNotFound(24))
        ));
    }

    #[test]
    fn test_truncated_box() {
        let mut data = hex::decode(INIT_HEX).unwrap();
        data.truncate(data.len() - 1);
        assert!(matches!(
            extract_key_id(&data),
            Err(Error::MalformedBox { offset: 24, .. })
        ));
    }

    #[test]
    fn test_size_sentinels_rejected() {
        for size in ["00000000", "00000001"] {
            let data = hex::decode(INIT_HEX.replacen("00000032", size, 1)).unwrap();
            let err = extract_key_id(&data).unwrap_err();
            assert!(matches!(err, Error::MalformedBox { .. }), "{size}: {err}");
        }
    }

    #[test]
    fn test_signature_without_size_field() {
        let data = b"psh\0pssh".to_vec();
        assert!(matches!(
            extract_key_id(&data[4..]),
            Err(Error::MalformedBox { offset: 0, .. })
        ));
    }

    #[test]
    fn test_first_box_wins() {
        let first = hex::decode(INIT_HEX).unwrap();
        let second = hex::decode(INIT_HEX.replace(
            "63cb5f7184dd4b689a5c5ff11ee6a328",
            "eb676abbcb345e96bbcf616630f1a3da",
        ))
        .unwrap();
        let data = [first, second].concat();
        assert_eq!(
            extract_key_id(&data).unwrap().to_string(),
            "63cb5f7184dd4b689a5c5ff11ee6a328"
        );
    }
}
