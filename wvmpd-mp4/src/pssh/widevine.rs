use super::KeyId;
use base64::Engine;
use prost::Message;

/// Widevine system id (`edef8ba9-79d6-4ace-a3c8-27dcd51d21ed`).
pub const WIDEVINE_SYSTEM_ID: [u8; 16] = [
    0xed, 0xef, 0x8b, 0xa9, 0x79, 0xd6, 0x4a, 0xce, 0xa3, 0xc8, 0x27, 0xdc, 0xd5, 0x1d, 0x21, 0xed,
];

// size + type + version/flags + system id + data size
const HEADER_LEN: usize = 32;

/// Data block of a Widevine `pssh` box, reduced to the only field written here.
#[derive(Clone, PartialEq, Message)]
pub struct WidevinePsshData {
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub key_ids: Vec<Vec<u8>>,
}

/// A version 0 Widevine `pssh` box carrying exactly one key id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidevinePssh {
    key_id: KeyId,
    data: Vec<u8>,
}

impl WidevinePssh {
    pub fn new(key_id: KeyId) -> Self {
        let pssh_data = WidevinePsshData {
            key_ids: vec![key_id.as_bytes().to_vec()],
        }
        .encode_to_vec();
        let size = HEADER_LEN + pssh_data.len();

        let mut data = Vec::with_capacity(size);
        data.extend_from_slice(&(size as u32).to_be_bytes());
        data.extend_from_slice(b"pssh");
        data.extend_from_slice(&0_u32.to_be_bytes());
        data.extend_from_slice(&WIDEVINE_SYSTEM_ID);
        data.extend_from_slice(&(pssh_data.len() as u32).to_be_bytes());
        data.extend_from_slice(&pssh_data);

        Self { key_id, data }
    }

    pub fn key_id(&self) -> KeyId {
        self.key_id
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Standard (padded) base64 of the whole box, as written inside `<cenc:pssh>`.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_layout() {
        let kid = "63cb5f7184dd4b689a5c5ff11ee6a328".parse::<KeyId>().unwrap();
        let pssh = WidevinePssh::new(kid);

        assert_eq!(
            hex::encode(pssh.as_bytes()),
            "000000327073736800000000edef8ba979d64acea3c827dcd51d21ed00000012121063cb5f7184dd4b689a5c5ff11ee6a328"
        );
        assert_eq!(pssh.as_bytes().len(), 50);
    }

    #[test]
    fn test_base64() {
        let pssh = WidevinePssh::new(KeyId([0; 16]));
        assert_eq!(
            pssh.to_base64(),
            "AAAAMnBzc2gAAAAA7e+LqXnWSs6jyCfc1R0h7QAAABISEAAAAAAAAAAAAAAAAAAAAAA="
        );
    }

    #[test]
    fn test_data_block_decodes() {
        let kid = KeyId([0xab; 16]);
        let pssh = WidevinePssh::new(kid);
        let data = WidevinePsshData::decode(&pssh.as_bytes()[HEADER_LEN..]).unwrap();
        assert_eq!(data.key_ids, vec![kid.as_bytes().to_vec()]);
    }
}
