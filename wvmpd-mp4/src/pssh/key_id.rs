use crate::Error;
use std::{fmt, str::FromStr};

/// Key id parsed from a `pssh` box.
///
/// `Display` writes the 32 raw hex characters, [`KeyId::uuid`] the grouped
/// 8-4-4-4-12 form used by `cenc:default_KID` attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyId(pub [u8; 16]);

impl KeyId {
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn uuid(&self) -> String {
        let value = hex::encode(self.0);

        format!(
            "{}-{}-{}-{}-{}",
            &value[..8],
            &value[8..12],
            &value[12..16],
            &value[16..20],
            &value[20..]
        )
    }
}

impl From<[u8; 16]> for KeyId {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for KeyId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().replace('-', "");
        let mut key_id = [0_u8; 16];

        hex::decode_to_slice(&value, &mut key_id)
            .map_err(|x| Error::InvalidKeyId(format!("{s} ({x})")))?;
        Ok(Self(key_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KID: &str = "eb676abbcb345e96bbcf616630f1a3da";

    #[test]
    fn test_uuid_grouping() {
        let kid = KID.parse::<KeyId>().unwrap();
        assert_eq!(kid.uuid(), "eb676abb-cb34-5e96-bbcf-616630f1a3da");
        assert_eq!(kid.to_string(), KID);
    }

    #[test]
    fn test_parse_uuid_form() {
        let kid = "EB676ABB-CB34-5E96-BBCF-616630F1A3DA".parse::<KeyId>().unwrap();
        assert_eq!(kid.to_string(), KID);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("eb676abb".parse::<KeyId>().is_err());
        assert!("zz676abbcb345e96bbcf616630f1a3da".parse::<KeyId>().is_err());
    }
}
