//! Mp4 `PSSH` box scanner and Widevine `PSSH` builder.

mod key_id;
mod scan;
mod widevine;

pub use key_id::KeyId;
pub use scan::{ProtectionBox, extract_key_id};
pub use widevine::{WIDEVINE_SYSTEM_ID, WidevinePssh, WidevinePsshData};
