use super::Manifest;
use crate::filter::FilterRule;
use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use wvmpd_mp4::pssh::WidevinePssh;

/// Relative path prefix of every media reference in upstream manifests.
pub const SEGMENT_PATH: &str = "dash/";

const CENC_PLACEHOLDER: &str =
    r#"<ContentProtection value="cenc" schemeIdUri="urn:mpeg:dash:mp4protection:2011"/>"#;
const PLAYREADY_PLACEHOLDER: &str = r#"<ContentProtection schemeIdUri="urn:uuid:9a04f079-9840-4286-ab92-e65be0885f95" value="PlayReady"/>"#;
const WIDEVINE_SCHEME_ID_URI: &str = "urn:uuid:EDEF8BA9-79D6-4ACE-A3C8-27DCD51D21ED";

// "dash/" opening an attribute value or element text
static RELATIVE_SEGMENT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r#"(["'>]){SEGMENT_PATH}"#)).unwrap());

/// Produce the manifest served downstream.
///
/// Every step is an exact text substitution; a step whose target text is
/// missing leaves the manifest as it is.
pub fn rewrite(manifest: &Manifest, pssh: Option<&WidevinePssh>, filter: Option<&FilterRule>) -> String {
    let mut text = absolutize_segment_paths(&manifest.text, &manifest.origin());

    if let Some(pssh) = pssh {
        text = insert_widevine(&text, pssh);
    }

    if let Some(filter) = filter {
        text = filter.apply(&text);
    }

    text
}

/// Anchor relative `dash/` media references at `origin`.
pub fn absolutize_segment_paths(text: &str, origin: &str) -> String {
    RELATIVE_SEGMENT_PATH
        .replace_all(text, |caps: &Captures| format!("{}{origin}/{SEGMENT_PATH}", &caps[1]))
        .into_owned()
}

/// Swap the bare `cenc` and PlayReady placeholders for elements carrying the
/// key id and the Widevine `pssh` box.
pub fn insert_widevine(text: &str, pssh: &WidevinePssh) -> String {
    let cenc = format!(
        r#"<ContentProtection schemeIdUri="urn:mpeg:dash:mp4protection:2011" value="cenc" cenc:default_KID="{}"></ContentProtection>"#,
        pssh.key_id().uuid()
    );
    let widevine = format!(
        r#"<ContentProtection schemeIdUri="{WIDEVINE_SCHEME_ID_URI}"><cenc:pssh>{}</cenc:pssh></ContentProtection>"#,
        pssh.to_base64()
    );

    let mut text = text.to_owned();

    for (placeholder, value) in [(CENC_PLACEHOLDER, cenc), (PLAYREADY_PLACEHOLDER, widevine)] {
        if text.contains(placeholder) {
            text = text.replace(placeholder, &value);
        } else {
            debug!("Placeholder not found: {}", placeholder);
        }
    }

    text
}
