mod fetch;
mod locator;
mod rewrite;
mod template;
mod window;

use template::Template;

pub use fetch::{Manifest, fetch_key_id, fetch_manifest};
pub use locator::init_segment_url;
pub use rewrite::{SEGMENT_PATH, absolutize_segment_paths, insert_widevine, rewrite};
pub use window::{LiveWindow, format_timestamp};
