pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{content_api_root, is_valid_url, resolve_continuation, slash_join};
