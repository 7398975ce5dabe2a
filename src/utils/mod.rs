pub mod constants;
pub mod timeout;
pub mod url_utils;

pub use constants::*;
pub use timeout::with_timeout;
pub use url_utils::{comments_json_url, listing_url, permalink_url};
