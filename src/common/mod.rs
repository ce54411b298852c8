pub mod constants;
pub mod time_utils;

pub use constants::*;
pub use time_utils::{current_timestamp, parse_iso_timestamp, to_iso_timestamp};
