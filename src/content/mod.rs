use regex::Regex;
use lazy_static::lazy_static;

pub mod types;
pub mod tag;
pub mod date;
pub mod delimited;
pub mod status;

pub use types::*;
pub use tag::{parse_tag, parse_tag_list, ParsedTag};
pub use date::{format_display_date, parse_date, sort_newest_first};
pub use delimited::{parse_delimited, Delimiter};
pub use status::StatusClass;

lazy_static! {
    static ref TAG_COLOR_REGEX: Regex = Regex::new(r"^<#([0-9A-Fa-f]{3,6})>(.+)$").unwrap();
    static ref ISO_DATE_REGEX: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref YMD_SLASH_REGEX: Regex = Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").unwrap();
    static ref MDY_SLASH_REGEX: Regex = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2}|\d{4})$").unwrap();
}
