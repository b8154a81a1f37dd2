use serde::{Deserialize, Serialize};
use super::TAG_COLOR_REGEX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTag {
    pub color: Option<String>,
    pub text: String,
}

/// Decode a tag token of the form `<#RRGGBB>Label` (or `<#RGB>Label`).
///
/// The label is trimmed whether or not a color marker is present. The hex
/// digits are not checked against real CSS color lengths, so `<#abcd>` yields
/// `#abcd`.
pub fn parse_tag(tag: &str) -> ParsedTag {
    if let Some(cap) = TAG_COLOR_REGEX.captures(tag) {
        return ParsedTag {
            color: Some(format!("#{}", &cap[1])),
            text: cap[2].trim().to_string(),
        };
    }

    ParsedTag {
        color: None,
        text: tag.trim().to_string(),
    }
}

/// Split a raw tags field from the updates feed on `,` or `;` and decode each token.
pub fn parse_tag_list(raw: &str) -> Vec<ParsedTag> {
    raw.split([',', ';'])
        .map(|token| parse_tag(token.trim()))
        .filter(|tag| !tag.text.is_empty())
        .collect()
}
