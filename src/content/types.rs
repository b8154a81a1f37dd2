use serde::{Deserialize, Serialize};
use super::{parse_tag, parse_tag_list, ParsedTag};

/// One row of the updates feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub date: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl Record {
    pub fn new(date: &str, title: &str, content: &str) -> Self {
        Self {
            date: date.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            image: None,
            tags: None,
        }
    }

    /// Image URL when the image field carries the `@` marker.
    pub fn image_url(&self) -> Option<&str> {
        self.image
            .as_deref()
            .and_then(|raw| raw.trim().strip_prefix('@'))
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn parsed_tags(&self) -> Vec<ParsedTag> {
        self.tags.as_deref().map(parse_tag_list).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Project {
    pub fn parsed_tags(&self) -> Vec<ParsedTag> {
        decode_tags(self.tags.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Game {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Game {
    pub fn parsed_tags(&self) -> Vec<ParsedTag> {
        decode_tags(self.tags.as_deref())
    }
}

fn decode_tags(tags: Option<&[String]>) -> Vec<ParsedTag> {
    tags.unwrap_or_default().iter().map(|t| parse_tag(t)).collect()
}

// Top-level shapes of projects.json and games.json
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsDocument {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamesDocument {
    pub games: Vec<Game>,
}
