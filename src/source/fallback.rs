use chrono::{Duration, NaiveDate};
use crate::content::{Game, Project, Record};

fn error_tags() -> Vec<String> {
    vec!["<#729fcf>Error".to_string(), "<#3465a4>Loading".to_string()]
}

fn error_platforms() -> Vec<String> {
    vec!["Windows".to_string(), "macOS".to_string()]
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        title: Some("Error".to_string()),
        description: Some("Error loading projects.json".to_string()),
        link: Some("#".to_string()),
        status: Some("In Development".to_string()),
        platforms: Some(error_platforms()),
        tags: Some(error_tags()),
    }]
}

pub fn games() -> Vec<Game> {
    vec![Game {
        title: Some("Error".to_string()),
        description: Some("Error loading games.json".to_string()),
        link: Some("#".to_string()),
        genre: Some("Adventure".to_string()),
        platforms: Some(error_platforms()),
        tags: Some(error_tags()),
    }]
}

/// Illustrative updates shown while the spreadsheet feed cannot be read,
/// dated relative to `today` and already newest first.
pub fn sample_updates(today: NaiveDate) -> Vec<Record> {
    let entries = [
        (0, "Updates are on their way", "The update feed could not be reached right now. Fresh news will appear here once it is back."),
        (7, "Work in progress", "New projects and games are being built. Check the projects page for what is in development."),
        (14, "Welcome", "This page collects development notes, releases and other news."),
    ];

    entries
        .iter()
        .map(|(days_ago, title, content)| {
            let date = today - Duration::days(*days_ago);
            let mut record = Record::new(&date.format("%Y-%m-%d").to_string(), title, content);
            record.tags = Some("<#729fcf>Sample".to_string());
            record
        })
        .collect()
}
