use crate::content::{format_display_date, Game, ParsedTag, Project, Record, StatusClass};
use crate::filter::{filter_by_status, SearchMatch, SearchQuery, StatusFilter};
use super::view::{Element, Node};

fn paragraph(class: &str, text: &str) -> Node {
    Element::new("div")
        .class(class)
        .child(Element::new("p").text(text))
        .into()
}

pub fn empty_message(text: &str) -> Node {
    paragraph("empty-message", text)
}

pub fn error_message(text: &str) -> Node {
    Element::new("div")
        .class("error-message")
        .child(Element::new("i").class("fas fa-exclamation-circle"))
        .text(format!(" {}", text))
        .into()
}

/// Placeholder for a grid whose page could not be produced.
pub fn render_error(kind: &str) -> Node {
    paragraph("empty-message", &format!("Error loading {}. Please try again later.", kind))
}

pub fn search_message(term: &str) -> Node {
    paragraph(
        "search-message",
        &format!("No exact matches for \"{}\". Showing all games.", term),
    )
}

fn tag_view(tag: &ParsedTag) -> Node {
    let mut el = Element::new("span").class("tag");
    if let Some(color) = &tag.color {
        el = el
            .style("background-color", color.as_str())
            .style("border-color", color.as_str())
            .style("color", "white");
    }
    el.text(tag.text.as_str()).into()
}

fn tags_view(tags: &[ParsedTag]) -> Option<Node> {
    if tags.is_empty() {
        return None;
    }
    Some(
        Element::new("div")
            .class("project-tags")
            .children(tags.iter().map(tag_view))
            .into(),
    )
}

fn platforms_view(platforms: Option<&[String]>) -> Option<Node> {
    let platforms = platforms?;
    Some(
        Element::new("div")
            .class("project-platforms")
            .children(
                platforms
                    .iter()
                    .map(|p| Node::from(Element::new("span").class("platform").text(p.as_str()))),
            )
            .into(),
    )
}

fn reveal_delay(index: usize, stagger_ms: u64) -> u64 {
    u64::try_from(index).unwrap_or(u64::MAX).saturating_mul(stagger_ms)
}

/// Wrap card content in the shared frame: inner panel, background and corner decorations.
fn card_frame(classes: &str, index: usize, stagger_ms: u64, content: Vec<Node>) -> Element {
    let corners = ["top-left", "top-right", "bottom-left", "bottom-right"]
        .into_iter()
        .map(|corner| Node::from(Element::new("div").class("card-decoration").class(corner)));

    Element::new("div")
        .class(classes)
        .attr("data-reveal-delay", reveal_delay(index, stagger_ms).to_string())
        .child(
            Element::new("div")
                .class("card-inner")
                .child(Element::new("div").class("card-accent"))
                .child(Element::new("div").class("card-content").children(content)),
        )
        .child(Element::new("div").class("card-bg"))
        .children(corners)
}

pub fn project_card(project: &Project, index: usize, stagger_ms: u64) -> Node {
    let mut header = Element::new("div").class("project-header");
    if let Some(status) = &project.status {
        let mut badge = Element::new("span").class("project-status");
        if let Some(class) = StatusClass::from_status(status) {
            badge = badge.class(class.css_class());
        }
        header = header.child(badge.text(status.as_str()));
    }

    let mut content: Vec<Node> = vec![
        header.into(),
        Element::new("h3")
            .text(project.title.as_deref().unwrap_or("Untitled Project"))
            .into(),
        Element::new("p")
            .text(project.description.as_deref().unwrap_or("No description available."))
            .into(),
    ];
    content.extend(tags_view(&project.parsed_tags()));
    content.extend(platforms_view(project.platforms.as_deref()));
    content.push(
        Element::new("a")
            .class("project-link")
            .attr("href", project.link.as_deref().unwrap_or("#"))
            .text("Learn More")
            .into(),
    );

    card_frame("project-card", index, stagger_ms, content).into()
}

pub fn game_card(game: &Game, state: SearchMatch, index: usize, stagger_ms: u64) -> Node {
    let mut content: Vec<Node> = vec![
        Element::new("h3")
            .text(game.title.as_deref().unwrap_or("Untitled Game"))
            .into(),
        Element::new("p")
            .text(game.description.as_deref().unwrap_or("No description available."))
            .into(),
    ];
    content.extend(tags_view(&game.parsed_tags()));
    content.extend(platforms_view(game.platforms.as_deref()));
    content.push(
        Element::new("a")
            .class("project-link")
            .attr("href", game.link.as_deref().unwrap_or("#"))
            .text("Play Game")
            .into(),
    );

    let mut card = card_frame("project-card game-card", index, stagger_ms, content);
    if let Some(genre) = &game.genre {
        card = card.attr("data-genre", genre.as_str());
    }
    if let Some(class) = state.css_class() {
        card = card.class(class);
    }
    card.into()
}

pub fn update_card(record: &Record) -> Node {
    let mut card = Element::new("div")
        .class("update-card")
        .child(Element::new("div").class("update-date").text(format_display_date(&record.date)))
        .child(Element::new("h3").class("update-title").text(record.title.as_str()));

    if let Some(url) = record.image_url() {
        card = card.child(
            Element::new("img")
                .class("update-image")
                .attr("src", url)
                .attr("alt", record.title.as_str()),
        );
    }
    card = card.child(Element::new("div").class("update-content").text(record.content.as_str()));
    if let Some(tags) = tags_view(&record.parsed_tags()) {
        card = card.child(tags);
    }
    card.into()
}

/// Contents of the projects grid for the given status filter.
pub fn render_projects(projects: &[Project], filter: &StatusFilter, stagger_ms: u64) -> Vec<Node> {
    if projects.is_empty() {
        return vec![empty_message("No projects available yet. Check back soon!")];
    }

    let filtered = filter_by_status(projects, filter);
    if filtered.is_empty() {
        return vec![Element::new("div")
            .class("empty-message")
            .child(Element::new("p").text(format!(
                "No projects with status \"{}\" found.",
                filter.value()
            )))
            .child(
                Element::new("button")
                    .class("reset-filter-btn")
                    .attr("data-filter", "all")
                    .text("Show all projects"),
            )
            .into()];
    }

    filtered
        .into_iter()
        .enumerate()
        .map(|(index, project)| project_card(project, index, stagger_ms))
        .collect()
}

/// Contents of the games grid. Non-matching games stay visible but are marked
/// `search-no-match`.
pub fn render_games(games: &[Game], query: &SearchQuery, stagger_ms: u64) -> Vec<Node> {
    if games.is_empty() {
        return vec![empty_message("No games available yet. Check back soon!")];
    }

    let mut any_match = false;
    let mut nodes: Vec<Node> = games
        .iter()
        .enumerate()
        .map(|(index, game)| {
            let state = query.classify(game);
            any_match |= state == SearchMatch::Match;
            game_card(game, state, index, stagger_ms)
        })
        .collect();

    if query.is_active() && !any_match {
        nodes.insert(0, search_message(query.term()));
    }
    nodes
}

/// Contents of the updates container, in the order given.
pub fn render_updates(updates: &[Record]) -> Vec<Node> {
    if updates.is_empty() {
        return vec![Element::new("div")
            .class("no-updates")
            .text("No updates available at the moment. Check back soon!")
            .into()];
    }
    updates.iter().map(update_card).collect()
}
