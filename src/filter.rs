use std::time::{Duration, Instant};
use tracing::debug;
use crate::content::{Game, Project};
use crate::render::view::{Element, Node};
use crate::render::cards::search_message;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Status dropdown value. Exactly `all` disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Contains(String),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            StatusFilter::All
        } else {
            StatusFilter::Contains(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Contains(value) => value,
        }
    }

    pub fn matches(&self, status: Option<&str>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Contains(value) => status
                .unwrap_or_default()
                .to_lowercase()
                .contains(&value.to_lowercase()),
        }
    }
}

pub fn filter_by_status<'a>(projects: &'a [Project], filter: &StatusFilter) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|p| filter.matches(p.status.as_deref()))
        .collect()
}

/// Free-text game search. Matching is case-insensitive containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMatch {
    Inactive,
    Match,
    NoMatch,
}

impl SearchMatch {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            SearchMatch::Inactive => None,
            SearchMatch::Match => Some("search-match"),
            SearchMatch::NoMatch => Some("search-no-match"),
        }
    }
}

impl SearchQuery {
    pub fn new(term: &str) -> Self {
        Self { term: term.trim().to_string() }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty()
    }

    /// True if any of `fields` contains the term.
    pub fn matches_any<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        if !self.is_active() {
            return true;
        }
        let needle = self.term.to_lowercase();
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn classify(&self, game: &Game) -> SearchMatch {
        if !self.is_active() {
            return SearchMatch::Inactive;
        }
        let tags = game.parsed_tags();
        let fields = [
            game.title.as_deref(),
            game.description.as_deref(),
            game.genre.as_deref(),
        ]
        .into_iter()
        .flatten()
        .chain(tags.iter().map(|t| t.text.as_str()));

        if self.matches_any(fields) {
            SearchMatch::Match
        } else {
            SearchMatch::NoMatch
        }
    }
}

/// Re-apply a search to an already rendered games grid without rebuilding it.
///
/// Cards are matched on their rendered title, description, genre and tag
/// text. Any previous search message is replaced. Returns whether any card
/// matched.
pub fn reclassify_games(view: &mut Vec<Node>, query: &SearchQuery) -> bool {
    view.retain(|node| !node.as_element().is_some_and(|el| el.has_class("search-message")));

    let mut match_found = false;
    for card in view
        .iter_mut()
        .filter_map(Node::as_element_mut)
        .filter(|el| el.has_class("game-card"))
    {
        let state = if query.is_active() {
            if card_matches(card, query) {
                SearchMatch::Match
            } else {
                SearchMatch::NoMatch
            }
        } else {
            SearchMatch::Inactive
        };

        card.remove_class("search-match");
        card.remove_class("search-no-match");
        if let Some(class) = state.css_class() {
            card.add_class(class);
        }
        if state != SearchMatch::NoMatch {
            match_found = true;
        }
    }

    if query.is_active() && !match_found {
        view.insert(0, search_message(query.term()));
    }
    debug!("Reclassified games for {:?}, match found: {}", query.term(), match_found);
    match_found
}

fn card_matches(card: &Element, query: &SearchQuery) -> bool {
    let title = card.find_tag("h3").map(Element::text_content).unwrap_or_default();
    let description = card.find_tag("p").map(Element::text_content).unwrap_or_default();
    let genre = card.get_attr("data-genre").unwrap_or_default().to_string();
    let tags: Vec<String> = card.find_by_class("tag").iter().map(|t| t.text_content()).collect();

    query.matches_any(
        [title.as_str(), description.as_str(), genre.as_str()]
            .into_iter()
            .chain(tags.iter().map(String::as_str)),
    )
}

/// Identifies one render request. Only the latest ticket may be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

#[derive(Debug, Default)]
struct Generations {
    latest: u64,
}

impl Generations {
    fn next(&mut self) -> RenderTicket {
        self.latest += 1;
        RenderTicket(self.latest)
    }

    fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// State behind the projects page status dropdown.
#[derive(Debug, Default)]
pub struct ProjectsController {
    filter: StatusFilter,
    generations: Generations,
}

impl ProjectsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &StatusFilter {
        &self.filter
    }

    /// Returns a ticket for a re-render, or `None` when the value did not change.
    pub fn select(&mut self, value: &str) -> Option<RenderTicket> {
        let filter = StatusFilter::parse(value);
        if filter == self.filter {
            return None;
        }
        debug!("Status filter {} -> {}", self.filter.value(), filter.value());
        self.filter = filter;
        Some(self.generations.next())
    }

    pub fn reset(&mut self) -> Option<RenderTicket> {
        self.select("all")
    }

    pub fn begin_render(&mut self) -> RenderTicket {
        self.generations.next()
    }

    /// A render finishing with an older ticket is stale and must be discarded.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generations.is_current(ticket)
    }
}

/// What the games page should do after the search box changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEffect {
    /// Patch the rendered cards in place.
    Reclassify(SearchQuery),
    /// Nothing rendered yet; a full render is due after the debounce.
    Scheduled { due: Instant },
    /// Render the grid now.
    Render(RenderTicket),
    None,
}

/// State behind the games page search box.
#[derive(Debug)]
pub struct GamesController {
    query: SearchQuery,
    input: String,
    pending: Option<(SearchQuery, Instant)>,
    debounce: Duration,
    generations: Generations,
}

impl Default for GamesController {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl GamesController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            query: SearchQuery::default(),
            input: String::new(),
            pending: None,
            debounce,
            generations: Generations::default(),
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn show_clear_button(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn on_input(&mut self, value: &str, cards_rendered: bool, now: Instant) -> SearchEffect {
        self.input = value.to_string();
        let query = SearchQuery::new(value);

        if cards_rendered {
            self.pending = None;
            self.query = query.clone();
            return SearchEffect::Reclassify(query);
        }

        let due = now + self.debounce;
        self.pending = Some((query, due));
        SearchEffect::Scheduled { due }
    }

    /// Fire a debounced search whose deadline has passed.
    pub fn poll_due(&mut self, now: Instant) -> SearchEffect {
        match self.pending.take() {
            Some((query, due)) if due <= now => {
                self.query = query;
                SearchEffect::Render(self.generations.next())
            }
            still_pending => {
                self.pending = still_pending;
                SearchEffect::None
            }
        }
    }

    /// Enter key: apply immediately, rendering only if nothing is shown yet.
    pub fn submit(&mut self, value: &str, cards_rendered: bool) -> SearchEffect {
        self.input = value.to_string();
        self.pending = None;
        self.query = SearchQuery::new(value);
        if cards_rendered {
            SearchEffect::None
        } else {
            SearchEffect::Render(self.generations.next())
        }
    }

    pub fn clear(&mut self) -> SearchEffect {
        self.input.clear();
        self.pending = None;
        self.query = SearchQuery::default();
        SearchEffect::Reclassify(self.query.clone())
    }

    pub fn begin_render(&mut self) -> RenderTicket {
        self.generations.next()
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generations.is_current(ticket)
    }
}
