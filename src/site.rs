use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{error, info, warn};
use crate::config::Config;
use crate::filter::{SearchQuery, StatusFilter};
use crate::render::cards::{error_message, render_error};
use crate::render::{mount, render_games, render_projects, render_updates, ContainerRole, Node};
use crate::source::{FallbackReason, HttpFetcher, LoadOutcome, RecordLoader};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub status: StatusFilter,
    pub search: SearchQuery,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages: Vec<PathBuf>,
    pub fallbacks: Vec<(ContainerRole, FallbackReason)>,
    pub skipped: Vec<ContainerRole>,
}

/// Loads every configured source, renders it and writes the finished pages.
#[derive(Debug)]
pub struct SiteBuilder {
    loader: RecordLoader,
    projects_url: Option<String>,
    games_url: Option<String>,
    updates_url: Option<String>,
    templates_dir: PathBuf,
    output_dir: PathBuf,
    stagger_ms: u64,
}

impl SiteBuilder {
    pub fn new(config: &Config, loader: RecordLoader) -> Self {
        Self {
            loader,
            projects_url: config.sources.projects.clone(),
            games_url: config.sources.games.clone(),
            updates_url: config.sources.updates.clone(),
            templates_dir: config.templates_dir(),
            output_dir: config.output_dir(),
            stagger_ms: config.stagger_ms(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout())?;
        Ok(Self::new(config, RecordLoader::new(Arc::new(fetcher))))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn build(&self, options: &BuildOptions) -> Result<BuildReport> {
        fs::create_dir_all(&self.output_dir).await?;

        let projects = async {
            match &self.projects_url {
                Some(url) => Some(self.loader.load_projects(url).await),
                None => None,
            }
        };
        let games = async {
            match &self.games_url {
                Some(url) => Some(self.loader.load_games(url).await),
                None => None,
            }
        };
        let updates = async {
            match &self.updates_url {
                Some(url) => Some(self.loader.load_updates(url).await),
                None => None,
            }
        };
        let (projects, games, updates) = tokio::join!(projects, games, updates);

        let mut report = BuildReport::default();

        if let Some(outcome) = projects {
            note_fallback(&mut report, ContainerRole::ProjectGrid, &outcome);
            let nodes = match outcome.as_result() {
                Err(FallbackReason::Shape(_)) => vec![render_error("projects")],
                _ => render_projects(outcome.records(), &options.status, self.stagger_ms),
            };
            self.write_page(&mut report, ContainerRole::ProjectGrid, &nodes).await?;
        }

        if let Some(outcome) = games {
            note_fallback(&mut report, ContainerRole::GamesGrid, &outcome);
            let nodes = match outcome.as_result() {
                Err(FallbackReason::Shape(_)) => vec![render_error("games")],
                _ => render_games(outcome.records(), &options.search, self.stagger_ms),
            };
            self.write_page(&mut report, ContainerRole::GamesGrid, &nodes).await?;
        }

        if let Some(outcome) = updates {
            note_fallback(&mut report, ContainerRole::UpdatesContainer, &outcome);
            let mut nodes = render_updates(outcome.records());
            if outcome.is_fallback() {
                nodes.insert(0, error_message("Failed to load updates. Please try again later."));
            }
            self.write_page(&mut report, ContainerRole::UpdatesContainer, &nodes).await?;
        }

        info!(
            "Built {} pages into {} ({} fell back, {} skipped)",
            report.pages.len(),
            self.output_dir.display(),
            report.fallbacks.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    async fn write_page(&self, report: &mut BuildReport, role: ContainerRole, nodes: &[Node]) -> Result<()> {
        let template_path = self.templates_dir.join(role.template_file());
        let template = match fs::read_to_string(&template_path).await {
            Ok(template) => template,
            Err(e) => {
                error!("Cannot read template {}: {}", template_path.display(), e);
                report.skipped.push(role);
                return Ok(());
            }
        };

        let page = match mount(&template, role, nodes) {
            Ok(page) => page,
            Err(Error::NotFound(what)) => {
                error!("Skipping {}: {} not found", template_path.display(), what);
                report.skipped.push(role);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let out_path = self.output_dir.join(role.template_file());
        if let Err(e) = fs::write(&out_path, page).await {
            error!("Cannot write {}: {}", out_path.display(), e);
            report.skipped.push(role);
            return Ok(());
        }
        info!("Wrote {}", out_path.display());
        report.pages.push(out_path);
        Ok(())
    }
}

fn note_fallback<T>(report: &mut BuildReport, role: ContainerRole, outcome: &LoadOutcome<T>) {
    if let Some(reason) = outcome.fallback_reason() {
        warn!("{} is showing fallback content: {}", role, reason);
        report.fallbacks.push((role, reason.clone()));
    }
}
