use anyhow::{bail, Context};
use clap::{Arg, Command};
use folio::content::{parse_delimited, GamesDocument, ProjectsDocument};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Updates,
    Projects,
    Games,
}

impl Kind {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "updates" => Ok(Kind::Updates),
            "projects" => Ok(Kind::Projects),
            "games" => Ok(Kind::Games),
            other => bail!("unknown kind {:?}, expected updates, projects or games", other),
        }
    }

    /// JSON documents are told apart by their top-level key; anything else is a feed.
    fn detect(text: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(value) if value.get("games").is_some() => Kind::Games,
            Ok(value) if value.get("projects").is_some() => Kind::Projects,
            _ => Kind::Updates,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let matches = Command::new("folio-inspect")
        .version("1.0")
        .about("Parse a local source file and print the normalized records as JSON")
        .arg(
            Arg::new("file")
                .required(true)
                .value_name("FILE")
                .help("CSV/TSV update feed, projects.json or games.json")
                .value_parser(clap::value_parser!(PathBuf))
        )
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_name("KIND")
                .help("updates, projects or games (detected when omitted)")
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let path = matches.get_one::<PathBuf>("file").context("missing FILE")?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let kind = match matches.get_one::<String>("kind") {
        Some(kind) => Kind::parse(kind)?,
        None => Kind::detect(&text),
    };
    debug!("Inspecting {} as {:?}", path.display(), kind);

    let output = match kind {
        Kind::Updates => serde_json::to_string_pretty(&parse_delimited(&text))?,
        Kind::Projects => {
            let doc: ProjectsDocument = serde_json::from_str(&text).context("invalid projects document")?;
            serde_json::to_string_pretty(&doc.projects)?
        }
        Kind::Games => {
            let doc: GamesDocument = serde_json::from_str(&text).context("invalid games document")?;
            serde_json::to_string_pretty(&doc.games)?
        }
    };
    println!("{}", output);

    Ok(())
}
