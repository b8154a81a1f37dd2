use folio::{
    config::Config,
    filter::{SearchQuery, StatusFilter},
    site::{BuildOptions, SiteBuilder},
    Result,
};
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{info, error, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("folio-build")
        .version("1.0")
        .about("Render portfolio pages from project, game and update sources")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("status")
                .long("status")
                .value_name("STATUS")
                .help("Only show projects whose status contains this text (default: all)")
        )
        .arg(
            Arg::new("search")
                .long("search")
                .value_name("TERM")
                .help("Highlight games matching this search term")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory, overrides output_dir from the config file")
                .value_parser(clap::value_parser!(PathBuf))
        )
        .get_matches();

    let config_file = matches.get_one::<String>("config")
        .map(|s| s.as_str())
        .unwrap_or("folio.toml");

    let mut config = Config::load(config_file)?;

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.output_dir = Some(output.clone());
    }

    // Initialize logging
    let log_level = match config.loglevel() {
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    let options = BuildOptions {
        status: StatusFilter::parse(matches.get_one::<String>("status").map(|s| s.as_str()).unwrap_or("all")),
        search: SearchQuery::new(matches.get_one::<String>("search").map(|s| s.as_str()).unwrap_or("")),
    };

    let builder = SiteBuilder::from_config(&config)?;
    info!("Building site into {}", builder.output_dir().display());

    let report = match builder.build(&options).await {
        Ok(report) => report,
        Err(e) => {
            error!("Build failed: {}", e);
            std::process::exit(1);
        }
    };

    for (role, reason) in &report.fallbacks {
        warn!("{} used fallback content ({})", role, reason);
    }
    for page in &report.pages {
        println!("{}", page.display());
    }

    Ok(())
}
