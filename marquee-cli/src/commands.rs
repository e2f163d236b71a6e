//! CLI command implementations

use std::time::Duration;

use anyhow::Context;
use clap::Subcommand;
use marquee_core::{FetchState, MarqueeConfig, RuntimeMode, debounce_terms};
use marquee_search::{
    DetailLoader, MovieDetailView, MovieSearchService, MovieSummary, SearchController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{info, warn};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Search once; an empty term lists popular movies
    Search {
        /// Search term
        term: Option<String>,
    },
    /// Show the most searched terms
    Trending {
        /// Number of terms to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show one movie with its trailer
    Movie {
        /// TMDB movie id
        id: u64,
    },
    /// Live search: every stdin line is the current search box contents
    Browse {
        /// Quiet period before a term is searched
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the configuration, service or server error of the command that fails
pub async fn handle_command(
    command: Commands,
    mut config: MarqueeConfig,
    mode: RuntimeMode,
) -> anyhow::Result<()> {
    match command {
        Commands::Server { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            start_server(config, mode).await
        }
        Commands::Search { term } => search_once(config, mode, term.unwrap_or_default()).await,
        Commands::Trending { limit } => {
            if let Some(limit) = limit {
                config.search.trending_limit = limit;
            }
            show_trending(config, mode).await
        }
        Commands::Movie { id } => show_movie(config, mode, id).await,
        Commands::Browse { debounce_ms } => {
            if let Some(millis) = debounce_ms {
                config.search.debounce_interval = Duration::from_millis(millis);
            }
            browse(config, mode).await
        }
    }
}

fn build_service(config: &MarqueeConfig, mode: RuntimeMode) -> anyhow::Result<MovieSearchService> {
    config.validate(mode.is_production())?;
    MovieSearchService::from_config(config, mode).context("Failed to build search service")
}

/// Run the web server
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
/// - `MarqueeError::Server` - Server failed to start or crashed
pub async fn start_server(config: MarqueeConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    println!("Starting Marquee web server...");
    println!("URL: http://{}", config.bind_address());
    println!("Mode: {mode} ({})", mode.backends());
    println!("{:-<50}", "");

    marquee_web::run_server(config, mode).await?;
    Ok(())
}

fn print_movies(movies: &[MovieSummary]) {
    if movies.is_empty() {
        println!("No movies found.");
        return;
    }

    for movie in movies {
        println!(
            "{:>8}  {} ({}) - {} - {}",
            movie.id,
            movie.title,
            movie.release_year().unwrap_or("N/A"),
            movie.rating_label(),
            movie.original_language.as_deref().unwrap_or("N/A"),
        );
    }
}

fn print_state(label: &str, state: &FetchState<Vec<MovieSummary>>) {
    match state {
        FetchState::Success(movies) => {
            println!("{label}");
            println!("{:-<60}", "");
            print_movies(movies);
        }
        FetchState::Error(message) => println!("{label}: {message}"),
        FetchState::Idle | FetchState::Loading => {}
    }
}

fn search_label(term: &str) -> String {
    if term.trim().is_empty() {
        "Popular movies".to_string()
    } else {
        format!("Results for \"{}\"", term.trim())
    }
}

/// Run a single search
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
pub async fn search_once(config: MarqueeConfig, mode: RuntimeMode, term: String) -> anyhow::Result<()> {
    let service = build_service(&config, mode)?;

    let outcome = service.search(&term).await;
    print_state(&search_label(&term), &outcome.state);

    if let Some(tracking) = outcome.tracking {
        tracking.await.context("Search tracking task failed")?;
    }
    Ok(())
}

/// Show trending searches
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
pub async fn show_trending(config: MarqueeConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    let service = build_service(&config, mode)?;
    let records = service
        .trending_searches(config.search.trending_limit)
        .await;

    println!("Trending searches");
    println!("{:-<60}", "");
    if records.is_empty() {
        println!("No searches recorded yet.");
    }
    for (rank, record) in records.iter().enumerate() {
        println!(
            "{:>2}. {} ({} searches)",
            rank + 1,
            record.search_term,
            record.count
        );
    }
    Ok(())
}

fn print_detail(view: &MovieDetailView) {
    let movie = &view.movie;

    println!("{}", movie.title);
    if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("\"{tagline}\"");
    }
    println!("{:-<60}", "");
    println!(
        "Rating:   {}/10 ({} votes)",
        movie.rating_label(),
        movie.vote_count
    );
    println!(
        "Released: {}",
        movie.release_date.as_deref().unwrap_or("N/A")
    );
    println!(
        "Runtime:  {}",
        movie.runtime_label().unwrap_or_else(|| "N/A".to_string())
    );
    println!("Genres:   {}", movie.genre_names().join(", "));
    if let Some(overview) = movie.overview.as_deref() {
        println!("\n{overview}\n");
    }
    if let Some(url) = view.trailer.as_ref().and_then(|clip| clip.embed_url()) {
        println!("Trailer:  {url}");
    }
    if let Some(url) = movie.imdb_url() {
        println!("IMDb:     {url}");
    }
}

/// Show one movie
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
pub async fn show_movie(config: MarqueeConfig, mode: RuntimeMode, id: u64) -> anyhow::Result<()> {
    let service = build_service(&config, mode)?;
    let loader = DetailLoader::new(service.catalog());

    match loader.load(id).await {
        FetchState::Success(view) => print_detail(&view),
        FetchState::Error(message) => println!("{message}"),
        FetchState::Idle | FetchState::Loading => {}
    }
    Ok(())
}

/// Live search over stdin
///
/// Lines are fed through the debouncer; each settled term starts a search.
/// Searches may overlap and only the newest one prints its results.
///
/// # Errors
/// - `MarqueeError::Configuration` - Invalid configuration for the mode
/// - `std::io::Error` - Reading stdin failed
pub async fn browse(config: MarqueeConfig, mode: RuntimeMode) -> anyhow::Result<()> {
    let controller = SearchController::new(build_service(&config, mode)?);
    let interval = config.search.debounce_interval;

    println!(
        "Type to search, one line per keystroke snapshot ({}ms debounce). Ctrl+D to quit.",
        interval.as_millis()
    );

    let (input_tx, input_rx) = mpsc::channel(64);
    let mut input_tx = Some(input_tx);
    let mut settled = debounce_terms(input_rx, interval);

    // The initial empty term lists popular movies
    let mut searches = JoinSet::new();
    spawn_search(&mut searches, controller.clone(), String::new());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line(), if input_tx.is_some() => match line? {
                Some(line) => {
                    let delivered = match &input_tx {
                        Some(tx) => tx.send(line).await.is_ok(),
                        None => false,
                    };
                    if !delivered {
                        input_tx = None;
                    }
                }
                // Dropping the sender lets the debouncer flush and finish
                None => input_tx = None,
            },
            term = settled.recv() => match term {
                Some(term) => spawn_search(&mut searches, controller.clone(), term),
                None => break,
            },
        }

        while let Some(finished) = searches.try_join_next() {
            log_task_failure("Search", finished);
        }
    }

    while let Some(finished) = searches.join_next().await {
        log_task_failure("Search", finished);
    }
    info!("Browse session finished");
    Ok(())
}

fn spawn_search(searches: &mut JoinSet<()>, controller: SearchController, term: String) {
    searches.spawn(async move {
        let report = controller.run(&term).await;
        if report.applied {
            print_state(&search_label(&term), &report.state);
        }
        if let Some(tracking) = report.tracking {
            log_task_failure("Search tracking", tracking.await);
        }
    });
}

fn log_task_failure(task: &str, result: Result<(), JoinError>) {
    if let Err(e) = result {
        warn!(task, error = %e, "Background task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_label() {
        assert_eq!(search_label("  "), "Popular movies");
        assert_eq!(search_label(" dune "), "Results for \"dune\"");
    }

    #[tokio::test]
    async fn test_finished_searches_are_reaped_while_browsing() {
        let config = MarqueeConfig::for_testing();
        let service = build_service(&config, RuntimeMode::Development).unwrap();
        let controller = SearchController::new(service);
        let mut searches = JoinSet::new();

        spawn_search(&mut searches, controller.clone(), "dune".to_string());
        searches.spawn(async { panic!("search task crashed") });

        let mut reaped = 0;
        while let Some(finished) = searches.join_next().await {
            log_task_failure("Search", finished);
            reaped += 1;
        }

        assert_eq!(reaped, 2);
        assert!(searches.try_join_next().is_none());
        assert_eq!(controller.state().value().map(Vec::len), Some(1));
    }
}
