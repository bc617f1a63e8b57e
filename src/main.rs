// src/main.rs
//
// Terminal front-end: stdin lines drive the session, a renderer task prints
// every state change.

use anyhow::Context;
use env_logger::Env;
use tokio::io::{AsyncBufReadExt, BufReader};

use moviescout::application::commands::HELP;
use moviescout::application::{render, render_trending, resolve_genre, AppState, Command};
use moviescout::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. ENVIRONMENT
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("moviescout=info"))
        .target(env_logger::Target::Stderr)
        .init();

    // 2. CONFIGURATION & WIRING
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let state = AppState::initialize(config).context("Failed to initialize application")?;
    let session = state.session.clone();
    let image_base_url = state.config.tmdb.image_base_url.clone();

    // 3. RENDERER
    let mut updates = session.subscribe();
    let renderer = {
        let image_base_url = image_base_url.clone();
        tokio::spawn(async move {
            while updates.changed().await.is_ok() {
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", render(&snapshot, &image_base_url));
            }
        })
    };

    // 4. STARTUP LOADS
    println!("{}", HELP);
    session.start().await.context("Failed to start session")?;

    // 5. INPUT LOOP
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match Command::parse(&line) {
            Command::Query(text) => session.type_query(&text),
            Command::Genre(arg) => {
                let genres = session.snapshot().genres;
                match resolve_genre(&arg, &genres) {
                    Some(id) => {
                        let _ = session.toggle_genre(id);
                    }
                    None => println!("Unknown genre '{}'", arg),
                }
            }
            Command::Trending => {
                let text = render_trending(&session.snapshot());
                if text.is_empty() {
                    println!("No trending searches yet.");
                } else {
                    print!("{}", text);
                }
            }
            Command::State => println!("{}", render(&session.snapshot(), &image_base_url)),
            Command::Json => {
                let json = serde_json::to_string_pretty(&session.snapshot())
                    .context("Failed to serialize state")?;
                println!("{}", json);
            }
            Command::Stats => match state.database_stats() {
                Ok(Some(stats)) => println!(
                    "{} search terms, {} searches, {} bytes",
                    stats.counter_count, stats.total_searches, stats.size_bytes
                ),
                Ok(None) => println!("Search counters are stored remotely."),
                Err(e) => log::warn!("Failed to read counter store stats: {}", e),
            },
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(input) => println!("Unknown command '{}' (:help lists commands)", input),
        }
    }

    // 6. SHUTDOWN
    session.shutdown().await;
    renderer.abort();
    log::debug!("{} events emitted", state.event_bus.get_event_log().len());

    Ok(())
}
