//! StudyDeck command-line client
//!
//! `studydeck <summary|flashcards> <files...>`
//!
//! Checks the session, uploads the given files and prints the generated
//! artifact for the last successful upload.

use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use studydeck_client::application::services::{AccountService, AuthGate, FetchState};
use studydeck_client::application::Workspace;
use studydeck_client::infrastructure::platform::create_platform;
use studydeck_client::infrastructure::{load_raw_file, ClientConfig, HttpDocumentClient};
use studydeck_client::ports::outbound::DocumentApiPort;
use studydeck_client::Route;
use studydeck_domain::{ArtifactKind, AuthState, DerivedArtifact, FlashcardDeck};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: studydeck <summary|flashcards> <files...>";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studydeck_client=debug,studydeck_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = env::args().skip(1);
    let route = match args.next().as_deref() {
        Some("summary") => Route::Summary,
        Some("flashcards") => Route::Flashcards,
        _ => bail!(USAGE),
    };
    let paths: Vec<String> = args.collect();
    if paths.is_empty() {
        bail!(USAGE);
    }

    let config = ClientConfig::from_env().context("Invalid configuration")?;
    tracing::info!(base_url = %config.api_base_url, route = %route, "Starting StudyDeck client");

    let platform = create_platform(&config, route.path());
    let api: Arc<dyn DocumentApiPort> = Arc::new(HttpDocumentClient::new(
        config.api_base_url.clone(),
        config.request_timeout,
        platform.storage.clone(),
    ));

    let accounts = AccountService::new(
        api.clone(),
        platform.storage.clone(),
        platform.navigator.clone(),
    );
    if let (Ok(username), Ok(password)) = (
        env::var("STUDYDECK_USERNAME"),
        env::var("STUDYDECK_PASSWORD"),
    ) {
        accounts.login(&username, &password).await?;
    }

    let gate = AuthGate::new(
        api.clone(),
        platform.sleep.clone(),
        platform.navigator.clone(),
    )
    .with_min_display_ms(config.auth_min_display_ms);
    eprintln!("{}", AuthState::Checking.display_text());
    if gate.enter(route).await == AuthState::Denied {
        let notice = accounts.lock();
        bail!("{} (log in at {})", notice.message, notice.login_path);
    }

    let kind = match route {
        Route::Flashcards => ArtifactKind::Flashcards,
        _ => ArtifactKind::Summary,
    };
    let mut workspace = Workspace::new(
        kind,
        config.upload_rules.clone(),
        api,
        platform.previews.clone(),
    );
    workspace.start_following();

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        files.push(load_raw_file(path).await?);
    }
    workspace.intake().add(files)?;
    for message in workspace.intake().errors().messages() {
        eprintln!("{message}");
    }
    for file in workspace.intake().files() {
        eprintln!("{} ({})", file.name, file.formatted_size);
    }

    let report = workspace.orchestrator().submit().await?;
    for (filename, message) in report.errors().iter() {
        eprintln!("{filename}: {message}");
    }
    if report.last_saved_as.is_none() {
        bail!("No file was uploaded");
    }

    match workspace.fetcher().settled().await {
        FetchState::Loaded { artifact, .. } => print_artifact(artifact),
        FetchState::Errored { reason, .. } => bail!(reason),
        FetchState::Idle | FetchState::Loading { .. } => bail!("No {} available", kind.label()),
    }
    Ok(())
}

fn print_artifact(artifact: DerivedArtifact) {
    match artifact {
        DerivedArtifact::SummaryText(markdown) => println!("{markdown}"),
        DerivedArtifact::FlashcardSet(cards) => {
            let mut deck = FlashcardDeck::new(cards);
            if deck.is_empty() {
                println!("No flashcards generated");
                return;
            }
            loop {
                if let Some(question) = deck.face() {
                    println!("[{}] {question}", deck.position());
                }
                deck.flip();
                if let Some(answer) = deck.face() {
                    println!("      {answer}");
                }
                if !deck.can_go_forward() {
                    break;
                }
                deck.next();
            }
        }
    }
}
