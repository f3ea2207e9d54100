// SPDX-License-Identifier: MIT
// Copyright 2026 Alerta Contributors

//! Alerta CLI
//!
//! Exercises the client core from a terminal: log in, check session state,
//! fire a test panic alert, list contacts and entities. The location fix
//! and push token come from the environment (`ALERTA_FIX_LATITUDE`,
//! `ALERTA_FIX_LONGITUDE`, `ALERTA_PUSH_TOKEN`).

use alerta_client::{
    config::Config,
    models::Coordinates,
    services::{
        FixedLocationProvider, LocationError, LocationProvider, StaticTokenSource, TriggerOutcome,
    },
    store::FileStore,
    AppCore,
};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alerta", about = "Alerta personal-safety client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Authenticate and persist the session
    Login { email: String, password: String },
    /// Clear the persisted session
    Logout,
    /// Show session and push token state
    Status,
    /// Fire a panic alert from the configured fix position
    Panic,
    /// List emergency contacts
    Contacts,
    /// List subscribable safety entities
    Entities,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let storage = Arc::new(FileStore::open(config.state_dir.clone())?);
    let location = fix_from_env();
    let push_source = Arc::new(StaticTokenSource::new(
        std::env::var("ALERTA_PUSH_TOKEN").unwrap_or_default(),
    ));

    let core = AppCore::new(config, storage, location, push_source)?;

    match cli.command {
        Command::Login { email, password } => {
            let user = core.login(&email, &password).await?;
            println!("Logged in as {} <{}>", user.name, user.email);

            // One-shot process: sync the push token here instead of
            // spawning the session watcher.
            if std::env::var("ALERTA_PUSH_TOKEN").is_ok() {
                core.push.on_session_start().await?;
            }
        }
        Command::Logout => {
            core.logout()?;
            println!("Logged out");
        }
        Command::Status => match core.session.current() {
            Some(session) => {
                println!("Logged in as {} <{}>", session.user.name, session.user.email);
                if let Some(neighborhood) = &session.user.neighborhood_id {
                    println!("Neighborhood: {}", neighborhood);
                }
                match core.push.persisted_token()? {
                    Some(token) => println!("Push token: {}", token),
                    None => println!("Push token: (none)"),
                }
            }
            None => println!("Not logged in"),
        },
        Command::Panic => match core.dispatcher.trigger().await {
            TriggerOutcome::Sent => println!("Alert sent"),
            TriggerOutcome::Ignored => println!("Alert already in progress"),
            TriggerOutcome::Failed(e) => {
                eprintln!("Alert failed: {}", e);
                std::process::exit(1);
            }
        },
        Command::Contacts => {
            for contact in core.gateway.contacts().await? {
                println!("{} ({}) -> {}", contact.alias, contact.relationship, contact.contact_user);
            }
        }
        Command::Entities => {
            for entity in core.gateway.entities().await? {
                println!("{} [{}]", entity.name, entity.kind);
            }
        }
    }

    Ok(())
}

/// Provider used when no fix position is configured: fails on use, not at
/// startup, so commands that never need a location still work.
struct MissingFixProvider;

#[async_trait]
impl LocationProvider for MissingFixProvider {
    async fn current_coordinates(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable(
            "ALERTA_FIX_LATITUDE / ALERTA_FIX_LONGITUDE not set".to_string(),
        ))
    }
}

/// Fix position from the environment; the CLI has no GPS of its own.
fn fix_from_env() -> Arc<dyn LocationProvider> {
    match (parse_degrees("ALERTA_FIX_LATITUDE"), parse_degrees("ALERTA_FIX_LONGITUDE")) {
        (Some(latitude), Some(longitude)) => {
            Arc::new(FixedLocationProvider::from_position(latitude, longitude))
        }
        _ => Arc::new(MissingFixProvider),
    }
}

fn parse_degrees(var: &str) -> Option<f64> {
    std::env::var(var).ok()?.parse().ok()
}

/// Initialize logging with env-filter control.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("alerta_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
