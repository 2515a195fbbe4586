//! Bindu terminal entry point.

use std::io::Write;
use std::sync::Arc;

use bindu_core::clock::SystemClock;
use bindu_core::rng::{DeterministicRng, StdRandom};
use bindu_narrative::content::bundled_store;
use bindu_session::application::command_handlers::SessionMachine;
use bindu_session::application::query_handlers::SessionView;
use bindu_session::application::runtime::{SessionHandle, spawn_session};
use bindu_session::domain::timings::TokenTemplate;
use bindu_terminal::config::TerminalConfig;
use bindu_terminal::controls::{Control, HELP, parse_control};
use bindu_terminal::error::AppError;
use bindu_terminal::ledger::InMemoryLedger;
use bindu_terminal::render::{render, state_report};
use bindu_terminal::wallet::LocalWallet;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr; stdout belongs to the session.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!("Starting Bindu terminal");

    let config = TerminalConfig::from_env()?;

    let store = Arc::new(bundled_store()?);
    info!(entries = store.entry_count(), "narrative store loaded");
    let rng: Box<dyn DeterministicRng> = match config.seed {
        Some(seed) => Box::new(StdRandom::seeded(seed)),
        None => Box::new(StdRandom::from_os()),
    };
    let machine = SessionMachine::new(
        store,
        rng,
        Arc::new(SystemClock),
        config.timings.clone(),
        TokenTemplate::default(),
    )?;

    let wallet = Arc::new(LocalWallet::new());
    let ledger = Arc::new(InMemoryLedger::new(config.issue_latency));
    ledger.set_fail_issues(config.issue_fails);

    let session = spawn_session(machine, wallet.clone(), ledger);
    if config.autoconnect {
        wallet.connect(&config.identity);
    }

    let mut views = session.subscribe();
    print_line(HELP)?;
    let initial = views.borrow_and_update().clone();
    print_view(&initial)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print_view(&view)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_control(&line) {
                    Some(Control::Quit) => break,
                    Some(control) => apply_control(control, &wallet, &config, &session)?,
                    None => session.submit_command(line)?,
                }
            }
        }
    }

    session.shutdown().await?;
    info!("Bindu terminal stopped");
    Ok(())
}

fn apply_control(
    control: Control,
    wallet: &LocalWallet,
    config: &TerminalConfig,
    session: &SessionHandle,
) -> Result<(), AppError> {
    match control {
        Control::Connect(id) => wallet.connect(id.as_deref().unwrap_or(&config.identity)),
        Control::Disconnect => wallet.disconnect(),
        Control::Approve => {
            wallet.set_approve(true);
            print_line("[portefeuille : signatures approuvées]")?;
        }
        Control::Decline => {
            wallet.set_approve(false);
            print_line("[portefeuille : signatures refusées]")?;
        }
        Control::State => {
            let report = state_report(&session.view(), wallet)?;
            print_line(&serde_json::to_string_pretty(&report)?)?;
        }
        Control::Unknown(text) => print_line(&format!("[commande de terminal inconnue : /{text}]"))?,
        Control::Quit => {}
    }
    Ok(())
}

fn print_view(view: &SessionView) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    write!(out, "\n{}", render(view))?;
    out.flush()?;
    Ok(())
}

fn print_line(text: &str) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}")?;
    out.flush()?;
    Ok(())
}
