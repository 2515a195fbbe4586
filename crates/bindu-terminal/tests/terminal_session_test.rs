//! Session runtime wired to the local wallet and the in-memory ledger.

use std::sync::Arc;
use std::time::Duration;

use bindu_core::clock::SystemClock;
use bindu_core::rng::StdRandom;
use bindu_narrative::content::bundled_store;
use bindu_session::application::command_handlers::SessionMachine;
use bindu_session::application::query_handlers::SessionView;
use bindu_session::application::runtime::{SessionHandle, spawn_session};
use bindu_session::domain::messages;
use bindu_session::domain::stage::Stage;
use bindu_session::domain::timings::TokenTemplate;
use bindu_terminal::config::TerminalConfig;
use bindu_terminal::ledger::InMemoryLedger;
use bindu_terminal::render::render;
use bindu_terminal::wallet::LocalWallet;
use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

fn start(
    wallet: &Arc<LocalWallet>,
    ledger: &Arc<InMemoryLedger>,
) -> (SessionHandle, watch::Receiver<SessionView>) {
    let config = TerminalConfig::from_lookup(|_| None).unwrap();
    let machine = SessionMachine::new(
        Arc::new(bundled_store().unwrap()),
        Box::new(StdRandom::seeded(7)),
        Arc::new(SystemClock),
        config.timings,
        TokenTemplate::default(),
    )
    .unwrap();
    let handle = spawn_session(machine, wallet.clone(), ledger.clone());
    let view = handle.subscribe();
    (handle, view)
}

async fn wait_for_stage(view: &mut watch::Receiver<SessionView>, stage: Stage) -> SessionView {
    view.wait_for(|v| v.stage == stage).await.unwrap().clone()
}

#[tokio::test(start_paused = true)]
async fn test_minted_token_is_destroyed_on_the_ledger_after_twenty_seconds() {
    // Arrange
    let wallet = Arc::new(LocalWallet::new());
    let ledger = Arc::new(InMemoryLedger::default());
    let (handle, mut view) = start(&wallet, &ledger);
    wallet.connect("initie");
    wait_for_stage(&mut view, Stage::AwaitingAwaken).await;
    handle.submit_command("  AWAKEN ").unwrap();
    wait_for_stage(&mut view, Stage::AwaitingChoice).await;

    // Act
    let chosen_at = Instant::now();
    handle.submit_command("2").unwrap();
    view.wait_for(|v| v.minted_token.is_some()).await.unwrap();

    // Assert
    assert_eq!(ledger.live_tokens().unwrap(), 1);
    sleep_until(chosen_at + Duration::from_secs(19)).await;
    assert_eq!(ledger.live_tokens().unwrap(), 1);
    sleep_until(chosen_at + Duration::from_secs(21)).await;
    assert_eq!(ledger.live_tokens().unwrap(), 0);

    let reset = wait_for_stage(&mut view, Stage::AwaitingAwaken).await;
    assert!(reset.minted_token.is_none());
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_declined_wallet_leaves_session_awaiting_awaken() {
    // Arrange
    let wallet = Arc::new(LocalWallet::new());
    let ledger = Arc::new(InMemoryLedger::default());
    let (handle, mut view) = start(&wallet, &ledger);
    wallet.connect("initie");
    wait_for_stage(&mut view, Stage::AwaitingAwaken).await;
    wallet.set_approve(false);

    // Act
    handle.submit_command("awaken").unwrap();
    let rejected = view
        .wait_for(|v| v.display_text == messages::SYNCHRONIZATION_REJECTED)
        .await
        .unwrap()
        .clone();

    // Assert
    assert_eq!(rejected.stage, Stage::AwaitingAwaken);
    assert!(render(&rejected).ends_with("> "));
    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refusing_ledger_reports_failure_and_still_resets() {
    // Arrange
    let wallet = Arc::new(LocalWallet::new());
    let ledger = Arc::new(InMemoryLedger::default());
    ledger.set_fail_issues(true);
    let (handle, mut view) = start(&wallet, &ledger);
    wallet.connect("initie");
    wait_for_stage(&mut view, Stage::AwaitingAwaken).await;
    handle.submit_command("awaken").unwrap();
    wait_for_stage(&mut view, Stage::AwaitingChoice).await;

    // Act
    handle.submit_command("1").unwrap();
    view.wait_for(|v| v.display_text.ends_with(messages::TOKEN_FAILED))
        .await
        .unwrap();
    let hiatus = wait_for_stage(&mut view, Stage::Hiatus).await;

    // Assert
    assert!(render(&hiatus).contains("[...20s...]"));
    wait_for_stage(&mut view, Stage::AwaitingAwaken).await;
    assert_eq!(ledger.live_tokens().unwrap(), 0);
    handle.shutdown().await.unwrap();
}
