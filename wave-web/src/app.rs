//! Wave Portal App - Leptos Frontend
//!
//! The root component and the session flows behind each user action:
//! wallet check on mount, connect, refresh, submit, and the scoped
//! `NewWave` subscription.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{WaveForm, WaveList};
use crate::services::portal::{self, NewWaveFilter};
use crate::services::provider;
use crate::state::session::{provide_session_context, SessionContext};
use crate::utils::constants::EVENT_POLL_INTERVAL_MS;
use shared::truncate_address;

#[component]
pub fn App() -> impl IntoView {
    let session = provide_session_context();

    // Adopt an already-authorized account without prompting, once at mount
    spawn_local(check_existing_connection(session));

    // Scoped NewWave subscription: the poll task runs while `watching` is
    // set and uninstalls its provider-side filter when the flag drops.
    // on_cleanup flips it on every exit path so no stale callback outlives
    // the component.
    let watching = Arc::new(AtomicBool::new(true));
    {
        let watching = Arc::clone(&watching);
        spawn_local(watch_new_waves(session, watching));
    }
    on_cleanup(move || watching.store(false, Ordering::Relaxed));

    view! {
        <main class="app-container">
            <div class="card">
                <h1 class="card-title">"\u{1F44B} Hey there!"</h1>
                <p class="subtitle">
                    "Connect your Ethereum wallet and wave at me!"
                </p>
                <p class="wave-count">
                    {move || format!("So far I have received {} waves.", session.wave_count.get())}
                </p>

                <WaveForm/>

                {move || (!session.is_connected()).then(|| view! {
                    <button
                        class="btn btn-connect"
                        on:click=move |_| spawn_local(connect_wallet(session))
                    >
                        "Connect Wallet"
                    </button>
                })}

                {move || {
                    let address = session.wallet.with(|state| state.address().map(truncate_address));
                    address.map(|address| view! {
                        <p class="connected-as">
                            "Connected as " <span class="wave-address">{address}</span>
                        </p>
                    })
                }}

                <WaveList/>
            </div>
        </main>
    }
}

/// Request account access, prompting the user through the wallet.
///
/// Missing provider is the one user-visible failure in the app; a
/// rejection or any other error is logged and the session returns to
/// disconnected.
pub async fn connect_wallet(session: SessionContext) {
    if !provider::is_available() {
        log::warn!("no injected wallet provider");
        alert_missing_wallet();
        return;
    }

    session.set_connecting();
    match provider::request_accounts().await {
        Ok(accounts) if !accounts.is_empty() => {
            log::info!("wallet connected: {}", accounts[0]);
            session.set_connected(accounts[0].clone());
        }
        Ok(_) => {
            log::warn!("wallet returned no accounts");
            session.disconnect();
        }
        Err(err) => {
            log::warn!("wallet connection failed: {err}");
            session.disconnect();
        }
    }
}

/// Query already-authorized accounts without prompting. If one exists,
/// adopt it and run one full state refresh (count + list). Silent on
/// failure.
pub async fn check_existing_connection(session: SessionContext) {
    if !provider::is_available() {
        log::info!("no injected wallet provider");
        return;
    }

    session.set_connecting();
    match provider::authorized_accounts().await {
        Ok(accounts) if !accounts.is_empty() => {
            log::info!("found an authorized account: {}", accounts[0]);
            session.set_connected(accounts[0].clone());
            refresh_wave_count(session).await;
            refresh_all_waves(session).await;
        }
        Ok(_) => {
            log::info!("no authorized account found");
            session.disconnect();
        }
        Err(err) => {
            log::warn!("account check failed: {err}");
            session.disconnect();
        }
    }
}

/// Re-read the wave count; on failure the old count stands.
pub async fn refresh_wave_count(session: SessionContext) {
    match portal::total_waves().await {
        Ok(count) => session.set_wave_count(count),
        Err(err) => log::warn!("wave count refresh failed: {err}"),
    }
}

/// Re-fetch the full wave list; on failure the old list stands.
pub async fn refresh_all_waves(session: SessionContext) {
    match portal::all_waves().await {
        Ok(waves) => session.replace_waves(waves),
        Err(err) => log::warn!("wave list refresh failed: {err}"),
    }
}

/// Submit the drafted wave. A no-op when the trimmed draft is empty (the
/// submit button is disabled in that case, but direct calls get the same
/// guard).
///
/// Every step failing aborts the rest of the sequence. A transaction that
/// was sent but whose confirmation wait failed is not rolled back; that
/// risk lives with the external system, not here.
pub async fn submit_wave(session: SessionContext) {
    let message = session.draft_message();
    if message.is_empty() {
        return;
    }
    let Some(from) = session.address() else {
        log::warn!("wave submitted without a connected wallet");
        return;
    };

    let count = match portal::total_waves().await {
        Ok(count) => count,
        Err(err) => {
            log::warn!("wave count read failed: {err}");
            return;
        }
    };
    log::info!("total waves before submit: {count}");

    let tx_hash = match portal::send_wave(&from, &message).await {
        Ok(hash) => hash,
        Err(err) => {
            log::warn!("wave submission failed: {err}");
            return;
        }
    };
    log::info!("mining {tx_hash}...");

    if let Err(err) = portal::wait_mined(&tx_hash).await {
        log::warn!("confirmation wait failed: {err}");
        return;
    }
    log::info!("mined {tx_hash}");

    match portal::total_waves().await {
        Ok(count) => {
            log::info!("total waves after submit: {count}");
            session.set_wave_count(count);
        }
        Err(err) => {
            log::warn!("wave count re-read failed: {err}");
            return;
        }
    }

    session.clear_draft();
}

/// Poll the contract's `NewWave` logs while `active` holds, appending each
/// event to the session list. Interleaves freely with refreshes writing
/// the same list; duplicate entries are possible and accepted.
///
/// The provider-side filter is released on every exit path.
pub async fn watch_new_waves(session: SessionContext, active: Arc<AtomicBool>) {
    if !provider::is_available() {
        log::info!("no injected wallet provider, not watching for waves");
        return;
    }

    let filter = match NewWaveFilter::install().await {
        Ok(filter) => filter,
        Err(err) => {
            log::warn!("NewWave filter install failed: {err}");
            return;
        }
    };

    while active.load(Ordering::Relaxed) {
        TimeoutFuture::new(EVENT_POLL_INTERVAL_MS).await;
        if !active.load(Ordering::Relaxed) {
            break;
        }
        match filter.poll().await {
            Ok(waves) => {
                for wave in waves {
                    log::info!("NewWave from {}: {}", wave.address, wave.message);
                    session.push_wave(wave);
                }
            }
            Err(err) => log::warn!("NewWave poll failed: {err}"),
        }
    }

    filter.uninstall().await;
}

fn alert_missing_wallet() {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message("No Ethereum wallet found. Get MetaMask!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::session::WalletState;

    // The non-empty paths suspend on provider calls and only run in a
    // browser; these cover the synchronous guards.

    #[test]
    fn test_submit_wave_empty_draft_is_noop() {
        let session = SessionContext::new();
        session.set_draft("   ".to_string());
        futures::executor::block_on(submit_wave(session));
        // nothing touched: draft retained, count untouched
        assert_eq!(session.draft.get_untracked(), "   ");
        assert_eq!(session.wave_count.get_untracked(), 0);
    }

    #[test]
    fn test_submit_wave_requires_connection() {
        let session = SessionContext::new();
        session.set_draft("gm".to_string());
        futures::executor::block_on(submit_wave(session));
        // aborted before any contract call; the draft survives
        assert_eq!(session.draft.get_untracked(), "gm");
        assert_eq!(session.wallet.get_untracked(), WalletState::Disconnected);
    }
}
