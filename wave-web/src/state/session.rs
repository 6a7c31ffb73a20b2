//! Session state management
//!
//! All mutable session state lives in one [`SessionContext`] provided at
//! the UI root and reached through Leptos context; there are no ambient
//! globals. State is created at mount and dies with the page.

use leptos::prelude::*;
use shared::Wave;

/// Wallet connection state.
///
/// `Connecting` is entered while an account query is in flight and exits
/// to `Connected` on success or back to `Disconnected` on failure or
/// absence of a provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: String },
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletState::Connected { address } => Some(address),
            _ => None,
        }
    }
}

/// The session's state container.
///
/// `waves` keeps insertion order (fetch order or event-arrival order);
/// display sorts newest-first at render time.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub wallet: RwSignal<WalletState>,
    pub wave_count: RwSignal<u64>,
    pub waves: RwSignal<Vec<Wave>>,
    pub draft: RwSignal<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            wallet: RwSignal::new(WalletState::Disconnected),
            wave_count: RwSignal::new(0),
            waves: RwSignal::new(Vec::new()),
            draft: RwSignal::new(String::new()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.with(|state| state.is_connected())
    }

    /// Connected account address, if any. Untracked: the async flows read
    /// it outside the reactive graph.
    pub fn address(&self) -> Option<String> {
        self.wallet
            .with_untracked(|state| state.address().map(str::to_string))
    }

    pub fn set_connecting(&self) {
        self.wallet.set(WalletState::Connecting);
    }

    pub fn set_connected(&self, address: String) {
        self.wallet.set(WalletState::Connected { address });
    }

    pub fn disconnect(&self) {
        self.wallet.set(WalletState::Disconnected);
    }

    pub fn set_wave_count(&self, count: u64) {
        self.wave_count.set(count);
    }

    /// Full replacement after a refresh fetch.
    pub fn replace_waves(&self, waves: Vec<Wave>) {
        self.waves.set(waves);
    }

    /// Append one wave from the event stream. No deduplication against
    /// waves already present from a refresh; duplicates are accepted.
    pub fn push_wave(&self, wave: Wave) {
        self.waves.update(|waves| waves.push(wave));
    }

    /// The draft message with surrounding whitespace stripped.
    pub fn draft_message(&self) -> String {
        self.draft.with_untracked(|draft| draft.trim().to_string())
    }

    pub fn set_draft(&self, draft: String) {
        self.draft.set(draft);
    }

    pub fn clear_draft(&self) {
        self.draft.set(String::new());
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_session_context() -> SessionContext {
    let context = SessionContext::new();
    provide_context(context);
    context
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(seconds: i64, message: &str) -> Wave {
        Wave::from_contract("0xabc".to_string(), seconds, message.to_string())
    }

    #[test]
    fn test_wallet_state_machine() {
        let session = SessionContext::new();
        assert_eq!(session.wallet.get_untracked(), WalletState::Disconnected);

        session.set_connecting();
        assert_eq!(session.wallet.get_untracked(), WalletState::Connecting);
        assert_eq!(session.address(), None);

        session.set_connected("0xabc".to_string());
        assert!(session.wallet.get_untracked().is_connected());
        assert_eq!(session.address(), Some("0xabc".to_string()));

        session.disconnect();
        assert_eq!(session.wallet.get_untracked(), WalletState::Disconnected);
    }

    #[test]
    fn test_push_wave_appends_exactly_one() {
        let session = SessionContext::new();
        session.push_wave(wave(10, "gm"));
        assert_eq!(session.waves.get_untracked().len(), 1);
        session.push_wave(wave(20, "wagmi"));
        let waves = session.waves.get_untracked();
        assert_eq!(waves.len(), 2);
        // storage keeps arrival order
        assert_eq!(waves[0].message, "gm");
        assert_eq!(waves[1].message, "wagmi");
    }

    #[test]
    fn test_replace_waves_overwrites_storage() {
        let session = SessionContext::new();
        session.push_wave(wave(10, "stale"));
        session.replace_waves(vec![wave(20, "fresh"), wave(30, "fresher")]);
        let waves = session.waves.get_untracked();
        assert_eq!(waves.len(), 2);
        assert_eq!(waves[0].message, "fresh");
    }

    #[test]
    fn test_draft_message_trims() {
        let session = SessionContext::new();
        session.set_draft("  gm  ".to_string());
        assert_eq!(session.draft_message(), "gm");
        session.clear_draft();
        assert_eq!(session.draft_message(), "");
    }
}
