//! Wave Form Component - message input and submit button
//!
//! The submit button stays disabled while the trimmed draft is empty, so
//! an empty wave is unreachable from the UI.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::submit_wave;
use crate::state::session::use_session_context;

#[component]
pub fn WaveForm() -> impl IntoView {
    let session = use_session_context();

    view! {
        <div class="wave-form">
            <input
                type="text"
                class="wave-input"
                placeholder="Enter your message..."
                prop:value=move || session.draft.get()
                on:input=move |ev| session.set_draft(event_target_value(&ev))
            />
            <button
                class="btn"
                prop:disabled=move || session.draft.with(|draft| draft.trim().is_empty())
                on:click=move |_| spawn_local(submit_wave(session))
            >
                "Wave at me"
            </button>
        </div>
    }
}
