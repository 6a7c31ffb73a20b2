//! Wave List Component
//!
//! Read-only list of every known wave, newest first. Storage order is
//! whatever arrived (fetch order interleaved with live events); the sort
//! happens here at render time.

use chrono::Utc;
use leptos::prelude::*;

use crate::state::session::use_session_context;
use shared::{sort_newest_first, time_ago, Wave};

#[component]
pub fn WaveList() -> impl IntoView {
    let session = use_session_context();

    view! {
        <ul class="wave-list">
            {move || {
                let mut waves = session.waves.get();
                sort_newest_first(&mut waves);
                let now = Utc::now();
                waves
                    .into_iter()
                    .map(|wave| {
                        let Wave { address, timestamp, message } = wave;
                        view! {
                            <li class="wave-item">
                                <div class="wave-item-header">
                                    <span class="wave-address">{address}</span>
                                    <span class="wave-time">{time_ago(timestamp, now)}</span>
                                </div>
                                <p class="wave-message">{message}</p>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </ul>
    }
}
