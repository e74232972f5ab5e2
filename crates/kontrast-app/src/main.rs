// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Kontrast: CLAHE contrast enhancement for photos.
//
// Entry point. Initialises logging and app state, and launches the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use kontrast_core::AppConfig;

use pages::about::About;
use pages::enhance::EnhancePage;
use pages::sidebar::Sidebar;

fn main() {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(params = ?config.initial_params, "Kontrast starting");

    dioxus::launch(app);
}

/// Root component.
fn app() -> Element {
    // Read again so that bad overrides are logged through the subscriber.
    let config = use_hook(AppConfig::from_env);

    use_context_provider(|| Signal::new(state::AppState::new(&config)));

    rsx! {
        div { class: "app-container",
            style: "display: flex; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            Sidebar {}

            main { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px 24px;",
                EnhancePage {}
                About {}
            }
        }
    }
}
