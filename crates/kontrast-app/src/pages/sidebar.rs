// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sidebar with the CLAHE parameter sliders.

use dioxus::prelude::*;

use kontrast_core::{
    CLIP_LIMIT_MAX, CLIP_LIMIT_MIN, CLIP_LIMIT_STEP, TILE_GRID_MAX, TILE_GRID_MIN,
};

use crate::state::AppState;

#[component]
pub fn Sidebar() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let params = state.read().params;

    rsx! {
        aside {
            style: "width: 280px; padding: 16px; border-right: 1px solid #e0e0e0; background: #fafafa; overflow-y: auto;",
            h2 { "CLAHE Parameters" }

            Slider {
                label: "Clip Limit",
                help: "Higher values give stronger contrast enhancement.",
                min: CLIP_LIMIT_MIN as f64,
                max: CLIP_LIMIT_MAX as f64,
                step: CLIP_LIMIT_STEP as f64,
                value: format!("{:.1}", params.clip_limit),
                on_change: move |v: f64| {
                    let mut next = state.read().params;
                    next.clip_limit = v as f32;
                    state.write().set_params(next);
                },
            }
            Slider {
                label: "Tile Grid Size (rows)",
                help: "Number of tile rows. Smaller tiles adapt to finer detail.",
                min: TILE_GRID_MIN as f64,
                max: TILE_GRID_MAX as f64,
                step: 1.0,
                value: params.grid.rows.to_string(),
                on_change: move |v: f64| {
                    let mut next = state.read().params;
                    next.grid.rows = v.round() as u32;
                    state.write().set_params(next);
                },
            }
            Slider {
                label: "Tile Grid Size (columns)",
                help: "Number of tile columns. Smaller tiles adapt to finer detail.",
                min: TILE_GRID_MIN as f64,
                max: TILE_GRID_MAX as f64,
                step: 1.0,
                value: params.grid.cols.to_string(),
                on_change: move |v: f64| {
                    let mut next = state.read().params;
                    next.grid.cols = v.round() as u32;
                    state.write().set_params(next);
                },
            }
        }
    }
}

#[component]
fn Slider(
    label: &'static str,
    help: &'static str,
    min: f64,
    max: f64,
    step: f64,
    value: String,
    on_change: EventHandler<f64>,
) -> Element {
    rsx! {
        div { style: "padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                span { title: "{help}", "{label}" }
                span { style: "font-variant-numeric: tabular-nums; color: #333;", "{value}" }
            }
            input {
                r#type: "range",
                style: "width: 100%; margin-top: 8px;",
                min: "{min}",
                max: "{max}",
                step: "{step}",
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(v) = evt.value().parse::<f64>() {
                        on_change.call(v);
                    }
                },
            }
            p { style: "font-size: 12px; color: #666; margin: 4px 0 0;", "{help}" }
        }
    }
}
