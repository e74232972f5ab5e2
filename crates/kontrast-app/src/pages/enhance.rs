// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhance page: pick an image, compare it with the CLAHE result, and save
// the result as PNG.

use dioxus::prelude::*;

use kontrast_core::human_errors::{HumanError, Severity, humanize_error};
use kontrast_core::{DOWNLOAD_FILE_NAME, KontrastError, UploadFormat};

use crate::services::session::Rendered;
use crate::state::AppState;

#[component]
pub fn EnhancePage() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let snapshot = state.read();
    let session = snapshot.session.clone();
    let rendered = snapshot.rendered.clone();
    let notice = snapshot.notice.clone();
    let status = snapshot.status_message.clone();
    drop(snapshot);

    rsx! {
        div {
            h1 { "CLAHE Image Enhancement" }
            p { style: "color: #666;",
                "Upload a photo to improve its local contrast. Adjust the parameters in the sidebar."
            }

            button {
                style: "padding: 12px 24px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px;",
                onclick: move |_| {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", &UploadFormat::EXTENSIONS)
                        .pick_file()
                    {
                        let name = path.file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_else(|| "upload".into());
                        match std::fs::read(&path) {
                            Ok(bytes) => state.write().load_upload(&bytes, &name),
                            Err(e) => {
                                let err = KontrastError::from(e);
                                tracing::warn!(error = %err, "failed to read upload");
                                state.write().notice = Some(humanize_error(&err));
                            }
                        }
                    }
                },
                "Choose an image..."
            }

            if let Some(ref human) = notice {
                Notice { human: human.clone() }
            }
            if let Some(ref msg) = status {
                p { style: "color: #34c759; font-size: 14px; margin-top: 8px;", "{msg}" }
            }

            if let Some(session) = session {
                div { style: "display: flex; gap: 16px; margin-top: 16px;",
                    div { style: "flex: 1; min-width: 0;",
                        h3 { "Original Image" }
                        img {
                            style: "max-width: 100%; border: 1px solid #e0e0e0;",
                            src: "{session.original_data_url()}",
                            alt: "{session.file_name()}",
                        }
                    }
                    div { style: "flex: 1; min-width: 0;",
                        h3 { "CLAHE Enhanced Image" }
                        ResultColumn { rendered }
                    }
                }
            } else if notice.is_none() {
                p { style: "margin-top: 16px; padding: 12px; border-radius: 8px; background: #eef5ff; color: #0b4f9c;",
                    "Please upload an image to begin."
                }
            }
        }
    }
}

#[component]
fn ResultColumn(rendered: Option<Rendered>) -> Element {
    let mut state = use_context::<Signal<AppState>>();

    let Some(rendered) = rendered else {
        return rsx! { p { "Processing..." } };
    };
    let encoded = match rendered.encoded {
        Ok(encoded) => encoded,
        Err(human) => return rsx! { Notice { human } },
    };

    rsx! {
        img {
            style: "max-width: 100%; border: 1px solid #e0e0e0;",
            src: "{encoded.data_url}",
            alt: "Enhanced image",
        }
        if rendered.outcome.is_degraded() {
            p { style: "color: #ff9500; font-size: 13px;",
                "Enhancement was not possible with these settings; showing the {rendered.outcome} image."
            }
        }
        p { style: "color: #666; font-size: 13px;",
            "{rendered.width} x {rendered.height}, clip limit {rendered.params.clip_limit:.1}, grid {rendered.params.grid}"
        }
        button {
            style: "padding: 10px 20px; border-radius: 8px; border: 1px solid #007aff; background: white; color: #007aff; font-size: 15px;",
            onclick: move |_| {
                let start = state.read().download_dir.clone();
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PNG", &["png"])
                    .set_directory(&start)
                    .set_file_name(DOWNLOAD_FILE_NAME)
                    .save_file()
                {
                    state.write().save_download(&path);
                }
            },
            "Download Enhanced Image"
        }
    }
}

#[component]
fn Notice(human: HumanError) -> Element {
    let colour = match human.severity {
        Severity::Transient => "#ff9500",
        Severity::ActionRequired => "#ff3b30",
        Severity::Permanent => "#8e8e93",
    };
    rsx! {
        div { style: "margin-top: 12px; padding: 12px; border-left: 4px solid {colour}; background: #fff8f7;",
            p { style: "font-weight: 600; margin: 0;", "{human.message}" }
            p { style: "font-size: 14px; color: #555; margin: 4px 0 0;", "{human.suggestion}" }
        }
    }
}
