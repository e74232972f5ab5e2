// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state, shared with every component through a
// `Signal<AppState>` context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kontrast_core::human_errors::{HumanError, humanize_error};
use kontrast_core::{AppConfig, ClaheParams};

use crate::services::download_dir::download_dir;
use crate::services::session::{EnhanceSession, Rendered, write_download};

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current slider values.
    pub params: ClaheParams,
    /// The decoded upload, if any.
    pub session: Option<Arc<EnhanceSession>>,
    /// Result of enhancing the session with `params`.
    pub rendered: Option<Rendered>,
    /// Directory the save dialog starts in.
    pub download_dir: PathBuf,
    /// Last error, shown above the columns until the next action.
    pub notice: Option<HumanError>,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            params: config.initial_params,
            session: None,
            rendered: None,
            download_dir: download_dir(config),
            notice: None,
            status_message: None,
        }
    }

    /// Replace the current upload. On failure the previous upload is dropped
    /// and the error is kept as a notice.
    pub fn load_upload(&mut self, bytes: &[u8], file_name: &str) {
        self.status_message = None;
        match EnhanceSession::open(bytes, file_name) {
            Ok(session) => {
                self.session = Some(Arc::new(session));
                self.notice = None;
                self.refresh();
            }
            Err(err) => {
                tracing::warn!(error = %err, file_name, "upload rejected");
                self.session = None;
                self.rendered = None;
                self.notice = Some(humanize_error(&err));
            }
        }
    }

    /// Adopt new slider values and re-run the enhancement.
    pub fn set_params(&mut self, params: ClaheParams) {
        let params = params.clamped();
        if params == self.params && self.rendered.is_some() {
            return;
        }
        self.params = params;
        self.refresh();
    }

    /// Enhance the current upload with the current parameters.
    pub fn refresh(&mut self) {
        self.rendered = self.session.as_ref().map(|s| s.render(&self.params));
    }

    /// Write the current result to `path`.
    pub fn save_download(&mut self, path: &Path) {
        let Some(rendered) = &self.rendered else {
            return;
        };
        let result = match &rendered.encoded {
            Ok(encoded) => write_download(&encoded.png, path).map_err(|err| {
                tracing::error!(error = %err, "failed to save download");
                humanize_error(&err)
            }),
            Err(human) => Err(human.clone()),
        };
        match result {
            Ok(()) => {
                self.notice = None;
                self.status_message = Some(format!("Saved to {}", path.display()));
            }
            Err(human) => {
                self.status_message = None;
                self.notice = Some(human);
            }
        }
    }
}
