// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer. Bridges the Dioxus UI to the kontrast backend crates and
// returns data the pages can display directly.

pub mod download_dir;
pub mod session;
