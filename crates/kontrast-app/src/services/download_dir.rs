// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware download directory resolution.

use std::path::PathBuf;

use kontrast_core::AppConfig;

/// Directory the save dialog opens in.
///
/// Uses the configured directory when set, then the XDG download dir, then
/// `$HOME/Downloads`, then the system temp dir.
pub fn download_dir(config: &AppConfig) -> PathBuf {
    resolve(config, |key| std::env::var(key).ok())
}

fn resolve<F>(config: &AppConfig, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = &config.download_dir {
        return dir.clone();
    }
    if let Some(xdg) = lookup("XDG_DOWNLOAD_DIR").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = lookup("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join("Downloads");
    }
    // Last resort
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn configured_dir_wins() {
        let config = AppConfig {
            download_dir: Some(PathBuf::from("/srv/out")),
            ..AppConfig::default()
        };
        let dir = resolve(&config, lookup(&[("XDG_DOWNLOAD_DIR", "/x"), ("HOME", "/h")]));
        assert_eq!(dir, PathBuf::from("/srv/out"));
    }

    #[test]
    fn xdg_before_home() {
        let dir = resolve(
            &AppConfig::default(),
            lookup(&[("XDG_DOWNLOAD_DIR", "/x/dl"), ("HOME", "/h")]),
        );
        assert_eq!(dir, PathBuf::from("/x/dl"));
    }

    #[test]
    fn home_downloads_fallback() {
        let dir = resolve(&AppConfig::default(), lookup(&[("HOME", "/home/ana")]));
        assert_eq!(dir, PathBuf::from("/home/ana/Downloads"));
    }

    #[test]
    fn temp_dir_last() {
        let dir = resolve(&AppConfig::default(), lookup(&[("HOME", "")]));
        assert_eq!(dir, std::env::temp_dir());
    }
}
