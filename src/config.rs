use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Materna";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database file path, from `DB_PATH` (default `Mother.db`)
pub fn db_path() -> PathBuf {
    std::env::var("DB_PATH")
        .unwrap_or_else(|_| "Mother.db".to_string())
        .into()
}

/// Listen address, from `BIND_ADDR` (default `0.0.0.0:8081`)
pub fn bind_addr() -> SocketAddr {
    std::env::var("BIND_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8081)))
}

/// Root directory for uploaded files, from `UPLOADS_DIR` (default `uploads`)
pub fn uploads_dir() -> PathBuf {
    std::env::var("UPLOADS_DIR")
        .unwrap_or_else(|_| "uploads".to_string())
        .into()
}

/// Subdirectory of the uploads root where lab result files land
pub fn lab_results_dir(uploads: &std::path::Path) -> PathBuf {
    uploads.join("lab_results")
}

pub fn default_log_filter() -> &'static str {
    "info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lab_results_dir_under_uploads() {
        let dir = lab_results_dir(std::path::Path::new("uploads"));
        assert!(dir.starts_with("uploads"));
        assert!(dir.ends_with("lab_results"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_log_filter_is_nonempty() {
        assert!(!default_log_filter().is_empty());
    }
}
