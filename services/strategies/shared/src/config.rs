//! Strategy configuration utilities

use std::path::PathBuf;

/// Resolve a config path: explicit argument, then env var, then default
pub fn resolve_config_path(explicit: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    resolve_config_path_from(explicit, default, || std::env::var(env_var).ok())
}

fn resolve_config_path_from(
    explicit: Option<PathBuf>,
    default: &str,
    env_value: impl FnOnce() -> Option<String>,
) -> PathBuf {
    explicit
        .or_else(|| {
            env_value()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_wins() {
        let path = resolve_config_path_from(Some("a.toml".into()), "c.toml", || {
            Some("b.toml".to_string())
        });
        assert_eq!(path, PathBuf::from("a.toml"));
    }

    #[test]
    fn test_env_then_default() {
        let path = resolve_config_path_from(None, "c.toml", || Some("b.toml".to_string()));
        assert_eq!(path, PathBuf::from("b.toml"));

        let path = resolve_config_path_from(None, "c.toml", || Some("  ".to_string()));
        assert_eq!(path, PathBuf::from("c.toml"));

        let path = resolve_config_path_from(None, "c.toml", || None);
        assert_eq!(path, PathBuf::from("c.toml"));
    }
}
