//! Configuration file loader.

use std::path::PathBuf;

use super::AppConfig;

/// Configuration loader that searches multiple locations.
#[derive(Debug)]
pub struct ConfigLoader {
    /// Search paths in order of priority.
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default search paths.
    #[must_use]
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        // 1. Current directory: .presales-assistant.toml
        search_paths.push(PathBuf::from(".presales-assistant.toml"));

        // 2. User config directory: ~/.config/presales-assistant/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("presales-assistant").join("config.toml"));
        }

        Self { search_paths }
    }

    /// Create a config loader with a specific config file path.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            search_paths: vec![path],
        }
    }

    /// Load configuration from the first available file, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        for path in &self.search_paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Loading config file");
                return Self::load_from_path(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(AppConfig::default())
    }

    /// Load configuration from a specific path.
    fn load_from_path(path: &PathBuf) -> Result<AppConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the search paths for debugging.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first config file that exists.
    #[must_use]
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_paths.iter().find(|p| p.exists()).cloned()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::super::ProviderKind;
    use super::*;

    #[test]
    fn test_config_loader_default_paths() {
        let loader = ConfigLoader::new();
        assert!(!loader.search_paths().is_empty());
        assert!(loader.search_paths()[0].ends_with(".presales-assistant.toml"));
    }

    #[test]
    fn test_config_loader_returns_defaults_when_no_file() {
        let loader = ConfigLoader::with_path(PathBuf::from("/nonexistent/path.toml"));
        let config = loader.load().unwrap();
        assert_eq!(config.ai.provider, ProviderKind::Gemini);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_toml_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
            knowledge_base = "fixtures/kb.json"

            [ai]
            provider = "claude"
            model = "claude-sonnet-4-20250514"
            api_key_env = "ANTHROPIC_API_KEY"

            [server]
            host = "0.0.0.0"
            port = 8080
            cors_permissive = false
        "#,
        )
        .unwrap();

        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        let config = loader.load().unwrap();
        assert_eq!(config.ai.provider, ProviderKind::Claude);
        assert_eq!(config.ai.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.server.cors_permissive);
        assert_eq!(config.knowledge_base, PathBuf::from("fixtures/kb.json"));
    }

    #[test]
    fn test_parse_error_on_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not [valid toml").unwrap();

        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        let result = loader.load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_find_config_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let loader = ConfigLoader::with_path(file.path().to_path_buf());
        assert_eq!(loader.find_config_file(), Some(file.path().to_path_buf()));

        let loader = ConfigLoader::with_path(PathBuf::from("/nonexistent/path.toml"));
        assert!(loader.find_config_file().is_none());
    }
}
