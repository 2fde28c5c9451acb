use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use sumi_mirror::config::load_config;
///
/// let config = load_config(Path::new("mirror.toml")).unwrap();
/// println!("Timeout: {}s", config.crawler.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;

    tracing::debug!(
        "Loaded config for {} (output root: {})",
        config.site.base_url,
        config.output.root().display()
    );

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a mirror can be traced back to the exact configuration
/// that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Loads a configuration and returns both the config and its hash
///
/// The file is read once, so the digest always describes the text that was
/// parsed.
///
/// # Returns
///
/// * `Ok((Config, String))` - Validated configuration and its hex digest
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[site]
base-url = "https://example.com"

[user-agent]
crawler-name = "TestMirror"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[crawler]
timeout-secs = 10
clear-output = false

[output]
root = "./mirror"
html-dir = "pages/html"
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(config.crawler.timeout_secs, 10);
        assert!(!config.crawler.clear_output);
        assert_eq!(config.crawler.start_path, "/");
        assert_eq!(config.user_agent.crawler_name, "TestMirror");
        assert_eq!(
            config.output.html_dir(),
            std::path::PathBuf::from("./mirror/pages/html")
        );
        assert_eq!(
            config.output.markdown_dir(),
            std::path::PathBuf::from("./mirror/markdown")
        );
    }

    #[test]
    fn test_optional_sections_use_defaults() {
        let config_content = r#"
[site]
base-url = "https://example.com"

[user-agent]
crawler-name = "TestMirror"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.timeout_secs, 30);
        assert!(config.crawler.clear_output);
        assert_eq!(
            config.output.site_map_path(),
            std::path::PathBuf::from("./site_map.json")
        );
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/mirror.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = VALID_CONFIG.replace("timeout-secs = 10", "timeout-secs = 0");

        let file = create_temp_config(&config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_config_hash() {
        let file = create_temp_config("abc");
        let hash = compute_config_hash(file.path()).unwrap();

        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash, hash_content("abd"));
    }

    #[test]
    fn test_load_with_hash_matches_file_hash() {
        let file = create_temp_config(VALID_CONFIG);
        let (config, hash) = load_config_with_hash(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://example.com");
        assert_eq!(hash, compute_config_hash(file.path()).unwrap());
    }

    #[test]
    fn test_parse_config_from_text() {
        let config = parse_config(VALID_CONFIG).unwrap();
        assert_eq!(config.output.root(), Path::new("./mirror"));
        assert!(parse_config("").is_err());
    }
}
