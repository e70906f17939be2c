use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.parallelism < 1 || config.parallelism > 100 {
        return Err(ConfigError::Validation(format!(
            "parallelism must be between 1 and 100, got {}",
            config.parallelism
        )));
    }

    if config.request_timeout < 100 {
        return Err(ConfigError::Validation(format!(
            "request-timeout must be >= 100ms, got {}ms",
            config.request_timeout
        )));
    }

    if config.page_budget < 1 {
        return Err(ConfigError::Validation(format!(
            "page-budget must be >= 1, got {}",
            config.page_budget
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.ledger_file.is_empty() {
        return Err(ConfigError::Validation(
            "ledger-file cannot be empty".to_string(),
        ));
    }

    // The ledger lives directly in the output directory
    if config.ledger_file.contains(['/', '\\']) || config.ledger_file.chars().all(|c| c == '.') {
        return Err(ConfigError::Validation(format!(
            "ledger-file must be a plain file name, got '{}'",
            config.ledger_file
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_parallelism_bounds() {
        let mut config = Config::default();
        config.crawler.parallelism = 0;
        assert!(validate(&config).is_err());

        config.crawler.parallelism = 101;
        assert!(validate(&config).is_err());

        config.crawler.parallelism = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_request_timeout_minimum() {
        let mut config = Config::default();
        config.crawler.request_timeout = 99;
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_page_budget_minimum() {
        let mut config = Config::default();
        config.crawler.page_budget = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "Legal Bot".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = Some("not a url".to_string());
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));

        config.user_agent.contact_url = Some("https://example.com/bot".to_string());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_output_paths() {
        let mut config = Config::default();
        config.output.directory = PathBuf::new();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.output.ledger_file = "../crawler.json".to_string();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.output.ledger_file = "..".to_string();
        assert!(validate(&config).is_err());
    }
}
