use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, UserAgentConfig};
use crate::{ConfigError, ConfigResult};
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if Duration::try_from_secs_f64(config.rate_limit_delay).is_err() {
        return Err(ConfigError::Validation(format!(
            "rate-limit-delay must be a non-negative, representable number of seconds, got {}",
            config.rate_limit_delay
        )));
    }

    if config.page_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "page-timeout must be >= 1s, got {}s",
            config.page_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
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

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates repository link discovery configuration
fn validate_extraction_config(config: &ExtractionConfig) -> ConfigResult<()> {
    if config.link_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "link-marker cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> ConfigResult<()> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Must contain exactly one @ with text on both sides
    let (local, domain) = match email.split_once('@') {
        Some((local, domain)) if !domain.contains('@') => (local, domain),
        _ => {
            return Err(ConfigError::Validation(format!(
                "Invalid email format: '{}'",
                email
            )))
        }
    };

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_delay() {
        let mut config = Config::default();
        config.crawler.rate_limit_delay = 0.0;
        assert!(validate(&config).is_ok());

        config.crawler.rate_limit_delay = -0.5;
        assert!(validate(&config).is_err());

        config.crawler.rate_limit_delay = f64::NAN;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_delay_too_large_for_duration() {
        let mut config = Config::default();
        config.crawler.rate_limit_delay = 1e20;

        match validate(&config) {
            Err(ConfigError::Validation(message)) => {
                assert!(message.starts_with("rate-limit-delay"), "{}", message)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_messages_name_toml_keys() {
        let mut config = Config::default();
        config.crawler.page_timeout = 0;
        assert!(validate(&config).unwrap_err().to_string().contains("page-timeout"));

        let mut config = Config::default();
        config.user_agent.crawler_name = "bad name".to_string();
        assert!(validate(&config).unwrap_err().to_string().contains("crawler-name"));

        let mut config = Config::default();
        config.extraction.link_marker = String::new();
        assert!(validate(&config).unwrap_err().to_string().contains("link-marker"));
    }

    #[test]
    fn test_validate_page_timeout() {
        let mut config = Config::default();
        config.crawler.page_timeout = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_crawler_name() {
        let mut config = Config::default();
        config.user_agent.crawler_name = "Repo Scout".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.crawler_name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_contact_url() {
        let mut config = Config::default();
        config.user_agent.contact_url = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_link_marker() {
        let mut config = Config::default();
        config.extraction.link_marker = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }
}
