use super::models::Config;
use crate::tools::ToolConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("api_base_url '{url}' must start with http:// or https://")]
    InvalidBaseUrl { url: String },

    #[error("max_upload_bytes must be positive")]
    InvalidUploadLimit,

    #[error("Tool '{tool}' endpoint '{endpoint}' must start with '/'")]
    InvalidEndpoint { tool: String, endpoint: String },

    #[error("Tool '{tool}' defines options but no option_field to send them in")]
    MissingOptionField { tool: String },

    #[error("Tool '{tool}' default_option '{value}' is not one of its options")]
    UnknownDefaultOption { tool: String, value: String },

    #[error("URL tool '{tool}' must send its format as 'format', not '{field}'")]
    InvalidUrlOptionField { tool: String, field: String },

    #[error("Tool '{tool}' has free_option set but no option_field")]
    FreeOptionWithoutField { tool: String },
}

/// Validate the entire configuration, including the merged tool catalog
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_client(config)?;

    for tool in config.catalog().iter() {
        validate_tool(tool)?;
    }

    Ok(())
}

fn validate_client(config: &Config) -> Result<(), ValidationError> {
    let url = &config.client.api_base_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidBaseUrl { url: url.clone() });
    }

    if config.client.max_upload_bytes.as_u64() == 0 {
        return Err(ValidationError::InvalidUploadLimit);
    }

    Ok(())
}

/// Check that a tool's option set can actually be submitted
pub fn validate_tool(tool: &ToolConfig) -> Result<(), ValidationError> {
    if !tool.endpoint.starts_with('/') {
        return Err(ValidationError::InvalidEndpoint {
            tool: tool.id.clone(),
            endpoint: tool.endpoint.clone(),
        });
    }

    if tool.is_url_tool() {
        // URL tools fall back to `format` when no field is named
        if let Some(field) = tool.option_field.as_deref().filter(|f| *f != "format") {
            return Err(ValidationError::InvalidUrlOptionField {
                tool: tool.id.clone(),
                field: field.to_string(),
            });
        }
    } else if tool.option_field.is_none() {
        if tool.free_option {
            return Err(ValidationError::FreeOptionWithoutField {
                tool: tool.id.clone(),
            });
        }
        if !tool.options.is_empty() {
            return Err(ValidationError::MissingOptionField {
                tool: tool.id.clone(),
            });
        }
    }

    if let Some(value) = &tool.default_option {
        if !tool.accepts_option(value) {
            return Err(ValidationError::UnknownDefaultOption {
                tool: tool.id.clone(),
                value: value.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ConversionOption, InputKind};

    fn tool() -> ToolConfig {
        ToolConfig::builder()
            .id("image-convert")
            .title("Image Converter")
            .endpoint("/convert/image")
            .options(vec![ConversionOption::new("PNG", "PNG")])
            .option_field("target_format")
            .build()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_base_url_scheme() {
        let mut config = Config::default();
        config.client.api_base_url = "localhost:8000".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_zero_upload_limit() {
        let mut config = Config::default();
        config.client.max_upload_bytes = 0.into();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidUploadLimit)
        ));
    }

    #[test]
    fn test_endpoint_must_be_absolute() {
        let mut tool = tool();
        tool.endpoint = "convert/image".to_string();
        assert!(matches!(
            validate_tool(&tool),
            Err(ValidationError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_options_need_a_field() {
        let mut tool = tool();
        tool.option_field = None;
        assert!(matches!(
            validate_tool(&tool),
            Err(ValidationError::MissingOptionField { .. })
        ));
    }

    #[test]
    fn test_default_option_must_exist() {
        let mut tool = tool();
        tool.default_option = Some("HEIC".to_string());
        assert!(matches!(
            validate_tool(&tool),
            Err(ValidationError::UnknownDefaultOption { .. })
        ));

        tool.default_option = Some("PNG".to_string());
        assert!(validate_tool(&tool).is_ok());
    }

    #[test]
    fn test_url_tool_field() {
        let mut tool = ToolConfig::builder()
            .id("video-download")
            .title("Video Downloader")
            .endpoint("/convert/media/download")
            .input(InputKind::Url)
            .build();
        assert!(validate_tool(&tool).is_ok());

        tool.option_field = Some("target_format".to_string());
        assert!(matches!(
            validate_tool(&tool),
            Err(ValidationError::InvalidUrlOptionField { .. })
        ));
    }

    #[test]
    fn test_bad_configured_tool_fails_whole_config() {
        let mut config = Config::default();
        let mut bad = tool();
        bad.option_field = None;
        config.tools.insert("image-convert".to_string(), bad);
        assert!(validate(&config).is_err());
    }
}
