use crate::utils::error::{BootcampError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BootcampError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BootcampError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BootcampError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BootcampError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 驗證 `owner/name` 形式的 repository 清單，且不可重複
pub fn validate_repo_identifiers(field_name: &str, repos: &[String]) -> Result<()> {
    if repos.is_empty() {
        return Err(BootcampError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let mut seen = HashSet::new();
    for repo in repos {
        let valid = match repo.split_once('/') {
            Some((owner, name)) => {
                !owner.is_empty() && !name.is_empty() && !name.contains('/') && !owner.contains(' ')
            }
            None => false,
        };
        if !valid {
            return Err(BootcampError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: repo.clone(),
                reason: "Expected a repository identifier of the form owner/name".to_string(),
            });
        }
        if !seen.insert(repo.as_str()) {
            return Err(BootcampError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: repo.clone(),
                reason: "Repository listed more than once".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BootcampError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
