#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{BootcampError, Result};

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const ADMIN_TOKEN_VAR: &str = "ADMIN_TOKEN";

/// 執行所需的兩組 token：一般 token 操作 ticket，管理者 token 操作組織
#[derive(Clone)]
pub struct Credentials {
    pub github_token: String,
    pub admin_token: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_token: read_token(GITHUB_TOKEN_VAR)?,
            admin_token: read_token(ADMIN_TOKEN_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("github_token", &"***")
            .field("admin_token", &"***")
            .finish()
    }
}

fn read_token(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(BootcampError::MissingCredentialError {
            name: name.to_string(),
        }),
    }
}
