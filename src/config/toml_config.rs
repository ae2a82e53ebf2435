use crate::core::settle::SettlePolicy;
use crate::utils::error::{BootcampError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BOT_LOGIN: &str = "github-actions[bot]";

/// 設定檔頂層：兩個固定的 workflow 區段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootcampConfig {
    #[serde(rename = "bootcamp-setup")]
    pub setup: WorkflowConfig,
    #[serde(rename = "bootcamp-teardown")]
    pub teardown: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorkflowConfig {
    pub org_prefix: String,
    pub enterprise: String,
    pub billing_admin: String,
    pub repos_to_fork: Vec<String>,
    pub labels: LabelConfig,
    pub api_url: Option<String>,
    pub graphql_url: Option<String>,
    pub bot_login: Option<String>,
    pub settle: Option<SettleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    pub new: String,
    pub working: String,
    pub done: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SettleConfig {
    pub visibility_seconds: Option<u64>,
    pub provisioning_seconds: Option<u64>,
    pub deletion_seconds: Option<u64>,
}

impl BootcampConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BootcampError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 載入並驗證配置；任何 workflow 在動作前都先經過這裡
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BootcampError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ENTERPRISE_SLUG})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BootcampError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for BootcampConfig {
    fn validate(&self) -> Result<()> {
        self.setup.validate_section("bootcamp-setup")?;
        self.teardown.validate_section("bootcamp-teardown")
    }
}

impl WorkflowConfig {
    pub fn validate_section(&self, section: &str) -> Result<()> {
        let field = |name: &str| format!("{}.{}", section, name);

        validation::validate_non_empty_string(&field("org-prefix"), &self.org_prefix)?;
        validation::validate_non_empty_string(&field("enterprise"), &self.enterprise)?;
        validation::validate_non_empty_string(&field("billing-admin"), &self.billing_admin)?;
        validation::validate_repo_identifiers(&field("repos-to-fork"), &self.repos_to_fork)?;

        validation::validate_non_empty_string(&field("labels.new"), &self.labels.new)?;
        validation::validate_non_empty_string(&field("labels.working"), &self.labels.working)?;
        validation::validate_non_empty_string(&field("labels.done"), &self.labels.done)?;
        validation::validate_non_empty_string(&field("labels.error"), &self.labels.error)?;

        validation::validate_url(&field("api-url"), self.api_url())?;
        validation::validate_url(&field("graphql-url"), &self.graphql_url())?;

        if let Some(bot_login) = &self.bot_login {
            validation::validate_non_empty_string(&field("bot-login"), bot_login)?;
        }

        if let Some(settle) = &self.settle {
            for (name, value) in [
                ("settle.visibility-seconds", settle.visibility_seconds),
                ("settle.provisioning-seconds", settle.provisioning_seconds),
                ("settle.deletion-seconds", settle.deletion_seconds),
            ] {
                if let Some(seconds) = value {
                    validation::validate_range(&field(name), seconds, 0, 600)?;
                }
            }
        }

        Ok(())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// 未指定時沿用 `{api-url}/graphql`
    pub fn graphql_url(&self) -> String {
        match &self.graphql_url {
            Some(url) => url.clone(),
            None => format!("{}/graphql", self.api_url().trim_end_matches('/')),
        }
    }

    pub fn bot_login(&self) -> &str {
        self.bot_login.as_deref().unwrap_or(DEFAULT_BOT_LOGIN)
    }

    pub fn billing_email(&self) -> String {
        format!("{}@github.com", self.billing_admin)
    }

    pub fn settle_policy(&self) -> SettlePolicy {
        let defaults = SettlePolicy::default();
        let Some(settle) = &self.settle else {
            return defaults;
        };

        SettlePolicy {
            visibility: settle
                .visibility_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.visibility),
            provisioning: settle
                .provisioning_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.provisioning),
            deletion: settle
                .deletion_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.deletion),
        }
    }
}
