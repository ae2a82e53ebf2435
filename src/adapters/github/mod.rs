pub mod graphql;
pub mod issues;

use crate::domain::model::Organization;
use crate::domain::ports::Directory;
use crate::utils::error::{BootcampError, Result};
use graphql::{CreateOrgData, EnterpriseData, GraphQlResponse};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

pub use issues::GithubIssues;

/// GitHub REST / GraphQL 客戶端。每個操作只發出一次請求，不重試
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_base: String,
    graphql_url: String,
}

impl GithubClient {
    pub fn new(token: &str, api_base: &str, graphql_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("bootcamp-ops"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|e| {
            BootcampError::ConfigError {
                message: format!("Invalid token for authorization header: {}", e),
            }
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            graphql_url: graphql_url.to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// 狀態碼不符預期時，轉成帶有原始回應內容的錯誤
    pub(crate) async fn expect_status(
        &self,
        operation: &str,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response> {
        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let payload = response.text().await.unwrap_or_default();
        tracing::error!(
            "❌ {} failed. Status: {} Response: {}",
            operation,
            status.as_u16(),
            payload
        );
        Err(BootcampError::remote(operation, status.as_u16(), payload))
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response = self
            .client
            .post(&self.graphql_url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;
        let response = self.expect_status(operation, response, StatusCode::OK).await?;
        // 失敗時 data 內的欄位會是 null，先檢查 errors 再轉成具體型別
        let body: GraphQlResponse<serde_json::Value> = response.json().await?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let errors = serde_json::to_string(&errors)?;
            tracing::error!("❌ {} returned errors: {}", operation, errors);
            return Err(BootcampError::GraphQlError {
                operation: operation.to_string(),
                errors,
            });
        }

        let data = body
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| BootcampError::GraphQlError {
                operation: operation.to_string(),
                errors: "response contained no data".to_string(),
            })?;
        Ok(serde_json::from_value(data)?)
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ForkResponse {
    full_name: String,
}

#[async_trait::async_trait]
impl Directory for GithubClient {
    async fn user_id(&self, handle: &str) -> Result<u64> {
        let response = self
            .client
            .get(self.url(&format!("/users/{}", handle)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::error!("❌ User {} does not exist", handle);
            return Err(BootcampError::UnknownHandle {
                handle: handle.to_string(),
            });
        }

        let response = self
            .expect_status(&format!("Get user {}", handle), response, StatusCode::OK)
            .await?;
        let user: UserResponse = response.json().await?;
        tracing::info!("👤 {} ID: {}", handle, user.id);
        Ok(user.id)
    }

    async fn enterprise_id(&self, slug: &str) -> Result<String> {
        let data: EnterpriseData = self
            .graphql(
                "Get enterprise id",
                graphql::ENTERPRISE_ID_QUERY,
                json!({ "slug": slug }),
            )
            .await?;

        let enterprise = data.enterprise.ok_or_else(|| BootcampError::GraphQlError {
            operation: "Get enterprise id".to_string(),
            errors: format!("enterprise {} not found", slug),
        })?;
        tracing::info!("🏢 Enterprise {} ID: {}", slug, enterprise.id);
        Ok(enterprise.id)
    }

    async fn create_org(
        &self,
        enterprise_id: &str,
        login: &str,
        admin_logins: &[String],
        billing_email: &str,
    ) -> Result<Organization> {
        let data: CreateOrgData = self
            .graphql(
                &format!("Create organization {}", login),
                graphql::CREATE_ORG_MUTATION,
                json!({
                    "enterpriseId": enterprise_id,
                    "login": login,
                    "profileName": login,
                    "adminLogins": admin_logins,
                    "billingEmail": billing_email,
                }),
            )
            .await?;

        let org = data.create_enterprise_organization.organization;
        tracing::info!(
            "✅ Created organization: {} ({})",
            org.login,
            org.name.as_deref().unwrap_or(&org.login)
        );
        Ok(Organization {
            id: org.id,
            login: org.login,
        })
    }

    async fn fork_repo(&self, name_with_owner: &str, org: &str) -> Result<String> {
        // 只 fork 預設分支，fork 全部分支容易卡住
        let response = self
            .client
            .post(self.url(&format!("/repos/{}/forks", name_with_owner)))
            .json(&json!({ "organization": org, "default_branch_only": true }))
            .send()
            .await?;
        let response = self
            .expect_status(
                &format!("Fork {} to {}", name_with_owner, org),
                response,
                StatusCode::ACCEPTED,
            )
            .await?;

        let fork: ForkResponse = response.json().await?;
        tracing::info!("🍴 Forked {} to {}", name_with_owner, fork.full_name);
        Ok(fork.full_name)
    }

    async fn set_visibility(&self, name_with_owner: &str, visibility: &str) -> Result<()> {
        let response = self
            .client
            .patch(self.url(&format!("/repos/{}", name_with_owner)))
            .json(&json!({ "visibility": visibility }))
            .send()
            .await?;
        self.expect_status(
            &format!("Set visibility of {}", name_with_owner),
            response,
            StatusCode::OK,
        )
        .await?;

        tracing::info!("🔒 Set visibility of {} to {}", name_with_owner, visibility);
        Ok(())
    }

    async fn invite_admin(&self, user_id: u64, org: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url(&format!("/orgs/{}/invitations", org)))
            .json(&json!({ "invitee_id": user_id, "role": "admin" }))
            .send()
            .await?;
        self.expect_status(
            &format!("Invite {} to {}", user_id, org),
            response,
            StatusCode::CREATED,
        )
        .await?;

        tracing::info!("📨 Invited {} to {}", user_id, org);
        Ok(())
    }

    async fn delete_org(&self, org: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/orgs/{}", org)))
            .send()
            .await?;
        self.expect_status(
            &format!("Delete organization {}", org),
            response,
            StatusCode::ACCEPTED,
        )
        .await?;

        tracing::info!("🗑️ Deleted organization: {}", org);
        Ok(())
    }
}
