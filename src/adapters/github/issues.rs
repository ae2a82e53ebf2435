use super::GithubClient;
use crate::domain::model::{Comment, Ticket};
use crate::domain::ports::TicketTracker;
use crate::utils::error::{BootcampError, Result};
use reqwest::StatusCode;
use serde_json::json;
use url::Url;

const COMMENTS_PER_PAGE: usize = 100;

/// 工作 repository 中單一 ticket 的操作
#[derive(Debug, Clone)]
pub struct GithubIssues {
    client: GithubClient,
    repo: String,
    number: u64,
}

impl GithubIssues {
    pub fn new(client: GithubClient, repo: impl Into<String>, number: u64) -> Self {
        Self {
            client,
            repo: repo.into(),
            number,
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    fn issue_url(&self, suffix: &str) -> String {
        self.client
            .url(&format!("/repos/{}/issues/{}{}", self.repo, self.number, suffix))
    }

    /// label 名稱可能含有空白等字元，需以 path segment 編碼
    fn label_url(&self, label: &str) -> Result<Url> {
        let mut url = Url::parse(&self.issue_url("/labels")).map_err(|e| {
            BootcampError::ConfigError {
                message: format!("Invalid issue URL: {}", e),
            }
        })?;
        url.path_segments_mut()
            .map_err(|_| BootcampError::ConfigError {
                message: "api-url cannot be used as a base URL".to_string(),
            })?
            .push(label);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl TicketTracker for GithubIssues {
    async fn ticket(&self) -> Result<Ticket> {
        let response = self.client.http().get(self.issue_url("")).send().await?;
        let response = self
            .client
            .expect_status(
                &format!("Get issue {}", self.number),
                response,
                StatusCode::OK,
            )
            .await?;

        let ticket: Ticket = response.json().await?;
        tracing::info!("🎫 Got issue #{}: {}", ticket.number, ticket.title);
        Ok(ticket)
    }

    async fn tickets_with_label(&self, label: &str) -> Result<Vec<Ticket>> {
        let response = self
            .client
            .http()
            .get(self.client.url(&format!("/repos/{}/issues", self.repo)))
            .query(&[("labels", label)])
            .send()
            .await?;
        let response = self
            .client
            .expect_status(
                &format!("List issues labelled {}", label),
                response,
                StatusCode::OK,
            )
            .await?;

        let tickets: Vec<Ticket> = response.json().await?;
        tracing::info!("🎫 Found {} issues labelled {}", tickets.len(), label);
        Ok(tickets)
    }

    async fn apply_label(&self, label: &str) -> Result<()> {
        let response = self
            .client
            .http()
            .post(self.issue_url("/labels"))
            .json(&json!([label]))
            .send()
            .await?;
        self.client
            .expect_status(
                &format!("Apply label {} to issue {}", label, self.number),
                response,
                StatusCode::OK,
            )
            .await?;

        tracing::info!("🏷️ Applied label {} to issue {}", label, self.number);
        Ok(())
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        let response = self
            .client
            .http()
            .delete(self.label_url(label)?)
            .send()
            .await?;
        self.client
            .expect_status(
                &format!("Remove label {} from issue {}", label, self.number),
                response,
                StatusCode::OK,
            )
            .await?;

        tracing::info!("🏷️ Removed label {} from issue {}", label, self.number);
        Ok(())
    }

    async fn add_comment(&self, body: &str) -> Result<()> {
        let response = self
            .client
            .http()
            .post(self.issue_url("/comments"))
            .json(&json!({ "body": body }))
            .send()
            .await?;
        self.client
            .expect_status(
                &format!("Add comment to issue {}", self.number),
                response,
                StatusCode::CREATED,
            )
            .await?;

        tracing::info!("💬 Added comment to issue {}", self.number);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let response = self
            .client
            .http()
            .patch(self.issue_url(""))
            .json(&json!({ "state": "closed" }))
            .send()
            .await?;
        self.client
            .expect_status(
                &format!("Close issue {}", self.number),
                response,
                StatusCode::OK,
            )
            .await?;

        tracing::info!("🔐 Closed issue {}", self.number);
        Ok(())
    }

    async fn comments(&self) -> Result<Vec<Comment>> {
        let mut page = 1_u32;
        let mut comments = Vec::new();
        loop {
            let response = self
                .client
                .http()
                .get(self.issue_url("/comments"))
                .query(&[
                    ("per_page", COMMENTS_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ])
                .send()
                .await?;
            let response = self
                .client
                .expect_status(
                    &format!("Get comments for issue {}", self.number),
                    response,
                    StatusCode::OK,
                )
                .await?;

            let chunk: Vec<Comment> = response.json().await?;
            let chunk_len = chunk.len();
            comments.extend(chunk);
            if chunk_len < COMMENTS_PER_PAGE {
                break;
            }
            page = page.saturating_add(1);
        }

        tracing::info!(
            "💬 Got {} comments for issue {}",
            comments.len(),
            self.number
        );
        Ok(comments)
    }
}
