use crate::domain::model::{Comment, Organization, Ticket};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 需要管理者權限的平台操作（使用者、組織、repository、enterprise）
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user_id(&self, handle: &str) -> Result<u64>;

    async fn enterprise_id(&self, slug: &str) -> Result<String>;

    async fn create_org(
        &self,
        enterprise_id: &str,
        login: &str,
        admin_logins: &[String],
        billing_email: &str,
    ) -> Result<Organization>;

    /// 只 fork 預設分支，回傳 fork 後的 `owner/name`
    async fn fork_repo(&self, name_with_owner: &str, org: &str) -> Result<String>;

    async fn set_visibility(&self, name_with_owner: &str, visibility: &str) -> Result<()>;

    async fn invite_admin(&self, user_id: u64, org: &str) -> Result<()>;

    async fn delete_org(&self, org: &str) -> Result<()>;
}

/// 綁定在單一 ticket 上的 issue 操作
#[async_trait]
pub trait TicketTracker: Send + Sync {
    async fn ticket(&self) -> Result<Ticket>;

    async fn tickets_with_label(&self, label: &str) -> Result<Vec<Ticket>>;

    async fn apply_label(&self, label: &str) -> Result<()>;

    async fn remove_label(&self, label: &str) -> Result<()>;

    async fn add_comment(&self, body: &str) -> Result<()>;

    async fn close(&self) -> Result<()>;

    async fn comments(&self) -> Result<Vec<Comment>>;
}
