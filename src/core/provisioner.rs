use crate::config::toml_config::WorkflowConfig;
use crate::core::settle::{SettlePoint, SettlePolicy};
use crate::domain::model::{ForkOutcome, Outcome, Participant, ProvisionOutcome};
use crate::domain::ports::Directory;
use crate::utils::error::Result;

/// 組織 login 的平台長度上限
pub const MAX_ORG_LOGIN_LENGTH: usize = 39;
/// 超過上限時截斷後的長度
pub const TRUNCATED_ORG_LOGIN_LENGTH: usize = 38;

/// `.github` repository 保持公開，其餘 fork 都設為 private
const PUBLIC_REPO_NAME: &str = ".github";

/// 組織名稱 `{prefix}-{date}-{handle}`，過長時截斷，不檢查碰撞
pub fn org_login(prefix: &str, date: &str, handle: &str) -> String {
    let login = format!("{}-{}-{}", prefix, date, handle);
    if login.chars().count() > MAX_ORG_LOGIN_LENGTH {
        login.chars().take(TRUNCATED_ORG_LOGIN_LENGTH).collect()
    } else {
        login
    }
}

/// 逐一解析 handle 的數字 id；任一失敗則整批失敗
pub async fn build_participants<D: Directory + ?Sized>(
    directory: &D,
    handles: &[String],
) -> Result<Vec<Participant>> {
    let mut participants = Vec::with_capacity(handles.len());
    for handle in handles {
        let remote_id = directory.user_id(handle).await?;
        participants.push(Participant::new(handle.clone(), remote_id));
    }
    Ok(participants)
}

pub struct Provisioner<'a, D: Directory + ?Sized> {
    directory: &'a D,
    config: &'a WorkflowConfig,
    settle: &'a SettlePolicy,
    enterprise_id: &'a str,
    date: &'a str,
    admin_logins: Vec<String>,
}

impl<'a, D: Directory + ?Sized> Provisioner<'a, D> {
    /// 所有講師與 billing admin 都會成為每個新組織的管理者
    pub fn new(
        directory: &'a D,
        config: &'a WorkflowConfig,
        settle: &'a SettlePolicy,
        enterprise_id: &'a str,
        date: &'a str,
        facilitators: &[Participant],
    ) -> Self {
        let mut admin_logins: Vec<String> =
            facilitators.iter().map(|f| f.handle.clone()).collect();
        admin_logins.push(config.billing_admin.clone());

        Self {
            directory,
            config,
            settle,
            enterprise_id,
            date,
            admin_logins,
        }
    }

    pub fn admin_logins(&self) -> &[String] {
        &self.admin_logins
    }

    pub async fn provision_all(&self, participants: &mut [Participant]) {
        for participant in participants.iter_mut() {
            let outcome = self.provision(&participant.handle).await;
            participant.record_provisioning(outcome);
        }
    }

    pub async fn provision(&self, handle: &str) -> ProvisionOutcome {
        let login = org_login(&self.config.org_prefix, self.date, handle);

        let organization = match self
            .directory
            .create_org(
                self.enterprise_id,
                &login,
                &self.admin_logins,
                &self.config.billing_email(),
            )
            .await
        {
            Ok(organization) => organization,
            Err(e) => {
                tracing::warn!(
                    "⚠️ Skipping {}: organization {} not created: {}",
                    handle,
                    login,
                    e
                );
                return ProvisionOutcome::OrgCreationFailed(e.to_string());
            }
        };

        let mut forks = Vec::with_capacity(self.config.repos_to_fork.len());
        for repo in &self.config.repos_to_fork {
            let outcome = match self.fork(repo, &organization.login).await {
                Ok(()) => Outcome::Done,
                Err(e) => {
                    tracing::warn!(
                        "⚠️ {} could not be forked into {}: {}",
                        repo,
                        organization.login,
                        e
                    );
                    Outcome::Failed(e.to_string())
                }
            };
            forks.push(ForkOutcome {
                repo: repo.clone(),
                outcome,
            });
        }

        ProvisionOutcome::Provisioned {
            organization,
            forks,
        }
    }

    async fn fork(&self, repo: &str, org: &str) -> Result<()> {
        let forked = self.directory.fork_repo(repo, org).await?;

        let repo_name = repo.rsplit_once('/').map(|(_, name)| name).unwrap_or(repo);
        if repo_name != PUBLIC_REPO_NAME {
            // fork 完成與設定 visibility 之間有 race，需先等待
            self.settle.settle(SettlePoint::BeforeVisibility).await;
            self.directory.set_visibility(&forked, "private").await?;
        }

        Ok(())
    }
}
