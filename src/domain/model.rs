use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 從 ticket 內文解析出的 bootcamp 請求，解析後不可變
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub date: String,
    pub attendees: Vec<String>,
    pub facilitators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub login: String,
}

/// 單一參與者（學員或講師）的執行狀態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub handle: String,
    pub remote_id: u64,
    pub invited: bool,
    pub organization: Option<Organization>,
    pub fork_errors: Vec<String>,
}

impl Participant {
    pub fn new(handle: impl Into<String>, remote_id: u64) -> Self {
        Self {
            handle: handle.into(),
            remote_id,
            invited: false,
            organization: None,
            fork_errors: Vec::new(),
        }
    }

    pub fn org_id(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.id.as_str())
    }

    pub fn org_name(&self) -> Option<&str> {
        self.organization.as_ref().map(|org| org.login.as_str())
    }

    pub fn record_provisioning(&mut self, outcome: ProvisionOutcome) {
        match outcome {
            ProvisionOutcome::Provisioned {
                organization,
                forks,
            } => {
                self.organization = Some(organization);
                self.fork_errors.extend(
                    forks
                        .into_iter()
                        .filter(|fork| !fork.outcome.is_done())
                        .map(|fork| fork.repo),
                );
            }
            ProvisionOutcome::OrgCreationFailed(_) => self.organization = None,
        }
    }

    pub fn record_invitation(&mut self, outcome: &InviteOutcome) {
        self.invited = matches!(outcome, InviteOutcome::Invited);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed(String),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForkOutcome {
    pub repo: String,
    pub outcome: Outcome,
}

/// 單一參與者的佈建結果；組織建立失敗時不會嘗試 fork
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Provisioned {
        organization: Organization,
        forks: Vec<ForkOutcome>,
    },
    OrgCreationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    Invited,
    Failed(String),
    NoOrganization,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionBatch {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl DeletionBatch {
    pub fn error_count(&self) -> usize {
        self.failed.len()
    }
}

/// 整體執行結果，決定 process 的 exit code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    CompletedWithErrors { error_count: usize },
    Aborted { reason: String },
}

impl RunStatus {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunStatus::Completed => 0,
            RunStatus::CompletedWithErrors { .. } | RunStatus::Aborted { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user: CommentAuthor,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// API 對空留言回傳 `null`
fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
