use crate::domain::model::{Comment, CommentAuthor, Organization, Ticket};
use crate::domain::ports::{Directory, TicketTracker};
use crate::utils::error::{BootcampError, Result};
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockDirectory {
    users: HashMap<String, u64>,
    enterprise: Option<String>,
    failing_orgs: HashSet<String>,
    failing_forks: HashSet<String>,
    failing_visibility: HashSet<String>,
    failing_invites: HashSet<String>,
    failing_deletes: HashSet<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            enterprise: Some("E_ent".to_string()),
            ..Default::default()
        }
    }

    pub fn with_user(mut self, handle: &str, id: u64) -> Self {
        self.users.insert(handle.to_string(), id);
        self
    }

    pub fn without_enterprise(mut self) -> Self {
        self.enterprise = None;
        self
    }

    pub fn failing_org(mut self, login: &str) -> Self {
        self.failing_orgs.insert(login.to_string());
        self
    }

    /// `repo@org`
    pub fn failing_fork(mut self, repo: &str, org: &str) -> Self {
        self.failing_forks.insert(format!("{}@{}", repo, org));
        self
    }

    pub fn failing_visibility(mut self, full_name: &str) -> Self {
        self.failing_visibility.insert(full_name.to_string());
        self
    }

    pub fn failing_invite(mut self, org: &str) -> Self {
        self.failing_invites.insert(org.to_string());
        self
    }

    pub fn failing_delete(mut self, org: &str) -> Self {
        self.failing_deletes.insert(org.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn fail(operation: &str) -> BootcampError {
        BootcampError::remote(operation, 422, r#"{"message":"Unprocessable Entity"}"#)
    }
}

#[async_trait::async_trait]
impl Directory for MockDirectory {
    async fn user_id(&self, handle: &str) -> Result<u64> {
        self.record(format!("user_id {}", handle));
        self.users
            .get(handle)
            .copied()
            .ok_or_else(|| BootcampError::UnknownHandle {
                handle: handle.to_string(),
            })
    }

    async fn enterprise_id(&self, slug: &str) -> Result<String> {
        self.record(format!("enterprise_id {}", slug));
        self.enterprise.clone().ok_or_else(|| BootcampError::GraphQlError {
            operation: "Get enterprise id".to_string(),
            errors: "not found".to_string(),
        })
    }

    async fn create_org(
        &self,
        enterprise_id: &str,
        login: &str,
        admin_logins: &[String],
        billing_email: &str,
    ) -> Result<Organization> {
        self.record(format!(
            "create_org {} {} [{}] {}",
            enterprise_id,
            login,
            admin_logins.join(","),
            billing_email
        ));
        if self.failing_orgs.contains(login) {
            return Err(Self::fail("Create organization"));
        }
        Ok(Organization {
            id: format!("O_{}", login),
            login: login.to_string(),
        })
    }

    async fn fork_repo(&self, name_with_owner: &str, org: &str) -> Result<String> {
        self.record(format!("fork {} {}", name_with_owner, org));
        if self
            .failing_forks
            .contains(&format!("{}@{}", name_with_owner, org))
        {
            return Err(Self::fail("Fork"));
        }
        let name = name_with_owner
            .rsplit_once('/')
            .map(|(_, name)| name)
            .unwrap_or(name_with_owner);
        Ok(format!("{}/{}", org, name))
    }

    async fn set_visibility(&self, name_with_owner: &str, visibility: &str) -> Result<()> {
        self.record(format!("visibility {} {}", name_with_owner, visibility));
        if self.failing_visibility.contains(name_with_owner) {
            return Err(Self::fail("Set visibility"));
        }
        Ok(())
    }

    async fn invite_admin(&self, user_id: u64, org: &str) -> Result<()> {
        self.record(format!("invite {} {}", user_id, org));
        if self.failing_invites.contains(org) {
            return Err(Self::fail("Invite"));
        }
        Ok(())
    }

    async fn delete_org(&self, org: &str) -> Result<()> {
        self.record(format!("delete {}", org));
        if self.failing_deletes.contains(org) {
            return Err(Self::fail("Delete organization"));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockTracker {
    body: Option<String>,
    comments: Vec<Comment>,
    pub labels_applied: Arc<Mutex<Vec<String>>>,
    pub labels_removed: Arc<Mutex<Vec<String>>>,
    pub posted: Arc<Mutex<Vec<String>>>,
    pub closed: Arc<Mutex<bool>>,
}

impl MockTracker {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    pub fn with_comment(mut self, author: &str, body: &str) -> Self {
        self.comments.push(Comment {
            id: self.comments.len() as u64 + 1,
            user: CommentAuthor {
                login: author.to_string(),
            },
            body: body.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        });
        self
    }

    pub fn applied(&self) -> Vec<String> {
        self.labels_applied.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.labels_removed.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl TicketTracker for MockTracker {
    async fn ticket(&self) -> Result<Ticket> {
        Ok(Ticket {
            number: 1,
            title: "Bootcamp request".to_string(),
            body: self.body.clone(),
            state: "open".to_string(),
            labels: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        })
    }

    async fn tickets_with_label(&self, _label: &str) -> Result<Vec<Ticket>> {
        Ok(vec![self.ticket().await?])
    }

    async fn apply_label(&self, label: &str) -> Result<()> {
        self.labels_applied.lock().unwrap().push(label.to_string());
        Ok(())
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        self.labels_removed.lock().unwrap().push(label.to_string());
        Ok(())
    }

    async fn add_comment(&self, body: &str) -> Result<()> {
        self.posted.lock().unwrap().push(body.to_string());
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }

    async fn comments(&self) -> Result<Vec<Comment>> {
        Ok(self.comments.clone())
    }
}
