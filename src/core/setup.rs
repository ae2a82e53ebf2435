use crate::config::toml_config::WorkflowConfig;
use crate::core::extractor::extract_request;
use crate::core::invitation::InvitationStage;
use crate::core::provisioner::{build_participants, Provisioner};
use crate::core::report;
use crate::core::settle::SettlePolicy;
use crate::domain::model::{Participant, Request, RunStatus};
use crate::domain::ports::{Directory, TicketTracker};
use crate::utils::error::{BootcampError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    pub status: RunStatus,
    pub attendees: Vec<Participant>,
    pub facilitators: Vec<Participant>,
}

/// 佈建流程：解析 ticket → 建立組織與 fork → 邀請並回報
pub struct SetupWorkflow<D: Directory, T: TicketTracker> {
    directory: D,
    tracker: T,
    config: WorkflowConfig,
    settle: SettlePolicy,
}

impl<D: Directory, T: TicketTracker> SetupWorkflow<D, T> {
    pub fn new(directory: D, tracker: T, config: WorkflowConfig) -> Self {
        let settle = config.settle_policy();
        Self {
            directory,
            tracker,
            config,
            settle,
        }
    }

    pub fn with_settle_policy(mut self, settle: SettlePolicy) -> Self {
        self.settle = settle;
        self
    }

    pub async fn run(&self) -> Result<SetupSummary> {
        tracing::info!("🚀 Starting bootcamp setup");

        self.tracker.apply_label(&self.config.labels.working).await?;
        self.tracker.remove_label(&self.config.labels.new).await?;

        // 以下任一步驟失敗都會在佈建前中止整個流程
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(e) => return self.abort(e).await,
        };

        let enterprise_id = match self.directory.enterprise_id(&self.config.enterprise).await {
            Ok(id) => id,
            Err(e) => return self.abort(e).await,
        };

        let (mut attendees, mut facilitators) = match self.build_roster(&request).await {
            Ok(roster) => roster,
            Err(e) => return self.abort(e).await,
        };

        let provisioner = Provisioner::new(
            &self.directory,
            &self.config,
            &self.settle,
            &enterprise_id,
            &request.date,
            &facilitators,
        );
        tracing::info!("🏗️ Provisioning {} attendees", attendees.len());
        provisioner.provision_all(&mut attendees).await;
        tracing::info!("🏗️ Provisioning {} facilitators", facilitators.len());
        provisioner.provision_all(&mut facilitators).await;

        let status = InvitationStage::new(
            &self.directory,
            &self.tracker,
            &self.config.labels,
            &self.settle,
        )
        .run(&mut attendees, &facilitators)
        .await?;

        Ok(SetupSummary {
            status,
            attendees,
            facilitators,
        })
    }

    async fn read_request(&self) -> Result<Request> {
        let ticket = self.tracker.ticket().await?;
        extract_request(ticket.body.as_deref().unwrap_or_default())
    }

    async fn build_roster(
        &self,
        request: &Request,
    ) -> Result<(Vec<Participant>, Vec<Participant>)> {
        let attendees = build_participants(&self.directory, &request.attendees).await?;
        let facilitators = build_participants(&self.directory, &request.facilitators).await?;
        Ok((attendees, facilitators))
    }

    async fn abort(&self, error: BootcampError) -> Result<SetupSummary> {
        tracing::error!(
            "❌ Bootcamp setup aborted: {} (Category: {:?})",
            error,
            error.category()
        );
        tracing::error!("💡 Suggestion: {}", error.recovery_suggestion());

        self.tracker.apply_label(&self.config.labels.error).await?;
        self.tracker.remove_label(&self.config.labels.working).await?;
        self.tracker
            .add_comment(report::PROVISIONING_ERRORED)
            .await?;
        self.tracker.close().await?;

        Ok(SetupSummary {
            status: RunStatus::Aborted {
                reason: error.to_string(),
            },
            attendees: Vec::new(),
            facilitators: Vec::new(),
        })
    }
}
