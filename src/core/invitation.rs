use crate::config::toml_config::LabelConfig;
use crate::core::report;
use crate::core::settle::{SettlePoint, SettlePolicy};
use crate::domain::model::{InviteOutcome, Participant, RunStatus};
use crate::domain::ports::{Directory, TicketTracker};
use crate::utils::error::Result;

/// 邀請學員加入各自的組織，並把結果回報到 ticket
pub struct InvitationStage<'a, D: Directory + ?Sized, T: TicketTracker + ?Sized> {
    directory: &'a D,
    tracker: &'a T,
    labels: &'a LabelConfig,
    settle: &'a SettlePolicy,
}

impl<'a, D: Directory + ?Sized, T: TicketTracker + ?Sized> InvitationStage<'a, D, T> {
    pub fn new(
        directory: &'a D,
        tracker: &'a T,
        labels: &'a LabelConfig,
        settle: &'a SettlePolicy,
    ) -> Self {
        Self {
            directory,
            tracker,
            labels,
            settle,
        }
    }

    /// 講師在建立組織時已是管理者，所以只邀請學員；
    /// 但任何沒有組織的參與者都算一個錯誤
    pub async fn run(
        &self,
        attendees: &mut [Participant],
        facilitators: &[Participant],
    ) -> Result<RunStatus> {
        // 等組織建立在平台上生效
        self.settle.settle(SettlePoint::AfterProvisioning).await;

        let mut error_count = 0;
        for attendee in attendees.iter_mut() {
            let outcome = self.invite(attendee).await;
            attendee.record_invitation(&outcome);
            if !matches!(outcome, InviteOutcome::Invited) {
                error_count += 1;
            }
        }
        error_count += facilitators
            .iter()
            .filter(|f| f.organization.is_none())
            .count();

        self.report(attendees, facilitators, error_count).await
    }

    pub async fn invite(&self, participant: &Participant) -> InviteOutcome {
        let Some(org) = participant.org_name() else {
            tracing::warn!("⚠️ {} has no organization to be invited to", participant.handle);
            return InviteOutcome::NoOrganization;
        };

        match self.directory.invite_admin(participant.remote_id, org).await {
            Ok(()) => InviteOutcome::Invited,
            Err(e) => {
                tracing::warn!("⚠️ Could not invite {} to {}: {}", participant.handle, org, e);
                InviteOutcome::Failed(e.to_string())
            }
        }
    }

    async fn report(
        &self,
        attendees: &[Participant],
        facilitators: &[Participant],
        error_count: usize,
    ) -> Result<RunStatus> {
        if error_count > 0 {
            tracing::error!("❌ Provisioning finished with {} errors", error_count);
            self.tracker.apply_label(&self.labels.error).await?;
            self.tracker.remove_label(&self.labels.working).await?;
            self.tracker
                .add_comment(&report::provisioning_comment(false, attendees, facilitators))
                .await?;
            self.tracker.close().await?;
            return Ok(RunStatus::CompletedWithErrors { error_count });
        }

        // 成功時保留 ticket 開啟，方便人工檢查或加上 hold
        tracing::info!("✅ Provisioning complete");
        self.tracker.apply_label(&self.labels.done).await?;
        self.tracker.remove_label(&self.labels.working).await?;
        self.tracker
            .add_comment(&report::provisioning_comment(true, attendees, facilitators))
            .await?;
        Ok(RunStatus::Completed)
    }
}
