use std::time::Duration;

/// 需要等待平台最終一致性的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlePoint {
    /// fork 完成後、設定 visibility 之前
    BeforeVisibility,
    /// 所有組織建立完成後、寄送邀請之前
    AfterProvisioning,
    /// 每次成功刪除組織之後
    AfterDeletion,
}

/// 固定時間的等待策略，所有 sleep 都經過這裡
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlePolicy {
    pub visibility: Duration,
    pub provisioning: Duration,
    pub deletion: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            visibility: Duration::from_secs(15),
            provisioning: Duration::from_secs(30),
            deletion: Duration::from_secs(5),
        }
    }
}

impl SettlePolicy {
    pub fn immediate() -> Self {
        Self {
            visibility: Duration::ZERO,
            provisioning: Duration::ZERO,
            deletion: Duration::ZERO,
        }
    }

    pub fn duration_for(&self, point: SettlePoint) -> Duration {
        match point {
            SettlePoint::BeforeVisibility => self.visibility,
            SettlePoint::AfterProvisioning => self.provisioning,
            SettlePoint::AfterDeletion => self.deletion,
        }
    }

    pub async fn settle(&self, point: SettlePoint) {
        let duration = self.duration_for(point);
        if duration.is_zero() {
            return;
        }

        tracing::debug!("⏳ Waiting {:?} ({:?})", duration, point);
        tokio::time::sleep(duration).await;
    }
}
