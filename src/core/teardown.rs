use crate::config::toml_config::WorkflowConfig;
use crate::core::report;
use crate::core::settle::{SettlePoint, SettlePolicy};
use crate::domain::model::{Comment, DeletionBatch, RunStatus};
use crate::domain::ports::{Directory, TicketTracker};
use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;

/// 對應 [`report::participants_table`] 的資料列：`| handle | ✅ | [org](url) |`
static ORG_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\| \S+ \| [✅❌] \| \[([^\]\s]+)\]").unwrap());

/// 從 bot 留言的佈建表格中取回組織名稱，依出現順序
pub fn extract_org_names(comments: &[Comment], bot_login: &str) -> Vec<String> {
    comments
        .iter()
        .filter(|comment| comment.user.login == bot_login)
        .flat_map(|comment| {
            ORG_ROW
                .captures_iter(&comment.body)
                .map(|caps| caps[1].to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// 逐一刪除組織；單一失敗不會中斷其他刪除
pub async fn delete_orgs<D: Directory + ?Sized>(
    directory: &D,
    org_names: &[String],
    settle: &SettlePolicy,
) -> DeletionBatch {
    let mut batch = DeletionBatch::default();
    for org in org_names {
        match directory.delete_org(org).await {
            Ok(()) => {
                batch.deleted.push(org.clone());
                settle.settle(SettlePoint::AfterDeletion).await;
            }
            Err(e) => {
                tracing::warn!("⚠️ Could not delete {}: {}", org, e);
                batch.failed.push(org.clone());
            }
        }
    }
    batch
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownSummary {
    pub batch: DeletionBatch,
    pub status: RunStatus,
}

pub struct TeardownWorkflow<D: Directory, T: TicketTracker> {
    directory: D,
    tracker: T,
    config: WorkflowConfig,
    settle: SettlePolicy,
}

impl<D: Directory, T: TicketTracker> TeardownWorkflow<D, T> {
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

    pub async fn run(&self) -> Result<TeardownSummary> {
        tracing::info!("🧹 Starting bootcamp teardown");

        let comments = self.tracker.comments().await?;
        let org_names = extract_org_names(&comments, self.config.bot_login());
        tracing::info!("🔎 Found {} organizations to delete: {:?}", org_names.len(), org_names);

        let batch = delete_orgs(&self.directory, &org_names, &self.settle).await;
        if batch.error_count() > 0 {
            tracing::warn!(
                "⚠️ {} of {} organizations could not be deleted",
                batch.error_count(),
                org_names.len()
            );
        }

        self.tracker
            .add_comment(&report::teardown_comment(&batch))
            .await?;
        self.tracker.apply_label(&self.config.labels.done).await?;
        self.tracker.close().await?;

        tracing::info!("✅ Teardown complete");
        Ok(TeardownSummary {
            batch,
            status: RunStatus::Completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::LabelConfig;
    use crate::core::mock::{MockDirectory, MockTracker};
    use crate::domain::model::{CommentAuthor, Participant};
    use chrono::Utc;

    const BOT: &str = "github-actions[bot]";

    fn comment(author: &str, body: &str) -> Comment {
        Comment {
            id: 1,
            user: CommentAuthor {
                login: author.to_string(),
            },
            body: body.to_string(),
            created_at: Utc::now(),
        }
    }

    fn config() -> WorkflowConfig {
        WorkflowConfig {
            org_prefix: "gh-bootcamp".to_string(),
            enterprise: "octo-ent".to_string(),
            billing_admin: "octo-admin".to_string(),
            repos_to_fork: vec!["octo/demo".to_string()],
            labels: LabelConfig {
                new: "teardown::new".to_string(),
                working: "teardown::working".to_string(),
                done: "teardown::done".to_string(),
                error: "teardown::error".to_string(),
            },
            api_url: None,
            graphql_url: None,
            bot_login: None,
            settle: None,
        }
    }

    #[test]
    fn test_extract_ignores_marker() {
        let body = "| Handle | Invite Sent? | Org Name | Fork Errors |\n| --- | --- | --- | --- |\n\
                    | alice | ✅ | [org-a](url) |\n| bob | ❌ | [org-b](url) |\n";
        let names = extract_org_names(&[comment(BOT, body)], BOT);
        assert_eq!(names, vec!["org-a", "org-b"]);
    }

    #[test]
    fn test_extract_is_repeatable() {
        let comments = vec![comment(BOT, "| alice | ✅ | [org-a](url) | None |")];
        assert_eq!(extract_org_names(&comments, BOT), vec!["org-a"]);
        assert_eq!(extract_org_names(&comments, BOT), vec!["org-a"]);
        assert_eq!(ORG_ROW.captures_len(), 2);
    }

    #[test]
    fn test_extract_only_from_bot_comments() {
        let comments = vec![
            comment("mallory", "| eve | ✅ | [not-ours](url) |"),
            comment(BOT, "| alice | ✅ | [org-a](https://github.com/org-a) | None |"),
        ];
        let names = extract_org_names(&comments, BOT);
        assert_eq!(names, vec!["org-a"]);
    }

    #[test]
    fn test_extract_skips_rows_without_org() {
        let body = report::participants_table(&[Participant::new("carol", 3)]);
        let names = extract_org_names(&[comment(BOT, &body)], BOT);
        assert!(names.is_empty());
    }

    #[test]
    fn test_extract_across_comments_in_order() {
        let comments = vec![
            comment(BOT, "| alice | ❌ | [org-a](url) | None |"),
            comment(BOT, "no table here"),
            comment(BOT, "| dave | ✅ | [org-d](url) | None |"),
        ];
        let names = extract_org_names(&comments, BOT);
        assert_eq!(names, vec!["org-a", "org-d"]);
    }

    #[tokio::test]
    async fn test_delete_orgs_continues_after_failure() {
        let directory = MockDirectory::new().failing_delete("org-a");
        let names = vec!["org-a".to_string(), "org-b".to_string()];

        let batch = delete_orgs(&directory, &names, &SettlePolicy::immediate()).await;

        assert_eq!(batch.deleted, vec!["org-b"]);
        assert_eq!(batch.failed, vec!["org-a"]);
        assert_eq!(directory.calls(), vec!["delete org-a", "delete org-b"]);
    }

    #[tokio::test]
    async fn test_teardown_workflow() {
        let directory = MockDirectory::new().failing_delete("org-b");
        let table = "| alice | ✅ | [org-a](url) | None |\n| bob | ❌ | [org-b](url) | None |\n";
        let tracker = MockTracker::default()
            .with_comment(BOT, table)
            .with_comment("alice", "thanks!");

        let workflow = TeardownWorkflow::new(directory.clone(), tracker.clone(), config())
            .with_settle_policy(SettlePolicy::immediate());
        let summary = workflow.run().await.unwrap();

        assert_eq!(summary.status, RunStatus::Completed);
        assert_eq!(summary.batch.deleted, vec!["org-a"]);
        assert_eq!(summary.batch.failed, vec!["org-b"]);

        let posted = tracker.posted();
        assert_eq!(posted.len(), 1);
        assert!(posted[0].contains("### Deleted Orgs: \n\norg-a\n\n### Failures: \n\norg-b"));
        assert_eq!(tracker.applied(), vec!["teardown::done"]);
        assert!(tracker.is_closed());
    }
}
