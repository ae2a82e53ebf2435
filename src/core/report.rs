use crate::domain::model::{DeletionBatch, Participant};

pub const WEB_BASE_URL: &str = "https://github.com";

pub const PROVISIONING_COMPLETE: &str = "\n## Provisioning complete 🎉\n\n\n\
REMINDER: These bootcamp environments are set to auto delete.  If they need to stick around, add the `bootcamp::hold` label.\n\n\n";

pub const PROVISIONING_ERRORED: &str = "\n## Provisioning errored 👎 \n\n\n\
Additional information on this error is available in the Actions logs. \n";

pub const TEARDOWN_COMPLETE: &str = "\n## Teardown complete 🗑\n\n\n\
I've successfully deleted the following orgs.  REMINDER: It takes 90 days for these org names to be available again.\n\n\n";

const TABLE_HEADERS: [&str; 4] = ["Handle", "Invite Sent?", "Org Name", "Fork Errors"];

/// 參與者狀態表格，teardown 會從這個格式反查組織名稱
pub fn participants_table(participants: &[Participant]) -> String {
    let mut table = format!(
        "| {} |\n| {} |\n",
        TABLE_HEADERS.join(" | "),
        TABLE_HEADERS.map(|_| "---").join(" | ")
    );

    for participant in participants {
        let invited = if participant.invited { "✅" } else { "❌" };
        let org = participant
            .org_name()
            .map(|name| format!("[{}]({}/{})", name, WEB_BASE_URL, name))
            .unwrap_or_default();
        let fork_errors = if participant.fork_errors.is_empty() {
            "None".to_string()
        } else {
            participant.fork_errors.join(", ")
        };

        table.push_str(&format!(
            "| {} |\n",
            [participant.handle.as_str(), invited, org.as_str(), fork_errors.as_str()].join(" | ")
        ));
    }

    table
}

/// 佈建結果留言：前言加上學員與講師兩張表
pub fn provisioning_comment(
    succeeded: bool,
    attendees: &[Participant],
    facilitators: &[Participant],
) -> String {
    let preamble = if succeeded {
        PROVISIONING_COMPLETE
    } else {
        PROVISIONING_ERRORED
    };

    format!(
        "{}### Attendees\n\n{}### Facilitators\n\n{}",
        preamble,
        participants_table(attendees),
        participants_table(facilitators)
    )
}

pub fn teardown_comment(batch: &DeletionBatch) -> String {
    format!(
        "{}### Deleted Orgs: \n\n{}\n\n### Failures: \n\n{}",
        TEARDOWN_COMPLETE,
        batch.deleted.join("\n"),
        batch.failed.join("\n")
    )
}
