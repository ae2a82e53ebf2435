use clap::Parser;

/// 兩個 workflow binary 共用的命令列參數
#[derive(Debug, Clone, Parser)]
pub struct WorkflowArgs {
    /// Repository holding the bootcamp tickets, e.g. `octo-org/bootcamp-ops`
    pub working_repo: String,

    /// Ticket (issue) number to process
    pub ticket_number: u64,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
