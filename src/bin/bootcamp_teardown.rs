use anyhow::Context;
use bootcamp_ops::utils::logger;
use bootcamp_ops::{
    BootcampConfig, Credentials, GithubClient, GithubIssues, TeardownWorkflow, WorkflowArgs,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bootcamp-teardown")]
#[command(about = "Delete the organizations listed on a provisioning ticket")]
struct Args {
    #[command(flatten)]
    workflow: WorkflowArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse().workflow;

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!(
        "🧹 Starting bootcamp teardown for {}#{}",
        args.working_repo,
        args.ticket_number
    );
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match BootcampConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration could not be loaded: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            std::process::exit(1);
        }
    };

    // 排程觸發時沒有對應的 ticket
    if args.ticket_number == 0 {
        tracing::warn!("⚠️ No ticket number supplied, nothing to tear down");
        return Ok(());
    }

    let section = config.teardown;
    let credentials = Credentials::from_env()?;

    let graphql_url = section.graphql_url();
    let admin = GithubClient::new(&credentials.admin_token, section.api_url(), &graphql_url)
        .context("building admin client")?;
    let tickets = GithubClient::new(&credentials.github_token, section.api_url(), &graphql_url)
        .context("building ticket client")?;
    let issues = GithubIssues::new(tickets, args.working_repo, args.ticket_number);

    let summary = TeardownWorkflow::new(admin, issues, section)
        .run()
        .await
        .context("bootcamp teardown failed")?;

    println!(
        "✅ Deleted {} organizations ({} failures)",
        summary.batch.deleted.len(),
        summary.batch.error_count()
    );
    let exit_code = summary.status.exit_code();
    if exit_code > 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
