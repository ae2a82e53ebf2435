use anyhow::Context;
use bootcamp_ops::utils::logger;
use bootcamp_ops::{
    BootcampConfig, Credentials, GithubClient, GithubIssues, SetupWorkflow, WorkflowArgs,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bootcamp-setup")]
#[command(about = "Provision bootcamp organizations from a request ticket")]
struct Args {
    #[command(flatten)]
    workflow: WorkflowArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse().workflow;

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!(
        "🚀 Starting bootcamp setup for {}#{}",
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

    let section = config.setup;
    let credentials = Credentials::from_env()?;

    let graphql_url = section.graphql_url();
    let admin = GithubClient::new(&credentials.admin_token, section.api_url(), &graphql_url)
        .context("building admin client")?;
    let tickets = GithubClient::new(&credentials.github_token, section.api_url(), &graphql_url)
        .context("building ticket client")?;
    let issues = GithubIssues::new(tickets, args.working_repo, args.ticket_number);

    let summary = SetupWorkflow::new(admin, issues, section)
        .run()
        .await
        .context("bootcamp setup failed")?;

    let exit_code = summary.status.exit_code();
    if exit_code > 0 {
        tracing::error!("❌ Setup finished with status {:?}", summary.status);
        std::process::exit(exit_code);
    }

    println!(
        "✅ Provisioned {} attendees and {} facilitators",
        summary.attendees.len(),
        summary.facilitators.len()
    );
    Ok(())
}
