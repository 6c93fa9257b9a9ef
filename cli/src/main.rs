//! CLI entrypoint for duty-enrich
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod logging;

use anyhow::{Context, Result, bail};
use clap::Parser;
use duty_application::{
    EnrichChangesUseCase, EnrichChannelsUseCase, EnrichError, EnrichEscalationRulesUseCase,
    EnrichTimelineUseCase, IncidentAlertsUseCase, QueryIncidentsUseCase, QueryMembersUseCase,
    QueryTeamsUseCase, SimilarIncidentsUseCase,
};
use duty_domain::OutputFormat;
use duty_infrastructure::{ConfigLoader, DutyClient, FileConfig};
use duty_presentation::{Cli, Command, ConsoleFormatter, OutputRenderer};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Exit status after Ctrl-C or `--timeout`
const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => return report(&e),
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn report(error: &anyhow::Error) -> ExitCode {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    eprintln!("{}", ConsoleFormatter::error(&error.to_string(), &causes));

    let cancelled = error
        .downcast_ref::<EnrichError>()
        .is_some_and(EnrichError::is_cancelled);
    if cancelled {
        ExitCode::from(EXIT_CANCELLED)
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: Cli) -> Result<()> {
    info!("Starting duty-enrich");

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()?
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    apply_overrides(&mut config, &cli);
    let format = output_format(&cli, &config);

    if cli.show_config {
        show_config(&cli, &config, format);
        return Ok(());
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help to see the available commands.");
    };

    // === Dependency Injection ===
    let client_config = config.client_config().context("Invalid configuration")?;
    let client = Arc::new(DutyClient::new(client_config)?);
    info!(client = ?client, %format, "Client ready");

    let token = CancellationToken::new();
    cancel_on_ctrl_c(&token);
    if let Some(seconds) = cli.timeout {
        cancel_after(&token, Duration::from_secs(seconds));
    }

    let renderer = OutputRenderer::new(format);
    let output = execute(command, client, &config, renderer, &token).await?;
    println!("{output}");

    Ok(())
}

/// CLI flags win over every configuration source.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(app_key) = &cli.app_key {
        config.api.app_key = Some(app_key.clone());
    }
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    config.output.resolve(cli.output)
}

fn show_config(cli: &Cli, config: &FileConfig, format: OutputFormat) {
    if cli.no_config {
        println!("Configuration files disabled (--no-config)");
    } else {
        ConfigLoader::print_config_sources(cli.config.as_deref());
    }

    println!("{}", ConsoleFormatter::section_header("Effective configuration"));
    print!("{}", config.to_redacted_toml());
    println!("# resolved output format: {format}");

    if let Err(e) = config.validate() {
        eprintln!("{}", ConsoleFormatter::warning(&e.to_string()));
    }
}

fn cancel_on_ctrl_c(token: &CancellationToken) {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            token.cancel();
        }
    });
}

fn cancel_after(token: &CancellationToken, limit: Duration) {
    let token = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            _ = tokio::time::sleep(limit) => {
                warn!(seconds = limit.as_secs(), "Timeout reached, cancelling");
                token.cancel();
            }
        }
    });
}

async fn execute(
    command: Command,
    client: Arc<DutyClient>,
    config: &FileConfig,
    renderer: OutputRenderer,
    token: &CancellationToken,
) -> Result<String> {
    let rendered = match command {
        Command::Incidents(args) => {
            let query = args.query(config.enrichment.alerts_limit)?;
            let incidents = QueryIncidentsUseCase::new(Arc::clone(&client), client)
                .execute(&query, token)
                .await
                .context("Unable to query incidents")?;
            renderer.render_listing("incidents", &incidents, None)?
        }
        Command::Timeline(args) => {
            let incident_ids = args.incident_ids()?;
            let timelines = EnrichTimelineUseCase::new(Arc::clone(&client), client)
                .execute(&incident_ids, token)
                .await
                .context("Unable to load incident timelines")?;
            renderer.render_listing("timelines", &timelines, None)?
        }
        Command::Alerts(args) => {
            let incident_ids = args.incident_ids()?;
            let limit = args.limit_or(config.enrichment.alerts_limit);
            let alerts = IncidentAlertsUseCase::new(client)
                .execute(&incident_ids, limit, token)
                .await
                .context("Unable to retrieve alerts")?;
            renderer.render_listing("incidents", &alerts, None)?
        }
        Command::Channels(args) => {
            let channels = EnrichChannelsUseCase::new(Arc::clone(&client), client)
                .query(&args.query(), token)
                .await
                .context("Unable to list channels")?;
            renderer.render_listing("channels", &channels, None)?
        }
        Command::EscalationRules(args) => {
            let rules = EnrichEscalationRulesUseCase::new(Arc::clone(&client), client)
                .execute(args.channel_id, token)
                .await
                .context("Unable to load escalation rules")?;
            renderer.render_listing("rules", &rules, None)?
        }
        Command::Changes(args) => {
            let filter = args.filter()?;
            let report = EnrichChangesUseCase::new(Arc::clone(&client), client)
                .execute(&filter, token)
                .await
                .context("Unable to query changes")?;
            renderer.render_listing("changes", &report.changes, Some(report.total))?
        }
        Command::Similar(args) => {
            let incident_id = args.incident_id()?;
            let similar = SimilarIncidentsUseCase::new(Arc::clone(&client), client)
                .execute(incident_id, args.limit as usize, token)
                .await
                .context("Unable to find similar incidents")?;
            renderer.render_listing("incidents", &similar.incidents, Some(similar.total))?
        }
        Command::Members(args) => {
            let query = args.query()?;
            let report = QueryMembersUseCase::new(Arc::clone(&client), client)
                .execute(&query, token)
                .await
                .context("Unable to retrieve members")?;
            renderer.render_listing("members", &report.members, Some(report.total))?
        }
        Command::Teams(args) => {
            let query = args.query()?;
            let report = QueryTeamsUseCase::new(Arc::clone(&client), client)
                .execute(&query, token)
                .await
                .context("Unable to retrieve teams")?;
            renderer.render_listing("teams", &report.teams, Some(report.total))?
        }
    };
    Ok(rendered)
}
