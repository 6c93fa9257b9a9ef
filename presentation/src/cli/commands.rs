//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use duty_application::{
    ChangeFilter, ChannelQuery, EnrichIncidentsOptions, IncidentFilter, IncidentQuery,
    MemberFilter, MemberQuery, TeamFilter, TeamQuery,
};
use duty_domain::OutputFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Largest page the API accepts
const MAX_LIMIT: i64 = 100;

/// Argument combinations clap cannot reject on its own
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidArgs {
    #[error("--start-time and --end-time are required when --ids is not given")]
    MissingTimeRange,

    #[error("--start-time ({start}) must be earlier than --end-time ({end})")]
    InvertedTimeRange { start: i64, end: i64 },

    #[error("--ids must contain at least one valid id")]
    EmptyIds,

    #[error("--incident-id must not be empty")]
    EmptyIncidentId,
}

/// CLI arguments for duty-enrich
#[derive(Parser, Debug)]
#[command(name = "duty-enrich")]
#[command(author, version, about = "Flashduty incident data with every id resolved to a name")]
#[command(long_about = r#"
duty-enrich fetches incidents, timelines, alerts, channels, escalation rules,
changes, members and teams from the Flashduty API and replaces the raw person,
channel, team and schedule ids with their names. Every lookup is issued once per
kind, in parallel.

Configuration files are loaded from (in priority order):
1. DUTY_* environment variables   (DUTY_APP_KEY, DUTY_BASE_URL, ...)
2. --config <path>                 Explicit config file
3. ./duty.toml                     Project-level config
4. ~/.config/duty-enrich/config.toml   Global config

Example:
  duty-enrich incidents --ids 6672f0ab,6672f0ac --timeline
  duty-enrich incidents --start-time 1718000000 --end-time 1718600000 --progress Triggered
  duty-enrich -o toon escalation-rules --channel-id 2451002751131
  duty-enrich similar --incident-id 6672f0ab --limit 5
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Flashduty APP key
    #[arg(long, global = true, value_name = "KEY")]
    pub app_key: Option<String>,

    /// Flashduty API endpoint
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Output format: json, pretty or toon
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Cancel the whole run after this many seconds
    #[arg(long, global = true, value_name = "SECONDS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query incidents by id or by filter, with names resolved
    Incidents(IncidentsArgs),
    /// Enriched timelines for the given incidents
    Timeline(TimelineArgs),
    /// Alerts attached to the given incidents
    Alerts(AlertsArgs),
    /// Channels with team and creator names
    Channels(ChannelsArgs),
    /// Escalation rules of a channel with every target resolved
    EscalationRules(EscalationRulesArgs),
    /// Changes (deployments, config changes) with channel and creator names
    Changes(ChangesArgs),
    /// Past incidents similar to a reference incident, with names resolved
    Similar(SimilarArgs),
    /// Account members by person id or by name and email
    Members(MembersArgs),
    /// Teams and their members
    Teams(TeamsArgs),
}

#[derive(Args, Debug, Default)]
pub struct IncidentsArgs {
    /// Incident ids; all filters are ignored when given
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<String>,

    /// Triggered, Processing or Closed (comma-separated for several)
    #[arg(long)]
    pub progress: Option<String>,

    /// Info, Warning or Critical
    #[arg(long)]
    pub severity: Option<String>,

    #[arg(long, value_name = "ID")]
    pub channel_id: Option<i64>,

    /// Keyword search in the title
    #[arg(long)]
    pub title: Option<String>,

    /// Unix seconds
    #[arg(long, value_name = "TS")]
    pub start_time: Option<i64>,

    /// Unix seconds
    #[arg(long, value_name = "TS")]
    pub end_time: Option<i64>,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: i64,

    /// Skip the preview of each incident's first alerts
    #[arg(long)]
    pub no_alerts: bool,

    /// Alerts per preview (defaults to enrichment.alerts_limit)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub alerts_limit: Option<i64>,

    /// Attach each incident's enriched timeline
    #[arg(long)]
    pub timeline: bool,
}

impl IncidentsArgs {
    pub fn query(&self, default_alerts_limit: usize) -> Result<IncidentQuery, InvalidArgs> {
        let mut options = EnrichIncidentsOptions::default();
        if !self.no_alerts {
            let limit = self
                .alerts_limit
                .map_or(default_alerts_limit, |limit| limit as usize);
            options = options.with_alerts(limit);
        }
        if self.timeline {
            options = options.with_timeline();
        }

        if !self.ids.is_empty() {
            return Ok(IncidentQuery {
                ids: non_empty_ids(&self.ids)?,
                filter: IncidentFilter::default(),
                options,
            });
        }

        let (start, end) = time_range(self.start_time, self.end_time)?;
        let mut filter = IncidentFilter {
            severity: self.severity.clone().unwrap_or_default(),
            title: self.title.clone().unwrap_or_default(),
            limit: self.limit as usize,
            ..IncidentFilter::default()
        }
        .with_time_range(start, end);
        if let Some(progress) = &self.progress {
            filter = filter.with_progress(progress.trim());
        }
        if let Some(channel_id) = self.channel_id {
            filter = filter.with_channel(channel_id);
        }
        Ok(IncidentQuery {
            ids: Vec::new(),
            filter,
            options,
        })
    }
}

#[derive(Args, Debug)]
pub struct TimelineArgs {
    #[arg(long, required = true, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<String>,
}

impl TimelineArgs {
    pub fn incident_ids(&self) -> Result<Vec<String>, InvalidArgs> {
        non_empty_ids(&self.ids)
    }
}

#[derive(Args, Debug)]
pub struct AlertsArgs {
    #[arg(long, required = true, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<String>,

    /// Alerts per incident (defaults to enrichment.alerts_limit)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: Option<i64>,
}

impl AlertsArgs {
    pub fn incident_ids(&self) -> Result<Vec<String>, InvalidArgs> {
        non_empty_ids(&self.ids)
    }

    pub fn limit_or(&self, default_limit: usize) -> usize {
        self.limit.map_or(default_limit, |limit| limit as usize)
    }
}

#[derive(Args, Debug)]
pub struct ChannelsArgs {
    /// Channel ids; lists every channel when omitted
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<i64>,

    /// Case-insensitive substring of the channel name
    #[arg(long)]
    pub name: Option<String>,
}

impl ChannelsArgs {
    pub fn query(&self) -> ChannelQuery {
        ChannelQuery {
            ids: self.ids.iter().copied().filter(|id| *id > 0).collect(),
            name: self.name.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct EscalationRulesArgs {
    #[arg(long, value_name = "ID", value_parser = clap::value_parser!(i64).range(1..))]
    pub channel_id: i64,
}

#[derive(Args, Debug, Default)]
pub struct ChangesArgs {
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<String>,

    #[arg(long, value_name = "ID")]
    pub channel_id: Option<i64>,

    /// Change type, e.g. deploy or config
    #[arg(long = "type", value_name = "TYPE")]
    pub change_type: Option<String>,

    /// Unix seconds
    #[arg(long, value_name = "TS")]
    pub start_time: Option<i64>,

    /// Unix seconds
    #[arg(long, value_name = "TS")]
    pub end_time: Option<i64>,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: i64,
}

impl ChangesArgs {
    pub fn filter(&self) -> Result<ChangeFilter, InvalidArgs> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err(InvalidArgs::InvertedTimeRange { start, end });
            }
        }
        Ok(ChangeFilter {
            change_ids: self
                .ids
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            channel_id: self.channel_id.unwrap_or_default(),
            change_type: self.change_type.clone().unwrap_or_default(),
            start_time: self.start_time.unwrap_or_default(),
            end_time: self.end_time.unwrap_or_default(),
            limit: self.limit as usize,
        })
    }
}

#[derive(Args, Debug)]
pub struct SimilarArgs {
    /// Reference incident
    #[arg(long, value_name = "ID")]
    pub incident_id: String,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: i64,
}

impl SimilarArgs {
    pub fn incident_id(&self) -> Result<&str, InvalidArgs> {
        match self.incident_id.trim() {
            "" => Err(InvalidArgs::EmptyIncidentId),
            id => Ok(id),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct MembersArgs {
    /// Person ids; name and email are ignored when given
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<i64>,

    /// Fuzzy match on the member name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: i64,
}

impl MembersArgs {
    pub fn query(&self) -> Result<MemberQuery, InvalidArgs> {
        Ok(MemberQuery {
            ids: positive_ids(&self.ids)?,
            filter: MemberFilter {
                name: trimmed(&self.name),
                email: trimmed(&self.email),
                limit: self.limit as usize,
            },
        })
    }
}

#[derive(Args, Debug, Default)]
pub struct TeamsArgs {
    /// Team ids; the name filter is ignored when given
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub ids: Vec<i64>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=MAX_LIMIT))]
    pub limit: i64,
}

impl TeamsArgs {
    pub fn query(&self) -> Result<TeamQuery, InvalidArgs> {
        Ok(TeamQuery {
            ids: positive_ids(&self.ids)?,
            filter: TeamFilter {
                name: trimmed(&self.name),
                limit: self.limit as usize,
            },
        })
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Given ids must hold at least one usable (positive) id.
fn positive_ids(raw: &[i64]) -> Result<Vec<i64>, InvalidArgs> {
    let ids: Vec<i64> = raw.iter().copied().filter(|id| *id > 0).collect();
    if !raw.is_empty() && ids.is_empty() {
        return Err(InvalidArgs::EmptyIds);
    }
    Ok(ids)
}

fn non_empty_ids(raw: &[String]) -> Result<Vec<String>, InvalidArgs> {
    let ids: Vec<String> = raw
        .iter()
        .map(|id| id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(InvalidArgs::EmptyIds);
    }
    Ok(ids)
}

fn time_range(start: Option<i64>, end: Option<i64>) -> Result<(i64, i64), InvalidArgs> {
    match (start, end) {
        (Some(start), Some(end)) if start > 0 && end > 0 => {
            if start >= end {
                Err(InvalidArgs::InvertedTimeRange { start, end })
            } else {
                Ok((start, end))
            }
        }
        _ => Err(InvalidArgs::MissingTimeRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("duty-enrich").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["incidents", "--ids", "a,b", "-o", "toon", "-vv", "--app-key", "k"]);

        assert_eq!(cli.output, Some(OutputFormat::Toon));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.app_key.as_deref(), Some("k"));
        let Some(Command::Incidents(args)) = cli.command else {
            panic!("expected incidents");
        };
        assert_eq!(args.ids, vec!["a", "b"]);
    }

    #[test]
    fn test_incident_query_by_ids_ignores_filters() {
        let args = IncidentsArgs {
            ids: vec!["a".into(), " ".into(), "b".into()],
            progress: Some("Closed".into()),
            limit: 20,
            ..Default::default()
        };

        let query = args.query(7).unwrap();

        assert_eq!(query.ids, vec!["a", "b"]);
        assert_eq!(query.filter, IncidentFilter::default());
        assert!(query.options.include_alerts);
        assert_eq!(query.options.alerts_limit, 7);
    }

    #[test]
    fn test_incident_query_by_filter() {
        let cli = parse(&[
            "incidents",
            "--start-time",
            "100",
            "--end-time",
            "200",
            "--severity",
            "Critical",
            "--channel-id",
            "9",
            "--limit",
            "50",
            "--progress",
            "Triggered,Processing",
            "--alerts-limit",
            "5",
            "--timeline",
        ]);
        let Some(Command::Incidents(args)) = cli.command else {
            panic!("expected incidents");
        };

        let query = args.query(20).unwrap();

        assert!(query.ids.is_empty());
        assert_eq!(query.filter.severity, "Critical");
        assert_eq!(query.filter.channel_id, 9);
        assert_eq!(query.filter.progress, "Triggered,Processing");
        assert_eq!(query.filter.limit, 50);
        assert_eq!((query.filter.start_time, query.filter.end_time), (100, 200));
        assert!(query.options.include_timeline);
        assert_eq!(query.options.alerts_limit, 5);
    }

    #[test]
    fn test_alerts_preview_is_on_unless_disabled() {
        let cli = parse(&["incidents", "--ids", "a"]);
        let Some(Command::Incidents(args)) = cli.command else {
            panic!("expected incidents");
        };
        let options = args.query(20).unwrap().options;
        assert!(options.include_alerts);
        assert_eq!(options.alerts_limit, 20);
        assert!(!options.include_timeline);

        let cli = parse(&["incidents", "--ids", "a", "--no-alerts"]);
        let Some(Command::Incidents(args)) = cli.command else {
            panic!("expected incidents");
        };
        assert!(!args.query(20).unwrap().options.include_alerts);
    }

    #[test]
    fn test_incident_query_requires_time_range() {
        let args = IncidentsArgs {
            start_time: Some(100),
            limit: 20,
            ..Default::default()
        };
        assert_eq!(args.query(20).unwrap_err(), InvalidArgs::MissingTimeRange);

        let args = IncidentsArgs {
            start_time: Some(300),
            end_time: Some(200),
            limit: 20,
            ..Default::default()
        };
        assert_eq!(
            args.query(20).unwrap_err(),
            InvalidArgs::InvertedTimeRange { start: 300, end: 200 }
        );
    }

    #[test]
    fn test_limit_out_of_range_is_rejected() {
        let result = Cli::try_parse_from(["duty-enrich", "incidents", "--limit", "101"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_output_format_is_rejected() {
        let result = Cli::try_parse_from(["duty-enrich", "-o", "yaml", "channels"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeline_requires_ids() {
        assert!(Cli::try_parse_from(["duty-enrich", "timeline"]).is_err());

        let cli = parse(&["timeline", "--ids", " , "]);
        let Some(Command::Timeline(args)) = cli.command else {
            panic!("expected timeline");
        };
        assert_eq!(args.incident_ids().unwrap_err(), InvalidArgs::EmptyIds);
    }

    #[test]
    fn test_alerts_limit_falls_back_to_config() {
        let cli = parse(&["alerts", "--ids", "x"]);
        let Some(Command::Alerts(args)) = cli.command else {
            panic!("expected alerts");
        };
        assert_eq!(args.limit_or(13), 13);
    }

    #[test]
    fn test_channels_query() {
        let cli = parse(&["channels", "--ids", "3,0,4", "--name", "ops"]);
        let Some(Command::Channels(args)) = cli.command else {
            panic!("expected channels");
        };

        let query = args.query();

        assert_eq!(query.ids, vec![3, 4]);
        assert_eq!(query.name.as_deref(), Some("ops"));
    }

    #[test]
    fn test_changes_filter() {
        let cli = parse(&["changes", "--channel-id", "3", "--type", "deploy"]);
        let Some(Command::Changes(args)) = cli.command else {
            panic!("expected changes");
        };

        let filter = args.filter().unwrap();

        assert_eq!(filter.channel_id, 3);
        assert_eq!(filter.change_type, "deploy");
        assert_eq!(filter.limit, 20);
        assert_eq!(filter.start_time, 0);
    }

    #[test]
    fn test_escalation_rules_requires_positive_channel() {
        assert!(Cli::try_parse_from(["duty-enrich", "escalation-rules", "--channel-id", "0"]).is_err());
        let cli = parse(&["escalation-rules", "--channel-id", "42"]);
        assert!(matches!(
            cli.command,
            Some(Command::EscalationRules(EscalationRulesArgs { channel_id: 42 }))
        ));
    }

    #[test]
    fn test_similar_args() {
        let cli = parse(&["similar", "--incident-id", " inc-9 ", "--limit", "5"]);
        let Some(Command::Similar(args)) = cli.command else {
            panic!("expected similar");
        };
        assert_eq!(args.incident_id().unwrap(), "inc-9");
        assert_eq!(args.limit, 5);

        assert!(Cli::try_parse_from(["duty-enrich", "similar"]).is_err());
        let cli = parse(&["similar", "--incident-id", " "]);
        let Some(Command::Similar(args)) = cli.command else {
            panic!("expected similar");
        };
        assert_eq!(args.incident_id().unwrap_err(), InvalidArgs::EmptyIncidentId);
    }

    #[test]
    fn test_members_query() {
        let cli = parse(&["members", "--name", " ali ", "--email", "a@x.io"]);
        let Some(Command::Members(args)) = cli.command else {
            panic!("expected members");
        };

        let query = args.query().unwrap();

        assert!(query.ids.is_empty());
        assert_eq!(query.filter.name, "ali");
        assert_eq!(query.filter.email, "a@x.io");
        assert_eq!(query.filter.limit, 20);
    }

    #[test]
    fn test_members_by_ids_drops_zero() {
        let args = MembersArgs {
            ids: vec![7, 0, 8],
            limit: 20,
            ..Default::default()
        };
        assert_eq!(args.query().unwrap().ids, vec![7, 8]);

        let args = MembersArgs {
            ids: vec![0],
            limit: 20,
            ..Default::default()
        };
        assert_eq!(args.query().unwrap_err(), InvalidArgs::EmptyIds);
    }

    #[test]
    fn test_teams_query() {
        let cli = parse(&["teams", "--ids", "10,11", "--limit", "3"]);
        let Some(Command::Teams(args)) = cli.command else {
            panic!("expected teams");
        };

        let query = args.query().unwrap();

        assert_eq!(query.ids, vec![10, 11]);
        assert_eq!(query.filter, TeamFilter { name: String::new(), limit: 3 });
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = parse(&["--show-config", "--no-config"]);
        assert!(cli.show_config);
        assert!(cli.no_config);
        assert!(cli.command.is_none());
    }
}
