use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use log::warn;
use crate::api::{ApiClient, FileSource, GoalSource};
use crate::cli::abbrev;
use crate::cli::error::{parse_pod, user_error, validate_task_key, validate_token};
use crate::cli::output::{format_access, format_goals, format_progress, format_starred, OutputOptions};
use crate::config::Config;
use crate::db::DbConnection;
use crate::models::{display_name, PodOutcomeMap, Session};
use crate::report::{pod_access, pod_progress, starred_tasks, PodProgress};
use crate::repo::SessionRepo;
use crate::tracker::Tracker;
use crate::utils::fuzzy::find_near_matches;
use crate::utils::parse_duration;

#[derive(Parser)]
#[command(name = "podtrack")]
#[command(about = "Pod progress tracker - follow participants' outcomes and check off tasks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an API access token
    Login {
        /// Bearer token issued by the identity provider
        #[arg(long)]
        token: String,
        /// Token lifetime (e.g., "8h", "1d"); omit for no expiry
        #[arg(long = "expires-in")]
        expires_in: Option<String>,
    },
    /// Remove the stored access token
    Logout,
    /// Show API endpoint and login state
    Status {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Show outcomes and tasks per pod
    Goals {
        /// Only show this pod (Trainee, Associate, Partner)
        #[arg(long)]
        pod: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Read a saved getMainGoals response instead of calling the API
        #[arg(long = "from-file", value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// List starred tasks still awaiting approval
    Starred {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Read a saved getMainGoals response instead of calling the API
        #[arg(long = "from-file", value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// Show checked/total tasks per pod and outcome
    Progress {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Read a saved getMainGoals response instead of calling the API
        #[arg(long = "from-file", value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// Show which pods are unlocked
    Pods {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Read a saved getMainGoals response instead of calling the API
        #[arg(long = "from-file", value_name = "PATH")]
        from_file: Option<PathBuf>,
    },
    /// Check (or uncheck) a task
    Check {
        /// Pod the task belongs to
        pod: String,
        /// CRM field name of the task (e.g., CAR_Youth_Resume__c)
        api_key: String,
        /// Clear the checkbox instead of setting it
        #[arg(long)]
        uncheck: bool,
    },
    /// Show the logged-in user's contact details
    Whoami,
}

pub fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let args = match abbrev::expand_command_abbreviations(args) {
        Ok(expanded) => expanded,
        Err(e) => user_error(&e),
    };

    let clap_args = std::iter::once("podtrack".to_string())
        .chain(args)
        .collect::<Vec<_>>();
    let cli = match Cli::try_parse_from(clap_args) {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors are user errors
            e.print()?;
            if e.use_stderr() {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    match cli.command {
        Commands::Login { token, expires_in } => handle_login(&config, token, expires_in),
        Commands::Logout => handle_logout(&config),
        Commands::Status { json } => handle_status(&config, json),
        Commands::Goals { pod, json, from_file } => handle_goals(&config, pod, json, from_file),
        Commands::Starred { json, from_file } => handle_starred(&config, json, from_file),
        Commands::Progress { json, from_file } => handle_progress(&config, json, from_file),
        Commands::Pods { json, from_file } => handle_pods(&config, json, from_file),
        Commands::Check { pod, api_key, uncheck } => handle_check(&config, pod, api_key, !uncheck),
        Commands::Whoami => handle_whoami(&config),
    }
}

fn handle_login(config: &Config, token: String, expires_in: Option<String>) -> Result<()> {
    if let Err(e) = validate_token(&token) {
        user_error(&e);
    }
    let expires_ts = match expires_in {
        Some(expr) => {
            let secs = parse_duration(&expr).unwrap_or_else(|e| user_error(&e.to_string()));
            Some(chrono::Utc::now().timestamp() + secs)
        }
        None => None,
    };

    let conn = DbConnection::connect(config)
        .context("Failed to connect to database")?;
    SessionRepo::save(&conn, &Session::new(token, expires_ts))?;

    match expires_ts {
        Some(ts) => println!("Logged in. Token expires {}.", format_local(ts)),
        None => println!("Logged in."),
    }
    Ok(())
}

fn handle_logout(config: &Config) -> Result<()> {
    let conn = DbConnection::connect(config)
        .context("Failed to connect to database")?;
    if SessionRepo::clear(&conn)? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<()> {
    let conn = DbConnection::connect(config)
        .context("Failed to connect to database")?;
    let session = SessionRepo::get(&conn)?;
    let state = match &session {
        None => "logged out",
        Some(s) if s.is_valid() => "logged in",
        Some(_) => "expired",
    };

    if json {
        let status = serde_json::json!({
            "api_url": config.api_url,
            "session": state,
            "expires_ts": session.as_ref().and_then(|s| s.expires_ts),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("API:     {}", config.api_url);
    match session.as_ref().and_then(|s| s.expires_ts) {
        Some(ts) => println!("Session: {} (expires {})", state, format_local(ts)),
        None => println!("Session: {}", state),
    }
    Ok(())
}

fn handle_goals(config: &Config, pod: Option<String>, json: bool, from_file: Option<PathBuf>) -> Result<()> {
    let pod = pod.map(|name| parse_pod(&name).unwrap_or_else(|e| user_error(&e)));
    let snapshot = load_snapshot(config, from_file)?;

    let map = match pod {
        Some(pod) => {
            let mut filtered = PodOutcomeMap::new();
            if let Some((name, groups)) = snapshot.get_pod(pod) {
                filtered.insert(name.to_string(), groups.to_vec());
            }
            if filtered.is_empty() {
                let present: Vec<&str> = snapshot.pod_names().into_iter().map(display_name).collect();
                user_error(&format!(
                    "No data for the {} pod. Pods in response: {}.",
                    pod,
                    if present.is_empty() { "none".to_string() } else { present.join(", ") }
                ));
            }
            Arc::new(filtered)
        }
        None => snapshot,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(map.as_ref())?);
    } else {
        print!("{}", format_goals(&map, OutputOptions::detect()));
    }
    Ok(())
}

fn handle_starred(config: &Config, json: bool, from_file: Option<PathBuf>) -> Result<()> {
    let snapshot = load_snapshot(config, from_file)?;
    let starred = starred_tasks(&snapshot);
    if json {
        println!("{}", serde_json::to_string_pretty(&starred)?);
    } else {
        print!("{}", format_starred(&starred, OutputOptions::detect()));
    }
    Ok(())
}

fn handle_progress(config: &Config, json: bool, from_file: Option<PathBuf>) -> Result<()> {
    let snapshot = load_snapshot(config, from_file)?;
    let rows: Vec<(String, PodProgress)> = snapshot
        .iter()
        .map(|(name, groups)| (display_name(name).to_string(), pod_progress(groups)))
        .collect();

    if json {
        let mut out = serde_json::Map::new();
        for (name, progress) in &rows {
            out.insert(name.clone(), serde_json::to_value(progress)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_progress(&rows, OutputOptions::detect()));
    }
    Ok(())
}

fn handle_pods(config: &Config, json: bool, from_file: Option<PathBuf>) -> Result<()> {
    let snapshot = load_snapshot(config, from_file)?;
    let access = pod_access(&snapshot);
    if json {
        println!("{}", serde_json::to_string_pretty(&access)?);
    } else {
        print!("{}", format_access(&access, OutputOptions::detect()));
    }
    Ok(())
}

fn handle_check(config: &Config, pod: String, api_key: String, new_value: bool) -> Result<()> {
    let pod = parse_pod(&pod).unwrap_or_else(|e| user_error(&e));
    if let Err(e) = validate_task_key(&api_key) {
        user_error(&e);
    }

    let client = api_client(config)?;

    // The lock check needs current data; if the fetch fails we still send the update
    let mut tracker = Tracker::new();
    match tracker.refresh(&client) {
        Ok(snapshot) => match snapshot.get_pod(pod) {
            None => warn!("No {} pod in current goals; sending update anyway", pod),
            Some((_, groups)) => {
                match snapshot.find_task(pod, &api_key) {
                    Some(task) if task.is_locked() => user_error(&format!(
                        "Task '{}' has been verified and can no longer be changed.",
                        task.key
                    )),
                    Some(_) => {}
                    None => {
                        let keys: Vec<&str> = groups
                            .iter()
                            .flat_map(|g| g.content.iter())
                            .map(|t| t.api_key.as_str())
                            .collect();
                        let near = find_near_matches(&api_key, &keys, 3);
                        match near.first() {
                            Some((suggestion, _)) => user_error(&format!(
                                "Task '{}' not found in the {} pod. Did you mean '{}'?",
                                api_key, pod, suggestion
                            )),
                            None => user_error(&format!(
                                "Task '{}' not found in the {} pod.",
                                api_key, pod
                            )),
                        }
                    }
                }
            }
        },
        Err(e) if e.is_user_facing() => return Err(e.into()),
        Err(_) => warn!("Could not verify task state; sending update anyway"),
    }

    client.update_checkbox(pod, &api_key, new_value)?;
    if new_value {
        println!("Checked {} in {}.", api_key, pod);
    } else {
        println!("Unchecked {} in {}.", api_key, pod);
    }
    Ok(())
}

fn handle_whoami(config: &Config) -> Result<()> {
    let client = api_client(config)?;
    match client.user_info()? {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("No account found for this login."),
    }
    Ok(())
}

/// Build an API client from the stored session
fn api_client(config: &Config) -> Result<ApiClient> {
    let conn = DbConnection::connect(config)
        .context("Failed to connect to database")?;
    let session = SessionRepo::get(&conn)?;
    ApiClient::from_session(&config.api_url, session.as_ref(), config.timeout)
}

/// Pick the goal source: a saved file when given, the live API otherwise
fn goal_source(config: &Config, from_file: Option<PathBuf>) -> Result<Box<dyn GoalSource>> {
    match from_file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(api_client(config)?)),
    }
}

/// Fetch and normalize one snapshot
fn load_snapshot(config: &Config, from_file: Option<PathBuf>) -> Result<Arc<PodOutcomeMap>> {
    let source = goal_source(config, from_file)?;
    let mut tracker = Tracker::new();
    Ok(tracker.refresh(source.as_ref())?)
}

fn format_local(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}
