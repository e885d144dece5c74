use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use edgeguard_application::{PaginationOptions, RateLimitService};
use edgeguard_core::{AppError, AppResult};
use edgeguard_domain::RateLimit;
use serde_json::{Value, json};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "edgeguard", version, about = "Manage zone rate-limiting rules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the rules of a zone.
    List {
        #[command(flatten)]
        zone: ZoneArgs,
        /// Page to fetch, starting at 1.
        #[arg(long)]
        page: Option<u32>,
        /// Rules per page.
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show one rule.
    Get {
        #[command(flatten)]
        rule: RuleArgs,
    },
    /// Create a rule from a JSON file.
    Create {
        #[command(flatten)]
        zone: ZoneArgs,
        /// Path to the rule JSON.
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace a rule with the contents of a JSON file.
    Update {
        #[command(flatten)]
        rule: RuleArgs,
        /// Path to the rule JSON.
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a rule.
    Delete {
        #[command(flatten)]
        rule: RuleArgs,
    },
}

#[derive(Debug, Args)]
pub struct ZoneArgs {
    /// Zone identifier.
    #[arg(long)]
    pub zone: String,
}

#[derive(Debug, Args)]
pub struct RuleArgs {
    /// Zone identifier.
    #[arg(long)]
    pub zone: String,
    /// Rule identifier.
    #[arg(long)]
    pub id: String,
}

pub async fn run(service: &RateLimitService, command: Command) -> AppResult<Value> {
    match command {
        Command::List {
            zone,
            page,
            per_page,
        } => {
            if page.is_none() && per_page.is_none() {
                let rules = service.list_rate_limits(zone.zone.as_str()).await?;
                info!(zone_id = %zone.zone, count = rules.len(), "listed rate limits");
                return to_json(&rules);
            }

            let page = service
                .list_rate_limits_page(zone.zone.as_str(), &PaginationOptions { page, per_page })
                .await?;
            info!(
                zone_id = %zone.zone,
                count = page.rules.len(),
                total_count = page.result_info.total_count,
                "listed rate limit page"
            );
            Ok(json!({
                "rules": to_json(&page.rules)?,
                "result_info": to_json(&page.result_info)?,
            }))
        }
        Command::Get { rule } => {
            let found = service
                .rate_limit(rule.zone.as_str(), rule.id.as_str())
                .await?;
            to_json(&found)
        }
        Command::Create { zone, file } => {
            let input = read_rule(&file)?;
            if input.has_id() {
                warn!(
                    rule_id = %input.id,
                    "create input carries a rule id; the server assigns its own"
                );
            }
            let created = service
                .create_rate_limit(zone.zone.as_str(), &input)
                .await?;
            info!(zone_id = %zone.zone, rule_id = %created.id, "created rate limit");
            to_json(&created)
        }
        Command::Update { rule, file } => {
            let input = read_rule(&file)?;
            let updated = service
                .update_rate_limit(rule.zone.as_str(), rule.id.as_str(), &input)
                .await?;
            info!(zone_id = %rule.zone, rule_id = %rule.id, "updated rate limit");
            to_json(&updated)
        }
        Command::Delete { rule } => {
            service
                .delete_rate_limit(rule.zone.as_str(), rule.id.as_str())
                .await?;
            info!(zone_id = %rule.zone, rule_id = %rule.id, "deleted rate limit");
            Ok(json!({ "id": rule.id, "deleted": true }))
        }
    }
}

fn read_rule(file: &Path) -> AppResult<RateLimit> {
    let contents = fs::read_to_string(file).map_err(|error| {
        AppError::Validation(format!("failed to read '{}': {error}", file.display()))
    })?;
    parse_rule(contents.as_str())
}

fn parse_rule(contents: &str) -> AppResult<RateLimit> {
    serde_json::from_str(contents)
        .map_err(|error| AppError::Validation(format!("invalid rate limit JSON: {error}")))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode output: {error}")))
}
