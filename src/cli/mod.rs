//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the ascapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// App Store Connect command-line interface.
#[derive(Parser, Debug)]
#[command(name = "ascapi", about = "App Store Connect API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource ID.
        id: String,
    },

    /// List one page of resources, or every page with --all.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Parent app ID (required for reviews).
        #[arg(long)]
        app: Option<String>,

        /// Page size. Zero or negative lets the server decide.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Filter as KEY=VALUE[,VALUE...]; repeatable.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, Vec<String>)>,

        /// Sort key, e.g. -createdDate.
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,

        /// Continue from a previous page's next link.
        #[arg(long, conflicts_with = "all")]
        next: Option<String>,

        /// Follow next links until the last page.
        #[arg(long, default_value = "false")]
        all: bool,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An app.
    #[value(alias = "apps")]
    App,
    /// An uploaded build.
    #[value(alias = "builds")]
    Build,
    /// A TestFlight beta group.
    #[value(name = "beta-group", alias = "beta-groups")]
    BetaGroup,
    /// A TestFlight beta tester.
    #[value(name = "beta-tester", alias = "beta-testers")]
    BetaTester,
    /// A customer review.
    #[value(alias = "reviews")]
    Review,
    /// A registered device.
    #[value(alias = "devices")]
    Device,
}

/// Parse `KEY=V1,V2` into a filter key and its values.
pub fn parse_filter(raw: &str) -> Result<(String, Vec<String>), String> {
    let (key, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in '{raw}'"));
    }
    let values = values.split(',').map(str::to_string).collect();
    Ok((key.to_string(), values))
}
