//! App Store Connect API CLI binary.
//!
//! A command-line interface for browsing App Store Connect resources.

use ascapi::cli::{Cli, Command, Entity};
use ascapi::output::PrettyPrint;
use ascapi::{
    AppAttributes, AscClient, AscError, BetaGroupAttributes, BetaTesterAttributes,
    BuildAttributes, DeviceAttributes, Get, List, ListOptions, Resource, ReviewAttributes,
};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match AscClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set ASC_BEARER_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "ascapi=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// List options collected from the command line.
struct ListArgs {
    limit: Option<i64>,
    filters: Vec<(String, Vec<String>)>,
    sort: Option<String>,
    next: Option<String>,
    all: bool,
}

impl ListArgs {
    fn apply<Q: ListOptions + Default>(&self) -> Q {
        let mut query = Q::default();
        for (key, values) in &self.filters {
            query.query_mut().set_filter(key, values);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        if let Some(ref sort) = self.sort {
            query = query.sort(sort);
        }
        if let Some(ref next) = self.next {
            query = query.next_url(next);
        }
        query
    }
}

async fn run(client: &AscClient, cli: Cli) -> ascapi::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List {
            entity,
            app,
            limit,
            filters,
            sort,
            next,
            all,
        } => {
            let args = ListArgs {
                limit,
                filters,
                sort,
                next,
                all,
            };
            handle_list(client, entity, app.as_deref(), &args, cli.json).await
        }
    }
}

async fn handle_get(
    client: &AscClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> ascapi::Result<()> {
    match entity {
        Entity::App => get_one::<AppAttributes>(client, id, json).await,
        Entity::Build => get_one::<BuildAttributes>(client, id, json).await,
        Entity::BetaGroup => get_one::<BetaGroupAttributes>(client, id, json).await,
        Entity::BetaTester => get_one::<BetaTesterAttributes>(client, id, json).await,
        Entity::Review => get_one::<ReviewAttributes>(client, id, json).await,
        Entity::Device => get_one::<DeviceAttributes>(client, id, json).await,
    }
}

async fn get_one<A>(client: &AscClient, id: &str, json: bool) -> ascapi::Result<()>
where
    A: Get + Serialize,
    Resource<A>: PrettyPrint,
{
    let response = A::get(client, id).await?;
    if json {
        print_json(&response)?;
    } else {
        println!("{}", response.data.pretty_print());
    }
    Ok(())
}

async fn handle_list(
    client: &AscClient,
    entity: Entity,
    app: Option<&str>,
    args: &ListArgs,
    json: bool,
) -> ascapi::Result<()> {
    match entity {
        Entity::App => list::<AppAttributes, AppRow>(client, &(), args, json).await,
        Entity::Build => list::<BuildAttributes, BuildRow>(client, &(), args, json).await,
        Entity::BetaGroup => {
            list::<BetaGroupAttributes, BetaGroupRow>(client, &(), args, json).await
        }
        Entity::BetaTester => {
            list::<BetaTesterAttributes, BetaTesterRow>(client, &(), args, json).await
        }
        Entity::Device => list::<DeviceAttributes, DeviceRow>(client, &(), args, json).await,
        Entity::Review => {
            let app = app.ok_or_else(|| {
                AscError::InvalidConfig("--app is required for listing reviews".to_string())
            })?;
            list::<ReviewAttributes, ReviewRow>(client, app, args, json).await
        }
    }
}

async fn list<A, R>(
    client: &AscClient,
    parent: &A::Parent,
    args: &ListArgs,
    json: bool,
) -> ascapi::Result<()>
where
    A: List + Serialize,
    R: Tabled + for<'a> From<&'a Resource<A>>,
{
    let query: A::Query = args.apply();

    if args.all {
        let resources = A::list_all(client, parent, &query).await?;
        if json {
            print_json(&resources)?;
        } else {
            print_table::<A, R>(&resources);
            println!("\n{} total", resources.len());
        }
        return Ok(());
    }

    let page = A::list_page(client, parent, &query).await?;
    if json {
        print_json(&page)?;
    } else {
        print_table::<A, R>(&page.data);
        match (page.total(), page.next_url()) {
            (Some(total), Some(next)) => {
                println!("\n{} of {} shown, next: {}", page.len(), total, next)
            }
            (None, Some(next)) => println!("\n{} shown, next: {}", page.len(), next),
            (_, None) => println!("\n{} shown (end)", page.len()),
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> ascapi::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(AscError::Serialize)?;
    println!("{rendered}");
    Ok(())
}

fn print_table<A, R>(resources: &[Resource<A>])
where
    R: Tabled + for<'a> From<&'a Resource<A>>,
{
    let rows: Vec<R> = resources.iter().map(R::from).collect();
    println!("{}", Table::new(rows));
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AppRow {
    id: String,
    name: String,
    bundle_id: String,
    sku: String,
}

impl From<&Resource<AppAttributes>> for AppRow {
    fn from(r: &Resource<AppAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            name: r.attributes.name.clone(),
            bundle_id: r.attributes.bundle_id.clone(),
            sku: r.attributes.sku.clone(),
        }
    }
}

#[derive(Tabled)]
struct BuildRow {
    id: String,
    version: String,
    state: String,
    uploaded: String,
}

impl From<&Resource<BuildAttributes>> for BuildRow {
    fn from(r: &Resource<BuildAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            version: r.attributes.version.clone(),
            state: r.attributes.processing_state.clone().unwrap_or_default(),
            uploaded: r
                .attributes
                .uploaded_date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct BetaGroupRow {
    id: String,
    name: String,
    internal: bool,
    public_link: String,
}

impl From<&Resource<BetaGroupAttributes>> for BetaGroupRow {
    fn from(r: &Resource<BetaGroupAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            name: r.attributes.name.clone(),
            internal: r.attributes.is_internal_group,
            public_link: r.attributes.public_link.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct BetaTesterRow {
    id: String,
    name: String,
    email: String,
    state: String,
}

impl From<&Resource<BetaTesterAttributes>> for BetaTesterRow {
    fn from(r: &Resource<BetaTesterAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            name: r.attributes.display_name(),
            email: r.attributes.email.clone().unwrap_or_default(),
            state: format!("{:?}", r.attributes.state),
        }
    }
}

#[derive(Tabled)]
struct ReviewRow {
    id: String,
    rating: u8,
    territory: String,
    title: String,
}

impl From<&Resource<ReviewAttributes>> for ReviewRow {
    fn from(r: &Resource<ReviewAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            rating: r.attributes.rating,
            territory: r.attributes.territory.clone(),
            title: r.attributes.title.clone(),
        }
    }
}

#[derive(Tabled)]
struct DeviceRow {
    id: String,
    name: String,
    platform: String,
    status: String,
}

impl From<&Resource<DeviceAttributes>> for DeviceRow {
    fn from(r: &Resource<DeviceAttributes>) -> Self {
        Self {
            id: r.id.clone(),
            name: r.attributes.name.clone(),
            platform: r.attributes.platform.as_str().to_string(),
            status: r.attributes.status.clone(),
        }
    }
}
