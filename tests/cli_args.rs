//! CLI argument parsing tests

use ascapi::cli::{Cli, Command, Entity};
use clap::Parser;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["ascapi", "get", "app", "1234567890"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::App);
            assert_eq!(id, "1234567890");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_plural_alias() {
    let cli = Cli::parse_from(["ascapi", "list", "devices"]);

    match cli.command {
        Command::List {
            entity,
            limit,
            filters,
            next,
            all,
            ..
        } => {
            assert_eq!(entity, Entity::Device);
            assert!(limit.is_none());
            assert!(filters.is_empty());
            assert!(next.is_none());
            assert!(!all);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_options() {
    let cli = Cli::parse_from([
        "ascapi",
        "--json",
        "list",
        "beta-groups",
        "--limit",
        "25",
        "--filter",
        "app=111,222",
        "--filter",
        "isInternalGroup=true",
        "--sort",
        "-name",
    ]);

    assert!(cli.json);
    match cli.command {
        Command::List {
            entity,
            limit,
            filters,
            sort,
            ..
        } => {
            assert_eq!(entity, Entity::BetaGroup);
            assert_eq!(limit, Some(25));
            assert_eq!(
                filters,
                vec![
                    (
                        "app".to_string(),
                        vec!["111".to_string(), "222".to_string()]
                    ),
                    ("isInternalGroup".to_string(), vec!["true".to_string()]),
                ]
            );
            assert_eq!(sort.as_deref(), Some("-name"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_accepts_negative_limit() {
    let cli = Cli::parse_from(["ascapi", "list", "apps", "--limit", "-1"]);

    match cli.command {
        Command::List { limit, .. } => assert_eq!(limit, Some(-1)),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_reviews_with_app_and_next() {
    let next = "https://api.appstoreconnect.apple.com/v1/apps/42/customerReviews?cursor=AQ";
    let cli = Cli::parse_from(["ascapi", "list", "reviews", "--app", "42", "--next", next]);

    match cli.command {
        Command::List {
            entity,
            app,
            next: parsed_next,
            ..
        } => {
            assert_eq!(entity, Entity::Review);
            assert_eq!(app.as_deref(), Some("42"));
            assert_eq!(parsed_next.as_deref(), Some(next));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_rejects_next_with_all() {
    let result = Cli::try_parse_from([
        "ascapi",
        "list",
        "apps",
        "--all",
        "--next",
        "https://api.appstoreconnect.apple.com/v1/apps?cursor=AQ",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_malformed_filter() {
    let result = Cli::try_parse_from(["ascapi", "list", "apps", "--filter", "bundleId"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["ascapi", "get", "widget", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_verbose_is_global() {
    let cli = Cli::parse_from(["ascapi", "get", "build", "b1", "-v"]);
    assert!(cli.verbose);
}

#[test]
fn test_cli_accepts_descending_sort_before_other_flags() {
    let cli = Cli::parse_from([
        "ascapi",
        "list",
        "reviews",
        "--sort",
        "-createdDate",
        "--app",
        "42",
    ]);

    match cli.command {
        Command::List { sort, app, .. } => {
            assert_eq!(sort.as_deref(), Some("-createdDate"));
            assert_eq!(app.as_deref(), Some("42"));
        }
        _ => panic!("Expected List command"),
    }
}
