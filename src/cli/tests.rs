//! Tests for CLI module

use super::*;
use clap::Parser;
use std::io::Write;
use std::time::Duration;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("resource-client").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_list_flags() {
    let cli = parse(&[
        "list",
        "--filter",
        "state eq 'active'",
        "--max-results",
        "25",
        "--all",
        "--base-url",
        "https://acct.example",
        "--format",
        "pretty",
    ]);

    assert_eq!(cli.format, OutputFormat::Pretty);
    assert_eq!(cli.base_url.as_deref(), Some("https://acct.example"));
    match cli.command {
        Commands::List {
            filter,
            max_results,
            all,
            select,
        } => {
            assert_eq!(filter.as_deref(), Some("state eq 'active'"));
            assert_eq!(max_results, Some(25));
            assert!(all);
            assert_eq!(select, None);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_add() {
    let cli = parse(&[
        "add",
        "--fingerprint",
        "94c4f1",
        "--file",
        "cert.pfx",
        "--kind",
        "pfx",
        "--password",
        "secret",
    ]);

    match cli.command {
        Commands::Add {
            algorithm,
            kind,
            password,
            ..
        } => {
            assert_eq!(algorithm, "sha1");
            assert_eq!(kind, Some(PayloadKind::Pfx));
            assert_eq!(password.as_deref(), Some("secret"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_keyed_commands() {
    let cli = parse(&["cancel-deletion", "sha1", "94c4f1"]);
    assert!(matches!(
        cli.command,
        Commands::CancelDeletion { ref algorithm, ref fingerprint }
            if algorithm == "sha1" && fingerprint == "94c4f1"
    ));

    assert!(Cli::try_parse_from(["resource-client", "get", "sha1"]).is_err());
}

#[test]
fn test_load_config_requires_endpoint() {
    let runner = Runner::new(parse(&["list"]));
    let err = runner.load_config().unwrap_err();
    assert!(err.to_string().contains("--base-url"));
}

#[test]
fn test_load_config_applies_overrides() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "base_url: https://file.example\ncollection: keys").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let runner = Runner::new(parse(&[
        "--config",
        &path,
        "--base-url",
        "https://flag.example",
        "--api-version",
        "2024-07-01",
        "list-next",
        "cursor",
    ]));
    let config = runner.load_config().unwrap();

    assert_eq!(config.base_url, "https://flag.example");
    assert_eq!(config.collection, "keys");
    assert_eq!(config.api_version.as_deref(), Some("2024-07-01"));
}

#[test]
fn test_request_options_from_flags() {
    let runner = Runner::new(parse(&[
        "--timeout",
        "9",
        "--client-request-id",
        "req-7",
        "delete",
        "sha1",
        "94c4f1",
    ]));
    let options = runner.request_options();

    assert_eq!(options.timeout, Some(Duration::from_secs(9)));
    assert_eq!(options.client_request_id.as_deref(), Some("req-7"));
    assert!(options.return_client_request_id);
}
