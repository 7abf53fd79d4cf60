//! CLI parse tests.

use super::Cli;
use clap::Parser;
use permalink_core::transport::TransportMode;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_url_and_timestamp() {
    let cli = parse(&[
        "gh-permalink",
        "https://github.com/acme/widget/blob/main/src/app.py",
        "2021-03-01",
    ]);
    assert_eq!(cli.url, "https://github.com/acme/widget/blob/main/src/app.py");
    assert_eq!(cli.timestamp, "2021-03-01");
    assert!(cli.transport.is_none());
}

#[test]
fn cli_parse_free_form_timestamp() {
    let cli = parse(&["gh-permalink", "https://github.com/o/r/blob/main/x", "last Tuesday"]);
    assert_eq!(cli.timestamp, "last Tuesday");
}

#[test]
fn cli_parse_transport() {
    for (flag, mode) in [
        ("auto", TransportMode::Auto),
        ("helper", TransportMode::Helper),
        ("direct", TransportMode::Direct),
    ] {
        let cli = parse(&[
            "gh-permalink",
            "https://github.com/o/r/blob/main/x",
            "today",
            "--transport",
            flag,
        ]);
        assert_eq!(cli.transport, Some(mode));
    }
}

#[test]
fn cli_rejects_unknown_transport() {
    let res = Cli::try_parse_from([
        "gh-permalink",
        "https://github.com/o/r/blob/main/x",
        "today",
        "--transport",
        "smoke-signals",
    ]);
    assert!(res.is_err());
}

#[test]
fn cli_requires_both_positionals() {
    assert!(Cli::try_parse_from(["gh-permalink"]).is_err());
    assert!(Cli::try_parse_from(["gh-permalink", "https://github.com/o/r/blob/main/x"]).is_err());
}

#[test]
fn cli_fails_fast_on_malformed_url() {
    let cli = parse(&["gh-permalink", "https://example.com/not/github", "2021-03-01"]);
    let err = cli.run().unwrap_err();
    assert!(format!("{:#}", err).contains("not a GitHub blob URL"));
}

#[test]
fn cli_fails_fast_on_bad_timestamp() {
    let cli = parse(&["gh-permalink", "https://github.com/o/r/blob/main/x", "whenever"]);
    let err = cli.run().unwrap_err();
    assert!(format!("{:#}", err).contains("could not interpret"));
}
