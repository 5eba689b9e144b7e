//! Behavioural steps for the `inilogctl` command.
#![expect(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use clap::Parser;
use cucumber::{World, given, then, when};
use inilogctl::{Args, CtlError, run};
use test_support::IniFixture;

#[derive(Debug, Default, World)]
pub struct CtlWorld {
    fixture: Option<IniFixture>,
    argv: Vec<String>,
    result: Option<Result<String, CtlError>>,
}

#[given(regex = r#"^a configuration file containing \"(.*)\"$"#)]
fn configuration_file(world: &mut CtlWorld, body: String) {
    let fixture = IniFixture::new(&body.replace("\\n", "\n"));
    world.argv = vec![
        "inilogctl".to_owned(),
        "--config".to_owned(),
        fixture.path().display().to_string(),
    ];
    world.fixture = Some(fixture);
}

#[when(regex = r"^inilogctl is run with (.+)$")]
fn run_ctl(world: &mut CtlWorld, rest: String) {
    let argv = world
        .argv
        .iter()
        .cloned()
        .chain(rest.split_whitespace().map(str::to_owned));
    let args = Args::try_parse_from(argv).expect("valid arguments");
    let mut out = Vec::new();
    world.result = Some(run(&args, &mut out).map(|()| String::from_utf8(out).expect("utf-8")));
}

#[then(regex = r#"^it prints \"(.*)\"$"#)]
fn prints(world: &mut CtlWorld, expected: String) {
    match world.result.take() {
        Some(Ok(out)) => assert_eq!(out, expected.replace("\\n", "\n")),
        other => panic!("expected output, got {other:?}"),
    }
}

#[then("it reports a missing value")]
fn reports_missing(world: &mut CtlWorld) {
    match world.result.take() {
        Some(Err(CtlError::NotFound { .. })) => {}
        other => panic!("expected a missing value, got {other:?}"),
    }
}
