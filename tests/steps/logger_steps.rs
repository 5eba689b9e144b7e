//! Behavioural steps for configuration-driven logging.
#![expect(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use std::str::FromStr;

use cucumber::{World, given, then, when};
use inilog::config::ConfigStore;
use inilog::emit;
use inilog::logger::{Logger, Severity};
use test_support::SharedBuffer;

#[derive(Debug, World)]
pub struct LoggerWorld {
    store: ConfigStore,
    output: SharedBuffer,
    logger: Logger,
}

impl Default for LoggerWorld {
    fn default() -> Self {
        let store = ConfigStore::init();
        let output = SharedBuffer::default();
        let logger = Logger::with_config(store.clone()).with_writer(output.clone());
        Self {
            store,
            output,
            logger,
        }
    }
}

#[given(regex = r#"^the logging default \"(.+)\" is \"(.*)\"$"#)]
fn logging_default(world: &mut LoggerWorld, key: String, value: String) {
    world.store.set_default(&key, &value);
}

#[given("the logger reads its settings from the store")]
fn use_config(world: &mut LoggerWorld) {
    world.logger.set_use_config(true).expect("store attached");
}

#[given(regex = r#"^the logger identity is set to \"(.+)\"$"#)]
fn direct_ident(world: &mut LoggerWorld, ident: String) {
    world.logger.set_ident(&ident);
}

#[given("the logger writes to standard error")]
fn direct_stderr(world: &mut LoggerWorld) {
    world.logger.set_syslog(false);
}

#[when(regex = r#"^a (\w+) message \"(.*)\" is emitted$"#)]
fn emit_message(world: &mut LoggerWorld, level: String, message: String) {
    let severity = Severity::from_str(&level).expect("known severity");
    emit!(world.logger, severity, "{message}");
}

#[then(regex = r#"^the output is \"(.*)\"$"#)]
fn output_is(world: &mut LoggerWorld, expected: String) {
    assert_eq!(world.output.contents(), expected.replace("\\n", "\n"));
}

#[then("nothing is written")]
fn nothing_written(world: &mut LoggerWorld) {
    assert!(world.output.contents().is_empty());
}
