//! Behavioural steps for the configuration store.
#![expect(
    clippy::expect_used,
    clippy::needless_pass_by_value,
    reason = "simplify test failure output"
)]

use std::path::PathBuf;

use cucumber::{World, given, then, when};
use inilog::config::{ConfigError, ConfigStore};
use test_support::IniFixture;

#[derive(Debug, Default, World)]
pub struct ConfigWorld {
    store: Option<ConfigStore>,
    fixture: Option<IniFixture>,
    path: Option<PathBuf>,
    loaded: Option<Result<PathBuf, ConfigError>>,
}

impl ConfigWorld {
    fn store(&mut self) -> &ConfigStore {
        self.store.get_or_insert_with(ConfigStore::init)
    }
}

#[given("an initialised store without defaults")]
fn store_without_defaults(world: &mut ConfigWorld) {
    world.store = Some(ConfigStore::init());
}

#[given(regex = r#"^the default \"(.+)\" is \"(.*)\"$"#)]
fn default_value(world: &mut ConfigWorld, key: String, value: String) {
    world.store().set_default(&key, &value);
}

#[given(regex = r#"^the override \"(.+)\" is \"(.*)\"$"#)]
fn override_value(world: &mut ConfigWorld, key: String, value: String) {
    world.store().set(&key, &value);
}

#[given(regex = r#"^a configuration file containing \"(.*)\"$"#)]
fn configuration_file(world: &mut ConfigWorld, body: String) {
    let fixture = IniFixture::new(&body.replace("\\n", "\n"));
    world.path = Some(fixture.path().to_path_buf());
    world.fixture = Some(fixture);
}

#[given("a missing configuration file")]
fn missing_configuration_file(world: &mut ConfigWorld) {
    let fixture = IniFixture::new("");
    world.path = Some(fixture.missing());
    world.fixture = Some(fixture);
}

#[when("the configuration is loaded")]
fn load_configuration(world: &mut ConfigWorld) {
    let path = world.path.clone().expect("path set");
    let result = world.store().load(path);
    world.loaded = Some(result);
}

#[then("loading fails")]
fn loading_fails(world: &mut ConfigWorld) {
    match world.loaded.take() {
        Some(Err(ConfigError::Parse { .. })) => {}
        other => panic!("expected parse failure, got {other:?}"),
    }
}

#[then("loading succeeds")]
fn loading_succeeds(world: &mut ConfigWorld) {
    match world.loaded.take() {
        Some(Ok(_)) => {}
        other => panic!("expected success, got {other:?}"),
    }
}

#[then(regex = r#"^\"(.+)\" with fallback \"(.*)\" resolves to \"(.*)\"$"#)]
fn resolves_with_fallback(world: &mut ConfigWorld, key: String, fallback: String, expected: String) {
    let value = world.store().get(&key, Some(fallback.as_str()));
    assert_eq!(value.as_deref(), Some(expected.as_str()));
}

#[then(regex = r#"^\"(.+)\" as a boolean is (true|false)$"#)]
fn resolves_as_bool(world: &mut ConfigWorld, key: String, expected: String) {
    let expected = expected == "true";
    assert_eq!(world.store().get_bool(&key, !expected), expected);
}
