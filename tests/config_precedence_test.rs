//! Layered precedence of `Settings::load`: defaults, global config,
//! explicit file, then `HNTREE_*` environment variables.
//!
//! These tests rewrite process environment variables, so they live in their
//! own test binary and take a shared lock.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tempfile::TempDir;

use hntree::application::ApplicationError;
use hntree::config::{global_config_path, DirectionSet, Settings};

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "XDG_CONFIG_HOME",
    "HOME",
    "HNTREE_DIRECTIONS",
    "HNTREE_HISTORY_CAPACITY",
    "HNTREE_LAYOUT",
];

/// Isolated config home; restores the environment on drop.
struct TestEnv {
    home: TempDir,
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl TestEnv {
    fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved = VARS.iter().map(|&k| (k, env::var(k).ok())).collect();
        for var in VARS {
            env::remove_var(var);
        }
        let home = TempDir::new().unwrap();
        env::set_var("HOME", home.path());
        env::set_var("XDG_CONFIG_HOME", home.path().join(".config"));
        Self {
            home,
            saved,
            _lock: lock,
        }
    }

    fn write_global(&self, content: &str) {
        let path = global_config_path().expect("global config path");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn write_file(&self, content: &str) -> PathBuf {
        let path = self.home.path().join("explicit.toml");
        fs::write(&path, content).unwrap();
        path
    }
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        for (var, value) in &self.saved {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
    }
}

#[test]
fn given_global_config_path_when_isolated_then_inside_config_home() {
    let test_env = TestEnv::new();

    let path = global_config_path().unwrap();

    assert!(path.starts_with(test_env.home.path()));
    assert!(path.ends_with("hntree/hntree.toml"));
}

#[test]
fn given_hntree_env_vars_when_loading_then_override_defaults() {
    // Arrange
    let _env = TestEnv::new();
    env::set_var("HNTREE_HISTORY_CAPACITY", "7");
    env::set_var("HNTREE_DIRECTIONS", "eight");
    env::set_var("HNTREE_LAYOUT", "/tmp/layout.toml");

    // Act
    let settings = Settings::load(None).expect("load settings");

    // Assert
    assert_eq!(settings.history_capacity, 7);
    assert_eq!(settings.directions, DirectionSet::Eight);
    assert_eq!(settings.layout, Some(PathBuf::from("/tmp/layout.toml")));
}

#[test]
fn given_global_config_when_loading_then_overrides_defaults() {
    let test_env = TestEnv::new();
    test_env.write_global("directions = \"eight\"\nhistory_capacity = 5\n");

    let settings = Settings::load(None).expect("load settings");

    assert_eq!(settings.directions, DirectionSet::Eight);
    assert_eq!(settings.history_capacity, 5);
}

#[test]
fn given_global_and_explicit_file_when_loading_then_file_wins_where_set() {
    // Arrange
    let test_env = TestEnv::new();
    test_env.write_global("directions = \"eight\"\nhistory_capacity = 5\n");
    let file = test_env.write_file("history_capacity = 9\n");

    // Act
    let settings = Settings::load(Some(&file)).expect("load settings");

    // Assert: capacity from the file, directions still from global
    assert_eq!(settings.history_capacity, 9);
    assert_eq!(settings.directions, DirectionSet::Eight);
}

#[test]
fn given_explicit_file_and_env_var_when_loading_then_env_wins() {
    let test_env = TestEnv::new();
    let file = test_env.write_file("history_capacity = 9\ndirections = \"eight\"\n");
    env::set_var("HNTREE_HISTORY_CAPACITY", "3");

    let settings = Settings::load(Some(&file)).expect("load settings");

    assert_eq!(settings.history_capacity, 3);
    assert_eq!(settings.directions, DirectionSet::Eight);
}

#[test]
fn given_zero_capacity_in_env_when_loading_then_config_error() {
    let _env = TestEnv::new();
    env::set_var("HNTREE_HISTORY_CAPACITY", "0");

    let result = Settings::load(None);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_unknown_direction_set_in_env_when_loading_then_config_error() {
    let _env = TestEnv::new();
    env::set_var("HNTREE_DIRECTIONS", "six");

    let result = Settings::load(None);

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}
