//! Environment file discovery and tier precedence through the public API.

use distvars::config::ProjectConfig;
use distvars::environment::{EnvFileStore, EnvironmentRepository, Tier, search_path};
use distvars::rewriter::apply_environment;
use serial_test::serial;
use std::collections::BTreeMap;

use crate::common::TestProject;

#[test]
fn test_nearest_env_file_wins() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_ENV_KEY=outer\n").unwrap();
    project.write("app/.env", "DV_ENV_KEY=inner\n").unwrap();
    let nested = project.dir("app/src").unwrap();

    let store = EnvFileStore::new(search_path(&nested), Vec::new());
    assert_eq!(store.locate(), Some(project.path().join("app/.env")));

    let file = store.load();
    assert_eq!(file.values.get("DV_ENV_KEY").map(String::as_str), Some("inner"));
}

#[test]
fn test_directory_named_like_env_file_is_skipped() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_ENV_KEY=outer\n").unwrap();
    project.dir("app/.env").unwrap();

    let store = EnvFileStore::new(search_path(&project.path().join("app")), Vec::new());
    assert_eq!(store.locate(), Some(project.path().join(".env")));
}

#[test]
fn test_project_config_sets_root_and_name() {
    let project = TestProject::new().unwrap();
    project.config("[private-installer]\ndotenv-name = \".env.local\"\n").unwrap();
    project.write(".env.local", "DV_ENV_KEY=local\n").unwrap();
    let nested = project.dir("a/b").unwrap();

    let config = ProjectConfig::discover(&nested).unwrap();
    assert_eq!(config.root, project.path());

    let store = config.env_file_store();
    assert_eq!(store.locate(), Some(project.path().join(".env.local")));
}

#[test]
fn test_env_file_parsing_rules() {
    let project = TestProject::new().unwrap();
    project
        .env_file(concat!(
            "# comment\n",
            "\n",
            "DV_A = plain\n",
            "DV_B=\"quoted value\"\n",
            "not a pair\n",
            "DV_D=first\n",
            "DV_D=second\n",
            "DV_E=${DV_A}\n",
            "DV_F=a=b\n",
        ))
        .unwrap();

    let file = EnvFileStore::new([project.path().to_path_buf()], Vec::new()).load();
    let get = |k: &str| file.values.get(k).map(String::as_str);

    assert_eq!(get("DV_A"), Some("plain"));
    assert_eq!(get("DV_B"), Some("quoted value"));
    assert_eq!(get("DV_D"), Some("second"));
    assert_eq!(get("DV_E"), Some("${DV_A}"));
    assert_eq!(get("DV_F"), Some("a=b"));
    assert_eq!(file.values.len(), 5);
}

#[test]
#[serial]
fn test_process_environment_shadows_file() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_ENV_SHADOW=from-file\nDV_ENV_FILE_ONLY=file\n").unwrap();

    // SAFETY: serialized with every other test that touches the process environment
    unsafe {
        std::env::set_var("DV_ENV_SHADOW", "from-process");
    }

    let store = EnvFileStore::new([project.path().to_path_buf()], Vec::new());
    let repo = EnvironmentRepository::from_process(store);

    assert_eq!(repo.lookup("DV_ENV_SHADOW"), Some(("from-process".to_string(), Tier::Process)));
    assert!(!repo.is_file_tier_loaded());
    assert_eq!(repo.lookup("DV_ENV_FILE_ONLY"), Some(("file".to_string(), Tier::File)));
    assert!(repo.is_file_tier_loaded());

    unsafe {
        std::env::remove_var("DV_ENV_SHADOW");
    }
}

#[test]
#[serial]
fn test_missing_everywhere_is_none() {
    let project = TestProject::new().unwrap();

    unsafe {
        std::env::remove_var("DV_ENV_NOWHERE");
    }

    let store = EnvFileStore::new([project.path().to_path_buf()], Vec::new());
    let repo = EnvironmentRepository::from_process(store);

    assert_eq!(repo.get("DV_ENV_NOWHERE"), None);
    assert!(repo.is_file_tier_loaded());
}

#[test]
#[serial]
fn test_resolving_from_file_leaves_process_environment_alone() {
    let project = TestProject::new().unwrap();
    project.env_file("DV_ENV_FILE_SECRET=from-file\n").unwrap();

    unsafe {
        std::env::remove_var("DV_ENV_FILE_SECRET");
    }
    let before: BTreeMap<_, _> = std::env::vars_os().collect();

    let store = EnvFileStore::new([project.path().to_path_buf()], Vec::new());
    let repo = EnvironmentRepository::from_process(store);
    let out = apply_environment("https://example.com/?k={%DV_ENV_FILE_SECRET}", &repo).unwrap();
    assert_eq!(out.url, "https://example.com/?k=from-file");

    let after: BTreeMap<_, _> = std::env::vars_os().collect();
    assert_eq!(before, after);
    assert!(std::env::var_os("DV_ENV_FILE_SECRET").is_none());
}
