//! Full install flows for both host generations.

use distvars::config::ProjectConfig;
use distvars::core::DistvarsError;
use distvars::lifecycle::{HostGeneration, Plugin};
use distvars::test_utils::{FakeDownload, FakeHost, FakeOperation, FakePackage, init_test_logging};

use crate::common::TestProject;

const TEMPLATE: &str = "https://example.com/r/{%version}/dl.zip?key={%DV_LC_KEY}";
const LOCKED: &str = "https://example.com/r/2.1.0/dl.zip?key={%DV_LC_KEY}";
const FETCH: &str = "https://example.com/r/2.1.0/dl.zip?key=s3cret";

fn project(env: &str) -> (TestProject, ProjectConfig) {
    init_test_logging(None);
    let project = TestProject::new().unwrap();
    project.env_file(env).unwrap();
    let config = ProjectConfig::discover(project.path()).unwrap();
    (project, config)
}

#[test]
fn test_legacy_install_flow() {
    let (_project, config) = project("DV_LC_KEY=s3cret\n");
    let plugin = Plugin::activate(&FakeHost::of(HostGeneration::Legacy), &config);

    // Lock time: the persisted URL gains the version but keeps the secret token
    let mut op = FakeOperation::install(FakePackage::new(TEMPLATE, "2.1.0"));
    plugin.handle_package_operation(&mut op).unwrap();
    let persisted = op.package.dist_url.clone().unwrap();
    assert_eq!(persisted, LOCKED);

    // Download time: the secret only reaches the transport
    let mut download = FakeDownload::legacy(&persisted);
    plugin.handle_pre_download(&mut download).unwrap();
    assert_eq!(download.processed_url.as_deref(), Some(LOCKED));
    assert_eq!(download.effective_url(), Some(FETCH));
    assert_eq!(op.package.dist_url.as_deref(), Some(LOCKED));
}

#[test]
fn test_modern_install_flow() {
    let (_project, config) = project("DV_LC_KEY=s3cret\n");
    let plugin = Plugin::activate(&FakeHost::of(HostGeneration::Modern), &config);

    // The lock file was already written with the raw template
    let mut op = FakeOperation::install(FakePackage::new(TEMPLATE, "2.1.0"));
    plugin.handle_package_operation(&mut op).unwrap();
    assert_eq!(op.package.dist_url.as_deref(), Some(TEMPLATE));

    let mut download = FakeDownload::modern(TEMPLATE).for_package("2.1.0");
    plugin.handle_pre_download(&mut download).unwrap();
    assert_eq!(download.effective_url(), Some(FETCH));
    assert_eq!(download.cache_key.as_deref(), Some(LOCKED));
    assert!(!download.cache_key.unwrap().contains("s3cret"));
}

#[test]
fn test_update_locks_new_version() {
    let (_project, config) = project("DV_LC_KEY=s3cret\n");
    let plugin = Plugin::activate(&FakeHost::of(HostGeneration::Legacy), &config);

    let initial = FakePackage::new("https://example.com/r/2.0.0/dl.zip?key={%DV_LC_KEY}", "2.0.0");
    let mut op = FakeOperation::update(initial, FakePackage::new(TEMPLATE, "2.1.0"));
    plugin.handle_package_operation(&mut op).unwrap();

    assert_eq!(op.target.unwrap().dist_url.as_deref(), Some(LOCKED));
}

#[test]
fn test_missing_variable_aborts_both_generations() {
    for generation in [HostGeneration::Legacy, HostGeneration::Modern] {
        let (_project, config) = project("DV_LC_OTHER=1\n");
        let plugin = Plugin::activate(&FakeHost::of(generation), &config);

        let mut download = match generation {
            HostGeneration::Legacy => FakeDownload::legacy("https://example.com/?k={%DV_LC_UNSET}"),
            HostGeneration::Modern => FakeDownload::modern("https://example.com/?k={%DV_LC_UNSET}"),
        };
        let err = plugin.handle_pre_download(&mut download).unwrap_err();

        assert!(matches!(err, DistvarsError::MissingEnvironmentVariable { .. }));
        assert!(download.transport.is_none());
        assert_eq!(download.effective_url(), Some("https://example.com/?k={%DV_LC_UNSET}"));
    }
}

#[test]
fn test_metadata_download_is_left_alone() {
    let (_project, config) = project("DV_LC_KEY=s3cret\n");
    let plugin = Plugin::activate(&FakeHost::of(HostGeneration::Modern), &config);

    let mut download = FakeDownload::modern("https://repo.example.com/packages.json");
    plugin.handle_pre_download(&mut download).unwrap();

    assert_eq!(download.effective_url(), Some("https://repo.example.com/packages.json"));
    assert!(download.cache_key.is_none());
    assert!(!plugin.rewriter().repository().is_file_tier_loaded());
}
