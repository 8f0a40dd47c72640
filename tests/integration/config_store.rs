use std::fs;

use anyhow::Result;
use mybento::config::{
    click_log_path, config_file_path, load_or_default, AppConfig, WorkspacePaths,
};
use mybento::layout::BentoSpanPolicy;
use mybento::model::LayoutType;
use mybento::plan::{build_plan_for, RenderInstruction};

use crate::support::profile_fixture::ProfileFixture;
use crate::IntegrationHarness;

#[test]
fn missing_config_yields_defaults() -> Result<()> {
    let harness = IntegrationHarness::new();
    let config = load_or_default()?;
    assert_eq!(config, AppConfig::default());
    assert_eq!(WorkspacePaths::resolve()?.root(), harness.workspace_path());
    assert!(config_file_path()?.starts_with(harness.workspace_path()));
    Ok(())
}

#[test]
fn saved_config_round_trips() -> Result<()> {
    let harness = IntegrationHarness::new();
    let mut config = AppConfig::default();
    config.rendering.default_layout = LayoutType::Bento;
    config.rendering.bento_spans = BentoSpanPolicy::Variant;
    config.clicks.log_file_name = "visits.jsonl".into();
    harness.save_config(&config);

    let on_disk = fs::read_to_string(config_file_path()?)?;
    assert!(on_disk.contains("bento_spans = \"variant\""));
    assert_eq!(load_or_default()?, config);
    assert_eq!(
        click_log_path(&config)?,
        harness.workspace_path().join("visits.jsonl")
    );
    Ok(())
}

#[test]
fn partial_config_fills_in_defaults() -> Result<()> {
    let _harness = IntegrationHarness::new();
    let path = config_file_path()?;
    fs::create_dir_all(path.parent().expect("config file has a parent"))?;
    fs::write(&path, "[rendering]\nempty_message = \"Nothing here\"\n")?;

    let config = load_or_default()?;
    assert_eq!(config.rendering.empty_message, "Nothing here");
    assert!(config.rendering.public_only);
    assert!(config.clicks.log_enabled);

    let plan = build_plan_for(&ProfileFixture::new("new").blocks, "grid", &config)?;
    assert_eq!(
        plan.instructions,
        [RenderInstruction::Empty {
            message: "Nothing here".into()
        }]
    );
    Ok(())
}

#[test]
fn malformed_config_is_reported() -> Result<()> {
    let _harness = IntegrationHarness::new();
    let path = config_file_path()?;
    fs::create_dir_all(path.parent().expect("config file has a parent"))?;
    fs::write(&path, "[rendering]\ndefault_layout = \"carousel\"\n")?;

    let err = load_or_default().unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config file"));
    Ok(())
}
