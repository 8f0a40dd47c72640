use std::sync::{mpsc, Arc};

use anyhow::Result;
use mybento::clicks::{
    spawn_click_worker, ChannelClickSink, ClickLog, ClickSinks, ClickStore, Confirmation,
    MemoryClickStore, Navigation,
};
use mybento::config::{click_log_path, AppConfig};
use mybento::model::LayoutType;
use mybento::plan::{PlanOptions, RenderInstruction, RenderPlan};

use crate::support::profile_fixture::creator_fixture;
use crate::IntegrationHarness;

#[test]
fn visitor_clicks_reach_store_and_log() -> Result<()> {
    let _harness = IntegrationHarness::new();
    let fixture = creator_fixture();
    let plan = RenderPlan::build(&fixture.blocks, &PlanOptions::new(LayoutType::Grid));

    let store = Arc::new(MemoryClickStore::new());
    for block in &fixture.blocks {
        store.insert(block.id, block.click_count)?;
    }
    let (tx, rx) = mpsc::channel();
    let worker = spawn_click_worker(rx, store.clone());
    let log = ClickLog::from_config(&AppConfig::default())?.expect("click log enabled by default");
    let log_path = log.path().to_path_buf();
    let sinks = ClickSinks::new().with(ChannelClickSink::new(tx)).with(log);

    let github = fixture
        .blocks
        .iter()
        .find(|block| block.kind == "github")
        .expect("fixture has a github block");
    let instruction = plan.find_block(github.id).expect("github block is planned");
    for _ in 0..3 {
        let nav = instruction.navigate(Confirmation::NotAsked, &sinks);
        assert_eq!(
            nav,
            Navigation::Open {
                url: "https://github.com/creator".into()
            }
        );
    }
    drop(sinks);
    worker.join().expect("click worker panicked");

    assert_eq!(store.click_count(github.id)?, Some(3));
    let tally = ClickLog::new(log_path).tally()?;
    assert_eq!(tally.get(&github.id), Some(&3));
    Ok(())
}

#[test]
fn age_gated_block_waits_for_confirmation() -> Result<()> {
    let harness = IntegrationHarness::new();
    let fixture = creator_fixture();
    let plan = RenderPlan::build(&fixture.blocks, &PlanOptions::new(LayoutType::List));
    let log = ClickLog::new(harness.workspace_path().join("clicks.jsonl"));

    let gated = plan
        .instructions
        .iter()
        .flat_map(RenderInstruction::block_instructions)
        .find(|block| block.requires_confirmation)
        .expect("onlyfans block is gated");

    assert_eq!(
        gated.navigate(Confirmation::NotAsked, &log),
        Navigation::AwaitingConfirmation
    );
    assert_eq!(gated.navigate(Confirmation::Declined, &log), Navigation::Declined);
    assert!(log.load_events()?.is_empty());

    assert_eq!(
        gated.navigate(Confirmation::Granted, &log),
        Navigation::Open {
            url: "https://onlyfans.com/creator".into()
        }
    );
    let events = log.load_events()?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].block_id, gated.block_id);
    Ok(())
}

#[test]
fn disabled_click_log_is_not_created() -> Result<()> {
    let _harness = IntegrationHarness::new();
    let mut config = AppConfig::default();
    config.clicks.log_enabled = false;
    assert!(ClickLog::from_config(&config)?.is_none());

    config.clicks.log_enabled = true;
    let log = ClickLog::from_config(&config)?.expect("enabled");
    assert_eq!(log.path(), click_log_path(&config)?);
    Ok(())
}
