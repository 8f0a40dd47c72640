use anyhow::Result;
use mybento::config::AppConfig;
use mybento::plan::build_plan_for;
use mybento::render::build_profile_html;

use crate::support::profile_fixture::{creator_fixture, ProfileFixture};

#[test]
fn bento_page_renders_every_block_once() -> Result<()> {
    let mut fixture = creator_fixture().with_layout("bento");
    fixture.profile.full_name = Some("The Creator".into());
    fixture.profile.bio = Some("Videos & music".into());
    fixture.profile.spinning_text_enabled = true;
    fixture.profile.spinning_text_set = Some("set1".into());

    let layout = fixture.profile.layout()?;
    let plan = build_plan_for(&fixture.blocks, layout.as_str(), &AppConfig::default())?;
    let html = build_profile_html(&fixture.profile, &plan);

    assert!(html.contains("<title>The Creator (@creator)</title>"));
    assert!(html.contains("<p class=\"bio\">Videos &amp; music</p>"));
    assert!(html.contains("aprende más"));
    assert!(html.contains("class=\"layout-bento\""));
    assert_eq!(html.matches("data-block-id=").count(), 6);
    assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"));
    assert!(html.contains("<h3 class=\"section\">Watch</h3>"));
    assert!(!html.contains(">Follow</h3>"));
    Ok(())
}

#[test]
fn empty_profile_shows_placeholder() -> Result<()> {
    let fixture = ProfileFixture::new("newcomer");
    let plan = build_plan_for(&fixture.blocks, "list", &AppConfig::default())?;
    let html = build_profile_html(&fixture.profile, &plan);
    assert!(html.contains("This user has no links yet."));
    assert!(html.contains("content=\"Links from newcomer\""));
    Ok(())
}
