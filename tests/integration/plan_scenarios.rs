use anyhow::Result;
use mybento::classify::VariantKind;
use mybento::config::AppConfig;
use mybento::layout::{BentoSize, BentoSpanPolicy, CellSize, Span};
use mybento::model::LayoutType;
use mybento::plan::{build_plan_for, PlanOptions, RenderInstruction, RenderPlan};

use crate::support::profile_fixture::{creator_fixture, ProfileFixture};

fn variant_kinds(plan: &RenderPlan) -> Vec<VariantKind> {
    plan.instructions
        .iter()
        .flat_map(RenderInstruction::block_instructions)
        .map(|block| block.variant.kind())
        .collect()
}

#[test]
fn creator_profile_classifies_every_family() -> Result<()> {
    let fixture = creator_fixture().with_layout("list");
    let layout = fixture.profile.layout()?;
    let plan = RenderPlan::build(&fixture.shuffled_blocks(), &PlanOptions::new(layout));

    assert_eq!(
        variant_kinds(&plan),
        [
            VariantKind::VideoEmbed,
            VariantKind::AudioEmbed,
            VariantKind::SocialEmbed,
            VariantKind::DefaultLink,
            VariantKind::AgeGated,
            VariantKind::MapEmbed,
        ]
    );
    let breaks = plan
        .instructions
        .iter()
        .filter(|i| matches!(i, RenderInstruction::SectionBreak { .. }))
        .count();
    assert_eq!(breaks, 2, "list keeps every header");
    Ok(())
}

#[test]
fn same_blocks_differ_only_in_arrangement() -> Result<()> {
    let fixture = creator_fixture();
    let config = AppConfig::default();
    let list = build_plan_for(&fixture.blocks, "list", &config)?;
    let grid = build_plan_for(&fixture.blocks, "grid", &config)?;
    let bento = build_plan_for(&fixture.blocks, "bento", &config)?;

    assert_eq!(variant_kinds(&list), variant_kinds(&grid));
    assert_eq!(variant_kinds(&list), variant_kinds(&bento));

    assert!(matches!(
        grid.instructions.as_slice(),
        [
            RenderInstruction::SectionBreak { .. },
            RenderInstruction::Run { blocks: first, .. },
            RenderInstruction::SectionBreak { .. },
            RenderInstruction::Run { blocks: second, .. },
        ] if first.len() == 2 && second.len() == 4
    ));

    // Bento shows only the first header, above every remaining block.
    assert_eq!(bento.instructions.len(), 7);
    assert_eq!(
        bento.instructions[0],
        RenderInstruction::SectionBreak {
            title: "Watch".into()
        }
    );
    Ok(())
}

#[test]
fn bento_pattern_follows_non_header_positions() -> Result<()> {
    let plan = build_plan_for(&creator_fixture().blocks, "bento", &AppConfig::default())?;
    let sizes: Vec<_> = plan
        .instructions
        .iter()
        .flat_map(RenderInstruction::block_instructions)
        .map(|block| match block.size {
            CellSize::Bento { size, .. } => size,
            _ => None,
        })
        .collect();
    assert_eq!(
        sizes,
        [
            Some(BentoSize::Large),
            Some(BentoSize::Small),
            Some(BentoSize::Medium),
            Some(BentoSize::Small),
            Some(BentoSize::Small),
            Some(BentoSize::Large),
        ]
    );
    Ok(())
}

#[test]
fn variant_spans_come_from_config() -> Result<()> {
    let fixture = ProfileFixture::new("fan")
        .link("youtube", "Clip", "https://youtu.be/abcDEF12345")
        .highlight_last()
        .link("link", "Blog", "https://blog.example.com");
    let mut config = AppConfig::default();
    config.rendering.bento_spans = BentoSpanPolicy::Variant;

    let plan = build_plan_for(&fixture.blocks, "bento", &config)?;
    let spans: Vec<_> = plan
        .instructions
        .iter()
        .flat_map(RenderInstruction::block_instructions)
        .map(|block| block.size)
        .collect();
    assert_eq!(
        spans,
        [
            CellSize::Bento {
                size: None,
                span: Span::new(2, 3)
            },
            CellSize::Bento {
                size: None,
                span: Span::new(1, 1)
            },
        ]
    );
    Ok(())
}

#[test]
fn hidden_blocks_leave_an_empty_page() {
    let fixture = ProfileFixture::new("quiet")
        .link("link", "Draft", "https://example.com")
        .deactivate_last();
    for layout in LayoutType::ALL {
        let plan = RenderPlan::build(&fixture.blocks, &PlanOptions::new(layout));
        assert!(plan.is_empty(), "{layout} should render the empty state");
    }
}

#[test]
fn unknown_layout_is_rejected() {
    let fixture = creator_fixture().with_layout("carousel");
    let err = fixture.profile.layout().unwrap_err();
    assert!(err.to_string().contains("carousel"));
    assert!(build_plan_for(&fixture.blocks, "masonry", &AppConfig::default()).is_err());
}

#[test]
fn plan_serializes_with_tagged_instructions() -> Result<()> {
    let plan = build_plan_for(&creator_fixture().blocks, "grid", &AppConfig::default())?;
    let json = plan.to_json()?;
    assert!(json.contains("\"instruction\": \"run\""));
    assert!(json.contains("\"variant\": \"age_gated\""));
    let back: RenderPlan = serde_json::from_str(&json)?;
    assert_eq!(back, plan);
    Ok(())
}
