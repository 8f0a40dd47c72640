//! Render plan builder: blocks in, ordered render instructions out.
//!
//! The builder is pure. It attaches a [`ClickHook`] to every non-header
//! instruction but never fires it; the presentation layer does that on
//! visitor navigation through [`BlockInstruction::navigate`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{classify, RenderVariant};
use crate::clicks::{ClickHook, ClickSink, Confirmation, Navigation};
use crate::config::AppConfig;
use crate::layout::{strategy_for, BentoSpanPolicy, CellSize, ClassifiedBlock};
use crate::model::{sort_by_position, Block, LayoutType};
use crate::validation::sanitize_url;

/// Caption used when a link block has no URL to show.
pub const FALLBACK_DESCRIPTION: &str = "Visit link";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "instruction", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// No active blocks; show a placeholder.
    Empty { message: String },
    SectionBreak { title: String },
    Block(BlockInstruction),
    /// A contiguous group drawn as one grid.
    Run {
        columns: u8,
        blocks: Vec<BlockInstruction>,
    },
}

impl RenderInstruction {
    /// Block instructions in draw order, including those inside runs.
    pub fn block_instructions(&self) -> Vec<&BlockInstruction> {
        match self {
            RenderInstruction::Block(block) => vec![block],
            RenderInstruction::Run { blocks, .. } => blocks.iter().collect(),
            RenderInstruction::Empty { .. } | RenderInstruction::SectionBreak { .. } => Vec::new(),
        }
    }
}

/// Everything needed to draw one non-header cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockInstruction {
    pub block_id: Uuid,
    pub title: String,
    pub url: Option<String>,
    /// Raw URL, or a generic caption when the block has none.
    pub description: String,
    pub variant: RenderVariant,
    pub size: CellSize,
    pub highlighted: bool,
    pub requires_confirmation: bool,
    pub click: ClickHook,
}

impl BlockInstruction {
    pub fn new(item: ClassifiedBlock, size: CellSize) -> Self {
        let ClassifiedBlock { block, variant } = item;
        let url = block.url_str().map(str::to_string);
        Self {
            block_id: block.id,
            description: url
                .clone()
                .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string()),
            requires_confirmation: variant.requires_confirmation(),
            click: ClickHook::new(block.id),
            title: block.title,
            url,
            variant,
            size,
            highlighted: block.is_highlighted,
        }
    }

    /// Handles a visitor-initiated navigation.
    ///
    /// Confirmation-gated blocks do not fire the click hook or open the URL
    /// until `confirmation` is [`Confirmation::Granted`]. Blocks without an
    /// http(s) URL have nowhere to go and record nothing.
    pub fn navigate(&self, confirmation: Confirmation, sink: &dyn ClickSink) -> Navigation {
        let Some(url) = sanitize_url(self.url.as_deref()) else {
            return Navigation::NoDestination;
        };
        if self.requires_confirmation {
            match confirmation {
                Confirmation::NotAsked => return Navigation::AwaitingConfirmation,
                Confirmation::Declined => return Navigation::Declined,
                Confirmation::Granted => {}
            }
        }
        self.click.fire(sink);
        Navigation::Open { url }
    }
}

/// Inputs that steer a plan besides the blocks themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub layout: LayoutType,
    pub bento_spans: BentoSpanPolicy,
    /// Drop inactive blocks (public page). Authoring previews keep them.
    pub public_only: bool,
    pub empty_message: String,
}

impl PlanOptions {
    pub fn new(layout: LayoutType) -> Self {
        Self::from_config(layout, &AppConfig::default())
    }

    pub fn from_config(layout: LayoutType, config: &AppConfig) -> Self {
        Self {
            layout,
            bento_spans: config.rendering.bento_spans,
            public_only: config.rendering.public_only,
            empty_message: config.rendering.empty_message.clone(),
        }
    }
}

/// An ordered plan plus the layout that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderPlan {
    pub layout: LayoutType,
    pub instructions: Vec<RenderInstruction>,
}

impl RenderPlan {
    pub fn build(blocks: &[Block], options: &PlanOptions) -> Self {
        Self {
            layout: options.layout,
            instructions: build_plan(blocks, options),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(
            self.instructions.as_slice(),
            [RenderInstruction::Empty { .. }]
        )
    }

    pub fn find_block(&self, block_id: Uuid) -> Option<&BlockInstruction> {
        self.instructions
            .iter()
            .flat_map(RenderInstruction::block_instructions)
            .find(|block| block.block_id == block_id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Filters, sorts, classifies and arranges `blocks`.
pub fn build_plan(blocks: &[Block], options: &PlanOptions) -> Vec<RenderInstruction> {
    let mut visible: Vec<Block> = blocks
        .iter()
        .filter(|block| !options.public_only || block.is_active)
        .cloned()
        .collect();
    sort_by_position(&mut visible);

    let classified: Vec<ClassifiedBlock> = visible
        .into_iter()
        .map(|block| {
            let variant = classify(&block);
            ClassifiedBlock { block, variant }
        })
        .collect();

    let strategy = strategy_for(options.layout, options.bento_spans);
    tracing::debug!(
        layout = %strategy.layout_type(),
        total = blocks.len(),
        visible = classified.len(),
        "building render plan"
    );
    strategy.plan(classified, &options.empty_message)
}

/// Parses `layout` first; an unknown tag is an error, never a silent default.
pub fn build_plan_for(blocks: &[Block], layout: &str, config: &AppConfig) -> Result<RenderPlan> {
    let layout: LayoutType = layout.parse()?;
    Ok(RenderPlan::build(
        blocks,
        &PlanOptions::from_config(layout, config),
    ))
}
