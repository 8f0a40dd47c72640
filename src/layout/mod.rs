//! Layout strategies: how a classified, ordered block sequence is arranged.
//!
//! All three strategies consume the same input and share one edge policy:
//! an empty sequence yields a single [`RenderInstruction::Empty`] so the
//! presentation layer can show its placeholder.

mod bento;
mod grid;
mod list;

pub use bento::{bento_size_at, variant_span, BentoLayout, BentoSize, BentoSpanPolicy, BENTO_PATTERN};
pub use grid::{GridLayout, GRID_COLUMNS};
pub use list::ListLayout;

use serde::{Deserialize, Serialize};

use crate::classify::RenderVariant;
use crate::model::{Block, LayoutType};
use crate::plan::RenderInstruction;

/// A block paired with the variant it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBlock {
    pub block: Block,
    pub variant: RenderVariant,
}

impl ClassifiedBlock {
    pub fn is_header(&self) -> bool {
        self.variant == RenderVariant::SectionHeader
    }
}

/// Grid cell footprint in columns × rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    pub columns: u8,
    pub rows: u8,
}

impl Span {
    pub const fn new(columns: u8, rows: u8) -> Self {
        Self { columns, rows }
    }
}

/// Size descriptor attached to every block instruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cell", rename_all = "snake_case")]
pub enum CellSize {
    FullWidth,
    GridCell,
    Bento {
        /// Present when the size came from the repeating pattern.
        size: Option<BentoSize>,
        span: Span,
    },
}

pub trait LayoutStrategy {
    fn layout_type(&self) -> LayoutType;

    /// Arranges a non-empty sequence.
    fn arrange(&self, blocks: Vec<ClassifiedBlock>) -> Vec<RenderInstruction>;

    fn plan(&self, blocks: Vec<ClassifiedBlock>, empty_message: &str) -> Vec<RenderInstruction> {
        if blocks.is_empty() {
            return vec![RenderInstruction::Empty {
                message: empty_message.to_string(),
            }];
        }
        self.arrange(blocks)
    }
}

pub fn strategy_for(layout: LayoutType, bento_spans: BentoSpanPolicy) -> Box<dyn LayoutStrategy> {
    match layout {
        LayoutType::List => Box::new(ListLayout),
        LayoutType::Grid => Box::new(GridLayout),
        LayoutType::Bento => Box::new(BentoLayout::new(bento_spans)),
    }
}
