use crate::model::LayoutType;
use crate::plan::{BlockInstruction, RenderInstruction};

use super::{CellSize, ClassifiedBlock, LayoutStrategy};

/// Full-width rows in position order; headers interrupt the flow in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListLayout;

impl LayoutStrategy for ListLayout {
    fn layout_type(&self) -> LayoutType {
        LayoutType::List
    }

    fn arrange(&self, blocks: Vec<ClassifiedBlock>) -> Vec<RenderInstruction> {
        blocks
            .into_iter()
            .map(|item| {
                if item.is_header() {
                    RenderInstruction::SectionBreak {
                        title: item.block.title,
                    }
                } else {
                    RenderInstruction::Block(BlockInstruction::new(item, CellSize::FullWidth))
                }
            })
            .collect()
    }
}
