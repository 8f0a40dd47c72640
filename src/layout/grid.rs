use crate::model::LayoutType;
use crate::plan::{BlockInstruction, RenderInstruction};

use super::{CellSize, ClassifiedBlock, LayoutStrategy};

pub const GRID_COLUMNS: u8 = 2;

/// Contiguous runs of blocks in a fixed two-column grid, separated by
/// centered headers. Every header is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayout;

impl LayoutStrategy for GridLayout {
    fn layout_type(&self) -> LayoutType {
        LayoutType::Grid
    }

    fn arrange(&self, blocks: Vec<ClassifiedBlock>) -> Vec<RenderInstruction> {
        let mut instructions = Vec::new();
        let mut run = Vec::new();
        for item in blocks {
            if item.is_header() {
                flush_run(&mut instructions, &mut run);
                instructions.push(RenderInstruction::SectionBreak {
                    title: item.block.title,
                });
            } else {
                run.push(BlockInstruction::new(item, CellSize::GridCell));
            }
        }
        flush_run(&mut instructions, &mut run);
        instructions
    }
}

fn flush_run(instructions: &mut Vec<RenderInstruction>, run: &mut Vec<BlockInstruction>) {
    if run.is_empty() {
        return;
    }
    instructions.push(RenderInstruction::Run {
        columns: GRID_COLUMNS,
        blocks: std::mem::take(run),
    });
}
