use serde::{Deserialize, Serialize};

use crate::classify::VariantKind;
use crate::model::LayoutType;
use crate::plan::{BlockInstruction, RenderInstruction};

use super::{CellSize, ClassifiedBlock, LayoutStrategy, Span};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BentoSize {
    /// Double width.
    Large,
    /// Double height.
    Medium,
    /// Unit cell.
    Small,
}

impl BentoSize {
    pub fn span(&self) -> Span {
        match self {
            BentoSize::Large => Span::new(2, 1),
            BentoSize::Medium => Span::new(1, 2),
            BentoSize::Small => Span::new(1, 1),
        }
    }
}

/// Fixed aesthetic sequence indexed by a block's place among non-header
/// blocks. Changing it changes every published bento page.
pub const BENTO_PATTERN: [BentoSize; 10] = [
    BentoSize::Large,
    BentoSize::Small,
    BentoSize::Medium,
    BentoSize::Small,
    BentoSize::Small,
    BentoSize::Large,
    BentoSize::Medium,
    BentoSize::Small,
    BentoSize::Small,
    BentoSize::Small,
];

pub fn bento_size_at(index: usize) -> BentoSize {
    BENTO_PATTERN[index % BENTO_PATTERN.len()]
}

/// How bento cells get their footprint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BentoSpanPolicy {
    /// Position-indexed [`BENTO_PATTERN`]; the canonical bento.
    #[default]
    Pattern,
    /// Footprint derived from the classified variant and the highlight flag.
    Variant,
}

/// Span requested by a variant under [`BentoSpanPolicy::Variant`].
pub fn variant_span(kind: VariantKind, highlighted: bool) -> Span {
    match (kind, highlighted) {
        (VariantKind::VideoEmbed | VariantKind::SocialEmbed, true) => Span::new(2, 3),
        (VariantKind::VideoEmbed | VariantKind::SocialEmbed, false) => Span::new(1, 2),
        (VariantKind::AudioEmbed, true) => Span::new(2, 2),
        (VariantKind::AudioEmbed, false) => Span::new(1, 2),
        (_, true) => Span::new(2, 1),
        (_, false) => Span::new(1, 1),
    }
}

/// Headers are hoisted out of the grid and only the first one is shown, as a
/// single caption above it. The remaining blocks get a bento footprint.
#[derive(Debug, Clone, Copy, Default)]
pub struct BentoLayout {
    spans: BentoSpanPolicy,
}

impl BentoLayout {
    pub fn new(spans: BentoSpanPolicy) -> Self {
        Self { spans }
    }

    fn cell(&self, index: usize, item: &ClassifiedBlock) -> CellSize {
        match self.spans {
            BentoSpanPolicy::Pattern => {
                let size = bento_size_at(index);
                CellSize::Bento {
                    size: Some(size),
                    span: size.span(),
                }
            }
            BentoSpanPolicy::Variant => CellSize::Bento {
                size: None,
                span: variant_span(item.variant.kind(), item.block.is_highlighted),
            },
        }
    }
}

impl LayoutStrategy for BentoLayout {
    fn layout_type(&self) -> LayoutType {
        LayoutType::Bento
    }

    fn arrange(&self, blocks: Vec<ClassifiedBlock>) -> Vec<RenderInstruction> {
        let (headers, items): (Vec<_>, Vec<_>) =
            blocks.into_iter().partition(ClassifiedBlock::is_header);
        if headers.len() > 1 {
            tracing::debug!(
                dropped = headers.len() - 1,
                "bento layout shows only the first header"
            );
        }

        let mut instructions = Vec::with_capacity(items.len() + 1);
        if let Some(first) = headers.into_iter().next() {
            instructions.push(RenderInstruction::SectionBreak {
                title: first.block.title,
            });
        }
        for (index, item) in items.into_iter().enumerate() {
            let size = self.cell(index, &item);
            instructions.push(RenderInstruction::Block(BlockInstruction::new(item, size)));
        }
        instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_every_ten_blocks() {
        let sizes: Vec<_> = (0..12).map(bento_size_at).collect();
        assert_eq!(sizes[..10], BENTO_PATTERN);
        assert_eq!(sizes[10], BentoSize::Large);
        assert_eq!(sizes[11], BentoSize::Small);
    }

    #[test]
    fn size_classes_map_to_spans() {
        assert_eq!(BentoSize::Large.span(), Span::new(2, 1));
        assert_eq!(BentoSize::Medium.span(), Span::new(1, 2));
        assert_eq!(BentoSize::Small.span(), Span::new(1, 1));
    }

    #[test]
    fn variant_spans_favor_tall_embeds() {
        assert_eq!(variant_span(VariantKind::VideoEmbed, false), Span::new(1, 2));
        assert_eq!(variant_span(VariantKind::SocialEmbed, true), Span::new(2, 3));
        assert_eq!(variant_span(VariantKind::AudioEmbed, true), Span::new(2, 2));
        assert_eq!(variant_span(VariantKind::AgeGated, true), Span::new(2, 1));
        assert_eq!(variant_span(VariantKind::DefaultLink, false), Span::new(1, 1));
    }
}
