//! Block → presentation variant classification.
//!
//! Rules are an ordered cascade: the first rule whose predicate matches owns
//! the block, even when its extractor then fails (the block degrades to a
//! plain link instead of falling through to later rules).

use serde::{Deserialize, Serialize};

use crate::media::{spotify_embed, tweet_embed, video_embed, SpotifyEmbed, TweetEmbed, VideoEmbed};
use crate::model::Block;
use crate::platforms::{detect_platform, Platform};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum RenderVariant {
    SectionHeader,
    DefaultLink { platform: Platform },
    VideoEmbed(VideoEmbed),
    AudioEmbed(SpotifyEmbed),
    SocialEmbed(TweetEmbed),
    /// `embeddable` is set when the URL can be framed directly.
    MapEmbed { embeddable: bool },
    AgeGated { platform: Platform },
}

/// Fieldless tag of a [`RenderVariant`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    SectionHeader,
    DefaultLink,
    VideoEmbed,
    AudioEmbed,
    SocialEmbed,
    MapEmbed,
    AgeGated,
}

impl RenderVariant {
    pub fn kind(&self) -> VariantKind {
        match self {
            RenderVariant::SectionHeader => VariantKind::SectionHeader,
            RenderVariant::DefaultLink { .. } => VariantKind::DefaultLink,
            RenderVariant::VideoEmbed(_) => VariantKind::VideoEmbed,
            RenderVariant::AudioEmbed(_) => VariantKind::AudioEmbed,
            RenderVariant::SocialEmbed(_) => VariantKind::SocialEmbed,
            RenderVariant::MapEmbed { .. } => VariantKind::MapEmbed,
            RenderVariant::AgeGated { .. } => VariantKind::AgeGated,
        }
    }

    /// Navigation must wait for an explicit visitor confirmation.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, RenderVariant::AgeGated { .. })
    }
}

/// Lower-cased inputs every rule predicate reads.
pub struct Signals<'a> {
    pub kind: String,
    pub url: String,
    /// Original URL, used by extractors so ids keep their case.
    pub raw_url: &'a str,
}

impl<'a> Signals<'a> {
    pub fn from_block(block: &'a Block) -> Self {
        let raw_url = block.url_str().unwrap_or_default();
        Self {
            kind: block.kind.trim().to_ascii_lowercase(),
            url: raw_url.to_ascii_lowercase(),
            raw_url,
        }
    }

    fn kind_is(&self, kinds: &[&str]) -> bool {
        kinds.contains(&self.kind.as_str())
    }

    fn url_contains(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.url.contains(needle))
    }
}

pub struct ClassifierRule {
    pub name: &'static str,
    pub matches: fn(&Signals) -> bool,
    /// `None` means the rule owned the block but could not build its variant.
    pub build: fn(&Signals) -> Option<RenderVariant>,
}

pub static RULES: &[ClassifierRule] = &[
    ClassifierRule {
        name: "header",
        matches: |s| s.kind_is(&["header"]),
        build: |_| Some(RenderVariant::SectionHeader),
    },
    ClassifierRule {
        name: "video",
        matches: |s| {
            s.kind_is(&["youtube", "vimeo"])
                || s.url_contains(&["youtube.com", "youtu.be", "vimeo.com"])
        },
        build: |s| video_embed(s.raw_url).map(RenderVariant::VideoEmbed),
    },
    ClassifierRule {
        name: "audio",
        matches: |s| s.kind_is(&["spotify"]) || s.url_contains(&["spotify.com"]),
        build: |s| spotify_embed(s.raw_url).map(RenderVariant::AudioEmbed),
    },
    ClassifierRule {
        name: "social",
        matches: |s| s.kind_is(&["twitter", "x"]) || s.url_contains(&["twitter.com", "x.com"]),
        build: |s| tweet_embed(s.raw_url).map(RenderVariant::SocialEmbed),
    },
    ClassifierRule {
        name: "map",
        matches: |s| s.kind_is(&["map"]) || s.url_contains(&["maps.google", "goo.gl/maps"]),
        build: |s| {
            Some(RenderVariant::MapEmbed {
                embeddable: s.url.contains("google.com/maps"),
            })
        },
    },
    ClassifierRule {
        name: "age_gated",
        matches: |s| s.kind_is(&["onlyfans"]) || s.url_contains(&["onlyfans.com"]),
        build: |s| {
            Some(RenderVariant::AgeGated {
                platform: detect_platform(s.raw_url),
            })
        },
    },
];

/// Classifies a block. Pure: the result depends only on its type and URL.
pub fn classify(block: &Block) -> RenderVariant {
    let signals = Signals::from_block(block);
    match RULES.iter().find(|rule| (rule.matches)(&signals)) {
        Some(rule) => (rule.build)(&signals).unwrap_or_else(|| {
            tracing::debug!(
                block_id = %block.id,
                rule = rule.name,
                "extractor did not match, rendering as plain link"
            );
            default_link(&signals)
        }),
        None => default_link(&signals),
    }
}

fn default_link(signals: &Signals) -> RenderVariant {
    RenderVariant::DefaultLink {
        platform: detect_platform(signals.raw_url),
    }
}
