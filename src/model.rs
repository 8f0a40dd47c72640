//! Data structures backing profile pages.
//!
//! These types mirror the rows kept by the hosted store (profiles and blocks)
//! so authoring, rendering and click tracking share one contract.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of block ids accepted by a single reorder request.
pub const MAX_REORDER_BATCH: usize = 100;

/// Type tag used for section-divider blocks.
pub const HEADER_KIND: &str = "header";

/// A single content unit on a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Block {
    pub id: Uuid,
    pub profile_id: Uuid,
    /// Raw stored type tag. Classification reads it case-insensitively and
    /// falls back to a plain link for tags it does not know.
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_highlighted: bool,
    #[serde(default)]
    pub click_count: u64,
}

const fn default_active() -> bool {
    true
}

impl Block {
    pub fn new(
        profile_id: Uuid,
        kind: impl Into<String>,
        title: impl Into<String>,
        url: Option<String>,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile_id,
            kind: kind.into(),
            title: title.into(),
            url,
            position,
            is_active: true,
            is_highlighted: false,
            click_count: 0,
        }
    }

    pub fn is_header(&self) -> bool {
        self.kind.trim().eq_ignore_ascii_case(HEADER_KIND)
    }

    /// URL with surrounding whitespace removed, `None` when blank.
    pub fn url_str(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Closed set of type tags accepted by the authoring surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Link,
    Header,
    Youtube,
    Vimeo,
    Github,
    Spotify,
    Instagram,
    Twitter,
    X,
    Tiktok,
    Linkedin,
    Discord,
    Twitch,
    Facebook,
    Whatsapp,
    Telegram,
    Dribbble,
    Behance,
    Figma,
    Notion,
    Medium,
    Substack,
    Patreon,
    Buymeacoffee,
    Map,
    Onlyfans,
}

impl BlockKind {
    pub const ALL: [BlockKind; 26] = [
        BlockKind::Link,
        BlockKind::Header,
        BlockKind::Youtube,
        BlockKind::Vimeo,
        BlockKind::Github,
        BlockKind::Spotify,
        BlockKind::Instagram,
        BlockKind::Twitter,
        BlockKind::X,
        BlockKind::Tiktok,
        BlockKind::Linkedin,
        BlockKind::Discord,
        BlockKind::Twitch,
        BlockKind::Facebook,
        BlockKind::Whatsapp,
        BlockKind::Telegram,
        BlockKind::Dribbble,
        BlockKind::Behance,
        BlockKind::Figma,
        BlockKind::Notion,
        BlockKind::Medium,
        BlockKind::Substack,
        BlockKind::Patreon,
        BlockKind::Buymeacoffee,
        BlockKind::Map,
        BlockKind::Onlyfans,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Link => "link",
            BlockKind::Header => "header",
            BlockKind::Youtube => "youtube",
            BlockKind::Vimeo => "vimeo",
            BlockKind::Github => "github",
            BlockKind::Spotify => "spotify",
            BlockKind::Instagram => "instagram",
            BlockKind::Twitter => "twitter",
            BlockKind::X => "x",
            BlockKind::Tiktok => "tiktok",
            BlockKind::Linkedin => "linkedin",
            BlockKind::Discord => "discord",
            BlockKind::Twitch => "twitch",
            BlockKind::Facebook => "facebook",
            BlockKind::Whatsapp => "whatsapp",
            BlockKind::Telegram => "telegram",
            BlockKind::Dribbble => "dribbble",
            BlockKind::Behance => "behance",
            BlockKind::Figma => "figma",
            BlockKind::Notion => "notion",
            BlockKind::Medium => "medium",
            BlockKind::Substack => "substack",
            BlockKind::Patreon => "patreon",
            BlockKind::Buymeacoffee => "buymeacoffee",
            BlockKind::Map => "map",
            BlockKind::Onlyfans => "onlyfans",
        }
    }

    /// Case-insensitive lookup; `None` for tags outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
    }
}

/// Macro arrangement chosen per profile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutType {
    #[default]
    List,
    Grid,
    Bento,
}

/// Static descriptor shown by layout pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

const LIST_INFO: LayoutInfo = LayoutInfo {
    name: "List",
    description: "Links stacked vertically, classic link-in-bio style",
    icon: "list",
};

const GRID_INFO: LayoutInfo = LayoutInfo {
    name: "Grid",
    description: "Links in a two-column grid",
    icon: "grid-2x2",
};

const BENTO_INFO: LayoutInfo = LayoutInfo {
    name: "Bento",
    description: "Asymmetric bento layout with blocks of different sizes",
    icon: "layout-dashboard",
};

impl LayoutType {
    pub const ALL: [LayoutType; 3] = [LayoutType::List, LayoutType::Grid, LayoutType::Bento];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::List => "list",
            LayoutType::Grid => "grid",
            LayoutType::Bento => "bento",
        }
    }

    pub fn info(&self) -> &'static LayoutInfo {
        match self {
            LayoutType::List => &LIST_INFO,
            LayoutType::Grid => &GRID_INFO,
            LayoutType::Bento => &BENTO_INFO,
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                anyhow!("Unknown layout '{needle}'; expected one of list, grid, bento")
            })
    }
}

/// Owner of a set of blocks plus the presentation preferences the page needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Stored layout tag; blank means the profile never picked one.
    #[serde(default)]
    pub layout_type: Option<String>,
    #[serde(default)]
    pub spinning_text_enabled: bool,
    #[serde(default)]
    pub spinning_text_set: Option<String>,
}

impl Profile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            full_name: None,
            bio: None,
            avatar_url: None,
            layout_type: None,
            spinning_text_enabled: false,
            spinning_text_set: None,
        }
    }

    /// Resolves the stored layout, using `fallback` when none was chosen.
    /// A stored tag outside the known layouts is an error.
    pub fn layout_or(&self, fallback: LayoutType) -> Result<LayoutType> {
        match self.layout_type.as_deref().map(str::trim) {
            None | Some("") => Ok(fallback),
            Some(tag) => tag.parse(),
        }
    }

    pub fn layout(&self) -> Result<LayoutType> {
        self.layout_or(LayoutType::default())
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Stable ascending sort by `position`; ties keep their incoming order.
pub fn sort_by_position(blocks: &mut [Block]) {
    blocks.sort_by_key(|block| block.position);
}

/// Position for a block appended after every existing one.
pub fn next_position(blocks: &[Block]) -> i32 {
    blocks
        .iter()
        .map(|block| block.position)
        .max()
        .map_or(0, |max| max + 1)
}

/// Assigns positions `0..n` following `ordered_ids`.
///
/// Every id must belong to `blocks` and appear once. Blocks missing from the
/// request keep their relative order after the reordered ones.
pub fn reorder(blocks: &mut [Block], ordered_ids: &[Uuid]) -> Result<()> {
    if ordered_ids.is_empty() {
        bail!("Reorder requires at least one block");
    }
    if ordered_ids.len() > MAX_REORDER_BATCH {
        bail!("Cannot reorder more than {MAX_REORDER_BATCH} blocks at once");
    }
    let mut seen = HashSet::new();
    for id in ordered_ids {
        if !seen.insert(*id) {
            bail!("Block {id} appears more than once in the reorder request");
        }
        if !blocks.iter().any(|block| block.id == *id) {
            bail!("Block {id} does not belong to this profile");
        }
    }

    sort_by_position(blocks);
    let mut next = 0;
    for id in ordered_ids {
        if let Some(block) = blocks.iter_mut().find(|block| block.id == *id) {
            block.position = next;
            next += 1;
        }
    }
    for block in blocks.iter_mut().filter(|block| !seen.contains(&block.id)) {
        block.position = next;
        next += 1;
    }
    sort_by_position(blocks);
    Ok(())
}
