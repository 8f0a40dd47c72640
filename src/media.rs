//! Embed descriptors for the media platforms the public page can inline.
//!
//! Each extractor is independent and returns `None` when the URL does not
//! have its shape. Callers fall back to a plain link in that case. Domains
//! match case-insensitively; extracted ids keep their original case.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Tried in order; the first pattern that matches supplies the id.
static YOUTUBE_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        compile(r"(?i)(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&?/]+)"),
        compile(r"(?i)youtube\.com/shorts/([^&?/]+)"),
    ]
});

static VIMEO_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"(?i)vimeo\.com/(?:video/)?(\d+)"));

static SPOTIFY_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)spotify\.com/(track|album|playlist|artist)/([^?]+)"));

static TWEET_PATTERN: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)(?:twitter\.com|x\.com)/.*/status/(\d+)"));

// Only called with the literal patterns above.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("embed pattern must compile")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VideoPlatform {
    Youtube,
    Vimeo,
}

/// Where a thumbnail URL comes from. Third-party thumbnails are best-effort
/// and may be missing when the lookup service cannot resolve the id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSource {
    Platform,
    ThirdParty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoEmbed {
    pub platform: VideoPlatform,
    pub video_id: String,
    pub embed_url: String,
    pub thumbnail_url: String,
    pub thumbnail_source: ThumbnailSource,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpotifyEntity {
    Track,
    Album,
    Playlist,
    Artist,
}

impl SpotifyEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotifyEntity::Track => "track",
            SpotifyEntity::Album => "album",
            SpotifyEntity::Playlist => "playlist",
            SpotifyEntity::Artist => "artist",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "track" => Some(SpotifyEntity::Track),
            "album" => Some(SpotifyEntity::Album),
            "playlist" => Some(SpotifyEntity::Playlist),
            "artist" => Some(SpotifyEntity::Artist),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotifyEmbed {
    pub entity: SpotifyEntity,
    pub id: String,
    pub embed_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TweetEmbed {
    pub status_id: String,
}

pub fn youtube_embed(url: &str) -> Option<VideoEmbed> {
    let id = YOUTUBE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))?
        .as_str()
        .to_string();
    Some(VideoEmbed {
        platform: VideoPlatform::Youtube,
        embed_url: format!("https://www.youtube.com/embed/{id}?autoplay=1"),
        thumbnail_url: format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"),
        thumbnail_source: ThumbnailSource::Platform,
        video_id: id,
    })
}

pub fn vimeo_embed(url: &str) -> Option<VideoEmbed> {
    let id = VIMEO_PATTERN.captures(url)?.get(1)?.as_str().to_string();
    Some(VideoEmbed {
        platform: VideoPlatform::Vimeo,
        embed_url: format!("https://player.vimeo.com/video/{id}?autoplay=1"),
        thumbnail_url: format!("https://vumbnail.com/{id}.jpg"),
        thumbnail_source: ThumbnailSource::ThirdParty,
        video_id: id,
    })
}

/// YouTube first, then Vimeo.
pub fn video_embed(url: &str) -> Option<VideoEmbed> {
    youtube_embed(url).or_else(|| vimeo_embed(url))
}

pub fn spotify_embed(url: &str) -> Option<SpotifyEmbed> {
    let caps = SPOTIFY_PATTERN.captures(url)?;
    let entity = SpotifyEntity::parse(caps.get(1)?.as_str())?;
    let id = caps.get(2)?.as_str().to_string();
    Some(SpotifyEmbed {
        embed_url: format!("https://open.spotify.com/embed/{}/{id}", entity.as_str()),
        entity,
        id,
    })
}

pub fn tweet_embed(url: &str) -> Option<TweetEmbed> {
    let status_id = TWEET_PATTERN.captures(url)?.get(1)?.as_str().to_string();
    Some(TweetEmbed { status_id })
}
