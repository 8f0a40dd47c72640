//! URL → platform detection and the per-platform display table.

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Youtube,
    Vimeo,
    Spotify,
    Twitter,
    Github,
    Instagram,
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
    Onlyfans,
    Link,
}

/// Presentation attributes used for icon and accent selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformConfig {
    pub name: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub icon: &'static str,
}

/// Priority-ordered domain table. Earlier rows win when a URL matches more
/// than one entry.
const PLATFORM_DOMAINS: &[(Platform, &[&str])] = &[
    (Platform::Youtube, &["youtube.com", "youtu.be"]),
    (Platform::Vimeo, &["vimeo.com"]),
    (Platform::Spotify, &["spotify.com", "spotify.link"]),
    (Platform::Twitter, &["twitter.com", "x.com"]),
    (Platform::Github, &["github.com", "github.io"]),
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Tiktok, &["tiktok.com"]),
    (Platform::Linkedin, &["linkedin.com", "lnkd.in"]),
    (Platform::Discord, &["discord.com", "discord.gg"]),
    (Platform::Twitch, &["twitch.tv"]),
    (Platform::Facebook, &["facebook.com", "fb.com", "fb.me"]),
    (Platform::Whatsapp, &["whatsapp.com", "wa.me"]),
    (Platform::Telegram, &["telegram.org", "telegram.me", "t.me"]),
    (Platform::Dribbble, &["dribbble.com"]),
    (Platform::Behance, &["behance.net"]),
    (Platform::Figma, &["figma.com"]),
    (Platform::Notion, &["notion.so", "notion.site"]),
    (Platform::Medium, &["medium.com"]),
    (Platform::Substack, &["substack.com"]),
    (Platform::Patreon, &["patreon.com"]),
    (Platform::Buymeacoffee, &["buymeacoffee.com"]),
    (Platform::Onlyfans, &["onlyfans.com"]),
];

/// Short domains compared against the parsed host only. As plain substrings
/// they hit unrelated sites (`netflix.com` contains `x.com`).
const HOST_ONLY_DOMAINS: &[&str] = &["x.com", "t.me", "fb.me", "wa.me"];

/// Maps a URL to the first platform with a domain substring in it,
/// case-insensitively.
///
/// Empty or malformed input is not an error; it yields [`Platform::Link`].
pub fn detect_platform(url: &str) -> Platform {
    let lowered = url.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Platform::Link;
    }
    let host = parse_lenient(&lowered).and_then(|parsed| parsed.host_str().map(str::to_string));
    PLATFORM_DOMAINS
        .iter()
        .find(|(_, domains)| {
            domains
                .iter()
                .any(|domain| domain_matches(&lowered, host.as_deref(), domain))
        })
        .map_or(Platform::Link, |(platform, _)| *platform)
}

fn domain_matches(url: &str, host: Option<&str>, domain: &str) -> bool {
    if HOST_ONLY_DOMAINS.contains(&domain) {
        host.is_some_and(|host| host_matches(host, domain))
    } else {
        url.contains(domain)
    }
}

/// Hostname without a leading `www.`, used as a compact link caption.
pub fn display_host(url: &str) -> Option<String> {
    let parsed = parse_lenient(url)?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Parses `value`, retrying with an `https://` prefix when no scheme is given.
pub(crate) fn parse_lenient(value: &str) -> Option<Url> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Url::parse(trimmed) {
        Ok(url) => Some(url),
        Err(_) if !trimmed.contains("://") => Url::parse(&format!("https://{trimmed}")).ok(),
        Err(_) => None,
    }
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        self.config().icon
    }

    pub fn is_brand(&self) -> bool {
        *self != Platform::Link
    }

    pub fn config(&self) -> &'static PlatformConfig {
        match self {
            Platform::Youtube => &YOUTUBE,
            Platform::Vimeo => &VIMEO,
            Platform::Spotify => &SPOTIFY,
            Platform::Twitter => &TWITTER,
            Platform::Github => &GITHUB,
            Platform::Instagram => &INSTAGRAM,
            Platform::Tiktok => &TIKTOK,
            Platform::Linkedin => &LINKEDIN,
            Platform::Discord => &DISCORD,
            Platform::Twitch => &TWITCH,
            Platform::Facebook => &FACEBOOK,
            Platform::Whatsapp => &WHATSAPP,
            Platform::Telegram => &TELEGRAM,
            Platform::Dribbble => &DRIBBBLE,
            Platform::Behance => &BEHANCE,
            Platform::Figma => &FIGMA,
            Platform::Notion => &NOTION,
            Platform::Medium => &MEDIUM,
            Platform::Substack => &SUBSTACK,
            Platform::Patreon => &PATREON,
            Platform::Buymeacoffee => &BUYMEACOFFEE,
            Platform::Onlyfans => &ONLYFANS,
            Platform::Link => &LINK,
        }
    }
}

const fn config(
    name: &'static str,
    color: &'static str,
    bg_color: &'static str,
    icon: &'static str,
) -> PlatformConfig {
    PlatformConfig {
        name,
        color,
        bg_color,
        icon,
    }
}

const YOUTUBE: PlatformConfig = config("YouTube", "#FF0000", "rgba(255, 0, 0, 0.1)", "youtube");
const VIMEO: PlatformConfig = config("Vimeo", "#1AB7EA", "rgba(26, 183, 234, 0.1)", "vimeo");
const SPOTIFY: PlatformConfig = config("Spotify", "#1DB954", "rgba(29, 185, 84, 0.1)", "spotify");
const TWITTER: PlatformConfig = config("X", "#FFFFFF", "rgba(255, 255, 255, 0.1)", "twitter");
const GITHUB: PlatformConfig = config("GitHub", "#F0F6FC", "rgba(240, 246, 252, 0.1)", "github");
const INSTAGRAM: PlatformConfig =
    config("Instagram", "#E4405F", "rgba(228, 64, 95, 0.1)", "instagram");
const TIKTOK: PlatformConfig = config("TikTok", "#FE2C55", "rgba(254, 44, 85, 0.1)", "tiktok");
const LINKEDIN: PlatformConfig =
    config("LinkedIn", "#0A66C2", "rgba(10, 102, 194, 0.1)", "linkedin");
const DISCORD: PlatformConfig = config("Discord", "#5865F2", "rgba(88, 101, 242, 0.1)", "discord");
const TWITCH: PlatformConfig = config("Twitch", "#9146FF", "rgba(145, 70, 255, 0.1)", "twitch");
const FACEBOOK: PlatformConfig =
    config("Facebook", "#1877F2", "rgba(24, 119, 242, 0.1)", "facebook");
const WHATSAPP: PlatformConfig =
    config("WhatsApp", "#25D366", "rgba(37, 211, 102, 0.1)", "whatsapp");
const TELEGRAM: PlatformConfig =
    config("Telegram", "#26A5E4", "rgba(38, 165, 228, 0.1)", "telegram");
const DRIBBBLE: PlatformConfig =
    config("Dribbble", "#EA4C89", "rgba(234, 76, 137, 0.1)", "dribbble");
const BEHANCE: PlatformConfig = config("Behance", "#1769FF", "rgba(23, 105, 255, 0.1)", "behance");
const FIGMA: PlatformConfig = config("Figma", "#F24E1E", "rgba(242, 78, 30, 0.1)", "figma");
const NOTION: PlatformConfig = config("Notion", "#FFFFFF", "rgba(255, 255, 255, 0.1)", "notion");
const MEDIUM: PlatformConfig = config("Medium", "#FFFFFF", "rgba(255, 255, 255, 0.1)", "medium");
const SUBSTACK: PlatformConfig =
    config("Substack", "#FF6719", "rgba(255, 103, 25, 0.1)", "substack");
const PATREON: PlatformConfig = config("Patreon", "#FF424D", "rgba(255, 66, 77, 0.1)", "patreon");
const BUYMEACOFFEE: PlatformConfig = config(
    "Buy Me a Coffee",
    "#FFDD00",
    "rgba(255, 221, 0, 0.1)",
    "buymeacoffee",
);
const ONLYFANS: PlatformConfig =
    config("OnlyFans", "#00AFF0", "rgba(0, 175, 240, 0.1)", "onlyfans");
const LINK: PlatformConfig = config("Link", "#A1A1AA", "rgba(161, 161, 170, 0.1)", "link");
