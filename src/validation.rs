//! Write-time checks for authored blocks and profile usernames.
//!
//! Rendering never calls into this module: classification fails open on
//! whatever the store returns. These checks run when a block is created or
//! edited.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::model::{Block, BlockKind};

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_URL_CHARS: usize = 2048;
pub const MIN_USERNAME_CHARS: usize = 3;
pub const MAX_USERNAME_CHARS: usize = 20;

const BLOCKED_SCHEMES: [&str; 4] = ["javascript:", "data:", "vbscript:", "file:"];

static USERNAME_CHARS: Lazy<Regex> = Lazy::new(|| compile(r"^[a-z0-9_]+$"));
static EVENT_HANDLER: Lazy<Regex> = Lazy::new(|| compile(r"(?i)on\w+\s*="));
static JAVASCRIPT_SCHEME: Lazy<Regex> = Lazy::new(|| compile(r"(?i)javascript:"));
static DANGEROUS_MARKUP: Lazy<[Regex; 5]> = Lazy::new(|| {
    [
        compile(r"(?i)<script"),
        compile(r"(?i)javascript:"),
        compile(r"(?i)<iframe"),
        compile(r"(?i)<object"),
        compile(r"(?i)<embed"),
    ]
});

// Only called with the literal patterns above.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("validation pattern must compile")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockField {
    Title,
    Url,
    Type,
    Username,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockIssueReason {
    Missing,
    TooShort,
    TooLong,
    UnsafeContent,
    InvalidUrl,
    UnknownType,
    InvalidCharacters,
    LeadingDigit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIssue {
    pub field: BlockField,
    pub reason: BlockIssueReason,
    pub message: String,
}

impl BlockIssue {
    pub fn new(field: BlockField, reason: BlockIssueReason, message: impl Into<String>) -> Self {
        Self {
            field,
            reason,
            message: message.into(),
        }
    }
}

/// Raw authoring input.
#[derive(Debug, Clone, Default)]
pub struct BlockDraft {
    pub kind: String,
    pub title: String,
    pub url: Option<String>,
}

/// A draft that passed every check, with its values normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBlock {
    pub kind: BlockKind,
    pub title: String,
    pub url: Option<String>,
}

impl ValidatedBlock {
    pub fn into_block(self, profile_id: Uuid, position: i32) -> Block {
        Block::new(profile_id, self.kind.as_str(), self.title, self.url, position)
    }
}

/// Strips markup and script fragments and caps the length.
pub fn sanitize_string(input: &str) -> String {
    let without_brackets: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    let without_scheme = JAVASCRIPT_SCHEME.replace_all(&without_brackets, "");
    let without_handlers = EVENT_HANDLER.replace_all(&without_scheme, "");
    without_handlers.chars().take(MAX_TITLE_CHARS).collect()
}

/// Normalized `http`/`https` URL, or `None` for anything else.
pub fn sanitize_url(url: Option<&str>) -> Option<String> {
    let trimmed = url.map(str::trim).filter(|value| !value.is_empty())?;
    let lowered = trimmed.to_ascii_lowercase();
    if BLOCKED_SCHEMES.iter().any(|scheme| lowered.starts_with(scheme)) {
        return None;
    }
    let parsed = url::Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let href = parsed.to_string();
    (href.len() <= MAX_URL_CHARS).then_some(href)
}

/// Checks a draft and reports every problem found.
pub fn validate_block(draft: &BlockDraft) -> Result<ValidatedBlock, Vec<BlockIssue>> {
    let mut issues = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        issues.push(BlockIssue::new(
            BlockField::Title,
            BlockIssueReason::Missing,
            "Title is required",
        ));
    } else if title.chars().count() > MAX_TITLE_CHARS {
        issues.push(BlockIssue::new(
            BlockField::Title,
            BlockIssueReason::TooLong,
            format!("Title cannot exceed {MAX_TITLE_CHARS} characters"),
        ));
    }
    if DANGEROUS_MARKUP.iter().any(|pattern| pattern.is_match(title))
        || EVENT_HANDLER.is_match(title)
    {
        issues.push(BlockIssue::new(
            BlockField::Title,
            BlockIssueReason::UnsafeContent,
            "Title contains characters that are not allowed",
        ));
    }

    let raw_url = draft.url.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let url = match raw_url {
        None => None,
        Some(value) if value.chars().count() > MAX_URL_CHARS => {
            issues.push(BlockIssue::new(
                BlockField::Url,
                BlockIssueReason::TooLong,
                format!("URL cannot exceed {MAX_URL_CHARS} characters"),
            ));
            None
        }
        Some(value) => {
            let sanitized = sanitize_url(Some(value));
            if sanitized.is_none() {
                issues.push(BlockIssue::new(
                    BlockField::Url,
                    BlockIssueReason::InvalidUrl,
                    "URL must be valid and use http:// or https://",
                ));
            }
            sanitized
        }
    };

    let kind = BlockKind::parse(&draft.kind);
    if kind.is_none() {
        issues.push(BlockIssue::new(
            BlockField::Type,
            BlockIssueReason::UnknownType,
            format!("Unknown block type '{}'", draft.kind.trim()),
        ));
    }

    match kind {
        Some(kind) if issues.is_empty() => Ok(ValidatedBlock {
            kind,
            title: title.to_string(),
            url,
        }),
        _ => Err(issues),
    }
}

/// Checks a username for the public profile address. The value is trimmed
/// and lower-cased before the rules apply; the normalized form is returned.
pub fn validate_username(raw: &str) -> Result<String, Vec<BlockIssue>> {
    let username = raw.trim().to_lowercase();
    if username.is_empty() {
        return Err(vec![BlockIssue::new(
            BlockField::Username,
            BlockIssueReason::Missing,
            "Username is required",
        )]);
    }

    let mut issues = Vec::new();
    let length = username.chars().count();
    if length < MIN_USERNAME_CHARS {
        issues.push(BlockIssue::new(
            BlockField::Username,
            BlockIssueReason::TooShort,
            format!("Username must be at least {MIN_USERNAME_CHARS} characters"),
        ));
    } else if length > MAX_USERNAME_CHARS {
        issues.push(BlockIssue::new(
            BlockField::Username,
            BlockIssueReason::TooLong,
            format!("Username cannot exceed {MAX_USERNAME_CHARS} characters"),
        ));
    }
    if !USERNAME_CHARS.is_match(&username) {
        issues.push(BlockIssue::new(
            BlockField::Username,
            BlockIssueReason::InvalidCharacters,
            "Only lowercase letters, digits and underscores are allowed",
        ));
    }
    if username.starts_with(|c: char| c.is_ascii_digit()) {
        issues.push(BlockIssue::new(
            BlockField::Username,
            BlockIssueReason::LeadingDigit,
            "Username cannot start with a digit",
        ));
    }

    if issues.is_empty() {
        Ok(username)
    } else {
        Err(issues)
    }
}
