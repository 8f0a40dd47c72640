//! HTML rendition of a public profile page.

use crate::classify::RenderVariant;
use crate::layout::CellSize;
use crate::model::Profile;
use crate::plan::{BlockInstruction, RenderInstruction, RenderPlan};
use crate::spinning_text::spinning_text_content;
use crate::validation::sanitize_url;

/// Builds a minimal HTML document for the public profile.
pub fn build_profile_html(profile: &Profile, plan: &RenderPlan) -> String {
    let name = profile.display_name();
    let title = format!("{name} (@{})", profile.username);
    let description = profile
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|bio| !bio.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Links from {name}"));
    let avatar = profile
        .avatar_url
        .as_deref()
        .map(|src| {
            format!(
                "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
                html_escape(src),
                html_escape(name)
            )
        })
        .unwrap_or_default();
    let bio = profile
        .bio
        .as_deref()
        .map(str::trim)
        .filter(|bio| !bio.is_empty())
        .map(|bio| format!("<p class=\"bio\">{}</p>", html_escape(bio)))
        .unwrap_or_default();
    let spinning = if profile.spinning_text_enabled {
        spinning_text_content(profile.spinning_text_set.as_deref())
            .map(|text| format!("<p class=\"spinning-text\">{}</p>", html_escape(text)))
            .unwrap_or_default()
    } else {
        String::new()
    };
    let body = plan
        .instructions
        .iter()
        .map(render_instruction)
        .collect::<Vec<String>>()
        .join("\n");

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title}</title>
    <meta name="description" content="{description}">
    <meta property="og:title" content="{title}">
  </head>
  <body>
    <header>
      {avatar}
      {spinning}
      <h1>{name}</h1>
      <p class="username">@{username}</p>
      {bio}
    </header>
    <main class="layout-{layout}">
{body}
    </main>
  </body>
</html>
"#,
        title = html_escape(&title),
        description = html_escape(&description),
        avatar = avatar,
        spinning = spinning,
        name = html_escape(name),
        username = html_escape(&profile.username),
        bio = bio,
        layout = plan.layout,
        body = body
    )
}

fn render_instruction(instruction: &RenderInstruction) -> String {
    match instruction {
        RenderInstruction::Empty { message } => {
            format!("      <p class=\"empty\">{}</p>", html_escape(message))
        }
        RenderInstruction::SectionBreak { title } => {
            format!("      <h3 class=\"section\">{}</h3>", html_escape(title))
        }
        RenderInstruction::Block(block) => render_block(block),
        RenderInstruction::Run { columns, blocks } => {
            let cells = blocks
                .iter()
                .map(render_block)
                .collect::<Vec<String>>()
                .join("\n");
            format!("      <div class=\"grid\" data-columns=\"{columns}\">\n{cells}\n      </div>")
        }
    }
}

fn render_block(block: &BlockInstruction) -> String {
    let (variant, extra) = match &block.variant {
        RenderVariant::SectionHeader => ("section-header", String::new()),
        RenderVariant::DefaultLink { platform } => {
            ("link", format!(" data-platform=\"{}\"", platform.as_str()))
        }
        RenderVariant::VideoEmbed(video) => (
            "video",
            format!(
                " data-embed=\"{}\" data-thumbnail=\"{}\"",
                html_escape(&video.embed_url),
                html_escape(&video.thumbnail_url)
            ),
        ),
        RenderVariant::AudioEmbed(audio) => (
            "audio",
            format!(" data-embed=\"{}\"", html_escape(&audio.embed_url)),
        ),
        RenderVariant::SocialEmbed(tweet) => (
            "social",
            format!(" data-status=\"{}\"", html_escape(&tweet.status_id)),
        ),
        RenderVariant::MapEmbed { embeddable } => ("map", format!(" data-embeddable=\"{embeddable}\"")),
        RenderVariant::AgeGated { platform } => (
            "age-gated",
            format!(
                " data-platform=\"{}\" data-requires-confirmation=\"true\"",
                platform.as_str()
            ),
        ),
    };
    // Stored URLs are not validated on read; only http(s) targets become
    // navigable. Gated links keep their target out of `href` so nothing
    // opens before the visitor confirms.
    let href = match sanitize_url(block.url.as_deref()) {
        Some(url) if !block.requires_confirmation => format!(" href=\"{}\"", html_escape(&url)),
        Some(url) => format!(" data-href=\"{}\"", html_escape(&url)),
        None => {
            if block.url.is_some() {
                tracing::debug!(block_id = %block.block_id, "dropping non-http link target");
            }
            String::new()
        }
    };
    format!(
        "      <a class=\"block {variant}{highlight}\" data-block-id=\"{id}\"{size}{href}{extra}>{title}</a>",
        highlight = if block.highlighted { " highlighted" } else { "" },
        id = block.block_id,
        size = size_attributes(&block.size),
        title = html_escape(&block.title),
    )
}

fn size_attributes(size: &CellSize) -> String {
    match size {
        CellSize::FullWidth => " data-size=\"full\"".to_string(),
        CellSize::GridCell => " data-size=\"cell\"".to_string(),
        CellSize::Bento { span, .. } => {
            format!(" data-cols=\"{}\" data-rows=\"{}\"", span.columns, span.rows)
        }
    }
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
