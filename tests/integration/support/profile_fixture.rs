use mybento::model::{Block, Profile};

/// A profile and its blocks, built up in position order.
pub struct ProfileFixture {
    pub profile: Profile,
    pub blocks: Vec<Block>,
}

impl ProfileFixture {
    pub fn new(username: &str) -> Self {
        Self {
            profile: Profile::new(username),
            blocks: Vec::new(),
        }
    }

    pub fn with_layout(mut self, tag: &str) -> Self {
        self.profile.layout_type = Some(tag.to_string());
        self
    }

    pub fn header(self, title: &str) -> Self {
        self.push("header", title, None)
    }

    pub fn link(self, kind: &str, title: &str, url: &str) -> Self {
        self.push(kind, title, Some(url))
    }

    pub fn highlight_last(mut self) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.is_highlighted = true;
        }
        self
    }

    pub fn deactivate_last(mut self) -> Self {
        if let Some(block) = self.blocks.last_mut() {
            block.is_active = false;
        }
        self
    }

    /// Blocks in reverse storage order, to prove sorting happens downstream.
    pub fn shuffled_blocks(&self) -> Vec<Block> {
        self.blocks.iter().rev().cloned().collect()
    }

    fn push(mut self, kind: &str, title: &str, url: Option<&str>) -> Self {
        let position = self.blocks.len() as i32;
        self.blocks.push(Block::new(
            self.profile.id,
            kind,
            title,
            url.map(str::to_string),
            position,
        ));
        self
    }
}

/// A profile with one block of each render family.
pub fn creator_fixture() -> ProfileFixture {
    ProfileFixture::new("creator")
        .header("Watch")
        .link("youtube", "Latest video", "https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        .link("spotify", "Playlist", "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
        .header("Follow")
        .link("x", "Thread", "https://x.com/creator/status/1234567890")
        .link("github", "Code", "https://github.com/creator")
        .link("onlyfans", "Exclusive", "https://onlyfans.com/creator")
        .link("map", "Studio", "https://www.google.com/maps/place/Studio")
}
