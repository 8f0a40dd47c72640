//! Visitor click tracking.
//!
//! Recording a click is fire-and-forget: [`ClickSink::record_click`] returns
//! nothing and must not block on storage. Counter updates go through a plain
//! read-modify-write on the store, so concurrent visitors can under-count;
//! exact counts need an atomic increment from the store itself.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{click_log_path, AppConfig};

/// Per-instruction handle the presentation layer fires on navigation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickHook {
    pub block_id: Uuid,
}

impl ClickHook {
    pub fn new(block_id: Uuid) -> Self {
        Self { block_id }
    }

    pub fn fire(&self, sink: &dyn ClickSink) {
        sink.record_click(self.block_id);
    }
}

/// Visitor answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    NotAsked,
    Granted,
    Declined,
}

/// Outcome of a navigation attempt on a block instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Open { url: String },
    /// Show the confirmation step; nothing was recorded.
    AwaitingConfirmation,
    Declined,
    NoDestination,
}

pub trait ClickSink: Send + Sync {
    fn record_click(&self, block_id: Uuid);
}

/// Storage collaborator holding per-block counters.
pub trait ClickStore: Send + Sync {
    /// `None` when the block does not exist.
    fn click_count(&self, block_id: Uuid) -> Result<Option<u64>>;
    fn set_click_count(&self, block_id: Uuid, count: u64) -> Result<()>;
}

/// Reads the counter and writes it back plus one. Unknown blocks are ignored.
pub fn increment_click(store: &dyn ClickStore, block_id: Uuid) -> Result<Option<u64>> {
    let Some(current) = store.click_count(block_id)? else {
        return Ok(None);
    };
    let next = current.saturating_add(1);
    store.set_click_count(block_id, next)?;
    Ok(Some(next))
}

/// In-process counter store keyed by block id.
#[derive(Debug, Default)]
pub struct MemoryClickStore {
    counts: Mutex<HashMap<Uuid, u64>>,
}

impl MemoryClickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, block_id: Uuid, count: u64) -> Result<()> {
        self.lock()?.insert(block_id, count);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, u64>>> {
        self.counts
            .lock()
            .map_err(|_| anyhow!("click counter store lock poisoned"))
    }
}

impl ClickStore for MemoryClickStore {
    fn click_count(&self, block_id: Uuid) -> Result<Option<u64>> {
        Ok(self.lock()?.get(&block_id).copied())
    }

    fn set_click_count(&self, block_id: Uuid, count: u64) -> Result<()> {
        self.lock()?.insert(block_id, count);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClickEvent {
    pub event_id: Uuid,
    pub block_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(block_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            block_id,
            timestamp: Utc::now(),
        }
    }
}

/// Sink that enqueues events for a background worker.
#[derive(Debug, Clone)]
pub struct ChannelClickSink {
    sender: Sender<ClickEvent>,
}

impl ChannelClickSink {
    pub fn new(sender: Sender<ClickEvent>) -> Self {
        Self { sender }
    }
}

impl ClickSink for ChannelClickSink {
    fn record_click(&self, block_id: Uuid) {
        if self.sender.send(ClickEvent::new(block_id)).is_err() {
            tracing::warn!(block_id = %block_id, "click worker gone, dropping click");
        }
    }
}

/// Applies queued clicks to `store` until every sender is dropped.
/// Failed increments are logged and skipped.
pub fn spawn_click_worker(
    receiver: Receiver<ClickEvent>,
    store: Arc<dyn ClickStore>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for event in receiver {
            if let Err(err) = increment_click(store.as_ref(), event.block_id) {
                tracing::warn!(block_id = %event.block_id, error = %err, "click increment failed");
            }
        }
    })
}

/// Append-only JSONL log of click events. One instance may be shared by
/// every visitor thread; each event lands as a single whole line.
pub struct ClickLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ClickLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The configured log under the workspace root, or `None` when click
    /// logging is switched off.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>> {
        if !config.clicks.log_enabled {
            return Ok(None);
        }
        Ok(Some(Self::new(click_log_path(config)?)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event: &ClickEvent) -> Result<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("click log lock poisoned"))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open click log {:?}", self.path))?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<ClickEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut events = Vec::new();
        for line in data.lines().filter(|l| !l.trim().is_empty()) {
            let event: ClickEvent = serde_json::from_str(line)
                .with_context(|| format!("Malformed click log line in {:?}", self.path))?;
            events.push(event);
        }
        Ok(events)
    }

    /// Clicks per block, as recorded in the log.
    pub fn tally(&self) -> Result<HashMap<Uuid, u64>> {
        let mut counts = HashMap::new();
        for event in self.load_events()? {
            *counts.entry(event.block_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl ClickSink for ClickLog {
    fn record_click(&self, block_id: Uuid) {
        if let Err(err) = self.append(&ClickEvent::new(block_id)) {
            tracing::warn!(block_id = %block_id, error = %err, "failed to append click event");
        }
    }
}

/// Fans one click out to several sinks.
#[derive(Default)]
pub struct ClickSinks {
    sinks: Vec<Box<dyn ClickSink>>,
}

impl ClickSinks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl ClickSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ClickSink for ClickSinks {
    fn record_click(&self, block_id: Uuid) {
        for sink in &self.sinks {
            sink.record_click(block_id);
        }
    }
}
