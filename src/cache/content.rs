//! Serial-worker image cache.
//!
//! One dedicated thread owns the backing LRU map. Every operation is a
//! message on a single channel, so stores, loads and clears are applied in
//! the order they were sent and no two of them ever touch the map at once.
//!
//! - `store` and `clear_all` are fire-and-forget.
//! - `load` waits for its reply, which means it also waits for every command
//!   queued before it. A load issued after a store returned therefore sees
//!   that store.

use super::image::Image;
use super::key::CacheKey;
use crate::model::CacheError;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

/// Default number of entries kept before evicting.
pub const DEFAULT_CACHE_CAPACITY: usize = 200;

enum Command {
    Store { key: CacheKey, image: Image },
    Load {
        key: CacheKey,
        reply: SyncSender<Option<Image>>,
    },
    Len { reply: SyncSender<usize> },
    Clear,
    Shutdown,
}

/// Thread-safe key→image store with a single serial access line.
///
/// Share it with `Arc`. Dropping the last handle stops the worker after it
/// drains the commands already queued.
#[derive(Debug)]
pub struct ContentCache {
    commands: Sender<Command>,
    worker: Option<JoinHandle<()>>,
    capacity: usize,
}

impl ContentCache {
    /// Start a cache holding at most `capacity` entries (0 = unbounded).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::WorkerSpawn`] if the worker thread cannot be
    /// started.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let (commands, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("revlist-content-cache".to_string())
            .spawn(move || run_worker(rx, capacity))
            .map_err(CacheError::WorkerSpawn)?;

        debug!(capacity, "Content cache started");
        Ok(Self {
            commands,
            worker: Some(worker),
            capacity,
        })
    }

    /// Entry limit (0 = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queue `image` under `key`. Returns immediately.
    ///
    /// The last store for a key wins.
    pub fn store(&self, key: CacheKey, image: Image) {
        self.send(Command::Store { key, image });
    }

    /// Look up `key`, waiting for every earlier command to be applied.
    ///
    /// A miss is `None`, never an error.
    pub fn load(&self, key: &CacheKey) -> Option<Image> {
        let (reply, rx) = mpsc::sync_channel(1);
        self.send(Command::Load {
            key: key.clone(),
            reply,
        });
        rx.recv().ok().flatten()
    }

    /// Queue removal of every entry. Returns immediately.
    pub fn clear_all(&self) {
        self.send(Command::Clear);
    }

    /// Number of entries once every earlier command is applied.
    pub fn len(&self) -> usize {
        let (reply, rx) = mpsc::sync_channel(1);
        self.send(Command::Len { reply });
        rx.recv().unwrap_or(0)
    }

    /// True when [`ContentCache::len`] is zero.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Content cache worker is gone; command dropped");
        }
    }
}

impl Drop for ContentCache {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Content cache worker panicked");
            }
        }
    }
}

fn run_worker(rx: Receiver<Command>, capacity: usize) {
    let mut entries: LruCache<CacheKey, Image> = match NonZeroUsize::new(capacity) {
        Some(capacity) => LruCache::new(capacity),
        None => LruCache::unbounded(),
    };

    for command in rx {
        match command {
            Command::Store { key, image } => {
                trace!(key = %key, bytes = image.len(), "Cache store");
                entries.put(key, image);
            }
            Command::Load { key, reply } => {
                let hit = entries.get(&key).cloned();
                trace!(key = %key, hit = hit.is_some(), "Cache load");
                // The caller may have given up; nothing to do then.
                let _ = reply.send(hit);
            }
            Command::Len { reply } => {
                let _ = reply.send(entries.len());
            }
            Command::Clear => {
                debug!(evicted = entries.len(), "Cache cleared");
                entries.clear();
            }
            Command::Shutdown => break,
        }
    }
}
