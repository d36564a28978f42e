//! Best-score persistence.
//!
//! The only state that outlives a session is a single non-negative integer.
//! It is read once at startup and overwritten whenever the current score
//! exceeds it. Reads that fail fall back to zero; writes are best-effort
//! (the value is a monotonic max, so a lost write is recovered next time).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Fixed namespace for the persisted value.
pub const STORE_FILE_NAME: &str = "blockblast-highscore.json";

/// Abstraction over best-score storage so the session can be tested with an
/// in-memory fake.
pub trait BestScoreStore {
    fn load(&self) -> Result<u32>;
    fn save(&self, best: u32) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedScore {
    best: u32,
}

/// JSON file-backed store.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.tui-blast/blockblast-highscore.json`, or the current
    /// directory when no home is available.
    pub fn at_default_path() -> Self {
        let base = std::env::var_os("HOME")
            .map(|home| Path::new(&home).join(".tui-blast"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(STORE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32> {
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        let saved: SavedScore = serde_json::from_str(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(saved.best)
    }

    fn save(&self, best: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let data = serde_json::to_string(&SavedScore { best })?;
        fs::write(&self.path, data)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for std::rc::Rc<T> {
    fn load(&self) -> Result<u32> {
        (**self).load()
    }

    fn save(&self, best: u32) -> Result<()> {
        (**self).save(best)
    }
}

/// In-memory store for tests and benches.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: std::cell::Cell<u32>,
}

impl MemoryScoreStore {
    pub fn new(best: u32) -> Self {
        Self {
            best: std::cell::Cell::new(best),
        }
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32> {
        Ok(self.best.get())
    }

    fn save(&self, best: u32) -> Result<()> {
        self.best.set(best);
        Ok(())
    }
}
