//! Photo sources the collage pulls from.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Configuration;

const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// Anything that can hand out photo paths one at a time.
pub trait PhotoRepository {
    /// Whether [`PhotoRepository::next_photo_path`] has anything to return.
    fn has_photos(&self) -> bool;

    /// Path of the next photo to show, or `None` when empty.
    fn next_photo_path(&mut self) -> Option<PathBuf>;
}

/// Order in which a [`DirectoryRepository`] hands out photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Sequential,
    Random,
}

/// Photos found under a directory, handed out in an endless cycle.
///
/// Random order shuffles the list and reshuffles after every full pass, so
/// each photo is shown once per cycle.
#[derive(Debug)]
pub struct DirectoryRepository {
    items: Vec<PathBuf>,
    idx: usize,
    order: Order,
    rng: StdRng,
}

impl DirectoryRepository {
    /// Scan `root` recursively for supported images.
    ///
    /// A missing or unreadable root yields an empty repository.
    pub fn scan(root: &Path, order: Order) -> Self {
        Self::from_paths(scan_dir(root), order, StdRng::from_os_rng())
    }

    /// Like [`DirectoryRepository::scan`] with a fixed shuffle seed.
    pub fn scan_seeded(root: &Path, order: Order, seed: u64) -> Self {
        Self::from_paths(scan_dir(root), order, StdRng::seed_from_u64(seed))
    }

    fn from_paths(mut items: Vec<PathBuf>, order: Order, mut rng: StdRng) -> Self {
        if order == Order::Random {
            items.shuffle(&mut rng);
        }
        Self {
            items,
            idx: 0,
            order,
            rng,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Borrow the current cycle's order (read-only).
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.items
    }
}

impl PhotoRepository for DirectoryRepository {
    fn has_photos(&self) -> bool {
        !self.items.is_empty()
    }

    fn next_photo_path(&mut self) -> Option<PathBuf> {
        let out = self.items.get(self.idx)?.clone();
        self.idx = (self.idx + 1) % self.items.len();
        if self.idx == 0 && self.order == Order::Random {
            self.items.shuffle(&mut self.rng);
            // The next cycle must not open with the photo just shown.
            let last = self.items.len() - 1;
            if last > 0 && self.items[0] == out {
                self.items.swap(0, last);
            }
            debug!(count = self.items.len(), "cycle complete; reshuffled");
        }
        Some(out)
    }
}

/// Build the repository described by `cfg`.
pub fn from_config(cfg: &Configuration) -> DirectoryRepository {
    let order = if cfg.is_random {
        Order::Random
    } else {
        Order::Sequential
    };
    let repo = DirectoryRepository::scan(&cfg.directory, order);
    info!(
        root = %cfg.directory.display(),
        count = repo.len(),
        ?order,
        "photo repository ready"
    );
    repo
}

/// Return `true` if `path` has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

fn scan_dir(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        warn!(root = %root.display(), "photo directory missing; collage will stay empty");
        return Vec::new();
    }

    let mut out: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        // Skip hidden dot-directories *below* the root only.
        .filter_entry(|e| !should_skip_dir(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("scan: skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_supported_image(e.path()))
        .map(DirEntry::into_path)
        .collect();
    out.sort();
    out
}

fn should_skip_dir(entry: &DirEntry) -> bool {
    // Never skip the root; tempfile roots can be dot-dirs.
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|n| n.starts_with('.'))
}
