//! Photo collage state: the rolling window and the source feeding it.

use tracing::debug;

use crate::config::{BorderType, Configuration};
use crate::error::Error;
use crate::events::CollageFrame;
use crate::photo::PhotoItem;
use crate::repository::PhotoRepository;
use crate::window::RollingWindow;

/// Presentation settings forwarded untouched to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    pub is_grayscale: bool,
    pub border_type: BorderType,
    pub opacity: f64,
    pub maximum_size: u32,
}

impl From<&Configuration> for Presentation {
    fn from(cfg: &Configuration) -> Self {
        Self {
            is_grayscale: cfg.is_grayscale,
            border_type: cfg.border_type,
            opacity: cfg.opacity,
            maximum_size: cfg.maximum_size,
        }
    }
}

pub struct Collage {
    window: RollingWindow,
    repository: Box<dyn PhotoRepository + Send>,
    presentation: Presentation,
    count: u64,
}

impl Collage {
    pub fn new(cfg: &Configuration, repository: Box<dyn PhotoRepository + Send>) -> Self {
        Self {
            window: RollingWindow::new(cfg.number_of_photos),
            repository,
            presentation: Presentation::from(cfg),
            count: 0,
        }
    }

    /// Pull the next photo into the window.
    ///
    /// Returns `Ok(false)` without touching any state when the repository is
    /// empty. A photo that cannot be read is reported as [`Error::Read`] and
    /// does not consume a sequence number.
    pub fn advance(&mut self) -> Result<bool, Error> {
        if !self.repository.has_photos() {
            return Ok(false);
        }
        let Some(path) = self.repository.next_photo_path() else {
            return Ok(false);
        };

        let bytes = std::fs::read(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        self.count += 1;
        let item = PhotoItem::encode(self.count, &path, &bytes);
        debug!(
            sequence = item.sequence,
            path = %path.display(),
            bytes = bytes.len(),
            "photo added"
        );
        self.window.push(item);
        Ok(true)
    }

    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// Sequence number given to the most recent photo, 0 before the first.
    pub const fn last_sequence(&self) -> u64 {
        self.count
    }

    pub const fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Owned copy of what the renderer should paint right now.
    pub fn snapshot(&self) -> CollageFrame {
        CollageFrame {
            photos: self.window.snapshot(),
            presentation: self.presentation,
        }
    }
}
