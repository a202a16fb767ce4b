use crate::collage::Presentation;
use crate::photo::PhotoItem;

/// Repaint request carrying the window contents, oldest first.
#[derive(Debug, Clone)]
pub struct CollageFrame {
    pub photos: Vec<PhotoItem>,
    pub presentation: Presentation,
}

impl CollageFrame {
    /// The photo currently fading out, if any.
    pub fn fading(&self) -> Option<&PhotoItem> {
        self.photos.first().filter(|p| p.removed)
    }

    /// Photos that are fully visible.
    pub fn visible(&self) -> impl Iterator<Item = &PhotoItem> {
        self.photos.iter().filter(|p| !p.removed)
    }
}
