use crate::events::CollageFrame;
use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Stand-in renderer: logs every repaint request.
///
/// Returns the number of frames received.
pub async fn run(mut from_collage: Receiver<CollageFrame>, cancel: CancellationToken) -> Result<u64> {
    let mut frames: u64 = 0;
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_frame = from_collage.recv() => {
                let Some(frame) = maybe_frame else {
                    debug!("collage side closed");
                    break;
                };
                frames += 1;
                let keys: Vec<u64> = frame.visible().map(|p| p.sequence).collect();
                info!(
                    visible = ?keys,
                    fading = ?frame.fading().map(|p| p.sequence),
                    newest_mime = ?frame.photos.last().map(|p| p.mime_type()),
                    grayscale = frame.presentation.is_grayscale,
                    opacity = frame.presentation.opacity,
                    "repaint"
                );
            }
        }
    }
    Ok(frames)
}
