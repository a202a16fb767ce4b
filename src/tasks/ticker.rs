use crate::controller::CollageController;
use crate::events::CollageFrame;
use anyhow::{Context, Result};
use tokio::select;
use tokio::sync::mpsc::Sender;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Drives the collage on its configured cadence and pushes repaint frames
/// to the viewer.
///
/// Rules:
/// - The first photo is loaded before the timer is armed.
/// - Each expiry stops the timer, advances by one photo, restarts the timer,
///   then publishes the frame. Ticks never overlap.
/// - Cancellation disposes the controller; a tick already running finishes
///   but leaves the timer disarmed.
/// - `max_ticks` (if set) ends the loop after that many timer expiries.
pub async fn run(
    controller: &mut CollageController,
    to_viewer: Sender<CollageFrame>,
    cancel: CancellationToken,
    max_ticks: Option<u64>,
) -> Result<()> {
    let interval = controller.interval();
    let result = drive(controller, &to_viewer, &cancel, interval, max_ticks).await;
    controller.dispose();
    result
}

async fn drive(
    controller: &mut CollageController,
    to_viewer: &Sender<CollageFrame>,
    cancel: &CancellationToken,
    interval: std::time::Duration,
    max_ticks: Option<u64>,
) -> Result<()> {
    if let Some(frame) = controller
        .first_render()
        .context("failed to load first photo")?
        && !publish(to_viewer, frame).await
    {
        return Ok(());
    }

    let mut ticks: u64 = 0;
    while controller.is_armed() {
        if max_ticks.is_some_and(|max| ticks >= max) {
            info!(ticks, "tick limit reached");
            break;
        }
        select! {
            _ = cancel.cancelled() => {
                info!("cancel received; stopping collage");
                break;
            }

            _ = sleep(interval) => {
                ticks += 1;
                match controller.on_tick().context("collage tick failed")? {
                    Some(frame) => {
                        if cancel.is_cancelled() {
                            debug!("cancelled during tick; not re-arming");
                            break;
                        }
                        if !publish(to_viewer, frame).await {
                            break;
                        }
                    }
                    None => debug!("tick skipped; timer not armed"),
                }
            }
        }
    }
    Ok(())
}

async fn publish(to_viewer: &Sender<CollageFrame>, frame: CollageFrame) -> bool {
    if to_viewer.send(frame).await.is_err() {
        // Break rather than spin forever with a dead peer.
        warn!("viewer channel closed");
        return false;
    }
    true
}
