use std::fmt::Display;
use std::future::Future;

use tracing::{info, warn};

use crate::playback::engine::PlaybackEngine;
use crate::playback::TickOutcome;
use crate::render::canvas::Canvas;

/// Result of driving a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveSummary {
    pub frames_drawn: usize,
    pub cancelled: bool,
}

/// Host tick loop: tick, sleep the reported delay, repeat
///
/// Runs until the engine finishes or `cancel` resolves. Cancelling leaves
/// the engine wherever it stopped; nothing needs tearing down.
pub async fn drive<C, F>(engine: &mut PlaybackEngine, canvas: &mut C, cancel: F) -> DriveSummary
where
    C: Canvas + ?Sized,
    F: Future<Output = ()>,
{
    tokio::pin!(cancel);
    let start = engine.position();

    loop {
        match engine.tick(canvas) {
            TickOutcome::Finished => {
                return DriveSummary {
                    frames_drawn: engine.position() - start,
                    cancelled: false,
                };
            }
            TickOutcome::Wait(delay) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = &mut cancel => {
                        info!("Playback cancelled at frame {}", engine.position());
                        return DriveSummary {
                            frames_drawn: engine.position() - start,
                            cancelled: true,
                        };
                    }
                }
            }
        }
    }
}

/// Resolve when `signal` fires; never resolve if it could not be set up
///
/// A failed signal registration must not look like a cancellation, so the
/// error is logged and playback runs to completion instead.
pub async fn cancel_on<F, E>(signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    if let Err(e) = signal.await {
        warn!("Cancellation signal unavailable, playing to the end: {}", e);
        std::future::pending::<()>().await;
    }
}
