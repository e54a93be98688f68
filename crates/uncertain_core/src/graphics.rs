//! Scoped suppression of model-drawn graphics.
//!
//! Models that draw to a shared display resource consult
//! [`graphics_suppressed`] before doing so. The dispatcher acquires one
//! guard for the whole evaluation round rather than per worker, and the
//! guard's `Drop` releases the resource on every exit path, including a
//! failed batch.

use std::sync::atomic::{AtomicUsize, Ordering};

static SUPPRESSION_COUNT: AtomicUsize = AtomicUsize::new(0);

/// True while at least one [`GraphicsSuppression`] guard is alive.
#[must_use]
pub fn graphics_suppressed() -> bool {
    SUPPRESSION_COUNT.load(Ordering::Acquire) > 0
}

/// RAII guard over the process-wide graphics-suppression resource.
///
/// Reference-counted, so nested acquisition (for example two concurrent
/// evaluation rounds) is safe.
#[derive(Debug)]
pub struct GraphicsSuppression {
    _private: (),
}

impl GraphicsSuppression {
    #[must_use]
    pub fn acquire() -> Self {
        SUPPRESSION_COUNT.fetch_add(1, Ordering::AcqRel);
        Self { _private: () }
    }
}

impl Drop for GraphicsSuppression {
    fn drop(&mut self) {
        SUPPRESSION_COUNT.fetch_sub(1, Ordering::AcqRel);
    }
}
