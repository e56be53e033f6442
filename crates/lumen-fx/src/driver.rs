//! Frame scheduling and the mount/resize/unmount lifecycle.
//!
//! An [`AnimationLoop`] owns one animation and its raster. It behaves like a
//! self-rescheduling display-refresh callback: every delivered frame draws,
//! advances and requests the next frame. Unmounting cancels the pending frame
//! and stops resize observation, after which deliveries are ignored.

use lumen_core::Viewport;
use tracing::{debug, trace, warn};

use crate::animation::{Animation, FRAME_MS};
use crate::raster::Raster;

/// Largest time step, in nominal frames, applied after a stall.
pub const MAX_FRAME_STEP: f32 = 4.0;

/// Opaque id of a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Source of frame callbacks, in the role of `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Ask for one more frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Take the frame that should run at `now_ms`, if any.
    fn due(&mut self, now_ms: f64) -> Option<FrameHandle>;
}

/// Deterministic scheduler: frames are due as soon as they are requested, in
/// request order. Cancelled handles are remembered for inspection.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled.push(handle);
    }

    fn due(&mut self, _now_ms: f64) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

/// Fixed-rate scheduler for hosts without a display-refresh signal.
#[derive(Debug)]
pub struct IntervalScheduler {
    interval_ms: f64,
    last_fired_ms: Option<f64>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl IntervalScheduler {
    /// Schedule frames at `fps` per second (at least one).
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / fps.max(1) as f64,
            last_fired_ms: None,
            next_id: 0,
            pending: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn due(&mut self, now_ms: f64) -> Option<FrameHandle> {
        let ready = match self.last_fired_ms {
            Some(last) => now_ms - last >= self.interval_ms,
            None => true,
        };
        if !ready {
            return None;
        }
        let handle = self.pending.take()?;
        self.last_fired_ms = Some(now_ms);
        Some(handle)
    }
}

/// Resize subscription for one container, in the role of `ResizeObserver`.
#[derive(Debug, Default)]
pub struct ResizeObserver {
    observing: bool,
    last: Option<Viewport>,
}

impl ResizeObserver {
    pub fn observe(&mut self, viewport: Viewport) {
        self.observing = true;
        self.last = Some(viewport);
    }

    pub fn disconnect(&mut self) {
        self.observing = false;
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Record a measurement; returns it when observing and it differs from
    /// the previous one.
    pub fn notify(&mut self, viewport: Viewport) -> Option<Viewport> {
        if !self.observing || self.last == Some(viewport) {
            return None;
        }
        self.last = Some(viewport);
        Some(viewport)
    }
}

/// One mounted animation with its raster and frame loop.
#[derive(Debug)]
pub struct AnimationLoop<A: Animation, S: FrameScheduler> {
    animation: A,
    scheduler: S,
    observer: ResizeObserver,
    surface: Option<Raster>,
    pending: Option<FrameHandle>,
    mounted: bool,
    last_frame_ms: Option<f64>,
    speed: f32,
    frames: u64,
}

impl<A: Animation, S: FrameScheduler> AnimationLoop<A, S> {
    pub fn new(animation: A, scheduler: S) -> Self {
        Self {
            animation,
            scheduler,
            observer: ResizeObserver::default(),
            surface: None,
            pending: None,
            mounted: false,
            last_frame_ms: None,
            speed: 1.0,
            frames: 0,
        }
    }

    /// Scale applied to every time step.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    /// Measure the container, allocate the raster, start observing resizes
    /// and request the first frame.
    pub fn mount(&mut self, viewport: Viewport) {
        if self.mounted {
            return;
        }
        self.surface = allocate(viewport, self.animation.name());
        self.animation.resize(viewport);
        self.observer.observe(viewport);
        self.pending = Some(self.scheduler.request_frame());
        self.mounted = true;
        debug!(animation = self.animation.name(), "mounted");
    }

    /// Cancel the pending frame and stop observing resizes.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.observer.disconnect();
        if self.mounted {
            debug!(animation = self.animation.name(), frames = self.frames, "unmounted");
        }
        self.mounted = false;
    }

    /// Deliver a container measurement. Rebuilds the raster and the
    /// animation state when the size changed and the loop is observing.
    pub fn on_resize(&mut self, viewport: Viewport) -> bool {
        let Some(viewport) = self.observer.notify(viewport) else {
            return false;
        };
        self.surface = match self.surface.take() {
            Some(mut raster) => match raster.resize(viewport) {
                Ok(()) => Some(raster),
                Err(err) => {
                    warn!(animation = self.animation.name(), %err, "raster unavailable");
                    None
                }
            },
            None => allocate(viewport, self.animation.name()),
        };
        self.animation.resize(viewport);
        true
    }

    /// Run the frame for `handle` at `now_ms`. Stale or cancelled handles and
    /// frames after unmount are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> bool {
        if !self.mounted || self.pending != Some(handle) {
            trace!(animation = self.animation.name(), ?handle, "stale frame ignored");
            return false;
        }
        let dt = match self.last_frame_ms {
            Some(last) => (((now_ms - last) / FRAME_MS) as f32).clamp(0.0, MAX_FRAME_STEP),
            None => 1.0,
        } * self.speed;
        self.last_frame_ms = Some(now_ms);

        match self.surface.as_mut() {
            Some(surface) => self.animation.step(surface, now_ms, dt),
            None => self.animation.advance(dt),
        }
        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Run a frame if the scheduler has one due at `now_ms`.
    pub fn pump(&mut self, now_ms: f64) -> bool {
        match self.scheduler.due(now_ms) {
            Some(handle) => self.on_frame(handle, now_ms),
            None => false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn animation(&self) -> &A {
        &self.animation
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn observer(&self) -> &ResizeObserver {
        &self.observer
    }

    /// The raster, `None` when it could not be allocated.
    pub fn surface(&self) -> Option<&Raster> {
        self.surface.as_ref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl<A: Animation, S: FrameScheduler> Drop for AnimationLoop<A, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn allocate(viewport: Viewport, name: &str) -> Option<Raster> {
    Raster::new(viewport)
        .map_err(|err| warn!(animation = name, %err, "raster unavailable"))
        .ok()
}
