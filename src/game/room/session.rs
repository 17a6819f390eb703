use crate::game::input::{parse_pointer, parse_viewport, InputSample};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::sync::MutexGuard;
use tokio::sync::Notify;

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Latest-wins slot for encoded frames; older unsent frames are overwritten.
#[derive(Debug)]
pub struct LatestFrame {
    frame: StdMutex<Option<String>>,
    notify: Notify,
}

impl LatestFrame {
    pub(crate) fn new() -> Self {
        Self {
            frame: StdMutex::new(None),
            notify: Notify::new(),
        }
    }

    pub(crate) fn store(&self, payload: String) {
        *lock(&self.frame) = Some(payload);
        self.notify.notify_one();
    }

    pub(crate) fn take_latest(&self) -> Option<String> {
        lock(&self.frame).take()
    }

    pub(crate) async fn wait_for_update(&self) {
        self.notify.notified().await;
    }
}

#[derive(Debug, Clone, Default)]
struct ViewerInboundState {
    input: InputSample,
    pending_name: Option<String>,
}

/// Input written asynchronously by the socket and polled once per tick by the frame loop.
#[derive(Debug)]
pub struct ViewerInbound {
    inner: StdMutex<ViewerInboundState>,
}

impl ViewerInbound {
    pub(crate) fn new() -> Self {
        Self {
            inner: StdMutex::new(ViewerInboundState::default()),
        }
    }

    pub(crate) fn update_input(&self, x: f64, y: f64, boost: bool) {
        let mut state = lock(&self.inner);
        if let Some(pointer) = parse_pointer(x, y) {
            state.input.pointer = pointer;
        }
        state.input.boosting = boost;
    }

    pub(crate) fn update_viewport(&self, width: f64, height: f64) {
        let mut state = lock(&self.inner);
        if let Some(viewport) = parse_viewport(width, height) {
            state.input.viewport = viewport;
        }
    }

    pub(crate) fn update_name(&self, name: String) {
        lock(&self.inner).pending_name = Some(name);
    }

    /// Drops a held boost so a vanished viewer does not keep the player sprinting.
    pub(crate) fn release(&self) {
        lock(&self.inner).input.boosting = false;
    }

    pub(crate) fn snapshot(&self) -> InputSample {
        lock(&self.inner).input
    }

    pub(crate) fn take_name(&self) -> Option<String> {
        lock(&self.inner).pending_name.take()
    }
}

pub struct ViewerIo {
    pub inbound: Arc<ViewerInbound>,
    pub frames: Arc<LatestFrame>,
}
