use std::sync::Arc;
use std::time::Duration;

use covercraft_core::UploadId;
use covercraft_logging::craft_debug;
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::EngineEvent;

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub step_percent: u8,
    pub interval: Duration,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            step_percent: 10,
            interval: Duration::from_millis(50),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Completed,
    Cancelled,
}

/// Running upload. Dropping the handle does not stop the upload; call [`UploadHandle::cancel`].
#[derive(Debug, Clone)]
pub struct UploadHandle {
    upload_id: UploadId,
    token: CancellationToken,
}

impl UploadHandle {
    pub fn upload_id(&self) -> UploadId {
        self.upload_id
    }

    /// Stops further progress reports. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Reports upload progress through a sink: zero or more `UploadProgress` events,
/// then exactly one `UploadCompleted`, unless cancelled first.
pub trait UploadReporter: Send + Sync {
    fn start(&self, upload_id: UploadId, sink: Arc<dyn ProgressSink>) -> UploadHandle;
}

/// Decorative progress that advances on a fixed timer. It does not track any transfer.
pub struct SimulatedUploadReporter {
    settings: UploadSettings,
    runtime: Handle,
}

impl SimulatedUploadReporter {
    pub fn new(settings: UploadSettings, runtime: Handle) -> Self {
        Self { settings, runtime }
    }
}

impl UploadReporter for SimulatedUploadReporter {
    fn start(&self, upload_id: UploadId, sink: Arc<dyn ProgressSink>) -> UploadHandle {
        let token = CancellationToken::new();
        let settings = self.settings.clone();
        let task_token = token.clone();
        self.runtime.spawn(async move {
            let outcome =
                run_simulated_upload(&settings, upload_id, sink.as_ref(), task_token).await;
            craft_debug!("upload {} finished: {:?}", upload_id, outcome);
        });
        UploadHandle { upload_id, token }
    }
}

pub async fn run_simulated_upload(
    settings: &UploadSettings,
    upload_id: UploadId,
    sink: &dyn ProgressSink,
    cancel: CancellationToken,
) -> UploadOutcome {
    let step = settings.step_percent.clamp(1, 100);
    let mut percent: u8 = 0;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return UploadOutcome::Cancelled,
            _ = tokio::time::sleep(settings.interval) => {}
        }
        // A cancel that raced the timer still wins.
        if cancel.is_cancelled() {
            return UploadOutcome::Cancelled;
        }
        percent = percent.saturating_add(step).min(100);
        sink.emit(EngineEvent::UploadProgress { upload_id, percent });
        if percent == 100 {
            sink.emit(EngineEvent::UploadCompleted { upload_id });
            return UploadOutcome::Completed;
        }
    }
}
