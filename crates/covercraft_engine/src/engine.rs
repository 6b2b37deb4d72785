use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use covercraft_core::{GenerationRequest, LetterRecord, RequestId, UploadId};
use covercraft_logging::{craft_debug, craft_info, craft_warn};
use tokio::runtime::Runtime;

use crate::export::{export_letter, ExportOptions};
use crate::generate::{GenerationSettings, LetterGenerator, ReqwestLetterGenerator};
use crate::layout::PageSettings;
use crate::upload::{
    ChannelProgressSink, ProgressSink, SimulatedUploadReporter, UploadHandle, UploadReporter,
    UploadSettings,
};
use crate::EngineEvent;

/// Produces the PDF creation date for each export.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineConfig {
    pub generation: GenerationSettings,
    pub upload: UploadSettings,
    pub output_dir: PathBuf,
    pub page: PageSettings,
    pub clock: Clock,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            generation: GenerationSettings::default(),
            upload: UploadSettings::default(),
            output_dir,
            page: PageSettings::default(),
            clock: Arc::new(String::new),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    StartUpload {
        upload_id: UploadId,
    },
    CancelUpload {
        upload_id: UploadId,
    },
    ScheduleAutoAdvance {
        upload_id: UploadId,
        delay: Duration,
    },
    Generate {
        request_id: RequestId,
        request: GenerationRequest,
    },
    Export { letter: LetterRecord },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let generator = Arc::new(ReqwestLetterGenerator::new(config.generation.clone()));
        Self::with_generator(config, generator)
    }

    pub fn with_generator(
        config: EngineConfig,
        generator: Arc<dyn LetterGenerator>,
    ) -> Result<Self, EngineError> {
        let runtime = Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let reporter = SimulatedUploadReporter::new(config.upload.clone(), runtime.handle().clone());
        let mut worker = Worker {
            runtime,
            reporter: Box::new(reporter),
            generator,
            config,
            event_tx,
            uploads: HashMap::new(),
        };

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(command);
            }
            craft_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_upload(&self, upload_id: UploadId) {
        self.send(EngineCommand::StartUpload { upload_id });
    }

    pub fn cancel_upload(&self, upload_id: UploadId) {
        self.send(EngineCommand::CancelUpload { upload_id });
    }

    pub fn schedule_auto_advance(&self, upload_id: UploadId, delay: Duration) {
        self.send(EngineCommand::ScheduleAutoAdvance { upload_id, delay });
    }

    pub fn generate(&self, request_id: RequestId, request: GenerationRequest) {
        self.send(EngineCommand::Generate {
            request_id,
            request,
        });
    }

    pub fn export(&self, letter: LetterRecord) {
        self.send(EngineCommand::Export { letter });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            craft_warn!("engine thread is gone; command dropped");
        }
    }
}

/// Owned by the engine thread. Spawns work onto the runtime and keeps the
/// cancel handles of running uploads.
struct Worker {
    runtime: Runtime,
    reporter: Box<dyn UploadReporter>,
    generator: Arc<dyn LetterGenerator>,
    config: EngineConfig,
    event_tx: mpsc::Sender<EngineEvent>,
    uploads: HashMap<UploadId, UploadHandle>,
}

impl Worker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::StartUpload { upload_id } => {
                craft_debug!("starting upload {}", upload_id);
                self.uploads.retain(|_, handle| !handle.is_cancelled());
                let sink: Arc<dyn ProgressSink> =
                    Arc::new(ChannelProgressSink::new(self.event_tx.clone()));
                let handle = self.reporter.start(upload_id, sink);
                self.uploads.insert(upload_id, handle);
            }
            EngineCommand::CancelUpload { upload_id } => match self.uploads.remove(&upload_id) {
                Some(handle) => {
                    craft_debug!("cancelling upload {}", upload_id);
                    handle.cancel();
                }
                None => craft_debug!("cancel for unknown upload {}", upload_id),
            },
            EngineCommand::ScheduleAutoAdvance { upload_id, delay } => {
                self.uploads.remove(&upload_id);
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(EngineEvent::AutoAdvanceDue { upload_id });
                });
            }
            EngineCommand::Generate {
                request_id,
                request,
            } => {
                let generator = self.generator.clone();
                let event_tx = self.event_tx.clone();
                self.runtime.spawn(async move {
                    let result = generator.generate(&request).await;
                    match &result {
                        Ok(_) => craft_info!("generation {} succeeded", request_id),
                        Err(err) => craft_warn!("generation {} failed: {}", request_id, err),
                    }
                    let _ = event_tx.send(EngineEvent::GenerationCompleted { request_id, result });
                });
            }
            EngineCommand::Export { letter } => {
                craft_debug!("exporting letter to {}", self.config.output_dir.display());
                let output_dir = self.config.output_dir.clone();
                let options = ExportOptions {
                    page: self.config.page.clone(),
                    creation_date: (self.config.clock)(),
                };
                let event_tx = self.event_tx.clone();
                self.runtime.spawn_blocking(move || {
                    let result = export_letter(&letter, &output_dir, &options).map_err(|err| {
                        craft_warn!("export failed: {}", err);
                        err.to_string()
                    });
                    let _ = event_tx.send(EngineEvent::ExportCompleted { result });
                });
            }
        }
    }
}
