use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use covercraft_core::{Effect, LetterField, Msg, Notification};
use covercraft_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle};
use covercraft_logging::{craft_debug, craft_info, craft_warn};

use super::settings::AppSettings;

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: &AppSettings) -> Result<Self, EngineError> {
        let mut config = EngineConfig::default_with_output(settings.output_dir.clone());
        config.generation = settings.generation();
        config.upload = settings.upload();
        config.clock = Arc::new(|| Utc::now().format("D:%Y%m%d%H%M%SZ").to_string());

        let engine = EngineHandle::new(config)?;
        Ok(Self { engine })
    }

    /// Runs `effects` in order. Notifications are handed back for the caller to show.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Notification> {
        let mut notifications = Vec::new();
        for effect in effects {
            match effect {
                Effect::StartUpload {
                    upload_id,
                    size_bytes,
                } => {
                    craft_info!("StartUpload upload_id={} bytes={}", upload_id, size_bytes);
                    self.engine.start_upload(upload_id);
                }
                Effect::CancelUpload { upload_id } => {
                    craft_info!("CancelUpload upload_id={}", upload_id);
                    self.engine.cancel_upload(upload_id);
                }
                Effect::ScheduleAutoAdvance { upload_id, delay } => {
                    craft_debug!("ScheduleAutoAdvance upload_id={} delay={:?}", upload_id, delay);
                    self.engine.schedule_auto_advance(upload_id, delay);
                }
                Effect::RequestGeneration {
                    request_id,
                    request,
                } => {
                    craft_info!(
                        "RequestGeneration request_id={} tone={} job_description_len={}",
                        request_id,
                        request.tone,
                        request.job_description.len()
                    );
                    self.engine.generate(request_id, request);
                }
                Effect::ExportLetter { letter } => {
                    craft_info!("ExportLetter sender={:?}", letter.text(LetterField::SenderName));
                    self.engine.export(letter);
                }
                Effect::Notify(notification) => notifications.push(notification),
            }
        }
        notifications
    }

    /// Waits up to `timeout` for the next engine event.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadProgress { upload_id, percent } => {
            Msg::UploadProgressed { upload_id, percent }
        }
        EngineEvent::UploadCompleted { upload_id } => Msg::UploadCompleted { upload_id },
        EngineEvent::AutoAdvanceDue { upload_id } => Msg::AutoAdvanceDue { upload_id },
        EngineEvent::GenerationCompleted { request_id, result } => match result {
            Ok(letter) => Msg::GenerationSucceeded { request_id, letter },
            Err(err) => {
                craft_warn!("Generation {} failed: {}", request_id, err);
                Msg::GenerationFailed {
                    request_id,
                    reason: err.to_string(),
                }
            }
        },
        EngineEvent::ExportCompleted { result } => Msg::ExportFinished {
            result: result.map(|summary| summary.output_path.display().to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::map_event;
    use covercraft_core::{LetterRecord, Msg};
    use covercraft_engine::{EngineEvent, ExportSummary};
    use std::path::PathBuf;

    #[test]
    fn upload_events_keep_their_id() {
        assert_eq!(
            map_event(EngineEvent::UploadProgress {
                upload_id: 3,
                percent: 40
            }),
            Msg::UploadProgressed {
                upload_id: 3,
                percent: 40
            }
        );
        assert_eq!(
            map_event(EngineEvent::AutoAdvanceDue { upload_id: 3 }),
            Msg::AutoAdvanceDue { upload_id: 3 }
        );
    }

    #[test]
    fn generation_result_selects_message() {
        let ok = map_event(EngineEvent::GenerationCompleted {
            request_id: 1,
            result: Ok(LetterRecord::default()),
        });
        assert!(matches!(ok, Msg::GenerationSucceeded { request_id: 1, .. }));
    }

    #[test]
    fn export_reports_the_written_path() {
        let msg = map_event(EngineEvent::ExportCompleted {
            result: Ok(ExportSummary {
                filename: "Ada_Cover_Letter.pdf".to_string(),
                output_path: PathBuf::from("out").join("Ada_Cover_Letter.pdf"),
                page_count: 1,
                byte_len: 900,
            }),
        });
        let expected = PathBuf::from("out").join("Ada_Cover_Letter.pdf");
        assert_eq!(
            msg,
            Msg::ExportFinished {
                result: Ok(expected.display().to_string())
            }
        );
    }
}
