//! CoverCraft engine: IO side of the wizard and effect execution.
mod engine;
mod export;
mod filename;
mod font_metrics;
mod generate;
mod layout;
mod pdf;
mod persist;
mod types;
mod upload;

pub use engine::{Clock, EngineConfig, EngineError, EngineHandle};
pub use export::{export_letter, render_letter, ExportError, ExportOptions, RenderedLetter};
pub use filename::{export_filename, DEFAULT_STEM, FILENAME_SUFFIX};
pub use font_metrics::{FontFace, MM_PER_PT};
pub use generate::{GenerationSettings, LetterGenerator, ReqwestLetterGenerator, GENERATE_PATH};
pub use layout::{layout_letter, wrap_text, Align, LaidOutLetter, Page, PageSettings, TextLine};
pub use pdf::{read_text_lines, write_pdf, PdfMetadata};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{EngineEvent, ExportSummary, FailureKind, GenerationError};
pub use upload::{
    run_simulated_upload, ChannelProgressSink, ProgressSink, SimulatedUploadReporter,
    UploadHandle, UploadOutcome, UploadReporter, UploadSettings,
};
