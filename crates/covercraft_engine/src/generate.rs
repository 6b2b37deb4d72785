use std::time::Duration;

use covercraft_core::{GenerationRequest, LetterRecord};
use covercraft_logging::{craft_debug, craft_warn};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{FailureKind, GenerationError};

pub const GENERATE_PATH: &str = "/generate-letter";

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// The backend may take a long time to write a letter; unset means no limit.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<LetterRecord, GenerationError>;
}

/// Wire shape of the generation response. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LetterPayload {
    sender_name: Option<String>,
    sender_address: Option<String>,
    sender_contact: Option<String>,
    sender_job_title: Option<String>,
    date: Option<String>,
    recipient_name: Option<String>,
    recipient_title: Option<String>,
    company_name: Option<String>,
    company_address: Option<String>,
    salutation: Option<String>,
    body: Option<String>,
    closing: Option<String>,
    signature: Option<String>,
}

impl LetterPayload {
    fn into_record(self) -> LetterRecord {
        LetterRecord {
            sender_name: self.sender_name,
            sender_address: self.sender_address,
            sender_contact: self.sender_contact,
            sender_job_title: self.sender_job_title,
            date: self.date,
            recipient_name: self.recipient_name,
            recipient_title: self.recipient_title,
            company_name: self.company_name,
            company_address: self.company_address,
            salutation: self.salutation,
            body: self.body,
            closing: self.closing,
            signature: self.signature,
        }
        .normalized()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ReqwestLetterGenerator {
    settings: GenerationSettings,
}

impl ReqwestLetterGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, GenerationError> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.settings.connect_timeout);
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| GenerationError::new(FailureKind::Network, err.to_string()))
    }

    fn endpoint(&self) -> Result<reqwest::Url, GenerationError> {
        let base = self.settings.base_url.trim_end_matches('/');
        reqwest::Url::parse(&format!("{base}{GENERATE_PATH}"))
            .map_err(|err| GenerationError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GenerationError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(GenerationError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(GenerationError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

fn build_form(request: &GenerationRequest) -> Result<Form, GenerationError> {
    let resume = Part::bytes(request.resume.contents.to_vec())
        .file_name(request.resume.name.clone())
        .mime_str(&request.resume.mime_type)
        .map_err(|err| GenerationError::new(FailureKind::InvalidRequest, err.to_string()))?;

    Ok(Form::new()
        .part("resume", resume)
        .text("jobDescription", request.job_description.clone())
        .text("tone", request.tone.as_str())
        .text("userSkills", request.user_skills.clone())
        .text("companyInfo", request.company_info.clone()))
}

#[async_trait::async_trait]
impl LetterGenerator for ReqwestLetterGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<LetterRecord, GenerationError> {
        let url = self.endpoint()?;
        let client = self.build_client()?;
        let form = build_form(request)?;
        craft_debug!(
            "POST {} resume={} bytes={} tone={}",
            url,
            request.resume.name,
            request.resume.size_bytes,
            request.tone
        );

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorPayload>(&body)
                .map(|payload| payload.error)
                .unwrap_or_else(|_| status.to_string());
            craft_warn!("generation rejected with {}: {}", status, detail);
            return Err(GenerationError::new(
                FailureKind::HttpStatus(status.as_u16()),
                detail,
            ));
        }

        let payload: LetterPayload = serde_json::from_slice(&body)
            .map_err(|err| GenerationError::new(FailureKind::InvalidResponse, err.to_string()))?;
        Ok(payload.into_record())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        return GenerationError::new(FailureKind::Timeout, err.to_string());
    }
    GenerationError::new(FailureKind::Network, err.to_string())
}
