// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Registration payload assembly and delivery to the remote endpoint.
//!
//! Delivery is best effort: a request counts as successful whenever the
//! transport itself does not fail. Status codes and response bodies are not
//! inspected.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::attachment::{FileAttachment, encode_data_url, strip_data_url_prefix};
use crate::models::fields::{FormValues, SCREENSHOT_FIELD, TERMS_FIELD};

/// Failures that abort a submission before or during delivery.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Failed to read screenshot {path:?}: {source}")]
    ReadScreenshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode registration payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Registration request failed: {0}")]
    Transport(String),
}

/// Screenshot object nested under the `screenshot` key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScreenshotPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub mime: String,
    /// Base64 file contents without the `data:` URL prefix.
    pub base64: String,
}

impl ScreenshotPayload {
    /// Build from the attachment, reading the file when the preview read has
    /// not produced a data URL yet.
    pub fn from_attachment(attachment: &FileAttachment) -> Result<Self, SubmitError> {
        let data_url = match &attachment.data_url {
            Some(url) => url.clone(),
            None => {
                let bytes = std::fs::read(&attachment.path).map_err(|source| {
                    SubmitError::ReadScreenshot {
                        path: attachment.path.clone(),
                        source,
                    }
                })?;
                encode_data_url(&attachment.mime, &bytes)
            }
        };
        Ok(Self {
            name: attachment.name.clone(),
            mime: attachment.mime.clone(),
            base64: strip_data_url_prefix(&data_url).to_string(),
        })
    }
}

/// Snapshot of the form handed to the submit command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitRequest {
    pub values: FormValues,
    pub attachment: Option<FileAttachment>,
}

/// Network seam for delivering the JSON body.
pub trait Transport: Send + Sync {
    /// Deliver `body`; only transport-level failures are errors.
    fn post_json(&self, body: &Value) -> Result<(), SubmitError>;
}

/// Posts registrations with a blocking reqwest client.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, body: &Value) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        tracing::debug!(status = %response.status(), "registration endpoint responded");
        Ok(())
    }
}

/// Flatten form values into the JSON object sent to the endpoint.
///
/// Every text field is included (hidden team rows too); the terms checkbox
/// appears as `"on"` only when checked; the screenshot object is added when
/// present.
pub fn build_payload(
    values: &FormValues,
    screenshot: Option<&ScreenshotPayload>,
) -> Result<Value, SubmitError> {
    let mut map = Map::new();
    for (name, value) in values.iter() {
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    if values.terms {
        map.insert(TERMS_FIELD.to_string(), Value::String("on".into()));
    }
    if let Some(screenshot) = screenshot {
        map.insert(
            SCREENSHOT_FIELD.to_string(),
            serde_json::to_value(screenshot)?,
        );
    }
    Ok(Value::Object(map))
}

/// Encode the request and hand it to `transport`.
pub fn submit(request: &SubmitRequest, transport: &dyn Transport) -> Result<(), SubmitError> {
    let screenshot = request
        .attachment
        .as_ref()
        .map(ScreenshotPayload::from_attachment)
        .transpose()?;
    let body = build_payload(&request.values, screenshot.as_ref())?;

    tracing::info!(
        fields = body.as_object().map(Map::len).unwrap_or(0),
        has_screenshot = screenshot.is_some(),
        "submitting registration"
    );
    transport.post_json(&body)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use tempfile::TempDir;

    use super::*;

    /// Transport fake that records bodies and optionally fails.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub bodies: Mutex<Vec<Value>>,
        pub fail: bool,
    }

    impl Transport for RecordingTransport {
        fn post_json(&self, body: &Value) -> Result<(), SubmitError> {
            self.bodies.lock().unwrap().push(body.clone());
            if self.fail {
                Err(SubmitError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn attachment_with_url() -> FileAttachment {
        let mut att = FileAttachment::new(PathBuf::from("pay.png"), "image/png".into(), 2);
        att.data_url = Some(encode_data_url("image/png", b"hi"));
        att
    }

    #[test]
    fn payload_is_flat_with_nested_screenshot() {
        let mut values = FormValues::default();
        values.set("email", "a@b.com".into());
        values.terms = true;
        let shot = ScreenshotPayload::from_attachment(&attachment_with_url()).unwrap();

        let body = build_payload(&values, Some(&shot)).unwrap();

        assert_eq!(body["email"], "a@b.com");
        assert_eq!(body["teammate2UID"], "");
        assert_eq!(body["terms"], "on");
        assert_eq!(body["screenshot"]["name"], "pay.png");
        assert_eq!(body["screenshot"]["type"], "image/png");
        assert_eq!(body["screenshot"]["base64"], "aGk=");
    }

    #[test]
    fn screenshot_object_has_exactly_three_keys() {
        let shot = ScreenshotPayload::from_attachment(&attachment_with_url()).unwrap();
        let body = build_payload(&FormValues::default(), Some(&shot)).unwrap();

        let object = body["screenshot"].as_object().expect("screenshot is an object");
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["base64", "name", "type"]);
    }

    #[test]
    fn unchecked_terms_are_omitted() {
        let body = build_payload(&FormValues::default(), None).unwrap();
        assert!(body.get("terms").is_none());
        assert!(body.get("screenshot").is_none());
    }

    #[test]
    fn screenshot_is_read_when_preview_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("late.gif");
        std::fs::write(&path, b"GIF89a").unwrap();
        let att = FileAttachment::new(path, "image/gif".into(), 6);

        let shot = ScreenshotPayload::from_attachment(&att).unwrap();

        assert_eq!(shot.base64, "R0lGODlh");
        assert_eq!(shot.mime, "image/gif");
    }

    #[test]
    fn unreadable_screenshot_fails_before_network() {
        let tmp = TempDir::new().unwrap();
        let att = FileAttachment::new(tmp.path().join("gone.png"), "image/png".into(), 1);
        let transport = RecordingTransport::default();
        let request = SubmitRequest {
            values: FormValues::default(),
            attachment: Some(att),
        };

        let err = submit(&request, &transport).unwrap_err();

        assert!(matches!(err, SubmitError::ReadScreenshot { .. }));
        assert!(transport.bodies.lock().unwrap().is_empty());
    }

    #[test]
    fn transport_error_is_reported() {
        let transport = RecordingTransport {
            fail: true,
            ..Default::default()
        };
        let request = SubmitRequest {
            values: FormValues::default(),
            attachment: Some(attachment_with_url()),
        };

        let err = submit(&request, &transport).unwrap_err();

        assert!(err.to_string().contains("connection refused"));
        assert_eq!(transport.bodies.lock().unwrap().len(), 1);
    }
}
