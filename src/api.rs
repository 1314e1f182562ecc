// API client module: contains a small blocking HTTP client that talks to
// a local object-detection server. It is intentionally small and
// synchronous to keep the learning curve low for beginners.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Simple API client that holds a reqwest blocking client and the base
/// URL of the detection server.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// One detected object instance: a label, a confidence score and the
/// bounding box corners in pixel coordinates, (x_min, y_min) top-left
/// and (x_max, y_max) bottom-right.
#[derive(Deserialize, Debug, Clone)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
}

/// Expected response from the detection endpoint. The server wraps the
/// predictions in a success envelope and may report the predictions
/// array as `null` when nothing was found, so we default it to empty.
#[derive(Deserialize, Debug)]
pub struct DetectionResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub error: Option<String>,
    /// Model inference time reported by the server, in milliseconds.
    #[serde(rename = "inferenceMs", default)]
    pub inference_ms: Option<u64>,
}

fn default_success() -> bool {
    true
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Prediction>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<Vec<Prediction>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl ApiClient {
    /// Create an ApiClient configured from the environment variable
    /// `VISION_SERVER_URL` or fallback to `http://localhost:32168`.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("VISION_SERVER_URL").unwrap_or_else(|_| "http://localhost:32168".into());
        Self::new(base_url)
    }

    /// Create an ApiClient pointing at an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// Detect objects in the image at `path` by POSTing it to
    /// `/v1/vision/detection` as multipart/form-data. The file bytes are
    /// streamed into a part named "image"; when `min_confidence` is set
    /// it is sent alongside as a plain form field and the server drops
    /// predictions scoring below it.
    pub fn detect_objects(
        &self,
        path: &Path,
        min_confidence: Option<f64>,
    ) -> Result<DetectionResponse> {
        let url = format!("{}/v1/vision/detection", &self.base_url);

        let file = File::open(path)
            .with_context(|| format!("Failed to open image file {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("image.jpg");

        let part = multipart::Part::reader(file)
            .file_name(file_name.to_string())
            .mime_str(mime_for(path))
            .context("Failed to build multipart image part")?;
        let mut form = multipart::Form::new().part("image", part);
        if let Some(threshold) = min_confidence {
            form = form.text("min_confidence", threshold.to_string());
        }

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .context("Failed to send detection request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Detection failed: {} - {}", status, txt);
        }

        let resp: DetectionResponse = res.json().context("Parsing detection response json")?;
        if !resp.success {
            let msg = resp.error.unwrap_or_else(|| "unknown server error".into());
            anyhow::bail!("Server reported failure: {}", msg);
        }
        Ok(resp)
    }
}

/// Guess a mime type from the file extension, defaulting to JPEG since
/// that is what the bundled test images use.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_response() {
        let body = r#"{
            "success": true,
            "predictions": [
                {"label": "person", "confidence": 0.86421,
                 "x_min": 10, "y_min": 20, "x_max": 110, "y_max": 220},
                {"label": "dog", "confidence": 0.5,
                 "x_min": 0, "y_min": 0, "x_max": 50, "y_max": 40}
            ],
            "inferenceMs": 42
        }"#;
        let resp: DetectionResponse = serde_json::from_str(body).unwrap();
        assert!(resp.success);
        assert_eq!(resp.predictions.len(), 2);
        assert_eq!(resp.predictions[0].label, "person");
        assert_eq!(resp.predictions[1].x_max, 50);
        assert_eq!(resp.inference_ms, Some(42));
    }

    #[test]
    fn null_predictions_read_as_empty() {
        let resp: DetectionResponse =
            serde_json::from_str(r#"{"success": true, "predictions": null}"#).unwrap();
        assert!(resp.predictions.is_empty());
    }

    #[test]
    fn missing_envelope_fields_get_defaults() {
        let resp: DetectionResponse = serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        assert!(resp.success);
        assert!(resp.predictions.is_empty());
        assert!(resp.error.is_none());
        assert!(resp.inference_ms.is_none());
    }

    #[test]
    fn missing_file_fails_before_any_request() {
        let api = ApiClient::new("http://localhost:1").unwrap();
        let err = api
            .detect_objects(Path::new("no-such-image.jpg"), None)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open image file"));
    }

    #[test]
    fn mime_guess_follows_extension() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("a")), "image/jpeg");
    }
}
