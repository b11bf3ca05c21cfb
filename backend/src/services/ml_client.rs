use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared::FaceBox;

// Face operations can take a while on the service side
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum MlServiceError {
    #[error("ML service request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("ML service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the external face recognition service.
#[derive(Debug, Clone)]
pub struct MlClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct RecognizeFacePayload<'a> {
    image_base64: &'a str,
    student_ids: &'a [String],
}

/// One face as reported by the service; `student_id` is empty when no
/// enrolled student matched. The service's own status string is dropped
/// here, the attendance service re-classifies from the raw distance.
#[derive(Debug, Clone, Deserialize)]
pub struct MlFace {
    pub student_id: String,
    pub confidence: f32,
    pub distance: f32,
    #[serde(rename = "box")]
    pub region: FaceBox,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecognizeFaceResponse {
    pub faces: Vec<MlFace>,
}

#[derive(Debug, Serialize)]
struct RegisterFacePayload<'a> {
    student_id: &'a str,
    image_base64: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterFaceResponse {
    pub success: bool,
    pub message: String,
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

impl MlClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build ML service HTTP client");

        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    pub async fn recognize_faces(
        &self,
        image_base64: &str,
        student_ids: &[String],
    ) -> Result<RecognizeFaceResponse, MlServiceError> {
        let url = endpoint(&self.base_url, "/api/face/recognize-face");

        let response = self
            .client
            .post(&url)
            .json(&RecognizeFacePayload {
                image_base64,
                student_ids,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MlServiceError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    pub async fn register_face_base64(
        &self,
        student_id: &Uuid,
        image_base64: &str,
    ) -> Result<RegisterFaceResponse, MlServiceError> {
        let url = endpoint(&self.base_url, "/api/face/register-face-base64");
        let student_id = student_id.to_string();

        let response = self
            .client
            .post(&url)
            .json(&RegisterFacePayload {
                student_id: &student_id,
                image_base64,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MlServiceError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    pub async fn delete_embeddings(&self, student_id: &Uuid) -> Result<(), MlServiceError> {
        let url = endpoint(
            &self.base_url,
            &format!("/api/face/embeddings/{}", student_id),
        );

        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(MlServiceError::Status(response.status()));
        }

        Ok(())
    }

    pub async fn health_check(&self) -> bool {
        let url = endpoint(&self.base_url, "/api/face/health");

        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_paths() {
        assert_eq!(
            endpoint("http://localhost:8001", "/api/face/health"),
            "http://localhost:8001/api/face/health"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(
            endpoint("http://localhost:8001/", "/api/face/health"),
            "http://localhost:8001/api/face/health"
        );
    }
}
