//! reqwest による分類サービスとの通信

use crate::error::{EcoScanError, Result};
use ecoscan_common::{HttpReply, SelectedFile, Transport, TransportFailure, UPLOAD_FIELD};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("ecoscan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EcoScanError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    async fn read_reply(response: reqwest::Response) -> std::result::Result<HttpReply, TransportFailure> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(to_failure)?;
        Ok(HttpReply::new(status, body))
    }
}

impl Transport for ReqwestTransport {
    async fn post_file(
        &self,
        url: &str,
        file: &SelectedFile,
    ) -> std::result::Result<HttpReply, TransportFailure> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(to_failure)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(to_failure)?;
        Self::read_reply(response).await
    }

    async fn get(&self, url: &str) -> std::result::Result<HttpReply, TransportFailure> {
        let response = self.client.get(url).send().await.map_err(to_failure)?;
        Self::read_reply(response).await
    }
}

fn to_failure(error: reqwest::Error) -> TransportFailure {
    if error.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::Network(error.to_string())
    }
}
