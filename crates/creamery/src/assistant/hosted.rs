//! HTTP client for the hosted reasoning service.
//!
//! This is a thin wrapper over the service's assistants-style REST surface:
//! upload files, open a thread, start a run, poll it, read the reply. The
//! actual reasoning (including code execution over the uploaded CSVs) all
//! happens on the provider's infrastructure.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::time::timeout;

use super::{FileRef, JobHandle, JobRequest, JobStatus, ReasoningService};

/// Default hosted endpoint
const HOSTED_API_URL: &str = "https://api.openai.com/v1";

/// Configuration for the hosted reasoning client
#[derive(Debug, Clone)]
pub struct ServiceConfig {
  pub api_key: String,
  /// Base URL override (e.g. a proxy); `None` uses the default endpoint
  pub base_url: Option<String>,
  /// Model the agent is registered with
  pub model: String,
  /// Per-request timeout in seconds
  pub timeout_secs: u64,
}

impl ServiceConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: None,
      model: "gpt-4o".to_string(),
      timeout_secs: 60,
    }
  }

  pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
    self.base_url = base_url;
    self
  }
}

/// Reqwest-backed implementation of [`ReasoningService`]
pub struct HostedService {
  client: Client,
  config: ServiceConfig,
}

impl HostedService {
  pub fn new(config: ServiceConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()
      .expect("Failed to create HTTP client");

    Self { client, config }
  }

  fn base_url(&self) -> &str {
    self.config.base_url.as_deref().unwrap_or(HOSTED_API_URL)
  }

  fn request_timeout(&self) -> Duration {
    Duration::from_secs(self.config.timeout_secs)
  }

  async fn post<T: DeserializeOwned>(&self, path: &str, body: serde_json::Value) -> Result<T> {
    let url = format!("{}{}", self.base_url(), path);
    let response = timeout(
      self.request_timeout(),
      self
        .client
        .post(&url)
        .bearer_auth(&self.config.api_key)
        .header("OpenAI-Beta", "assistants=v2")
        .json(&body)
        .send(),
    )
    .await??;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(anyhow!("POST {} returned {}: {}", url, status, error_text));
    }

    Ok(response.json().await?)
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let url = format!("{}{}", self.base_url(), path);
    let response = timeout(
      self.request_timeout(),
      self
        .client
        .get(&url)
        .bearer_auth(&self.config.api_key)
        .header("OpenAI-Beta", "assistants=v2")
        .send(),
    )
    .await??;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(anyhow!("GET {} returned {}: {}", url, status, error_text));
    }

    Ok(response.json().await?)
  }
}

// Wire DTOs - only the fields this client reads
#[derive(Deserialize)]
struct ObjectId {
  id: String,
}

#[derive(Deserialize)]
struct RunState {
  id: String,
  status: String,
}

#[derive(Deserialize)]
struct MessageList {
  data: Vec<ThreadMessage>,
}

#[derive(Deserialize)]
struct ThreadMessage {
  role: String,
  content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
  #[serde(rename = "type")]
  kind: String,
  text: Option<TextContent>,
}

#[derive(Deserialize)]
struct TextContent {
  value: String,
}

#[async_trait::async_trait]
impl ReasoningService for HostedService {
  async fn register_agent(&self, name: &str, instructions: &str) -> Result<String> {
    let body = json!({
      "name": name,
      "instructions": instructions,
      "model": self.config.model,
      "tools": [{"type": "code_interpreter"}],
    });
    let agent: ObjectId = self.post("/assistants", body).await?;
    Ok(agent.id)
  }

  async fn upload_dataset(&self, path: &Path) -> Result<FileRef> {
    let name = path
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| anyhow!("dataset has no usable file name: {}", path.display()))?
      .to_string();

    let bytes = tokio::fs::read(path).await?;
    let part = reqwest::multipart::Part::bytes(bytes).file_name(name.clone());
    let form = reqwest::multipart::Form::new().text("purpose", "assistants").part("file", part);

    let url = format!("{}/files", self.base_url());
    let response = timeout(
      self.request_timeout(),
      self.client.post(&url).bearer_auth(&self.config.api_key).multipart(form).send(),
    )
    .await??;

    if !response.status().is_success() {
      let status = response.status();
      let error_text = response.text().await.unwrap_or_default();
      return Err(anyhow!("file upload returned {}: {}", status, error_text));
    }

    let file: ObjectId = response.json().await?;
    Ok(FileRef { id: file.id, name })
  }

  async fn submit(&self, request: &JobRequest) -> Result<JobHandle> {
    let thread: ObjectId = self.post("/threads", json!({})).await?;

    let attachments: Vec<serde_json::Value> = request
      .attachments
      .iter()
      .map(|file| {
        json!({
          "file_id": file.id,
          "tools": [{"type": "code_interpreter"}],
        })
      })
      .collect();

    let _message: ObjectId = self
      .post(
        &format!("/threads/{}/messages", thread.id),
        json!({
          "role": "user",
          "content": request.prompt,
          "attachments": attachments,
        }),
      )
      .await?;

    let run: RunState = self
      .post(&format!("/threads/{}/runs", thread.id), json!({ "assistant_id": request.agent_id }))
      .await?;

    Ok(JobHandle { thread_id: thread.id, run_id: run.id })
  }

  async fn poll(&self, handle: &JobHandle) -> Result<JobStatus> {
    let run: RunState =
      self.get(&format!("/threads/{}/runs/{}", handle.thread_id, handle.run_id)).await?;
    Ok(JobStatus::from_wire(&run.status))
  }

  async fn fetch_output(&self, handle: &JobHandle) -> Result<String> {
    let messages: MessageList = self.get(&format!("/threads/{}/messages", handle.thread_id)).await?;

    // Newest first on the wire; the first assistant text block is the reply
    for message in &messages.data {
      if message.role != "assistant" {
        continue;
      }
      for block in &message.content {
        if block.kind == "text" {
          if let Some(text) = &block.text {
            return Ok(text.value.clone());
          }
        }
      }
    }

    Err(anyhow!("no assistant reply on thread {}", handle.thread_id))
  }
}
