use crate::domain::ports::LeadSink;
use crate::domain::quote::LeadSubmission;
use crate::utils::error::{QuoteError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Posts quote requests as JSON to a lead-collection endpoint.
pub struct HttpLeadSink {
    client: Client,
    endpoint: String,
}

impl HttpLeadSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl LeadSink for HttpLeadSink {
    async fn submit(&self, lead: &LeadSubmission) -> Result<String> {
        tracing::debug!("Posting lead to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(lead).send().await?;

        let status = response.status();
        tracing::debug!("Lead endpoint response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteError::SubmissionError {
                message: format!("endpoint returned {}: {}", status, body.trim()),
            });
        }

        // Prefer an id from the response body, fall back to the status line.
        let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);
        let receipt = match body.get("id") {
            Some(serde_json::Value::String(id)) => id.clone(),
            Some(serde_json::Value::Number(id)) => id.to_string(),
            _ => status.to_string(),
        };
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FormState;
    use httpmock::prelude::*;

    fn lead() -> LeadSubmission {
        LeadSubmission::new(FormState::new(), None, "quote-calculator")
    }

    #[tokio::test]
    async fn test_submit_returns_id_from_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/leads")
                .header("content-type", "application/json");
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "lead-42"}));
        });

        let sink = HttpLeadSink::new(server.url("/leads"));
        let receipt = sink.submit(&lead()).await.unwrap();

        api_mock.assert();
        assert_eq!(receipt, "lead-42");
    }

    #[tokio::test]
    async fn test_submit_failure_status_is_submission_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/leads");
            then.status(503).body("maintenance");
        });

        let sink = HttpLeadSink::new(server.url("/leads"));
        let error = sink.submit(&lead()).await.unwrap_err();

        api_mock.assert();
        match error {
            QuoteError::SubmissionError { message } => assert!(message.contains("maintenance")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
