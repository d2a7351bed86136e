//! Mail delivery over an HTTP JSON API.

use std::time::Duration;

use serde::Serialize;

use pulse_config::MailConfig;

use crate::error::NotifyError;

/// Request body posted to the mail API.
#[derive(Debug, Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

/// Sends mail by POSTing JSON to a configured endpoint with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }

    pub(crate) async fn deliver(
        &self,
        to: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), NotifyError> {
        let request = MailRequest {
            from: &self.from,
            to,
            subject,
            text: body,
        };
        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

/// Map a non-success status to [`NotifyError::Api`] carrying the body.
async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, NotifyError> {
    if !resp.status().is_success() {
        return Err(NotifyError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(mock_response(202, "")).await.unwrap();
        assert_eq!(resp.status().as_u16(), 202);
    }

    #[tokio::test]
    async fn failure_carries_status_and_body() {
        let err = check_response(mock_response(401, "bad key"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NotifyError::Api { status: 401, ref message } if message == "bad key"
        ));
    }

    #[test]
    fn request_body_shape() {
        let to = vec!["a@example.com".to_string()];
        let request = MailRequest {
            from: "pulse@localhost",
            to: &to,
            subject: "Hi",
            text: "Body",
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "from": "pulse@localhost",
                "to": ["a@example.com"],
                "subject": "Hi",
                "text": "Body"
            })
        );
    }
}
