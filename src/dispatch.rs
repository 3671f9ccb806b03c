use crate::{
    api_client::ApiClient,
    error::{Error, Result},
};
use reqwest::StatusCode;
use serde::Serialize;
use std::borrow::Cow;

const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTarget {
    pub owner: &'static str,
    pub repo: &'static str,
    pub event_type: &'static str,
}

pub const TARGET: DispatchTarget = DispatchTarget {
    owner: "Vasucd",
    repo: "NetflixClone",
    event_type: "claude-bug-analysis",
};

impl DispatchTarget {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn actions_url(&self) -> String {
        format!("https://github.com/{}/{}/actions", self.owner, self.repo)
    }

    pub fn issues_url(&self) -> String {
        format!("https://github.com/{}/{}/issues", self.owner, self.repo)
    }

    fn dispatches_path(&self) -> String {
        format!("repos/{}/{}/dispatches", self.owner, self.repo)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BugReport {
    pub title: String,
    pub description: String,
}

impl BugReport {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Description as echoed to the console: at most 50 characters, then `...`.
    pub fn description_preview(&self) -> Cow<'_, str> {
        match self.description.char_indices().nth(PREVIEW_CHARS) {
            Some((cut, _)) => Cow::Owned(format!("{}...", &self.description[..cut])),
            None => Cow::Borrowed(&self.description),
        }
    }
}

#[derive(Serialize, Debug)]
struct DispatchRequest<'a> {
    event_type: &'a str,
    client_payload: &'a BugReport,
}

/// Fires the repository dispatch event. Anything but 204 is a failure.
pub fn send_dispatch(
    client: &ApiClient,
    target: &DispatchTarget,
    report: &BugReport,
) -> Result<()> {
    let request = DispatchRequest {
        event_type: target.event_type,
        client_payload: report,
    };

    let response = client.post_json(&target.dispatches_path(), &request)?;
    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(());
    }

    let body = response.text().unwrap_or_default();
    log::debug!("dispatch rejected with {}: {}", status, body);

    if status == StatusCode::FORBIDDEN {
        Err(Error::PermissionDenied { body })
    } else {
        Err(Error::UnexpectedStatus { status, body })
    }
}

/// Re-indents a JSON body, keeping its field order; other bodies pass through.
pub fn format_response_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::with_base_url(&server.base_url(), "ghp_test").unwrap()
    }

    fn report() -> BugReport {
        BugReport::new("Login Crash", "App crashes on login screen")
    }

    #[test]
    fn sends_event_type_and_client_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/Vasucd/NetflixClone/dispatches")
                .header("authorization", "token ghp_test")
                .json_body(serde_json::json!({
                    "event_type": "claude-bug-analysis",
                    "client_payload": {
                        "title": "Login Crash",
                        "description": "App crashes on login screen"
                    }
                }));
            then.status(204);
        });

        send_dispatch(&client_for(&server), &TARGET, &report()).unwrap();

        mock.assert();
    }

    #[test]
    fn forbidden_is_permission_denied() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/repos/Vasucd/NetflixClone/dispatches");
            then.status(403)
                .json_body(serde_json::json!({ "message": "Resource not accessible" }));
        });

        let err = send_dispatch(&client_for(&server), &TARGET, &report()).unwrap_err();

        assert!(matches!(err, Error::PermissionDenied { .. }));
        assert!(err.body().unwrap().contains("Resource not accessible"));
    }

    #[test]
    fn ok_is_not_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/repos/Vasucd/NetflixClone/dispatches");
            then.status(200).body("");
        });

        let err = send_dispatch(&client_for(&server), &TARGET, &report()).unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[test]
    fn short_description_is_echoed_unmodified() {
        let exactly_fifty = "x".repeat(50);
        let report = BugReport::new("t", exactly_fifty.clone());

        assert_eq!(report.description_preview(), exactly_fifty);
    }

    #[test]
    fn long_description_is_truncated_on_char_boundary() {
        let report = BugReport::new("t", format!("{}tail", "é".repeat(50)));

        assert_eq!(report.description_preview(), format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn json_body_is_pretty_printed_in_original_order() {
        let body = concat!(
            r#"{"message":"Invalid request","#,
            r#""errors":[{"field":"event_type","code":"missing"}],"#,
            r#""documentation_url":"https://docs.github.com"}"#
        );

        assert_eq!(
            format_response_body(body),
            r#"{
  "message": "Invalid request",
  "errors": [
    {
      "field": "event_type",
      "code": "missing"
    }
  ],
  "documentation_url": "https://docs.github.com"
}"#
        );
    }

    #[test]
    fn json_numbers_keep_their_digits() {
        let body = r#"{"id":123456789012345678901234,"ratio":1.50}"#;

        assert_eq!(
            format_response_body(body),
            "{\n  \"id\": 123456789012345678901234,\n  \"ratio\": 1.50\n}"
        );
    }

    #[test]
    fn connection_failure_is_a_transport_failure() {
        let client = ApiClient::with_base_url("http://127.0.0.1:1", "ghp_test").unwrap();

        let err = send_dispatch(&client, &TARGET, &report()).unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert_eq!(err.body(), None);
    }

    #[test]
    fn non_json_body_is_returned_raw() {
        assert_eq!(format_response_body("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn target_urls() {
        assert_eq!(TARGET.full_name(), "Vasucd/NetflixClone");
        assert_eq!(
            TARGET.actions_url(),
            "https://github.com/Vasucd/NetflixClone/actions"
        );
        assert_eq!(
            TARGET.issues_url(),
            "https://github.com/Vasucd/NetflixClone/issues"
        );
    }
}
