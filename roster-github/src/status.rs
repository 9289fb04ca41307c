//! Mapping of HTTP failures onto [`HostingError`].

use roster_core::HostingError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Map a non-success status and its body for `resource`.
///
/// 401 is an auth failure, 404 a missing resource; anything else is a
/// transient failure of that single request.
pub fn error_for_status(code: u16, resource: &str, body: &str) -> HostingError {
    let detail = api_message(body);
    match code {
        401 => HostingError::Auth {
            message: if detail.is_empty() {
                "bad credentials".to_string()
            } else {
                detail
            },
        },
        404 => HostingError::NotFound {
            resource: resource.to_string(),
        },
        _ if detail.is_empty() => HostingError::Transient {
            message: format!("{resource}: HTTP {code}"),
        },
        _ => HostingError::Transient {
            message: format!("{resource}: HTTP {code}: {detail}"),
        },
    }
}

/// Map a 403 from the credential check.
///
/// GitHub answers 403 for missing scopes, SSO enforcement and secondary rate
/// limits alike; its own `message` is kept. Rate limiting is transient, the
/// rest is an auth failure.
pub fn forbidden_credential(body: &str) -> HostingError {
    let detail = api_message(body);
    if detail.is_empty() {
        HostingError::Auth {
            message: "token lacks the required scopes".to_string(),
        }
    } else if detail.to_lowercase().contains("rate limit") {
        error_for_status(403, "authenticated user", body)
    } else {
        HostingError::Auth { message: detail }
    }
}

/// GitHub's `message` field, or the trimmed body when it is not JSON.
fn api_message(body: &str) -> String {
    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Map any `ureq` failure for `resource`.
pub fn from_ureq(err: ureq::Error, resource: &str) -> HostingError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            error_for_status(code, resource, &body)
        }
        ureq::Error::Transport(transport) => HostingError::Transient {
            message: format!("{resource}: {transport}"),
        },
    }
}

/// Map a body decoding failure for `resource`.
pub fn decode_error(err: std::io::Error, resource: &str) -> HostingError {
    HostingError::Decode {
        message: format!("{resource}: {err}"),
    }
}
