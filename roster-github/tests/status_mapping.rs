//! HTTP status → HostingError taxonomy.

use roster_core::HostingError;
use roster_github::status::error_for_status;
use rstest::rstest;

#[rstest]
#[case(401, "auth")]
#[case(404, "not_found")]
#[case(403, "transient")]
#[case(422, "transient")]
#[case(500, "transient")]
#[case(502, "transient")]
fn status_codes_map_to_taxonomy(#[case] code: u16, #[case] kind: &str) {
    let err = error_for_status(code, "repository acme/api", "");
    let actual = match err {
        HostingError::Auth { .. } => "auth",
        HostingError::NotFound { .. } => "not_found",
        HostingError::Transient { .. } => "transient",
        HostingError::Decode { .. } => "decode",
    };
    assert_eq!(actual, kind);
}

#[test]
fn not_found_names_the_resource() {
    let err = error_for_status(404, "repository acme/api", r#"{"message":"Not Found"}"#);
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "not found: repository acme/api");
}

#[test]
fn non_json_body_is_kept_verbatim() {
    let err = error_for_status(503, "collaborators of acme/api", "upstream timeout\n");
    assert_eq!(
        err.to_string(),
        "request failed: collaborators of acme/api: HTTP 503: upstream timeout"
    );
}
