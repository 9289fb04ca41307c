//! [`GitHubClient`] — blocking REST client.
//!
//! Every call issues exactly one logical request (plus follow-up pages for
//! listings). There is no retry and no backoff: a failed request surfaces as
//! a [`HostingError`] immediately.

use std::time::Duration;

use roster_core::{
    AccessLevel, ExplicitCollaborator, HostingApi, HostingError, RepoInfo, RepoName, Username,
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::paging::{drain_pages, PER_PAGE};
use crate::payload::{
    AddCollaboratorRequest, CollaboratorPayload, CreateRepoRequest, PermissionPayload,
};
use crate::status::{decode_error, forbidden_credential, from_ureq};

/// Public GitHub API root.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Point the client at a GitHub Enterprise or test endpoint.
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `base_url` joined with `segments`, each percent-encoded as a single
    /// path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, HostingError> {
        let invalid = |reason: &str| HostingError::Transient {
            message: format!("base url {}: {reason}", self.base_url),
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: &str, segments: &[&str]) -> Result<ureq::Request, HostingError> {
        let url = self.url(segments)?;
        tracing::debug!("{method} {url}");
        Ok(self
            .agent
            .request_url(method, &url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION))
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        page: Option<u32>,
        resource: &str,
    ) -> Result<T, HostingError> {
        let mut req = self.request("GET", segments)?;
        if let Some(page) = page {
            req = req
                .query("per_page", &PER_PAGE.to_string())
                .query("page", &page.to_string());
        }
        req.call()
            .map_err(|e| from_ureq(e, resource))?
            .into_json::<T>()
            .map_err(|e| decode_error(e, resource))
    }

    fn get_all<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        resource: &str,
    ) -> Result<Vec<T>, HostingError> {
        drain_pages(PER_PAGE, |page| {
            self.get_json::<Vec<T>>(segments, Some(page), resource)
        })
    }
}

impl HostingApi for GitHubClient {
    fn validate_credential(&self) -> Result<(), HostingError> {
        match self.request("GET", &["user"])?.call() {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(403, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(forbidden_credential(&body))
            }
            Err(e) => Err(from_ureq(e, "authenticated user")),
        }
    }

    fn create_repository(&self, org: &str, name: &RepoName) -> Result<(), HostingError> {
        let resource = format!("repository {org}/{name}");
        self.request("POST", &["orgs", org, "repos"])?
            .send_json(CreateRepoRequest {
                name: name.as_str(),
                private: true,
            })
            .map_err(|e| from_ureq(e, &resource))?;
        tracing::info!("created repository {org}/{name}");
        Ok(())
    }

    fn get_repository(&self, org: &str, name: &RepoName) -> Result<RepoInfo, HostingError> {
        self.get_json(
            &["repos", org, name.as_str()],
            None,
            &format!("repository {org}/{name}"),
        )
    }

    fn list_repositories(&self, org: &str, prefix: &str) -> Result<Vec<RepoInfo>, HostingError> {
        let repos: Vec<RepoInfo> =
            self.get_all(&["orgs", org, "repos"], &format!("repositories of {org}"))?;
        Ok(repos
            .into_iter()
            .filter(|r| r.name.as_str().starts_with(prefix))
            .collect())
    }

    fn list_collaborators(
        &self,
        org: &str,
        repo: &RepoName,
    ) -> Result<Vec<ExplicitCollaborator>, HostingError> {
        let payload: Vec<CollaboratorPayload> = self.get_all(
            &["repos", org, repo.as_str(), "collaborators"],
            &format!("collaborators of {org}/{repo}"),
        )?;
        Ok(payload.into_iter().map(ExplicitCollaborator::from).collect())
    }

    fn get_permission_level(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
    ) -> Result<Option<AccessLevel>, HostingError> {
        let payload: PermissionPayload = self.get_json(
            &[
                "repos",
                org,
                repo.as_str(),
                "collaborators",
                username.as_str(),
                "permission",
            ],
            None,
            &format!("permission of {username} on {org}/{repo}"),
        )?;
        Ok(payload.level())
    }

    fn add_collaborator(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
        level: AccessLevel,
    ) -> Result<(), HostingError> {
        self.request(
            "PUT",
            &["repos", org, repo.as_str(), "collaborators", username.as_str()],
        )?
        .send_json(AddCollaboratorRequest {
            permission: level.api_permission(),
        })
        .map_err(|e| from_ureq(e, &format!("collaborator {username}")))?;
        tracing::info!("granted {level} on {org}/{repo} to {username}");
        Ok(())
    }

    fn remove_collaborator(
        &self,
        org: &str,
        repo: &RepoName,
        username: &Username,
    ) -> Result<(), HostingError> {
        self.request(
            "DELETE",
            &["repos", org, repo.as_str(), "collaborators", username.as_str()],
        )?
        .call()
        .map_err(|e| from_ureq(e, &format!("collaborator {username}")))?;
        tracing::info!("revoked access on {org}/{repo} from {username}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Accept one connection, answer with `status` and `body`, and hand back
    /// the request line that was received.
    fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).expect("request line");
            let mut content_length = 0usize;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).expect("header");
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().expect("length");
                    }
                }
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).expect("body");
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).expect("respond");
            stream.flush().expect("flush");
            request_line.trim_end().to_string()
        });
        (base, handle)
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GitHubClient::with_base_url("t", "https://ghe.example.com/api/v3/");
        assert_eq!(client.base_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn segments_extend_base_path() {
        let client = GitHubClient::with_base_url("t", "https://ghe.example.com/api/v3/");
        let url = client
            .url(&["repos", "acme", "api", "collaborators", "amy"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/api/collaborators/amy"
        );
    }

    #[test]
    fn segments_are_percent_encoded() {
        let client = GitHubClient::new("t");
        let url = client
            .url(&["repos", "acme", "api", "collaborators", "x/../../orgs?a#b"])
            .expect("url");
        assert_eq!(
            url.path(),
            "/repos/acme/api/collaborators/x%2F..%2F..%2Forgs%3Fa%23b"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn unparsable_base_url_is_reported() {
        let client = GitHubClient::with_base_url("t", "not a url");
        let err = client.validate_credential().unwrap_err();
        assert!(err.to_string().contains("not a url"), "got: {err}");
    }

    #[test]
    fn traversal_username_stays_inside_collaborator_path() {
        let (base, server) = serve_once("204 No Content", "");
        let client = GitHubClient::with_base_url("t", base);
        client
            .add_collaborator(
                "acme",
                &RepoName::from("api"),
                &Username::from("x/../../../../orgs/acme/memberships/mallory"),
                AccessLevel::Write,
            )
            .expect("add");
        let request_line = server.join().expect("server");
        assert!(
            request_line.starts_with("PUT /repos/acme/api/collaborators/x%2F..%2F"),
            "got: {request_line}"
        );
        assert!(!request_line.contains("/orgs/"), "got: {request_line}");
    }

    #[test]
    fn forbidden_credential_carries_github_message() {
        let (base, server) = serve_once(
            "403 Forbidden",
            r#"{"message":"Resource protected by organization SAML enforcement."}"#,
        );
        let client = GitHubClient::with_base_url("t", base);
        let err = client.validate_credential().unwrap_err();
        assert_eq!(server.join().expect("server"), "GET /user HTTP/1.1");
        assert_eq!(
            err,
            HostingError::Auth {
                message: "Resource protected by organization SAML enforcement.".to_string()
            }
        );
    }

    #[test]
    fn unreachable_host_is_transient() {
        let client = GitHubClient::with_base_url("t", "http://127.0.0.1:9");
        let err = client
            .remove_collaborator("acme", &RepoName::from("api"), &Username::from("amy"))
            .unwrap_err();
        assert!(matches!(err, HostingError::Transient { .. }), "got: {err}");
        assert!(err.to_string().contains("collaborator amy"));
    }
}
