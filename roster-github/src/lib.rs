//! # roster-github
//!
//! Blocking GitHub REST implementation of [`roster_core::HostingApi`].
//!
//! Construct a [`GitHubClient`] with a token; listing endpoints are drained
//! page by page before anything is returned.

pub mod client;
pub mod paging;
pub mod payload;
pub mod status;

pub use client::{GitHubClient, DEFAULT_BASE_URL};
pub use paging::{drain_pages, PER_PAGE};
