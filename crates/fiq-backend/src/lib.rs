//! # fiq-backend
//!
//! Client for the remote FormularIQ backend and the help assistant built on
//! it.
//!
//! [`BackendClient`] owns the list of candidate base URLs and the cached
//! working one. [`Assistant`] is the seam the HTTP layer talks to for reply
//! text; [`RemoteAssistant`] implements it over the backend's `/chat`, and
//! the [`fallback`] module supplies canned replies when it fails.

mod assistant;
mod client;
mod error;
pub mod fallback;
mod http;

pub use assistant::{Assistant, RemoteAssistant};
pub use client::{BackendClient, CandidateStatus};
pub use error::BackendError;
