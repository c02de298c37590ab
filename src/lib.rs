// Nextcloud Group Folders client
//
// This crate wraps the group-folder management endpoints of the Nextcloud
// administrative API (the OCS family). Callers authenticate with basic
// credentials, issue requests against documented endpoints, and get parsed
// envelopes back instead of raw XML.
//
// Architecture:
// - ocs: request execution and response normalization (connection, params,
//   envelope, XML tree)
// - groupfolders: thin resource facade building paths + parameter sets
// - error: the single error type surfaced by every operation

pub mod error;
pub mod groupfolders;
pub mod ocs;

// Re-export the public surface for convenience
pub use error::OcsError;
pub use groupfolders::GroupFoldersClient;
pub use groupfolders::types::{ListFoldersQuery, Permissions};
pub use ocs::connection::{Connection, OCS_API_REQUEST_HEADER};
pub use ocs::params::{RequestParams, Verb};
pub use ocs::response::{OcsResponse, RawResponse};
pub use ocs::xml::{Element, XmlValue};
