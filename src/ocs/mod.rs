//! OCS request/response core
//!
//! Everything needed to talk to an OCS endpoint: the connection and its
//! three request modes, parameter bags, and the XML response envelope.

pub mod connection;
pub mod params;
pub mod response;
pub mod xml;

pub use connection::{Connection, OCS_API_REQUEST_HEADER};
pub use params::{RequestParams, Verb};
pub use response::{OcsResponse, RawResponse};
