//! Group folder administration client
//!
//! Thin facade over [`Connection`]: each call builds the endpoint path and
//! parameter set and hands them off. Business-level status codes in the
//! returned envelope are the caller's to interpret.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::OcsError;
use crate::ocs::connection::Connection;
use crate::ocs::params::Verb;
use crate::ocs::response::OcsResponse;

use super::types::{ListFoldersQuery, Permissions};

const FOLDER_PART: &str = "v2.php/apps/groupfolders/folders";

/// Characters escaped when an identifier lands in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Client for the group-folders resource family.
#[derive(Clone)]
pub struct GroupFoldersClient {
    connection: Connection,
}

impl GroupFoldersClient {
    #[must_use]
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Create a group folder with the given mount point.
    pub async fn add_folder(&self, mountpoint: &str) -> Result<OcsResponse, OcsError> {
        self.connection
            .submit_request(Verb::Post, FOLDER_PART, &[("mountpoint", mountpoint)])
            .await
    }

    /// List group folders, optionally filtered by search/limit/offset.
    pub async fn list_folders(&self, query: &ListFoldersQuery) -> Result<OcsResponse, OcsError> {
        let path = format!("{FOLDER_PART}{}", query.to_query_suffix());
        self.connection.request(Verb::Get, &path, None).await
    }

    /// Fetch a single folder.
    pub async fn get_folder(&self, folder_id: u64) -> Result<OcsResponse, OcsError> {
        self.connection
            .request(Verb::Get, &format!("{FOLDER_PART}/{folder_id}"), None)
            .await
    }

    /// Move a folder to a new mount point.
    pub async fn edit_mountpoint(
        &self,
        folder_id: u64,
        mountpoint: &str,
    ) -> Result<OcsResponse, OcsError> {
        self.connection
            .submit_request(
                Verb::Put,
                &format!("{FOLDER_PART}/{folder_id}/mountpoint"),
                &[("mountpoint", mountpoint)],
            )
            .await
    }

    /// Delete a folder.
    pub async fn delete_folder(&self, folder_id: u64) -> Result<OcsResponse, OcsError> {
        self.connection
            .request(Verb::Delete, &format!("{FOLDER_PART}/{folder_id}"), None)
            .await
    }

    /// Grant a group access to a folder.
    pub async fn add_group_to_folder(
        &self,
        folder_id: u64,
        group_id: &str,
    ) -> Result<OcsResponse, OcsError> {
        self.connection
            .submit_request(
                Verb::Post,
                &format!("{FOLDER_PART}/{folder_id}/groups"),
                &[("group", group_id)],
            )
            .await
    }

    /// Revoke a group's access to a folder.
    pub async fn remove_group_from_folder(
        &self,
        folder_id: u64,
        group_id: &str,
    ) -> Result<OcsResponse, OcsError> {
        let path = format!(
            "{FOLDER_PART}/{folder_id}/groups/{}",
            encode_segment(group_id)
        );
        self.connection.submit_request(Verb::Delete, &path, &[]).await
    }

    /// Set the permissions a group holds on a folder.
    pub async fn set_folder_group_permissions(
        &self,
        folder_id: u64,
        group_id: &str,
        permissions: Permissions,
    ) -> Result<OcsResponse, OcsError> {
        let path = format!(
            "{FOLDER_PART}/{folder_id}/groups/{}",
            encode_segment(group_id)
        );
        let permissions = permissions.bits().to_string();
        self.connection
            .submit_request(Verb::Post, &path, &[("permissions", permissions.as_str())])
            .await
    }

    /// Set the storage quota of a folder, in bytes. The platform uses
    /// negative sentinels for unlimited quotas.
    pub async fn set_folder_quota(
        &self,
        folder_id: u64,
        quota: i64,
    ) -> Result<OcsResponse, OcsError> {
        let quota = quota.to_string();
        self.connection
            .submit_request(
                Verb::Post,
                &format!("{FOLDER_PART}/{folder_id}/quota"),
                &[("quota", quota.as_str())],
            )
            .await
    }
}
