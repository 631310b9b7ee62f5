//! Listing every record of a family group
//!
//! Each record is parsed through the group's generic view and dispatched on
//! its implementation tag to the matching typed view. Records whose
//! implementation has no family here are kept, marked unsupported.

use crate::client::{ApiError, ApiRequest, ApiResult, Transport, send_cancellable};
use crate::fields::{GenericView, Group};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

use super::download_clients::DownloadClientKind;
use super::import_lists::ImportListKind;
use super::indexers::IndexerKind;
use super::metadata::MetadataKind;
use super::notifications::NotificationKind;

/// Tagged variant of a group: one case per family
pub trait GroupKind: Sized {
    type Group: Group;

    fn from_generic(generic: &GenericView<Self::Group>) -> Option<Self>;

    fn type_name(&self) -> &'static str;

    fn to_state(&self) -> Result<Value, serde_json::Error>;
}

/// Family groups that can be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupName {
    DownloadClients,
    ImportLists,
    Indexers,
    Notifications,
    Metadata,
}

impl GroupName {
    pub const ALL: &'static [GroupName] = &[
        GroupName::DownloadClients,
        GroupName::ImportLists,
        GroupName::Indexers,
        GroupName::Notifications,
        GroupName::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupName::DownloadClients => "download-clients",
            GroupName::ImportLists => "import-lists",
            GroupName::Indexers => "indexers",
            GroupName::Notifications => "notifications",
            GroupName::Metadata => "metadata",
        }
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupName::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<_> = GroupName::ALL.iter().map(GroupName::as_str).collect();
                format!("unknown group {:?}, expected one of: {}", s, names.join(", "))
            })
    }
}

/// One listed record
#[derive(Debug, Clone, PartialEq)]
pub struct Listed {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub implementation: Option<String>,
    /// Resource type of the matching family, `None` when unsupported
    pub type_name: Option<&'static str>,
    /// Typed state of the matching family
    pub state: Option<Value>,
}

/// Fetch and dispatch every record of a group
pub async fn list_group(
    group: GroupName,
    transport: &dyn Transport,
    cancel: &CancellationToken,
) -> ApiResult<Vec<Listed>> {
    match group {
        GroupName::DownloadClients => list::<DownloadClientKind>(transport, cancel).await,
        GroupName::ImportLists => list::<ImportListKind>(transport, cancel).await,
        GroupName::Indexers => list::<IndexerKind>(transport, cancel).await,
        GroupName::Notifications => list::<NotificationKind>(transport, cancel).await,
        GroupName::Metadata => list::<MetadataKind>(transport, cancel).await,
    }
}

pub async fn list<K: GroupKind>(
    transport: &dyn Transport,
    cancel: &CancellationToken,
) -> ApiResult<Vec<Listed>> {
    let path = <K::Group as Group>::PATH;
    let body = send_cancellable(transport, ApiRequest::get(path), cancel).await?;
    let Value::Array(records) = body else {
        return Err(ApiError::Decode {
            path: path.to_string(),
            message: "expected a JSON array".to_string(),
        });
    };

    let mut listed = Vec::with_capacity(records.len());
    for record in records {
        let generic = match GenericView::<K::Group>::from_response(record) {
            Ok(generic) => generic,
            Err(err) => {
                tracing::warn!("skipping unreadable {} record: {}", <K::Group as Group>::NAME, err);
                continue;
            }
        };
        let kind = K::from_generic(&generic);
        if kind.is_none() {
            tracing::debug!(
                "{} implementation {:?} is not supported",
                <K::Group as Group>::NAME,
                generic.implementation.as_known()
            );
        }
        listed.push(Listed {
            id: generic.id.as_known().copied(),
            name: generic.name.as_known().cloned(),
            implementation: generic.implementation.as_known().cloned(),
            type_name: kind.as_ref().map(GroupKind::type_name),
            state: kind.as_ref().and_then(|k| k.to_state().ok()),
        });
    }
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockTransport;
    use serde_json::json;

    #[test]
    fn test_group_names() {
        assert_eq!("import-lists".parse::<GroupName>(), Ok(GroupName::ImportLists));
        assert!("series".parse::<GroupName>().is_err());
    }

    #[tokio::test]
    async fn test_list_dispatches_on_implementation() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|r| r.path == "/api/v3/metadata")
            .returning(|_| {
                Ok(json!([
                    {"id": 1, "name": "Kodi", "implementation": "XbmcMetadata",
                     "configContract": "XbmcMetadataSettings", "enable": true,
                     "fields": [{"name": "movieMetadata", "value": true}]},
                    {"id": 2, "name": "Plex", "implementation": "PlexMetadata",
                     "configContract": "PlexMetadataSettings", "enable": false, "fields": []},
                ]))
            });

        let listed = list_group(GroupName::Metadata, &transport, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].type_name, Some("metadata_kodi"));
        assert_eq!(listed[0].state.as_ref().unwrap()["movie_metadata"], true);
        assert_eq!(listed[1].type_name, None);
        assert_eq!(listed[1].implementation.as_deref(), Some("PlexMetadata"));
    }

    #[tokio::test]
    async fn test_list_rejects_non_array() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| Ok(json!({"id": 1})));
        let err = list_group(GroupName::Indexers, &transport, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
