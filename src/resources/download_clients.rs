//! Download clients (`/api/v3/downloadclient`)

use super::{DynResource, handlers};
use crate::fields::{FieldRegistry, Group, family, group_kind};

/// Download client group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DownloadClients;

impl Group for DownloadClients {
    const NAME: &'static str = "download client";
    const PATH: &'static str = "/api/v3/downloadclient";
    const ENVELOPE: FieldRegistry = FieldRegistry {
        bools: &["enable", "removeCompletedDownloads", "removeFailedDownloads"],
        ints: &["priority"],
        strings: &["protocol"],
        ..FieldRegistry::EMPTY
    };
    const FIELDS: FieldRegistry = FieldRegistry {
        bools: &[
            "addPaused",
            "useSsl",
            "startOnAdd",
            "sequentialOrder",
            "firstAndLast",
            "addStopped",
        ],
        ints: &[
            "port",
            "recentMoviePriority",
            "olderMoviePriority",
            "initialState",
            "contentLayout",
        ],
        strings: &[
            "host",
            "apiKey",
            "urlBase",
            "rpcPath",
            "secretToken",
            "username",
            "password",
            "movieCategory",
            "movieImportedCategory",
            "movieDirectory",
        ],
        int_sets: &[],
        string_sets: &[],
    };
    const CATEGORY: Option<&'static str> = Some("protocol");
}

family! {
    /// Transmission torrent client
    pub struct Transmission in DownloadClients {
        resource: "download_client_transmission",
        implementation: "Transmission",
        config_contract: "TransmissionSettings",
        category: Some("torrent"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            add_paused: bool = "addPaused" .computed(),
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(0, 1),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(0, 1),
            host: String = "host" .computed(),
            url_base: String = "urlBase" .computed(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
            movie_directory: String = "movieDirectory" .computed(),
        }
    }
}

family! {
    /// Deluge torrent client
    pub struct Deluge in DownloadClients {
        resource: "download_client_deluge",
        implementation: "Deluge",
        config_contract: "DelugeSettings",
        category: Some("torrent"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            add_paused: bool = "addPaused" .computed(),
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(0, 1),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(0, 1),
            host: String = "host" .computed(),
            url_base: String = "urlBase" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
            movie_imported_category: String = "movieImportedCategory" .computed(),
        }
    }
}

family! {
    /// qBittorrent torrent client
    pub struct QBittorrent in DownloadClients {
        resource: "download_client_qbittorrent",
        implementation: "QBittorrent",
        config_contract: "QBittorrentSettings",
        category: Some("torrent"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            use_ssl: bool = "useSsl" .computed(),
            sequential_order: bool = "sequentialOrder" .computed(),
            first_and_last: bool = "firstAndLast" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(0, 1),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(0, 1),
            initial_state: i64 = "initialState" .computed().between(0, 2),
            content_layout: i64 = "contentLayout" .computed().between(0, 2),
            host: String = "host" .computed(),
            url_base: String = "urlBase" .computed(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
            movie_imported_category: String = "movieImportedCategory" .computed(),
        }
    }
}

family! {
    /// SABnzbd usenet client
    pub struct Sabnzbd in DownloadClients {
        resource: "download_client_sabnzbd",
        implementation: "Sabnzbd",
        config_contract: "SabnzbdSettings",
        category: Some("usenet"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(-100, 2),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(-100, 2),
            host: String = "host" .computed(),
            api_key: String = "apiKey" .computed().sensitive(),
            url_base: String = "urlBase" .computed(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
        }
    }
}

family! {
    /// NZBGet usenet client
    pub struct Nzbget in DownloadClients {
        resource: "download_client_nzbget",
        implementation: "Nzbget",
        config_contract: "NzbgetSettings",
        category: Some("usenet"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            add_paused: bool = "addPaused" .computed(),
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(-100, 900),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(-100, 900),
            host: String = "host" .computed(),
            url_base: String = "urlBase" .computed(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
        }
    }
}

family! {
    /// Aria2 torrent client
    pub struct Aria2 in DownloadClients {
        resource: "download_client_aria2",
        implementation: "Aria2",
        config_contract: "Aria2Settings",
        category: Some("torrent"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            host: String = "host" .computed(),
            rpc_path: String = "rpcPath" .computed(),
            secret_token: String = "secretToken" .computed().sensitive(),
        }
    }
}

family! {
    /// rTorrent torrent client
    pub struct RTorrent in DownloadClients {
        resource: "download_client_rtorrent",
        implementation: "RTorrent",
        config_contract: "RTorrentSettings",
        category: Some("torrent"),
        envelope {
            enable: bool = "enable" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            remove_completed_downloads: bool = "removeCompletedDownloads" .computed(),
            remove_failed_downloads: bool = "removeFailedDownloads" .computed(),
        }
        fields {
            add_stopped: bool = "addStopped" .computed(),
            use_ssl: bool = "useSsl" .computed(),
            port: i64 = "port" .computed().between(1, 65535),
            recent_movie_priority: i64 = "recentMoviePriority" .computed().between(0, 3),
            older_movie_priority: i64 = "olderMoviePriority" .computed().between(0, 3),
            host: String = "host" .computed(),
            url_base: String = "urlBase" .computed(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            movie_category: String = "movieCategory" .computed(),
            movie_imported_category: String = "movieImportedCategory" .computed(),
            movie_directory: String = "movieDirectory" .computed(),
        }
    }
}

group_kind! {
    /// Any download client
    pub enum DownloadClientKind in DownloadClients {
        Transmission,
        Deluge,
        QBittorrent,
        Sabnzbd,
        Nzbget,
        Aria2,
        RTorrent,
    }
}

pub fn resources() -> Vec<Box<dyn DynResource>> {
    handlers![Transmission, Deluge, QBittorrent, Sabnzbd, Nzbget, Aria2, RTorrent]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Family, GenericView};
    use crate::host::Attr;
    use crate::resources::Resource;
    use serde_json::json;

    #[test]
    fn test_transmission_request() {
        let transmission = Transmission {
            name: Attr::known("resourceTest"),
            enable: Attr::Known(false),
            host: Attr::known("transmission"),
            url_base: Attr::known("/transmission/"),
            port: Attr::Known(9091),
            ..Default::default()
        };

        let body = transmission.to_request().unwrap();
        assert_eq!(body["implementation"], "Transmission");
        assert_eq!(body["configContract"], "TransmissionSettings");
        assert_eq!(body["protocol"], "torrent");
        assert_eq!(body["enable"], false);
        assert!(body.get("id").is_none());
        assert_eq!(
            body["fields"],
            json!([
                {"name": "port", "value": 9091},
                {"name": "host", "value": "transmission"},
                {"name": "urlBase", "value": "/transmission/"},
            ])
        );
    }

    #[test]
    fn test_kind_dispatch() {
        let generic = Sabnzbd {
            name: Attr::known("sab"),
            api_key: Attr::known("key"),
            ..Default::default()
        }
        .to_generic();

        let kind = DownloadClientKind::from_generic(&generic).unwrap();
        assert_eq!(kind.type_name(), "download_client_sabnzbd");
        assert_eq!(generic.category(), Attr::known("usenet"));

        let mut other = GenericView::<DownloadClients>::new();
        other.implementation = Attr::known("Flood");
        assert!(DownloadClientKind::from_generic(&other).is_none());
    }

    #[test]
    fn test_schema_marks_secrets() {
        let schema = QBittorrent::schema();
        assert_eq!(schema.sensitive_attributes(), vec!["password"]);
        assert!(schema.attribute("name").unwrap().required);
        assert!(schema.attribute("tags").unwrap().computed);
    }
}
