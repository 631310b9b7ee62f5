//! Metadata consumers (`/api/v3/metadata`)

use super::{DynResource, handlers};
use crate::fields::{FieldRegistry, Group, family, group_kind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metadata;

impl Group for Metadata {
    const NAME: &'static str = "metadata";
    const PATH: &'static str = "/api/v3/metadata";
    const ENVELOPE: FieldRegistry = FieldRegistry {
        bools: &["enable"],
        ..FieldRegistry::EMPTY
    };
    const FIELDS: FieldRegistry = FieldRegistry {
        bools: &[
            "movieMetadata",
            "movieMetadataURL",
            "movieImages",
            "useMovieNfo",
            "addCollectionName",
        ],
        ints: &["movieMetadataLanguage"],
        ..FieldRegistry::EMPTY
    };
    const CATEGORY: Option<&'static str> = None;
}

family! {
    /// Kodi (XBMC) / Emby legacy metadata
    pub struct Kodi in Metadata {
        resource: "metadata_kodi",
        implementation: "XbmcMetadata",
        config_contract: "XbmcMetadataSettings",
        category: None,
        envelope {
            enable: bool = "enable" .computed(),
        }
        fields {
            movie_metadata: bool = "movieMetadata" .computed(),
            movie_metadata_url: bool = "movieMetadataURL" .computed(),
            movie_images: bool = "movieImages" .computed(),
            use_movie_nfo: bool = "useMovieNfo" .computed(),
            add_collection_name: bool = "addCollectionName" .computed(),
            movie_metadata_language: i64 = "movieMetadataLanguage" .computed(),
        }
    }
}

family! {
    /// Emby
    pub struct Emby in Metadata {
        resource: "metadata_emby",
        implementation: "MediaBrowserMetadata",
        config_contract: "MediaBrowserMetadataSettings",
        category: None,
        envelope {
            enable: bool = "enable" .computed(),
        }
        fields {
            movie_metadata: bool = "movieMetadata" .computed(),
        }
    }
}

family! {
    /// Roksbox
    pub struct Roksbox in Metadata {
        resource: "metadata_roksbox",
        implementation: "RoksboxMetadata",
        config_contract: "RoksboxMetadataSettings",
        category: None,
        envelope {
            enable: bool = "enable" .computed(),
        }
        fields {
            movie_metadata: bool = "movieMetadata" .computed(),
            movie_images: bool = "movieImages" .computed(),
        }
    }
}

family! {
    /// WDTV
    pub struct Wdtv in Metadata {
        resource: "metadata_wdtv",
        implementation: "WdtvMetadata",
        config_contract: "WdtvMetadataSettings",
        category: None,
        envelope {
            enable: bool = "enable" .computed(),
        }
        fields {
            movie_metadata: bool = "movieMetadata" .computed(),
            movie_images: bool = "movieImages" .computed(),
        }
    }
}

group_kind! {
    /// Any metadata consumer
    pub enum MetadataKind in Metadata {
        Kodi,
        Emby,
        Roksbox,
        Wdtv,
    }
}

pub fn resources() -> Vec<Box<dyn DynResource>> {
    handlers![Kodi, Emby, Roksbox, Wdtv]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Resource;
    use crate::host::Attr;

    #[test]
    fn test_false_flags_are_written() {
        let kodi = Kodi {
            name: Attr::known("Kodi"),
            enable: Attr::Known(true),
            movie_images: Attr::Known(false),
            movie_metadata_language: Attr::Known(1),
            ..Default::default()
        };
        let body = kodi.to_request().unwrap();
        assert_eq!(body["enable"], true);
        let fields = body["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], "movieImages");
        assert_eq!(fields[0]["value"], false);
    }
}
