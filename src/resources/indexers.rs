//! Indexers (`/api/v3/indexer`)

use super::{DynResource, handlers};
use crate::fields::{FieldRegistry, Group, IntSet, family, group_kind};

/// Indexer group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Indexers;

impl Group for Indexers {
    const NAME: &'static str = "indexer";
    const PATH: &'static str = "/api/v3/indexer";
    const ENVELOPE: FieldRegistry = FieldRegistry {
        bools: &["enableAutomaticSearch", "enableInteractiveSearch", "enableRss"],
        ints: &["priority", "downloadClientId"],
        strings: &["protocol"],
        ..FieldRegistry::EMPTY
    };
    const FIELDS: FieldRegistry = FieldRegistry {
        bools: &["removeYear"],
        ints: &["minimumSeeders", "seedCriteria.seedTime", "seedCriteria.discographySeedTime"],
        strings: &[
            "baseUrl",
            "apiPath",
            "apiKey",
            "additionalParameters",
            "seedCriteria.seedRatio",
        ],
        int_sets: &["categories", "multiLanguages", "requiredFlags"],
        string_sets: &[],
    };
    const CATEGORY: Option<&'static str> = Some("protocol");
}

family! {
    /// Newznab usenet indexer
    pub struct Newznab in Indexers {
        resource: "indexer_newznab",
        implementation: "Newznab",
        config_contract: "NewznabSettings",
        category: Some("usenet"),
        envelope {
            enable_automatic_search: bool = "enableAutomaticSearch" .computed(),
            enable_interactive_search: bool = "enableInteractiveSearch" .computed(),
            enable_rss: bool = "enableRss" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            download_client_id: i64 = "downloadClientId" .computed(),
        }
        fields {
            remove_year: bool = "removeYear" .computed(),
            base_url: String = "baseUrl" .required(),
            api_path: String = "apiPath" .computed(),
            api_key: String = "apiKey" .computed().sensitive(),
            additional_parameters: String = "additionalParameters" .computed(),
            categories: IntSet = "categories" .computed(),
            multi_languages: IntSet = "multiLanguages" .computed(),
        }
    }
}

family! {
    /// Torznab torrent indexer
    pub struct Torznab in Indexers {
        resource: "indexer_torznab",
        implementation: "Torznab",
        config_contract: "TorznabSettings",
        category: Some("torrent"),
        envelope {
            enable_automatic_search: bool = "enableAutomaticSearch" .computed(),
            enable_interactive_search: bool = "enableInteractiveSearch" .computed(),
            enable_rss: bool = "enableRss" .computed(),
            priority: i64 = "priority" .computed().between(1, 50),
            download_client_id: i64 = "downloadClientId" .computed(),
        }
        fields {
            remove_year: bool = "removeYear" .computed(),
            minimum_seeders: i64 = "minimumSeeders" .computed(),
            seed_time: i64 = "seedCriteria.seedTime" .computed(),
            base_url: String = "baseUrl" .required(),
            api_path: String = "apiPath" .computed(),
            api_key: String = "apiKey" .computed().sensitive(),
            additional_parameters: String = "additionalParameters" .computed(),
            seed_ratio: String = "seedCriteria.seedRatio" .computed(),
            categories: IntSet = "categories" .computed(),
            multi_languages: IntSet = "multiLanguages" .computed(),
            required_flags: IntSet = "requiredFlags" .computed(),
        }
    }
}

group_kind! {
    /// Any indexer
    pub enum IndexerKind in Indexers {
        Newznab,
        Torznab,
    }
}

pub fn resources() -> Vec<Box<dyn DynResource>> {
    handlers![Newznab, Torznab]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Family, GenericView};
    use crate::host::Attr;
    use serde_json::json;

    #[test]
    fn test_torznab_from_wire() {
        let wire = json!({
            "id": 2,
            "name": "jackett",
            "implementation": "Torznab",
            "configContract": "TorznabSettings",
            "protocol": "torrent",
            "enableRss": true,
            "priority": 25,
            "tags": [],
            "fields": [
                {"name": "baseUrl", "value": "http://jackett:9117/api/v2.0/indexers/all/results/torznab"},
                {"name": "apiPath", "value": "/api"},
                {"name": "apiKey", "value": "********"},
                {"name": "categories", "value": [2000, 2010]},
                {"name": "seedCriteria.seedTime", "value": null},
                {"name": "earlyReleaseLimit", "value": null},
            ]
        });
        let generic = GenericView::<Indexers>::from_response(wire).unwrap();
        let torznab = Torznab::from_generic(&generic);

        assert_eq!(torznab.priority, Attr::Known(25));
        assert_eq!(torznab.categories, Attr::Known(IntSet::from([2000, 2010])));
        assert!(torznab.seed_time.is_null());
        assert_eq!(torznab.required_flags, Attr::Known(IntSet::new()));
        assert!(torznab.enable_automatic_search.is_null());
        assert_eq!(
            IndexerKind::from_generic(&generic).map(|k| k.type_name()),
            Some("indexer_torznab")
        );
    }
}
