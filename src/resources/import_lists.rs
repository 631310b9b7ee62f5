//! Import lists (`/api/v3/importlist`)

use super::{DynResource, handlers};
use crate::fields::{FieldRegistry, Group, IntSet, family, group_kind};

/// Accepted `monitor` values
pub const MONITOR: &[&str] = &["movieOnly", "movieAndCollection", "none"];

/// Accepted `minimum_availability` values
pub const MINIMUM_AVAILABILITY: &[&str] = &["tba", "announced", "inCinemas", "released", "deleted"];

/// Import list group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImportLists;

impl Group for ImportLists {
    const NAME: &'static str = "import list";
    const PATH: &'static str = "/api/v3/importlist";
    const ENVELOPE: FieldRegistry = FieldRegistry {
        bools: &["enabled", "enableAuto", "searchOnAdd"],
        ints: &["qualityProfileId", "listOrder"],
        strings: &["monitor", "minimumAvailability", "rootFolderPath", "listType"],
        ..FieldRegistry::EMPTY
    };
    const FIELDS: FieldRegistry = FieldRegistry {
        bools: &[],
        ints: &["tmdbListType", "filterCriteria.languageCode", "limit"],
        strings: &[
            "accessToken",
            "refreshToken",
            "expires",
            "authUser",
            "username",
            "listname",
            "traktAdditionalParameters",
            "listId",
            "companyId",
            "baseUrl",
            "apiKey",
            "url",
            "filterCriteria.minVoteAverage",
            "filterCriteria.minVotes",
            "filterCriteria.certification",
            "filterCriteria.includeGenreIds",
            "filterCriteria.excludeGenreIds",
        ],
        int_sets: &["profileIds", "tagIds"],
        string_sets: &[],
    };
    const CATEGORY: Option<&'static str> = Some("listType");
}

family! {
    /// Plex watchlist
    pub struct Plex in ImportLists {
        resource: "import_list_plex",
        implementation: "PlexImport",
        config_contract: "PlexListSettings",
        category: Some("plex"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            access_token: String = "accessToken" .required().sensitive(),
        }
    }
}

family! {
    /// TMDB popular movies
    pub struct TmdbPopular in ImportLists {
        resource: "import_list_tmdb_popular",
        implementation: "TMDbPopularImport",
        config_contract: "TMDbPopularSettings",
        category: Some("tmdb"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            tmdb_list_type: i64 = "tmdbListType" .computed().between(1, 4),
            language_code: i64 = "filterCriteria.languageCode" .computed(),
            min_vote_average: String = "filterCriteria.minVoteAverage" .computed(),
            min_votes: String = "filterCriteria.minVotes" .computed(),
            certification: String = "filterCriteria.certification" .computed(),
            include_genre_ids: String = "filterCriteria.includeGenreIds" .computed(),
            exclude_genre_ids: String = "filterCriteria.excludeGenreIds" .computed(),
        }
    }
}

family! {
    /// TMDB user list
    pub struct TmdbList in ImportLists {
        resource: "import_list_tmdb_list",
        implementation: "TMDbListImport",
        config_contract: "TMDbListSettings",
        category: Some("tmdb"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            list_id: String = "listId" .required(),
        }
    }
}

family! {
    /// TMDB production company
    pub struct TmdbCompany in ImportLists {
        resource: "import_list_tmdb_company",
        implementation: "TMDbCompanyImport",
        config_contract: "TMDbCompanySettings",
        category: Some("tmdb"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            company_id: String = "companyId" .required(),
        }
    }
}

family! {
    /// Trakt user list
    pub struct TraktList in ImportLists {
        resource: "import_list_trakt_list",
        implementation: "TraktListImport",
        config_contract: "TraktListSettings",
        category: Some("trakt"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            limit: i64 = "limit" .computed(),
            access_token: String = "accessToken" .required().sensitive(),
            refresh_token: String = "refreshToken" .computed().sensitive(),
            expires: String = "expires" .computed(),
            auth_user: String = "authUser" .required(),
            username: String = "username" .computed(),
            listname: String = "listname" .required(),
            additional_parameters: String = "traktAdditionalParameters" .computed(),
        }
    }
}

family! {
    /// Another Radarr instance
    pub struct RadarrList in ImportLists {
        resource: "import_list_radarr",
        implementation: "RadarrImport",
        config_contract: "RadarrSettings",
        category: Some("program"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            base_url: String = "baseUrl" .required(),
            api_key: String = "apiKey" .required().sensitive(),
            profile_ids: IntSet = "profileIds" .computed(),
            tag_ids: IntSet = "tagIds" .computed(),
        }
    }
}

family! {
    /// IMDb list
    pub struct ImdbList in ImportLists {
        resource: "import_list_imdb",
        implementation: "IMDbListImport",
        config_contract: "IMDbListSettings",
        category: Some("other"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            list_id: String = "listId" .required(),
        }
    }
}

family! {
    /// Generic RSS list
    pub struct Rss in ImportLists {
        resource: "import_list_rss",
        implementation: "RSSImport",
        config_contract: "RSSImportSettings",
        category: Some("advanced"),
        envelope {
            enabled: bool = "enabled" .computed(),
            enable_auto: bool = "enableAuto" .computed(),
            search_on_add: bool = "searchOnAdd" .computed(),
            quality_profile_id: i64 = "qualityProfileId" .required(),
            list_order: i64 = "listOrder" .computed(),
            monitor: String = "monitor" .required().one_of(MONITOR),
            minimum_availability: String = "minimumAvailability" .required().one_of(MINIMUM_AVAILABILITY),
            root_folder_path: String = "rootFolderPath" .required(),
        }
        fields {
            url: String = "url" .required(),
        }
    }
}

group_kind! {
    /// Any import list
    pub enum ImportListKind in ImportLists {
        Plex,
        TmdbPopular,
        TmdbList,
        TmdbCompany,
        TraktList,
        RadarrList,
        ImdbList,
        Rss,
    }
}

pub fn resources() -> Vec<Box<dyn DynResource>> {
    handlers![Plex, TmdbPopular, TmdbList, TmdbCompany, TraktList, RadarrList, ImdbList, Rss]
}
