//! Resource lifecycle tests against a mock Radarr server

use mockito::{Matcher, Server, ServerGuard};
use radarr_provider::config::ProviderConfig;
use radarr_provider::resources::errors::{CLIENT_ERROR, UNEXPECTED_IMPORT_IDENTIFIER};
use radarr_provider::{Diagnostics, DynResource, RadarrProvider, Response, StateChange};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

const API_KEY: &str = "0123456789abcdef";

fn configured(server: &ServerGuard, api_key: &str, type_name: &str) -> Box<dyn DynResource> {
    let mut provider = RadarrProvider::new();
    let mut diags = Diagnostics::new();
    let config = ProviderConfig {
        url: server.url(),
        api_key: api_key.to_string(),
        ..Default::default()
    };
    provider.configure(&config, &mut diags);
    assert!(diags.is_empty(), "{:?}", diags);

    let resource = provider.resource(type_name, &mut diags).unwrap();
    assert!(diags.is_empty(), "{:?}", diags);
    resource
}

fn new_state(response: Response<Value>) -> Value {
    assert!(
        !response.diagnostics.has_error(),
        "{:?}",
        response.diagnostics
    );
    match response.state {
        StateChange::Set(state) => state,
        other => panic!("expected new state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_client_create_then_update() {
    let mut server = Server::new_async().await;
    let transmission = configured(&server, API_KEY, "download_client_transmission");
    let cancel = CancellationToken::new();

    let created = json!({
        "id": 1,
        "name": "resourceTest",
        "implementation": "Transmission",
        "configContract": "TransmissionSettings",
        "protocol": "torrent",
        "enable": false,
        "priority": 1,
        "removeCompletedDownloads": true,
        "removeFailedDownloads": true,
        "tags": [],
        "fields": [
            {"name": "host", "value": "transmission"},
            {"name": "port", "value": 9091},
            {"name": "urlBase", "value": "/transmission/"},
            {"name": "useSsl", "value": false},
            {"name": "password"},
            {"name": "recentMoviePriority", "value": 0}
        ]
    });
    let post = server
        .mock("POST", "/api/v3/downloadclient")
        .match_header("x-api-key", API_KEY)
        .match_body(Matcher::PartialJson(json!({
            "name": "resourceTest",
            "implementation": "Transmission",
            "configContract": "TransmissionSettings",
            "protocol": "torrent",
            "enable": false,
            "fields": [
                {"name": "port", "value": 9091},
                {"name": "host", "value": "transmission"},
                {"name": "urlBase", "value": "/transmission/"}
            ]
        })))
        .with_status(201)
        .with_body(created.to_string())
        .create_async()
        .await;

    let plan = json!({
        "name": "resourceTest",
        "host": "transmission",
        "url_base": "/transmission/",
        "port": 9091,
        "enable": false
    });
    let state = new_state(transmission.create(plan, &cancel).await);
    post.assert_async().await;

    assert_eq!(state["id"], 1);
    assert_eq!(state["port"], 9091);
    assert_eq!(state["host"], "transmission");
    assert_eq!(state["enable"], false);
    assert_eq!(state["priority"], 1);
    assert_eq!(state["use_ssl"], false);
    assert_eq!(state["tags"], json!([]));
    assert_eq!(state["password"], Value::Null);

    let mut updated = created.clone();
    updated["enable"] = json!(true);
    let put = server
        .mock("PUT", "/api/v3/downloadclient/1")
        .match_body(Matcher::PartialJson(json!({
            "id": 1,
            "name": "resourceTest",
            "implementation": "Transmission",
            "enable": true,
            "priority": 1,
            "fields": [
                {"name": "useSsl", "value": false},
                {"name": "port", "value": 9091},
                {"name": "recentMoviePriority", "value": 0},
                {"name": "host", "value": "transmission"},
                {"name": "urlBase", "value": "/transmission/"}
            ]
        })))
        .with_status(202)
        .with_body(updated.to_string())
        .create_async()
        .await;

    let mut plan = state.clone();
    plan["enable"] = json!(true);
    plan["id"] = Value::Null;
    let state = new_state(transmission.update(plan, state, &cancel).await);
    put.assert_async().await;

    assert_eq!(state["id"], 1);
    assert_eq!(state["enable"], true);
    assert_eq!(state["url_base"], "/transmission/");
}

/// Every attribute the server filled without being asked must be computed
fn assert_consistent_with_plan(resource: &dyn DynResource, plan: &Value, state: &Value) {
    let schema = resource.schema();
    for (name, value) in state.as_object().unwrap() {
        if value.is_null() || !plan[name].is_null() {
            continue;
        }
        let attribute = schema
            .attribute(name)
            .unwrap_or_else(|| panic!("{} has no attribute {}", resource.type_name(), name));
        assert!(
            attribute.computed,
            "{}.{} came back {} but is not computed",
            resource.type_name(),
            name,
            value
        );
    }
}

#[tokio::test]
async fn test_minimal_plan_takes_server_defaults() {
    let mut server = Server::new_async().await;
    let transmission = configured(&server, API_KEY, "download_client_transmission");

    let post = server
        .mock("POST", "/api/v3/downloadclient")
        .with_status(201)
        .with_body(
            json!({
                "id": 4,
                "name": "t",
                "implementation": "Transmission",
                "configContract": "TransmissionSettings",
                "protocol": "torrent",
                "enable": true,
                "priority": 1,
                "removeCompletedDownloads": true,
                "removeFailedDownloads": true,
                "tags": [],
                "fields": [
                    {"name": "host", "value": "localhost"},
                    {"name": "port", "value": 9091},
                    {"name": "useSsl", "value": false},
                    {"name": "urlBase", "value": "/transmission/"},
                    {"name": "username", "value": ""},
                    {"name": "password", "value": ""},
                    {"name": "movieCategory", "value": ""},
                    {"name": "movieDirectory", "value": ""},
                    {"name": "recentMoviePriority", "value": 0},
                    {"name": "olderMoviePriority", "value": 0},
                    {"name": "addPaused", "value": false}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let plan = json!({"name": "t"});
    let state = new_state(transmission.create(plan.clone(), &CancellationToken::new()).await);
    post.assert_async().await;

    assert_eq!(state["host"], "localhost");
    assert_consistent_with_plan(transmission.as_ref(), &plan, &state);
}

#[test]
fn test_unset_attributes_are_computed() {
    for resource in radarr_provider::resources::all() {
        for attribute in resource.schema().attributes {
            assert!(
                attribute.required || attribute.computed,
                "{}.{} is optional but not computed",
                resource.type_name(),
                attribute.name
            );
        }
    }
}

#[tokio::test]
async fn test_import_list_integer_sets() {
    let mut server = Server::new_async().await;
    let radarr = configured(&server, API_KEY, "import_list_radarr");
    let cancel = CancellationToken::new();

    let post = server
        .mock("POST", "/api/v3/importlist")
        .match_body(Matcher::PartialJson(json!({
            "listType": "program",
            "fields": [
                {"name": "baseUrl", "value": "http://other:7878"},
                {"name": "apiKey", "value": "other-key"},
                {"name": "profileIds", "value": [1, 2, 3]},
                {"name": "tagIds", "value": [10]}
            ]
        })))
        .with_status(201)
        .with_body(
            json!({
                "id": 4,
                "name": "other",
                "implementation": "RadarrImport",
                "configContract": "RadarrSettings",
                "listType": "program",
                "enabled": true,
                "enableAuto": false,
                "searchOnAdd": false,
                "qualityProfileId": 1,
                "listOrder": 0,
                "monitor": "movieOnly",
                "minimumAvailability": "released",
                "rootFolderPath": "/movies",
                "tags": [],
                "fields": [
                    {"name": "baseUrl", "value": "http://other:7878"},
                    {"name": "apiKey", "value": "********"},
                    {"name": "profileIds", "value": [3, 2, 1]},
                    {"name": "tagIds", "value": [10]}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let plan = json!({
        "name": "other",
        "enabled": true,
        "quality_profile_id": 1,
        "monitor": "movieOnly",
        "minimum_availability": "released",
        "root_folder_path": "/movies",
        "base_url": "http://other:7878",
        "api_key": "other-key",
        "profile_ids": [3, 1, 2],
        "tag_ids": [10]
    });
    let state = new_state(radarr.create(plan, &cancel).await);
    post.assert_async().await;

    assert_eq!(state["profile_ids"], json!([1, 2, 3]));
    assert_eq!(state["tag_ids"], json!([10]));
    // the server masks secrets; state keeps the planned value
    assert_eq!(state["api_key"], "other-key");
}

#[tokio::test]
async fn test_notification_enumerated_set() {
    let mut server = Server::new_async().await;
    let discord = configured(&server, API_KEY, "notification_discord");
    let cancel = CancellationToken::new();

    let record = |grab_fields: Value| {
        json!({
            "id": 2,
            "name": "discord",
            "implementation": "Discord",
            "configContract": "DiscordSettings",
            "onGrab": true,
            "tags": [],
            "fields": [
                {"name": "webHookUrl", "value": "********"},
                {"name": "grabFields", "value": grab_fields}
            ]
        })
        .to_string()
    };

    let post = server
        .mock("POST", "/api/v3/notification")
        .match_body(Matcher::PartialJson(json!({
            "onGrab": true,
            "fields": [
                {"name": "webHookUrl", "value": "https://discord.com/api/webhooks/1"},
                {"name": "grabFields", "value": [0, 3, 6]}
            ]
        })))
        .with_status(201)
        .with_body(record(json!([0, 3, 6])))
        .create_async()
        .await;

    let plan = json!({
        "name": "discord",
        "on_grab": true,
        "web_hook_url": "https://discord.com/api/webhooks/1",
        "grab_fields": [6, 0, 3]
    });
    let state = new_state(discord.create(plan, &cancel).await);
    post.assert_async().await;
    assert_eq!(state["grab_fields"], json!([0, 3, 6]));
    assert_eq!(state["import_fields"], json!([]));
    assert_eq!(state["web_hook_url"], "https://discord.com/api/webhooks/1");

    server
        .mock("GET", "/api/v3/notification/2")
        .with_body(record(json!([99, 0])))
        .create_async()
        .await;
    let state = new_state(discord.read(state, &cancel).await);
    assert_eq!(state["grab_fields"], json!([0, 99]));
    assert_eq!(state["web_hook_url"], "https://discord.com/api/webhooks/1");
}

#[tokio::test]
async fn test_import_by_id() {
    let mut server = Server::new_async().await;
    let deluge = configured(&server, API_KEY, "download_client_deluge");
    let cancel = CancellationToken::new();

    let imported = new_state(deluge.import("42"));
    let set: Vec<_> = imported
        .as_object()
        .unwrap()
        .iter()
        .filter(|(_, v)| !v.is_null())
        .collect();
    assert_eq!(set, vec![(&"id".to_string(), &json!(42))]);

    server
        .mock("GET", "/api/v3/downloadclient/42")
        .with_body(
            json!({
                "id": 42,
                "name": "deluge",
                "implementation": "Deluge",
                "configContract": "DelugeSettings",
                "protocol": "torrent",
                "enable": true,
                "tags": [1],
                "fields": [{"name": "host", "value": "deluge"}, {"name": "port", "value": 8112}]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let state = new_state(deluge.read(imported, &cancel).await);
    assert_eq!(state["name"], "deluge");
    assert_eq!(state["port"], 8112);
    assert_eq!(state["tags"], json!([1]));

    let rejected = deluge.import("abc");
    assert_eq!(rejected.state, StateChange::Unchanged);
    assert_eq!(rejected.diagnostics.len(), 1);
    assert_eq!(
        rejected.diagnostics.iter().next().unwrap().summary,
        UNEXPECTED_IMPORT_IDENTIFIER
    );
}

#[tokio::test]
async fn test_unauthorised_create() {
    let mut server = Server::new_async().await;
    let sabnzbd = configured(&server, "wrong-key", "download_client_sabnzbd");

    server
        .mock("POST", "/api/v3/downloadclient")
        .with_status(401)
        .create_async()
        .await;

    let plan = json!({"name": "sab", "host": "sabnzbd", "api_key": "k"});
    let response = sabnzbd.create(plan, &CancellationToken::new()).await;
    assert_eq!(response.state, StateChange::Unchanged);
    assert_eq!(response.diagnostics.len(), 1);
    let diagnostic = response.diagnostics.iter().next().unwrap();
    assert_eq!(diagnostic.summary, CLIENT_ERROR);
    assert!(diagnostic.detail.contains("401"), "{}", diagnostic.detail);
}

#[tokio::test]
async fn test_read_missing_removes_from_state() {
    let mut server = Server::new_async().await;
    let tag = configured(&server, API_KEY, "tag");

    server
        .mock("GET", "/api/v3/tag/7")
        .with_status(404)
        .create_async()
        .await;
    let response = tag.read(json!({"id": 7, "label": "gone"}), &CancellationToken::new()).await;
    assert_eq!(response.state, StateChange::Removed);
    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_delete() {
    let mut server = Server::new_async().await;
    let tag = configured(&server, API_KEY, "tag");

    let delete = server
        .mock("DELETE", "/api/v3/tag/3")
        .with_status(200)
        .create_async()
        .await;
    let response = tag.delete(json!({"id": 3, "label": "hd"}), &CancellationToken::new()).await;
    delete.assert_async().await;
    assert_eq!(response.state, StateChange::Removed);

    server
        .mock("DELETE", "/api/v3/tag/4")
        .with_status(500)
        .with_body("database is locked")
        .create_async()
        .await;
    let response = tag.delete(json!({"id": 4, "label": "hd"}), &CancellationToken::new()).await;
    assert_eq!(response.state, StateChange::Unchanged);
    let diagnostic = response.diagnostics.iter().next().unwrap();
    assert!(diagnostic.detail.starts_with("Unable to delete tag"));
    assert!(diagnostic.detail.ends_with("Details:\ndatabase is locked"));
}

#[tokio::test]
async fn test_invalid_plan_is_rejected_before_sending() {
    let server = Server::new_async().await;
    let tag = configured(&server, API_KEY, "tag");

    let response = tag.create(json!({"label": "UHD"}), &CancellationToken::new()).await;
    assert_eq!(response.state, StateChange::Unchanged);
    assert!(response.diagnostics.has_error());
}

#[tokio::test]
async fn test_cancelled_create_reports_nothing() {
    let server = Server::new_async().await;
    let tag = configured(&server, API_KEY, "tag");

    let cancel = CancellationToken::new();
    cancel.cancel();
    let response = tag.create(json!({"label": "hd"}), &cancel).await;
    assert_eq!(response.state, StateChange::Unchanged);
    assert!(response.diagnostics.is_empty());
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_sensitive_values_never_logged() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_env_filter(tracing_subscriber::EnvFilter::new("radarr_provider=trace"))
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut server = Server::new_async().await;
    let qbittorrent = configured(&server, API_KEY, "download_client_qbittorrent");
    server
        .mock("POST", "/api/v3/downloadclient")
        .with_status(201)
        .with_body(
            json!({
                "id": 9,
                "name": "qb",
                "implementation": "QBittorrent",
                "configContract": "QBittorrentSettings",
                "tags": [],
                "fields": [{"name": "password", "value": "********"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let plan = json!({"name": "qb", "host": "qbittorrent", "password": "hunter2"});
    let state = new_state(qbittorrent.create(plan, &CancellationToken::new()).await);
    assert_eq!(state["password"], "hunter2");

    let logs = capture.contents();
    assert!(logs.contains("download_client_qbittorrent"), "{}", logs);
    assert!(logs.contains("(sensitive)"), "{}", logs);
    assert!(!logs.contains("hunter2"), "{}", logs);
    assert!(!logs.contains(API_KEY), "{}", logs);
}
