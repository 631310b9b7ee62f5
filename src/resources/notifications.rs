//! Notification connectors (`/api/v3/notification`)
//!
//! Notifications carry no category tag; the event triggers are top-level
//! booleans shared by every connector.

use super::{DynResource, handlers};
use crate::fields::{FieldRegistry, Group, IntSet, StringSet, family, group_kind};

/// Notification group
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Notifications;

impl Group for Notifications {
    const NAME: &'static str = "notification";
    const PATH: &'static str = "/api/v3/notification";
    const ENVELOPE: FieldRegistry = FieldRegistry {
        bools: &[
            "onGrab",
            "onDownload",
            "onUpgrade",
            "onRename",
            "onMovieAdded",
            "onMovieDelete",
            "onMovieFileDelete",
            "onMovieFileDeleteForUpgrade",
            "onHealthIssue",
            "onHealthRestored",
            "onApplicationUpdate",
            "onManualInteractionRequired",
            "includeHealthWarnings",
        ],
        ..FieldRegistry::EMPTY
    };
    const FIELDS: FieldRegistry = FieldRegistry {
        bools: &["sendSilently"],
        ints: &[
            "topicId",
            "method",
            "port",
            "useEncryption",
            "priority",
            "retry",
            "expire",
        ],
        strings: &[
            "webHookUrl",
            "username",
            "avatar",
            "author",
            "botToken",
            "chatId",
            "icon",
            "channel",
            "url",
            "password",
            "server",
            "from",
            "apiKey",
            "userKey",
            "sound",
            "appToken",
            "path",
            "arguments",
        ],
        int_sets: &["grabFields", "importFields"],
        string_sets: &["to", "cc", "bcc", "devices"],
    };
    const CATEGORY: Option<&'static str> = None;
}

family! {
    /// Discord network webhook
    pub struct Discord in Notifications {
        resource: "notification_discord",
        implementation: "Discord",
        config_contract: "DiscordSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            web_hook_url: String = "webHookUrl" .required().sensitive(),
            username: String = "username" .computed(),
            avatar: String = "avatar" .computed(),
            author: String = "author" .computed(),
            grab_fields: IntSet = "grabFields" .computed(),
            import_fields: IntSet = "importFields" .computed(),
        }
    }
}

family! {
    /// Telegram bot
    pub struct Telegram in Notifications {
        resource: "notification_telegram",
        implementation: "Telegram",
        config_contract: "TelegramSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            send_silently: bool = "sendSilently" .computed(),
            topic_id: i64 = "topicId" .computed(),
            bot_token: String = "botToken" .required().sensitive(),
            chat_id: String = "chatId" .required(),
        }
    }
}

family! {
    /// Slack incoming webhook
    pub struct Slack in Notifications {
        resource: "notification_slack",
        implementation: "Slack",
        config_contract: "SlackSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            web_hook_url: String = "webHookUrl" .required().sensitive(),
            username: String = "username" .required(),
            icon: String = "icon" .computed(),
            channel: String = "channel" .computed(),
        }
    }
}

family! {
    /// Generic webhook
    pub struct Webhook in Notifications {
        resource: "notification_webhook",
        implementation: "Webhook",
        config_contract: "WebhookSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            method: i64 = "method" .computed().between(1, 2),
            url: String = "url" .required(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
        }
    }
}

family! {
    /// Email over SMTP
    pub struct Email in Notifications {
        resource: "notification_email",
        implementation: "Email",
        config_contract: "EmailSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            port: i64 = "port" .required().between(1, 65535),
            use_encryption: i64 = "useEncryption" .computed().between(0, 2),
            server: String = "server" .required(),
            username: String = "username" .computed(),
            password: String = "password" .computed().sensitive(),
            from: String = "from" .required(),
            to: StringSet = "to" .required(),
            cc: StringSet = "cc" .computed(),
            bcc: StringSet = "bcc" .computed(),
        }
    }
}

family! {
    /// Pushover push notifications
    pub struct Pushover in Notifications {
        resource: "notification_pushover",
        implementation: "Pushover",
        config_contract: "PushoverSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            priority: i64 = "priority" .computed().between(-2, 2),
            retry: i64 = "retry" .computed(),
            expire: i64 = "expire" .computed(),
            api_key: String = "apiKey" .required().sensitive(),
            user_key: String = "userKey" .required().sensitive(),
            sound: String = "sound" .computed(),
            devices: StringSet = "devices" .computed(),
        }
    }
}

family! {
    /// Gotify push notifications
    pub struct Gotify in Notifications {
        resource: "notification_gotify",
        implementation: "Gotify",
        config_contract: "GotifySettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            priority: i64 = "priority" .computed().between(0, 8),
            server: String = "server" .required(),
            app_token: String = "appToken" .required().sensitive(),
        }
    }
}

family! {
    /// Custom script run on events
    pub struct CustomScript in Notifications {
        resource: "notification_custom_script",
        implementation: "CustomScript",
        config_contract: "CustomScriptSettings",
        category: None,
        envelope {
            on_grab: bool = "onGrab" .computed(),
            on_download: bool = "onDownload" .computed(),
            on_upgrade: bool = "onUpgrade" .computed(),
            on_rename: bool = "onRename" .computed(),
            on_movie_added: bool = "onMovieAdded" .computed(),
            on_movie_delete: bool = "onMovieDelete" .computed(),
            on_movie_file_delete: bool = "onMovieFileDelete" .computed(),
            on_movie_file_delete_for_upgrade: bool = "onMovieFileDeleteForUpgrade" .computed(),
            on_health_issue: bool = "onHealthIssue" .computed(),
            on_health_restored: bool = "onHealthRestored" .computed(),
            on_application_update: bool = "onApplicationUpdate" .computed(),
            on_manual_interaction_required: bool = "onManualInteractionRequired" .computed(),
            include_health_warnings: bool = "includeHealthWarnings" .computed(),
        }
        fields {
            path: String = "path" .required(),
            arguments: String = "arguments" .computed(),
        }
    }
}

group_kind! {
    /// Any notification connector
    pub enum NotificationKind in Notifications {
        Discord,
        Telegram,
        Slack,
        Webhook,
        Email,
        Pushover,
        Gotify,
        CustomScript,
    }
}

pub fn resources() -> Vec<Box<dyn DynResource>> {
    handlers![Discord, Telegram, Slack, Webhook, Email, Pushover, Gotify, CustomScript]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Family, GenericView};
    use crate::host::Attr;
    use crate::resources::Resource;
    use serde_json::json;

    #[test]
    fn test_no_category_key() {
        let body = Webhook {
            name: Attr::known("hook"),
            url: Attr::known("http://example.com"),
            on_grab: Attr::Known(true),
            ..Default::default()
        }
        .to_request()
        .unwrap();
        assert_eq!(body["onGrab"], true);
        assert!(body.get("protocol").is_none());
        assert!(body.get("listType").is_none());
    }

    #[test]
    fn test_discord_grab_fields_tolerate_unknown_members() {
        let wire = json!({
            "id": 1,
            "name": "discord",
            "implementation": "Discord",
            "configContract": "DiscordSettings",
            "fields": [{"name": "grabFields", "value": [99, 0]}],
        });
        let generic = GenericView::<Notifications>::from_response(wire).unwrap();
        let discord = Discord::from_generic(&generic);
        assert_eq!(discord.grab_fields, Attr::Known(IntSet::from([0, 99])));
        assert_eq!(discord.import_fields, Attr::Known(IntSet::new()));
    }

    #[test]
    fn test_email_recipients() {
        let email = Email {
            to: Attr::Known(StringSet::from(["b@example.com".to_string(), "a@example.com".to_string()])),
            cc: Attr::Known(StringSet::new()),
            ..Default::default()
        };
        let body = email.to_request().unwrap();
        assert_eq!(
            body["fields"],
            json!([{"name": "to", "value": ["a@example.com", "b@example.com"]}])
        );
    }
}
