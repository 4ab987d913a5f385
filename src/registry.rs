use std::fmt;

// ── App identifiers ───────────────────────────────────────────────────────────

/// Identifier of a resident application. Navigation state stores these; the
/// registry below is the authority on which ids actually exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(&'static str);

impl AppId {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub const HOME: AppId = AppId("home");
pub const MENU: AppId = AppId("menu");
pub const MESSAGES: AppId = AppId("messages");
pub const CONTACTS: AppId = AppId("contacts");
pub const SNAKE: AppId = AppId("snake");
pub const SETTINGS: AppId = AppId("settings");

// ── Registry ──────────────────────────────────────────────────────────────────

/// Static registry entry. `launchable` controls main-menu visibility only.
#[derive(Debug, Clone, Copy)]
pub struct AppDefinition {
    pub id: AppId,
    pub name: &'static str,
    pub icon: Option<&'static str>,
    pub launchable: bool,
}

pub const APP_REGISTRY: &[AppDefinition] = &[
    AppDefinition {
        id: HOME,
        name: "Home",
        icon: None,
        launchable: false,
    },
    AppDefinition {
        id: MENU,
        name: "Menu",
        icon: None,
        launchable: false,
    },
    AppDefinition {
        id: MESSAGES,
        name: "Messages",
        icon: Some("✉"),
        launchable: true,
    },
    AppDefinition {
        id: CONTACTS,
        name: "Contacts",
        icon: Some("☎"),
        launchable: true,
    },
    AppDefinition {
        id: SNAKE,
        name: "Snake",
        icon: Some("§"),
        launchable: true,
    },
    AppDefinition {
        id: SETTINGS,
        name: "Settings",
        icon: Some("⚙"),
        launchable: true,
    },
];

pub fn app_by_id(id: AppId) -> Option<&'static AppDefinition> {
    APP_REGISTRY.iter().find(|app| app.id == id)
}

/// Apps shown in the main menu, in registry order.
pub fn launchable_apps() -> impl Iterator<Item = &'static AppDefinition> {
    APP_REGISTRY.iter().filter(|app| app.launchable)
}

/// Resolve a persisted id string back to a registered `AppId`.
pub fn app_id_from_str(s: &str) -> Option<AppId> {
    APP_REGISTRY
        .iter()
        .find(|app| app.id.as_str() == s)
        .map(|app| app.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launchable_apps_preserve_registry_order() {
        let ids: Vec<AppId> = launchable_apps().map(|a| a.id).collect();
        assert_eq!(ids, vec![MESSAGES, CONTACTS, SNAKE, SETTINGS]);
    }

    #[test]
    fn home_and_menu_are_not_launchable() {
        assert!(!app_by_id(HOME).unwrap().launchable);
        assert!(!app_by_id(MENU).unwrap().launchable);
    }

    #[test]
    fn persisted_id_round_trips_through_lookup() {
        assert_eq!(app_id_from_str("contacts"), Some(CONTACTS));
        assert_eq!(app_id_from_str("calculator"), None);
    }
}
