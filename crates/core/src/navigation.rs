//! Admin dashboard sections and role-gated menu.
//!
//! The same [`can_access`] table backs both the sidebar returned to the
//! client and the section extractors in the API, so a hidden menu entry is
//! also a forbidden endpoint.

use serde::Serialize;

use crate::roles::{is_admin, ROLE_EDITOR, ROLE_NURSE};

/// An area of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Dashboard,
    Bookings,
    Appointments,
    Contacts,
    Programs,
    Gallery,
    BankOptions,
    Footer,
    Media,
    Users,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Bookings => "bookings",
            Section::Appointments => "appointments",
            Section::Contacts => "contacts",
            Section::Programs => "programs",
            Section::Gallery => "gallery",
            Section::BankOptions => "bank options",
            Section::Footer => "footer",
            Section::Media => "media",
            Section::Users => "users",
        }
    }
}

const EDITOR_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Contacts,
    Section::Programs,
    Section::Gallery,
    Section::Footer,
    Section::Media,
];

const NURSE_SECTIONS: &[Section] = &[
    Section::Dashboard,
    Section::Bookings,
    Section::Appointments,
];

/// Whether `role` may open `section`.
pub fn can_access(role: &str, section: Section) -> bool {
    match role {
        r if is_admin(r) => true,
        ROLE_EDITOR => EDITOR_SECTIONS.contains(&section),
        ROLE_NURSE => NURSE_SECTIONS.contains(&section),
        _ => false,
    }
}

/// Sidebar badge keys; the values come from the dashboard badge endpoint.
pub const BADGE_PENDING_BOOKINGS: &str = "pending_bookings";
pub const BADGE_TODAY_APPOINTMENTS: &str = "today_appointments";
pub const BADGE_NEW_CONTACTS: &str = "new_contacts";

/// One entry in the admin sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub key: Section,
    pub label_en: &'static str,
    pub label_fr: &'static str,
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<&'static str>,
}

const MENU: &[MenuItem] = &[
    MenuItem {
        key: Section::Dashboard,
        label_en: "Dashboard",
        label_fr: "Tableau de bord",
        path: "/admin",
        badge: None,
    },
    MenuItem {
        key: Section::Bookings,
        label_en: "Bookings",
        label_fr: "Réservations",
        path: "/admin/bookings",
        badge: Some(BADGE_PENDING_BOOKINGS),
    },
    MenuItem {
        key: Section::Appointments,
        label_en: "Appointments",
        label_fr: "Rendez-vous",
        path: "/admin/appointments",
        badge: Some(BADGE_TODAY_APPOINTMENTS),
    },
    MenuItem {
        key: Section::Contacts,
        label_en: "Messages",
        label_fr: "Messages",
        path: "/admin/contacts",
        badge: Some(BADGE_NEW_CONTACTS),
    },
    MenuItem {
        key: Section::Programs,
        label_en: "Programs",
        label_fr: "Programmes",
        path: "/admin/programs",
        badge: None,
    },
    MenuItem {
        key: Section::Gallery,
        label_en: "Gallery",
        label_fr: "Galerie",
        path: "/admin/gallery",
        badge: None,
    },
    MenuItem {
        key: Section::BankOptions,
        label_en: "Donations",
        label_fr: "Dons",
        path: "/admin/bank-options",
        badge: None,
    },
    MenuItem {
        key: Section::Footer,
        label_en: "Footer",
        label_fr: "Pied de page",
        path: "/admin/footer",
        badge: None,
    },
    MenuItem {
        key: Section::Media,
        label_en: "Media library",
        label_fr: "Médiathèque",
        path: "/admin/media",
        badge: None,
    },
    MenuItem {
        key: Section::Users,
        label_en: "Users",
        label_fr: "Utilisateurs",
        path: "/admin/users",
        badge: None,
    },
];

/// Menu entries visible to `role`, in sidebar order.
pub fn menu_for_role(role: &str) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|item| can_access(role, item.key))
        .cloned()
        .collect()
}
