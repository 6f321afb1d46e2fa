use dioxus::prelude::*;

use crate::icons::{
    FaGauge, FaMoneyBill, FaQrcode, FaStore, FaTriangleExclamation, FaUsers,
};
use crate::{use_auth, Icon, LogoutButton};

use super::VIEWS_CSS;

/// Entries of the admin sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminSection {
    Dashboard,
    Stands,
    Users,
    Payments,
    Incidents,
    Credentials,
}

impl AdminSection {
    pub const ALL: [AdminSection; 6] = [
        AdminSection::Dashboard,
        AdminSection::Stands,
        AdminSection::Users,
        AdminSection::Payments,
        AdminSection::Incidents,
        AdminSection::Credentials,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "/admin",
            AdminSection::Stands => "/admin/stands",
            AdminSection::Users => "/admin/usuarios",
            AdminSection::Payments => "/admin/pagos",
            AdminSection::Incidents => "/admin/incidencias",
            AdminSection::Credentials => "/admin/credenciales",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "Resumen",
            AdminSection::Stands => "Stands",
            AdminSection::Users => "Usuarios",
            AdminSection::Payments => "Pagos",
            AdminSection::Incidents => "Incidencias",
            AdminSection::Credentials => "Credenciales QR",
        }
    }

    /// Section owning `path`; unknown admin paths fall back to the dashboard.
    pub fn from_path(path: &str) -> AdminSection {
        let path = path.trim_end_matches('/');
        Self::ALL
            .iter()
            .copied()
            .filter(|s| *s != AdminSection::Dashboard)
            .find(|s| path.starts_with(s.path()))
            .unwrap_or(AdminSection::Dashboard)
    }

    fn icon(&self) -> Element {
        match self {
            AdminSection::Dashboard => rsx! { Icon { icon: FaGauge, width: 16, height: 16 } },
            AdminSection::Stands => rsx! { Icon { icon: FaStore, width: 16, height: 16 } },
            AdminSection::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
            AdminSection::Payments => rsx! { Icon { icon: FaMoneyBill, width: 16, height: 16 } },
            AdminSection::Incidents => {
                rsx! { Icon { icon: FaTriangleExclamation, width: 16, height: 16 } }
            }
            AdminSection::Credentials => rsx! { Icon { icon: FaQrcode, width: 16, height: 16 } },
        }
    }
}

/// Sidebar shell of the admin dashboard. The platform passes its router
/// outlet as children.
#[component]
pub fn AdminLayoutView(active: AdminSection, children: Element) -> Element {
    let auth = use_auth();
    let name = auth.read().display_name();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "admin-shell",
            aside {
                class: "admin-sidebar",
                div { class: "admin-brand", "Mercado Mayorista" }
                for section in AdminSection::ALL {
                    Link {
                        key: "{section.path()}",
                        to: section.path(),
                        class: if section == active { "admin-nav-link active" } else { "admin-nav-link" },
                        {section.icon()}
                        span { "{section.label()}" }
                    }
                }
                div {
                    class: "admin-sidebar-footer",
                    span { "{name}" }
                    Link { to: "/", class: "admin-nav-link", "Ver mercado" }
                    LogoutButton { class: "btn btn-outline" }
                }
            }
            main { class: "admin-main", {children} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/admin", AdminSection::Dashboard)]
    #[case("/admin/", AdminSection::Dashboard)]
    #[case("/admin/stands", AdminSection::Stands)]
    #[case("/admin/usuarios", AdminSection::Users)]
    #[case("/admin/pagos", AdminSection::Payments)]
    #[case("/admin/incidencias", AdminSection::Incidents)]
    #[case("/admin/credenciales", AdminSection::Credentials)]
    #[case("/admin/desconocido", AdminSection::Dashboard)]
    fn test_section_from_path(#[case] path: &str, #[case] expected: AdminSection) {
        assert_eq!(AdminSection::from_path(path), expected);
    }
}
