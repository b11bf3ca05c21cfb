use leptos::*;
use leptos_router::*;

use crate::app::Theme;
use crate::components::icons;
use crate::identity::{display_name, load_stored_identity, StoredIdentity};

/// One primary navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
}

/// Primary destinations, in display order. Fixed at build time.
pub const NAV_LINKS: [NavLink; 6] = [
    NavLink { path: "/dashboard", label: "Dashboard" },
    NavLink { path: "/attendance", label: "Attendance" },
    NavLink { path: "/students", label: "Students" },
    NavLink { path: "/analytics", label: "Analytics" },
    NavLink { path: "/reports", label: "Reports" },
    NavLink { path: "/manage-schedule", label: "Schedule" },
];

/// Exact-path comparison; `/attendance` does not activate `/attendance/x`.
pub fn is_active(current: &str, target: &str) -> bool {
    current == target
}

fn nav_link_class(active: bool) -> &'static str {
    if active {
        "nav-link active"
    } else {
        "nav-link"
    }
}

fn drawer_link_class(active: bool) -> &'static str {
    if active {
        "drawer-link active"
    } else {
        "drawer-link"
    }
}

/// Top navigation chrome: brand, nav links, profile summary and the mobile
/// drawer. The identity shown in the profile summary is read once from
/// localStorage when the header mounts; the drawer closes itself whenever
/// the route changes.
#[component]
pub fn Header(theme: RwSignal<Theme>, set_theme: Callback<Theme>) -> impl IntoView {
    // Theme is owned by the surrounding chrome and only travels through
    // here; the header itself styles everything via CSS variables.
    let _ = (theme, set_theme);

    let identity = create_rw_signal(Option::<StoredIdentity>::None);
    let menu_open = create_rw_signal(false);
    let location = use_location();
    let pathname = location.pathname;

    // One-shot identity read after the first render. No tracked signals, so
    // the effect never re-runs; a failed read degrades to "Guest".
    create_effect(move |_| {
        identity.set(load_stored_identity());
    });

    // Close the drawer whenever navigation lands somewhere new.
    create_effect(move |_| {
        let _ = pathname.get();
        menu_open.set(false);
    });

    let name = move || display_name(identity.get().as_ref());

    let desktop_links = NAV_LINKS
        .iter()
        .map(|link| {
            let link = *link;
            view! {
                <a
                    href=link.path
                    class=move || nav_link_class(is_active(&pathname.get(), link.path))
                >
                    {link.label}
                </a>
            }
        })
        .collect_view();

    view! {
        <header class="app-header">
            <div class="header-bar" role="navigation">
                <div class="brand">
                    <img class="brand-logo" src="/assets/logo.png" alt="Smart Attendance logo" />
                    <h1 class="brand-title">"Smart Attendance"</h1>
                </div>

                // Legacy quick links carried over from the first cut of the
                // header: always visible, never highlighted.
                <div class="quick-links">
                    <a href="/">"Dashboard"</a>
                    <a href="/attendance">"Attendance"</a>
                    <a href="/students">"Students"</a>
                    <a href="/analytics">"Analytics"</a>
                    <a href="/reports">"Reports"</a>
                    <a href="/manage-schedule">"Schedule"</a>
                </div>

                // Route-aware links, hidden on narrow viewports by CSS.
                <nav class="nav-links">{desktop_links}</nav>

                <div class="header-actions">
                    <button type="button" class="bell-button" title="Notifications">
                        {icons::bell()}
                    </button>
                    <div class="profile-summary">
                        {icons::user()}
                        <span class="profile-name">{name}</span>
                        <a href="/settings" class="profile-settings" title="Settings">
                            {icons::chevron_down()}
                        </a>
                    </div>
                    <button
                        type="button"
                        class="menu-toggle"
                        title="Menu"
                        on:click=move |_| menu_open.update(|open| *open = !*open)
                    >
                        {move || {
                            if menu_open.get() {
                                icons::x_mark().into_view()
                            } else {
                                icons::menu().into_view()
                            }
                        }}
                    </button>
                </div>
            </div>

            <Show when=move || menu_open.get() fallback=|| ()>
                <nav class="drawer">
                    {NAV_LINKS
                        .iter()
                        .map(|link| {
                            let link = *link;
                            view! {
                                <a
                                    href=link.path
                                    class=move || {
                                        drawer_link_class(is_active(&pathname.get(), link.path))
                                    }
                                >
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()}
                    <div class="drawer-profile">
                        {icons::user()}
                        <span class="profile-name">{name}</span>
                    </div>
                </nav>
            </Show>
        </header>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_nav_links_order_and_targets() {
        let paths: Vec<&str> = NAV_LINKS.iter().map(|l| l.path).collect();
        assert_eq!(
            paths,
            vec![
                "/dashboard",
                "/attendance",
                "/students",
                "/analytics",
                "/reports",
                "/manage-schedule",
            ]
        );
    }

    #[wasm_bindgen_test]
    fn test_is_active_requires_exact_match() {
        assert!(is_active("/attendance", "/attendance"));
        assert!(!is_active("/attendance/today", "/attendance"));
        assert!(!is_active("/attendance", "/attendance/today"));
        assert!(!is_active("/", "/dashboard"));
    }

    #[wasm_bindgen_test]
    fn test_at_most_one_link_active() {
        for current in ["/attendance", "/students", "/", "/settings"] {
            let active_count = NAV_LINKS
                .iter()
                .filter(|l| is_active(current, l.path))
                .count();
            assert!(active_count <= 1, "{} activated {} links", current, active_count);
        }
    }

    #[wasm_bindgen_test]
    fn test_attendance_route_activates_only_attendance() {
        let active: Vec<&str> = NAV_LINKS
            .iter()
            .filter(|l| is_active("/attendance", l.path))
            .map(|l| l.label)
            .collect();
        assert_eq!(active, vec!["Attendance"]);
    }

    #[wasm_bindgen_test]
    fn test_root_route_activates_nothing() {
        assert!(NAV_LINKS.iter().all(|l| !is_active("/", l.path)));
    }

    #[wasm_bindgen_test]
    fn test_stored_name_with_attendance_route() {
        let identity = StoredIdentity::from_json(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(display_name(Some(&identity)), "Alice");

        let active: Vec<&str> = NAV_LINKS
            .iter()
            .filter(|l| is_active("/attendance", l.path))
            .map(|l| l.label)
            .collect();
        assert_eq!(active, vec!["Attendance"]);
    }

    #[wasm_bindgen_test]
    fn test_link_classes() {
        assert_eq!(nav_link_class(true), "nav-link active");
        assert_eq!(nav_link_class(false), "nav-link");
        assert_eq!(drawer_link_class(true), "drawer-link active");
        assert_eq!(drawer_link_class(false), "drawer-link");
    }
}
