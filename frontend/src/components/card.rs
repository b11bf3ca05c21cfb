use leptos::*;

/// Card container.
#[component]
pub fn Card(
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let full_class = match class {
        Some(extra) => format!("card {}", extra),
        None => "card".to_string(),
    };

    view! {
        <div class=full_class>
            {title.map(|t| view! { <h3 class="card-title">{t}</h3> })}
            {children()}
        </div>
    }
}

/// Single-number stat tile used on the dashboard.
#[component]
pub fn StatCard(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="card stat-card">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_card_css_classes() {
        assert_eq!("card", "card");
        assert_eq!("card-title", "card-title");
        assert_eq!("card stat-card", "card stat-card");
    }
}
