use leptos::*;

#[derive(Default, Clone, Copy, PartialEq)]
pub enum AlertVariant {
    #[default]
    Info,
    Success,
    Error,
}

/// Inline message banner.
#[component]
pub fn Alert(#[prop(optional)] variant: AlertVariant, children: Children) -> impl IntoView {
    let class = match variant {
        AlertVariant::Info => "alert",
        AlertVariant::Success => "alert alert-success",
        AlertVariant::Error => "alert alert-error",
    };

    view! {
        <div class=class>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_alert_variants_exist() {
        assert!(matches!(AlertVariant::default(), AlertVariant::Info));
        assert!(matches!(AlertVariant::Success, AlertVariant::Success));
        assert!(matches!(AlertVariant::Error, AlertVariant::Error));
    }
}
