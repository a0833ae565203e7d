//! Askama template filters for asset management

// Include compile-time generated asset hashes
include!(concat!(env!("OUT_DIR"), "/asset_hashes.rs"));

/// Append cache-busting hash to static asset URLs.
///
/// Usage in templates:
/// ```html
/// <link rel="stylesheet" href="{{ "/static/css/site.css"|asset_url }}">
/// ```
#[askama::filter_fn]
pub fn asset_url(path: impl std::fmt::Display, _: &dyn askama::Values) -> askama::Result<String> {
    let path_str = path.to_string();
    Ok(versioned(&path_str))
}

fn versioned(path: &str) -> String {
    match path {
        "/static/css/site.css" => format!("{}?v={}", path, SITE_CSS_HASH),
        "/static/js/main.js" => format!("{}?v={}", path, MAIN_JS_HASH),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_assets_get_hash() {
        assert!(versioned("/static/css/site.css").starts_with("/static/css/site.css?v="));
        assert!(versioned("/static/js/main.js").starts_with("/static/js/main.js?v="));
    }

    #[test]
    fn test_unknown_assets_unchanged() {
        assert_eq!(versioned("/static/img/lobby.jpg"), "/static/img/lobby.jpg");
    }
}
