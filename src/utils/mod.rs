//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Append an endpoint path to a base URL and add query pairs.
///
/// Any path prefix on the base is kept, so `http://host/prefix` plus
/// `/api/v1/years.json` gives `http://host/prefix/api/v1/years.json`.
pub fn endpoint_url(
    base: &Url,
    path: &str,
    query: &[(&str, String)],
) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    let mut url = base.join(path.trim_start_matches('/'))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        let base = Url::parse("https://phish.in").unwrap();
        let url = endpoint_url(
            &base,
            "/api/v1/shows.json",
            &[("sort_dir", "desc".to_string()), ("per_page", 3.to_string())],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://phish.in/api/v1/shows.json?sort_dir=desc&per_page=3"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_prefix() {
        let base = Url::parse("http://proxy.local/phishin").unwrap();
        let url = endpoint_url(&base, "/api/v1/years.json", &[]).unwrap();
        assert_eq!(url.as_str(), "http://proxy.local/phishin/api/v1/years.json");

        let base = Url::parse("http://proxy.local/phishin/").unwrap();
        let url = endpoint_url(&base, "api/v1/shows.json", &[]).unwrap();
        assert_eq!(url.as_str(), "http://proxy.local/phishin/api/v1/shows.json");
    }

    #[test]
    fn test_endpoint_url_without_query() {
        let base = Url::parse("http://localhost:3000/").unwrap();
        let url = endpoint_url(&base, "/api/v1/years.json", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/years.json");
    }
}
