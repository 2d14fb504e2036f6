use url::Url;

// サードパーティのfaviconサービス（対象ページ自体は取得しない）
const FAVICON_ENDPOINT: &str = "https://www.google.com/s2/favicons";
const FAVICON_SIZE: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub favicon: String,
}

/// URL文字列からタイトルとfavicon URLを導出する
/// パース失敗時は固定のフォールバック値を返し、リクエストを失敗させない
pub fn resolve(url: &str) -> PageMetadata {
    match Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
    {
        Some(domain) => PageMetadata {
            title: format!("Page from {}", domain),
            favicon: format!("{}?domain={}&sz={}", FAVICON_ENDPOINT, domain, FAVICON_SIZE),
        },
        None => PageMetadata {
            title: "Unknown Page".to_string(),
            favicon: "/favicon.ico".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_hostname_into_title_and_favicon() {
        let meta = resolve("https://example.com/some/path?q=1");
        assert_eq!(meta.title, "Page from example.com");
        assert_eq!(
            meta.favicon,
            "https://www.google.com/s2/favicons?domain=example.com&sz=32"
        );
    }

    #[test]
    fn unparseable_url_falls_back() {
        let meta = resolve("not a url");
        assert_eq!(meta.title, "Unknown Page");
        assert_eq!(meta.favicon, "/favicon.ico");
    }

    #[test]
    fn url_without_host_falls_back() {
        let meta = resolve("mailto:someone@example.com");
        assert_eq!(meta.title, "Unknown Page");
    }
}
