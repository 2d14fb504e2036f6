use crate::error::{AppError, Result};
use crate::repositories::{BookmarkHandler, BookmarkRepository, BookmarkStatus};
use regex::Regex;
use std::sync::{Arc, LazyLock};

// 作成直後のプレースホルダー
pub const PLACEHOLDER_SUMMARY: &str = "Generating summary...";
// 取得失敗時の固定メッセージ（内部エラーの詳細は出さない）
pub const FAILED_SUMMARY: &str = "Summary unavailable";
// 1行も残らなかった場合の要約（これは成功扱い）
pub const EMPTY_SUMMARY: &str = "No description available.";

// Markdownリンクをリンクテキストに畳む
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("valid regex"));
// 残存するMarkdown装飾グリフ
static MARKDOWN_GLYPHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_~`#]").expect("valid regex"));

/// 対象ページのテキストレンダリングから一行要約を導出する
/// ブックマーク作成リクエストとは切り離して実行される
pub struct SummaryService {
    bookmark_repo: Arc<BookmarkRepository>,
    client: reqwest::Client,
    endpoint: String,
}

impl SummaryService {
    pub fn new(bookmark_repo: Arc<BookmarkRepository>, endpoint: String) -> Self {
        Self {
            bookmark_repo,
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// バックグラウンドで要約を生成して保存する
    /// 呼び出し元はタスクの完了を待たない
    pub fn spawn(self: &Arc<Self>, bookmark_id: String, url: String) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.generate_and_store(&bookmark_id, &url).await;
        });
    }

    /// 要約の生成と永続化
    /// 途中のあらゆるエラーは failed 終端状態に吸収する（リトライなし・単一試行）
    pub async fn generate_and_store(&self, bookmark_id: &str, url: &str) {
        let (summary, status) = match self.fetch_rendered_text(url).await {
            Ok(body) => (derive_summary(&body), BookmarkStatus::Completed),
            Err(e) => {
                tracing::warn!("summary fetch failed for bookmark {}: {}", bookmark_id, e);
                (FAILED_SUMMARY.to_string(), BookmarkStatus::Failed)
            }
        };

        match self
            .bookmark_repo
            .update_summary(bookmark_id, &summary, status)
            .await
        {
            Ok(true) => {}
            // processing でなくなっていた場合（削除済み・確定済み）は何もしない
            Ok(false) => {
                tracing::debug!("bookmark {} no longer processing, summary dropped", bookmark_id)
            }
            Err(e) => tracing::error!("failed to store summary for {}: {}", bookmark_id, e),
        }
    }

    /// テキストレンダリングプロキシから本文を取得する
    async fn fetch_rendered_text(&self, url: &str) -> Result<String> {
        let encoded = urlencoding::encode(strip_scheme(url)).into_owned();

        let response = self
            .client
            .get(format!("{}/{}", self.endpoint, encoded))
            .send()
            .await
            .map_err(|e| AppError::UpstreamError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamError(format!(
                "text proxy returned {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::UpstreamError(e.to_string()))
    }
}

/// 先頭の https:// または http:// を一度だけ取り除く
fn strip_scheme(url: &str) -> &str {
    if let Some(rest) = url.strip_prefix("https://") {
        rest
    } else if let Some(rest) = url.strip_prefix("http://") {
        rest
    } else {
        url
    }
}

// プロキシ出力のメタ行・装飾行・短すぎる行を捨てる
fn keep_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.contains("title:") || lower.contains("url source:") || lower.contains("markdown content:")
    {
        return false;
    }
    if line.contains("===") || line.contains("---") {
        return false;
    }
    if line.starts_with("![") || line.starts_with('#') {
        return false;
    }
    if line.chars().count() < 20 {
        return false;
    }
    if line.contains('©') || line.contains("Sign Up") || line.contains("Log In") {
        return false;
    }
    true
}

/// 本文から一行要約を導出する
/// 残った最初の行を整形して返す。候補が無ければ固定文言（成功扱い）
pub fn derive_summary(body: &str) -> String {
    let candidate = body.lines().map(str::trim).find(|line| keep_line(line));

    let Some(line) = candidate else {
        return EMPTY_SUMMARY.to_string();
    };

    let without_links = MARKDOWN_LINK.replace_all(line, "$1");
    let mut summary = MARKDOWN_GLYPHS
        .replace_all(&without_links, "")
        .trim()
        .to_string();

    if !summary.is_empty() && !summary.ends_with('.') {
        summary.push('.');
    }

    summary
}
