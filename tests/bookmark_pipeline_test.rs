use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use linksaver::error::AppError;
use linksaver::repositories::{
    Bookmark, BookmarkHandler, BookmarkRepository, BookmarkStatus,
};
use linksaver::services::{
    BookmarkService, FAILED_SUMMARY, PLACEHOLDER_SUMMARY, SummaryService,
};
use uuid::Uuid;

mod common;

fn sample_bookmark(user_id: &str, created_at: chrono::DateTime<Utc>) -> Bookmark {
    Bookmark {
        bookmark_id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        url: "https://example.com".to_string(),
        title: "Page from example.com".to_string(),
        favicon: "https://www.google.com/s2/favicons?domain=example.com&sz=32".to_string(),
        summary: PLACEHOLDER_SUMMARY.to_string(),
        status: BookmarkStatus::Processing,
        created_at,
    }
}

#[tokio::test]
async fn list_returns_newest_first() {
    let pool = common::test_pool().await;
    let repo = BookmarkRepository::new(pool);

    let now = Utc::now();
    let older = sample_bookmark("u1", now - TimeDelta::seconds(10));
    let newer = sample_bookmark("u1", now);
    repo.create(older.clone()).await.unwrap();
    repo.create(newer.clone()).await.unwrap();

    let listed = repo.find_by_user_id("u1").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].bookmark_id, newer.bookmark_id);
    assert_eq!(listed[1].bookmark_id, older.bookmark_id);
}

#[tokio::test]
async fn list_is_scoped_to_the_owner() {
    let pool = common::test_pool().await;
    let repo = BookmarkRepository::new(pool);

    repo.create(sample_bookmark("u1", Utc::now())).await.unwrap();
    repo.create(sample_bookmark("u2", Utc::now())).await.unwrap();

    let listed = repo.find_by_user_id("u1").await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, "u1");
}

#[tokio::test]
async fn delete_by_non_owner_is_not_found_and_leaves_row() {
    let pool = common::test_pool().await;
    let repo = Arc::new(BookmarkRepository::new(pool));
    let summary = Arc::new(SummaryService::new(
        Arc::clone(&repo),
        "http://127.0.0.1:1".to_string(),
    ));
    let service = BookmarkService::new(Arc::clone(&repo), summary);

    let bookmark = sample_bookmark("owner", Utc::now());
    repo.create(bookmark.clone()).await.unwrap();

    let err = service
        .delete("intruder", &bookmark.bookmark_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    assert_eq!(repo.find_by_user_id("owner").await.unwrap().len(), 1);

    // 所有者による削除は成功し、以後の一覧から消える
    service.delete("owner", &bookmark.bookmark_id).await.unwrap();
    assert!(repo.find_by_user_id("owner").await.unwrap().is_empty());
}

#[tokio::test]
async fn summary_update_only_transitions_processing_rows() {
    let pool = common::test_pool().await;
    let repo = BookmarkRepository::new(pool);

    let bookmark = sample_bookmark("u1", Utc::now());
    repo.create(bookmark.clone()).await.unwrap();

    let transitioned = repo
        .update_summary(&bookmark.bookmark_id, "First summary.", BookmarkStatus::Completed)
        .await
        .unwrap();
    assert!(transitioned);

    // 確定済みの行は後からの書き込みで上書きされない
    let second = repo
        .update_summary(&bookmark.bookmark_id, "Racing summary.", BookmarkStatus::Failed)
        .await
        .unwrap();
    assert!(!second);

    let listed = repo.find_by_user_id("u1").await.unwrap();
    assert_eq!(listed[0].summary, "First summary.");
    assert_eq!(listed[0].status, BookmarkStatus::Completed);
}

#[tokio::test]
async fn unreachable_proxy_marks_bookmark_failed_without_touching_metadata() {
    let pool = common::test_pool().await;
    let repo = Arc::new(BookmarkRepository::new(pool));
    let summary = SummaryService::new(Arc::clone(&repo), "http://127.0.0.1:1".to_string());

    let bookmark = sample_bookmark("u1", Utc::now());
    repo.create(bookmark.clone()).await.unwrap();

    summary
        .generate_and_store(&bookmark.bookmark_id, &bookmark.url)
        .await;

    let listed = repo.find_by_user_id("u1").await.unwrap();
    assert_eq!(listed[0].status, BookmarkStatus::Failed);
    assert_eq!(listed[0].summary, FAILED_SUMMARY);
    assert_eq!(listed[0].title, bookmark.title);
    assert_eq!(listed[0].favicon, bookmark.favicon);
}

/// register相当の行を挟まない、パイプライン部分のエンドツーエンド:
/// 作成 -> 即時一覧は processing -> プロキシ応答後の一覧は completed
#[tokio::test]
async fn pipeline_completes_against_stub_proxy() {
    const PROXY_BODY: &str = "Title: Example Domain\n\
        URL Source: https://example.com\n\
        Markdown Content:\n\
        ===============\n\
        This page demonstrates asynchronous bookmark summaries end to end\n";

    // 固定テキストを返すスタブプロキシ
    let stub = axum::Router::new().fallback(|| async { PROXY_BODY });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let proxy_addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let pool = common::test_pool().await;
    let repo = Arc::new(BookmarkRepository::new(pool));
    let summary = Arc::new(SummaryService::new(
        Arc::clone(&repo),
        format!("http://{}", proxy_addr),
    ));
    let service = BookmarkService::new(Arc::clone(&repo), summary);

    let created = service
        .create("u1", "https://example.com".to_string())
        .await
        .unwrap();

    // 作成直後は processing とプレースホルダーが見える
    assert_eq!(created.status, BookmarkStatus::Processing);
    assert_eq!(created.summary, PLACEHOLDER_SUMMARY);
    let immediate = service.list("u1").await.unwrap();
    assert_eq!(immediate[0].status, BookmarkStatus::Processing);

    // バックグラウンドの確定をポーリングで待つ
    let mut finished = None;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        let listed = service.list("u1").await.unwrap();
        if listed[0].status != BookmarkStatus::Processing {
            finished = Some(listed.into_iter().next().unwrap());
            break;
        }
    }

    let finished = finished.expect("summary never completed");
    assert_eq!(finished.status, BookmarkStatus::Completed);
    assert_eq!(
        finished.summary,
        "This page demonstrates asynchronous bookmark summaries end to end."
    );
    assert!(finished.summary.ends_with('.'));
}
