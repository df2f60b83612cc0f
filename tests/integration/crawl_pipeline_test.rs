// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{policy_text, stub_context};
use policrawl::domain::models::crawl::DomainStatus;
use policrawl::domain::services::crawl_service::CrawlService;
use policrawl::domain::services::summary::produce_summary;
use policrawl::workers::manager::WorkerManager;
use std::sync::Arc;

fn landing_page() -> String {
    r#"<html><body><h1>Welcome</h1>
        <p>Some landing page content.</p>
        <a href="/privacy-policy">Privacy Policy</a>
        </body></html>"#
        .to_string()
}

fn policy_page() -> String {
    format!("<html><body><p>{}</p></body></html>", policy_text())
}

#[tokio::test]
async fn test_unreachable_domain_is_no_access() {
    let out = tempfile::tempdir().unwrap();
    let ctx = stub_context(&[], 1, 2, out.path(), out.path());
    let service = CrawlService::new(ctx.clone());

    let result = service.crawl("dark.com").await.unwrap();
    assert!(!result.access_success);
    assert!(result.links.is_empty());
    assert_eq!(result.status(), DomainStatus::NoAccess);
    assert_eq!(ctx.progress.completed(), 1);

    let summary = produce_summary(&[Ok(result)]);
    assert!(summary.contains("Could not access 1 (100.00%) domains."));
    assert!(summary.contains("dark.com -- NO_ACCESS"));
}

#[tokio::test]
async fn test_domain_without_candidate_links_is_no_links() {
    let out = tempfile::tempdir().unwrap();
    let pages = [(
        "https://plain.com",
        "<html><body><p>Nothing to see here.</p><a href=\"/about\">About</a></body></html>",
    )];
    let ctx = stub_context(&pages, 1, 2, out.path(), out.path());
    let service = CrawlService::new(ctx.clone());

    let result = service.crawl("plain.com").await.unwrap();
    assert!(result.access_success);
    assert!(result.links.is_empty());
    assert_eq!(result.status(), DomainStatus::NoLinks);
    assert_eq!(ctx.progress.completed(), 1);
}

#[tokio::test]
async fn test_policy_found_and_persisted() {
    let html_out = tempfile::tempdir().unwrap();
    let text_out = tempfile::tempdir().unwrap();
    let landing = landing_page();
    let policy = policy_page();
    let pages = [
        ("https://good.com", landing.as_str()),
        ("https://good.com/privacy-policy", policy.as_str()),
    ];
    let ctx = stub_context(&pages, 1, 2, html_out.path(), text_out.path());
    let service = CrawlService::new(ctx.clone());

    let result = service.crawl("good.com").await.unwrap();
    assert_eq!(result.status(), DomainStatus::Successful);
    assert_eq!(result.links.len(), 1);

    let link = &result.links[0];
    assert_eq!(link.url, "https://good.com/privacy-policy");
    assert!(link.is_policy);
    assert!(!link.is_duplicate);
    assert!(link.sim_score >= 0.6);

    // raw html goes to one artifact, extracted text to the other
    let html_artifact = html_out.path().join("good_1.html");
    let text_artifact = text_out.path().join("good_1.txt");
    assert_eq!(link.html_outfile, html_artifact.to_string_lossy());
    assert_eq!(link.text_outfile, text_artifact.to_string_lossy());
    let html_contents = std::fs::read_to_string(&html_artifact).unwrap();
    assert!(html_contents.contains("<p>"));
    let text_contents = std::fs::read_to_string(&text_artifact).unwrap();
    assert!(text_contents.contains("We collect your personal data"));
    assert!(!text_contents.contains("<p>"));
}

#[tokio::test]
async fn test_rejected_page_keeps_score_but_no_artifacts() {
    let out = tempfile::tempdir().unwrap();
    let landing = landing_page();
    let pages = [
        ("https://news.com", landing.as_str()),
        (
            "https://news.com/privacy-policy",
            "<html><body><p>The weather report for today is sunny all morning.</p></body></html>",
        ),
    ];
    let ctx = stub_context(&pages, 1, 2, out.path(), out.path());
    let service = CrawlService::new(ctx);

    let result = service.crawl("news.com").await.unwrap();
    let link = &result.links[0];
    assert!(link.access_success);
    assert!(!link.is_policy);
    assert!(link.sim_score < 0.6);
    assert_eq!(link.html_outfile, "N/A");
    assert_eq!(link.text_outfile, "N/A");
    assert_eq!(result.status(), DomainStatus::NoValidLinks);
}

#[tokio::test]
async fn test_non_english_page_scores_zero() {
    let out = tempfile::tempdir().unwrap();
    let landing = landing_page();
    let pages = [
        ("https://ru.com", landing.as_str()),
        (
            "https://ru.com/privacy-policy",
            "<html><body><p>Политика конфиденциальности описывает обработку данных.</p></body></html>",
        ),
    ];
    let ctx = stub_context(&pages, 1, 2, out.path(), out.path());
    let service = CrawlService::new(ctx);

    let result = service.crawl("ru.com").await.unwrap();
    let link = &result.links[0];
    assert!(link.access_success);
    assert!(!link.is_policy);
    assert_eq!(link.sim_score, 0.0);
    assert_eq!(result.status(), DomainStatus::NoValidLinks);
}

#[tokio::test]
async fn test_unreachable_link_recorded_and_crawl_continues() {
    let html_out = tempfile::tempdir().unwrap();
    let text_out = tempfile::tempdir().unwrap();
    let policy = policy_page();
    let pages = [
        (
            "https://half.com",
            r#"<html><body><p>landing</p>
            <a href="/privacy-dead">Privacy (old)</a>
            <a href="/privacy-policy">Privacy Policy</a>
            </body></html>"#,
        ),
        ("https://half.com/privacy-policy", policy.as_str()),
    ];
    let ctx = stub_context(&pages, 1, 2, html_out.path(), text_out.path());
    let service = CrawlService::new(ctx);

    let result = service.crawl("half.com").await.unwrap();
    assert_eq!(result.links.len(), 2);
    assert!(!result.links[0].access_success);
    assert_eq!(result.links[0].sim_score, 0.0);
    assert!(result.links[1].is_policy);
    assert_eq!(result.status(), DomainStatus::Successful);
}

#[tokio::test]
async fn test_identical_policies_deduplicated_across_domains() {
    let html_out = tempfile::tempdir().unwrap();
    let text_out = tempfile::tempdir().unwrap();
    let landing = landing_page();
    let policy = policy_page();
    let pages = [
        ("https://first.com", landing.as_str()),
        ("https://first.com/privacy-policy", policy.as_str()),
        ("https://second.com", landing.as_str()),
        ("https://second.com/privacy-policy", policy.as_str()),
    ];
    let ctx = stub_context(&pages, 2, 2, html_out.path(), text_out.path());
    let service = CrawlService::new(ctx.clone());

    let first = service.crawl("first.com").await.unwrap();
    let second = service.crawl("second.com").await.unwrap();

    assert!(first.links[0].is_policy);
    assert!(!first.links[0].is_duplicate);
    assert!(html_out.path().join("first_1.html").exists());

    // the second domain sees byte-identical text and is flagged, not persisted
    assert!(second.links[0].is_policy);
    assert!(second.links[0].is_duplicate);
    assert_eq!(second.links[0].sim_score, 0.0);
    assert_eq!(second.links[0].html_outfile, "N/A");
    assert!(!html_out.path().join("second_1.html").exists());

    // a duplicate of a policy still counts as a successful domain
    assert_eq!(second.status(), DomainStatus::Successful);
    assert_eq!(ctx.duplicates.owner(policy_text()).as_deref(), Some("first.com"));
}

#[tokio::test]
async fn test_depth_budget_expands_discovered_links() {
    let html_out = tempfile::tempdir().unwrap();
    let text_out = tempfile::tempdir().unwrap();
    let policy = policy_page();
    let pages = [
        (
            "https://hub.com",
            r#"<html><body><p>landing</p><a href="/privacy-hub">Privacy</a></body></html>"#,
        ),
        (
            "https://hub.com/privacy-hub",
            r#"<html><body><p>All our privacy documents.</p>
            <a href="/privacy-policy">Privacy Policy</a></body></html>"#,
        ),
        ("https://hub.com/privacy-policy", policy.as_str()),
    ];
    let ctx = stub_context(&pages, 1, 1, html_out.path(), text_out.path());
    let service = CrawlService::new(ctx);

    let result = service.crawl("hub.com").await.unwrap();
    // the hub page consumed the single expansion slot and queued the real policy
    assert_eq!(result.links.len(), 2);
    assert_eq!(result.links[0].url, "https://hub.com/privacy-hub");
    assert_eq!(result.links[1].url, "https://hub.com/privacy-policy");
    assert!(result.links[1].is_policy);
    assert_eq!(result.status(), DomainStatus::Successful);
}

#[tokio::test]
async fn test_depth_budget_of_zero_never_expands() {
    let out = tempfile::tempdir().unwrap();
    let pages = [
        (
            "https://hub.com",
            r#"<html><body><p>landing</p><a href="/privacy-hub">Privacy</a></body></html>"#,
        ),
        (
            "https://hub.com/privacy-hub",
            r#"<html><body><p>All our privacy documents.</p>
            <a href="/privacy-policy">Privacy Policy</a></body></html>"#,
        ),
    ];
    let ctx = stub_context(&pages, 1, 0, out.path(), out.path());
    let service = CrawlService::new(ctx);

    let result = service.crawl("hub.com").await.unwrap();
    assert_eq!(result.links.len(), 1);
    assert_eq!(result.links[0].url, "https://hub.com/privacy-hub");
}

#[tokio::test]
async fn test_worker_pool_preserves_input_order() {
    let html_out = tempfile::tempdir().unwrap();
    let text_out = tempfile::tempdir().unwrap();
    let landing = landing_page();
    let policy = policy_page();
    let pages = [
        ("https://a.com", landing.as_str()),
        ("https://a.com/privacy-policy", policy.as_str()),
        (
            "https://b.com",
            "<html><body><p>No policy links here.</p></body></html>",
        ),
    ];
    let domains = vec![
        "a.com".to_string(),
        "dark.com".to_string(),
        "b.com".to_string(),
    ];
    let ctx = stub_context(&pages, domains.len(), 2, html_out.path(), text_out.path());
    let service = Arc::new(CrawlService::new(ctx.clone()));
    let manager = WorkerManager::new(service, Some(4));

    let results = manager.run(domains).await;
    assert_eq!(results.len(), 3);

    let collected: Vec<&str> = results
        .iter()
        .map(|r| r.as_ref().unwrap().domain.as_str())
        .collect();
    assert_eq!(collected, vec!["a.com", "dark.com", "b.com"]);

    assert_eq!(results[0].as_ref().unwrap().status(), DomainStatus::Successful);
    assert_eq!(results[1].as_ref().unwrap().status(), DomainStatus::NoAccess);
    assert_eq!(results[2].as_ref().unwrap().status(), DomainStatus::NoLinks);
    assert_eq!(ctx.progress.completed(), 3);

    let summary = produce_summary(&results);
    assert!(summary.contains("# of Successful Domains = 1 (33.33%)."));
    assert!(summary.contains("dark.com -- NO_ACCESS"));
    assert!(summary.contains("b.com -- NO_LINKS"));
}
