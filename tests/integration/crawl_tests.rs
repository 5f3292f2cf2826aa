//! Integration tests for the crawl loop
//!
//! These tests use wiremock to serve listings and check batching, the
//! ignore set, depth expansion and CSV persistence end-to-end.

use crate::common::{create_test_config, mount_page, simple_listing};
use app_harvest::crawler::{load_frontier, run_crawl, Coordinator};
use app_harvest::output::{CsvOutput, MemoryOutput};
use app_harvest::Frontier;
use std::fs;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_crawl_records_every_batch() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    for i in 1..=3 {
        mount_page(
            &mock_server,
            &format!("/us/app/app-{}/id{}", i, i),
            simple_listing(&format!("App {}", i), Some(&format!("dev{}@studio.test", i)), &[]),
        )
        .await;
    }

    let urls: Vec<String> = (1..=3)
        .map(|i| format!("{}/us/app/app-{}/id{}", base_url, i, i))
        .collect();

    let memory = MemoryOutput::new();
    let config = create_test_config(dir.path(), 0, 2);
    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();
    let stats = coordinator
        .run(Frontier::new(urls, Vec::<String>::new()))
        .await
        .expect("Crawl failed");

    let sizes: Vec<usize> = memory.batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 1]);

    let ids: Vec<String> = memory.records().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["id1", "id2", "id3"]);

    assert_eq!(stats.steps, 1);
    assert_eq!(stats.apps_scraped, 3);
    assert_eq!(stats.apps_with_emails, 3);
    assert_eq!(stats.emails_found, 3);
}

#[tokio::test]
async fn test_failed_pages_do_not_abort_the_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/us/app/ok/id1",
        simple_listing("Working App", None, &[]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/us/app/broken/id2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let urls = vec![
        format!("{}/us/app/broken/id2", base_url),
        format!("{}/us/app/ok/id1", base_url),
    ];

    let memory = MemoryOutput::new();
    let config = create_test_config(dir.path(), 0, 5);
    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();
    let stats = coordinator
        .run(Frontier::new(urls, Vec::<String>::new()))
        .await
        .expect("Crawl failed");

    let records = memory.records();
    assert_eq!(records.len(), 2);
    assert!(records[0].is_minimal());
    assert_eq!(
        records[1].details().title.as_deref(),
        Some("Working App")
    );
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.apps_without_emails, 2);
}

#[tokio::test]
async fn test_ignored_apps_are_never_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(&mock_server, "/us/app/new/id1", simple_listing("New", None, &[])).await;
    Mock::given(method("GET"))
        .and(path("/us/app/done/id2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    fs::write(
        dir.path().join("apps.csv"),
        format!(
            "{base}/us/app/new/id1\n{base}/us/app/done/id2\n{base}/us/app/new/id1\n",
            base = base_url
        ),
    )
    .unwrap();
    fs::write(dir.path().join("ignore.csv"), "id2,Done App,someone@done.test\n").unwrap();

    let memory = MemoryOutput::new();
    let config = create_test_config(dir.path(), 0, 5);
    let frontier = load_frontier(&config).unwrap();
    assert_eq!(frontier.pending().len(), 1);
    assert!(frontier.is_ignored(&format!("{}/us/app/done/id2", base_url)));

    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();
    coordinator.run(frontier).await.expect("Crawl failed");

    let ids: Vec<String> = memory.records().iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, vec!["id1"]);
}

#[tokio::test]
async fn test_related_apps_form_the_next_step() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/us/app/seed/id1",
        simple_listing(
            "Seed",
            None,
            &[
                "https://apps.apple.com/gb/app/chess/id10",
                "https://apps.apple.com/us/app/chess-again/id10",
                "https://apps.apple.com/us/app/seen/id11",
                "https://apps.apple.com/us/app/go/id12",
            ],
        ),
    )
    .await;

    let seed = format!("{}/us/app/seed/id1", base_url);
    let memory = MemoryOutput::new();
    let config = create_test_config(dir.path(), 1, 5);
    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();

    let next = coordinator
        .crawl_step(Frontier::new(vec![seed], vec!["id11"]))
        .await
        .expect("Step failed");

    assert_eq!(next.completed_steps(), 1);
    assert_eq!(
        next.pending(),
        &[
            "https://apps.apple.com/us/app/chess/id10".to_string(),
            "https://apps.apple.com/us/app/go/id12".to_string(),
        ]
    );
    assert!(next.is_ignored("id1"));
}

#[tokio::test]
async fn test_depth_zero_stops_after_first_step() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/us/app/seed/id1",
        simple_listing("Seed", None, &["https://apps.apple.com/us/app/chess/id10"]),
    )
    .await;

    let memory = MemoryOutput::new();
    let config = create_test_config(dir.path(), 0, 5);
    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();

    let frontier = Frontier::new(vec![format!("{}/us/app/seed/id1", base_url)], Vec::<String>::new());
    let stats = coordinator.run(frontier).await.expect("Crawl failed");

    assert_eq!(stats.steps, 1);
    assert_eq!(memory.records().len(), 1);
    assert_eq!(
        memory.records()[0].other_apps(),
        &["https://apps.apple.com/us/app/chess/id10".to_string()]
    );
}

#[tokio::test]
async fn test_skip_first_step_writes_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/us/app/seed/id1",
        simple_listing("Seed", Some("dev@studio.test"), &[]),
    )
    .await;

    let memory = MemoryOutput::new();
    let mut config = create_test_config(dir.path(), 0, 5);
    config.crawler.record_first_step = false;
    let mut coordinator = Coordinator::with_output(config, Box::new(memory.clone())).unwrap();

    let frontier = Frontier::new(vec![format!("{}/us/app/seed/id1", base_url)], Vec::<String>::new());
    let stats = coordinator.run(frontier).await.expect("Crawl failed");

    assert!(memory.batches().is_empty());
    assert_eq!(stats.apps_scraped, 1);
}

#[tokio::test]
async fn test_run_crawl_appends_dated_csv_files() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = tempfile::tempdir().unwrap();

    mount_page(
        &mock_server,
        "/us/app/mail/id1",
        simple_listing("Mail, Inc. App", Some("hello@mail.test"), &[]),
    )
    .await;
    mount_page(&mock_server, "/us/app/quiet/id2", simple_listing("Quiet", None, &[])).await;

    fs::write(
        dir.path().join("apps.csv"),
        format!(
            "{base}/us/app/mail/id1\n{base}/us/app/quiet/id2\n",
            base = base_url
        ),
    )
    .unwrap();

    let config = create_test_config(dir.path(), 0, 5);
    let output = CsvOutput::for_today(&config.output);
    let stats = run_crawl(config).await.expect("Crawl failed");
    assert_eq!(stats.apps_scraped, 2);

    let found = fs::read_to_string(output.found_path()).expect("found-emails file missing");
    let found_lines: Vec<&str> = found.lines().collect();
    assert_eq!(found_lines.len(), 2);
    assert!(found_lines[0].starts_with("ID,URL,App Name,Developer"));
    assert!(found_lines[1].starts_with(&format!("id1,{}/us/app/mail/id1,Mail  Inc. App,", base_url)));
    assert!(found_lines[1].contains(",hello@mail.test,"));

    let none = fs::read_to_string(output.no_emails_path()).expect("no-emails file missing");
    let none_lines: Vec<&str> = none.lines().collect();
    assert_eq!(none_lines.len(), 2);
    assert!(none_lines[1].starts_with("id2,"));
    assert!(none_lines[1].contains(",Quiet,"));
}
