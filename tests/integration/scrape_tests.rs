//! Single-page scrape tests against a mock App Store listing

use crate::common::mount_page;
use app_harvest::config::{UserAgentConfig, DEFAULT_USER_AGENT};
use app_harvest::crawler::build_http_client;
use app_harvest::{scrape_app_page, InAppPurchase};
use chrono::NaiveDate;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A listing shaped like a real App Store page
fn listing_page(base: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <header class="product-header">
    <h1 class="product-header__title">
      Acme Puzzle&#8203;
      <span class="badge badge--product-title">4+</span>
    </h1>
    <h2 class="product-header__identity">
      <a class="link" href="https://apps.apple.com/us/developer/acme/id9">Acme Games</a>
    </h2>
    <ul class="app-header__list">
      <li class="app-header__list__item--price">Free</li>
    </ul>
    <figure class="we-star-rating">
      <figcaption class="we-rating-count star-rating__count">4.5 • 1.2K Ratings</figcaption>
    </figure>
  </header>

  <div class="whats-new__latest">
    <time datetime="2024-03-12T00:00:00.000Z" aria-label="March 12, 2024" class="">Mar 12, 2024</time>
  </div>

  <dl class="information-list">
    <dd class="information-list__item__definition">
      <a class="link" href="https://apps.apple.com/us/genre/ios-games/id6014"
         data-metrics-click='{{"actionType":"navigate","targetType":"link","targetId":"GenrePage"}}'>Games</a>
    </dd>
    <dd class="information-list__item__definition">
      <ol role="table">
        <div>
          <li class="list-with-numbers__item">
            <span class="list-with-numbers__item__title"><span class="truncate-single-line">Coin Pack</span></span>
            <span class="list-with-numbers__item__price">$0.99</span>
          </li>
        </div>
        <div>
          <li class="list-with-numbers__item">
            <span class="list-with-numbers__item__title"><span class="truncate-single-line">Remove Ads</span></span>
            <span class="list-with-numbers__item__price">$2.99</span>
          </li>
        </div>
      </ol>
    </dd>
  </dl>

  <ul class="inline-list inline-list--app-extensions">
    <li><a href="{base}/home"
           data-metrics-click='{{"actionDetails":{{"type":"developer"}},"targetId":"Developer Website"}}'>Developer Website</a></li>
    <li><a href="{base}/support"
           data-metrics-click='{{"actionDetails":{{"type":"support"}}}}'>App Support</a></li>
    <li><a href="{base}/privacy"
           data-metrics-click='{{"actionDetails":{{"type":"privacy"}}}}'>Privacy Policy</a></li>
    <li><a href="{base}/gone">Terms</a></li>
  </ul>

  <section class="l-content-width section">
    <a href="https://apps.apple.com/gb/app/acme-chess/id201"
       data-metrics-location='{{"locationType":"shelfCustomersAlsoBoughtApps"}}'>Acme Chess</a>
    <a href="https://apps.apple.com/us/app/other-puzzle/id202"
       data-metrics-location='{{"locationType":"shelfCustomersAlsoBoughtApps"}}'>Other Puzzle</a>
    <a href="https://apps.apple.com/us/app/more-by-acme/id203"
       data-metrics-location='{{"locationType":"shelfMoreByThisDeveloper"}}'>More by Acme</a>
  </section>
</body>
</html>"#,
        base = base
    )
}

const SUPPORT_PAGE: &str = r#"<html><body>
  <h2>Need help?</h2>
  <p>Write to help@acme.test and we will answer within a day.</p>
  <a href="/cdn-cgi/l/email-protection#335f5654525f7352505e561d47564047">[email&#160;protected]</a>
</body></html>"#;

const PRIVACY_PAGE: &str = r#"<html><body>
  <p>Questions about your data?
     <a href="mailto:privacy@acme.test?subject=Data%20request">Email us</a></p>
  <p>Press: <a href="/cdn-cgi/l/email-protection" class="__cf_email__"
     data-cfemail="5a2a283f29291a3b39373f742e3f292e">[email&#160;protected]</a></p>
  <p>Or write to help@acme.test.</p>
</body></html>"#;

#[tokio::test]
async fn test_scrape_listing_with_linked_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/us/app/acme-puzzle/id100",
        listing_page(&base_url),
    )
    .await;
    mount_page(&mock_server, "/home", "<html><body><h1>Acme</h1></body></html>".to_string()).await;
    mount_page(&mock_server, "/support", SUPPORT_PAGE.to_string()).await;
    mount_page(&mock_server, "/privacy", PRIVACY_PAGE.to_string()).await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
    let url = format!("{}/us/app/acme-puzzle/id100", base_url);
    let record = scrape_app_page(&client, &url).await;

    assert_eq!(record.id(), "id100");
    assert_eq!(record.url(), url);
    assert!(!record.is_minimal());

    let details = record.details();
    assert_eq!(details.title.as_deref(), Some("Acme Puzzle"));
    assert_eq!(details.developer.as_deref(), Some("Acme Games"));
    assert_eq!(details.price.as_deref(), Some("Free"));
    assert_eq!(details.rating.as_deref(), Some("4.5"));
    assert_eq!(details.number_of_ratings.as_deref(), Some("1200"));
    assert_eq!(details.last_updated, NaiveDate::from_ymd_opt(2024, 3, 12));
    assert_eq!(details.category.as_deref(), Some("Games"));
    assert_eq!(
        details.website.as_deref(),
        Some(format!("{}/home", base_url).as_str())
    );
    assert_eq!(
        details.in_app_purchases,
        vec![
            InAppPurchase {
                name: "Coin Pack".to_string(),
                price: "$0.99".to_string(),
            },
            InAppPurchase {
                name: "Remove Ads".to_string(),
                price: "$2.99".to_string(),
            },
        ]
    );
    assert_eq!(
        record.other_apps(),
        &[
            "https://apps.apple.com/gb/app/acme-chess/id201".to_string(),
            "https://apps.apple.com/us/app/other-puzzle/id202".to_string(),
        ]
    );

    // Provenance: the listing first, then each extension link in page order
    let sources: Vec<&str> = record.emails_by_url().keys().map(String::as_str).collect();
    assert_eq!(
        sources,
        vec![
            url.clone(),
            format!("{}/home", base_url),
            format!("{}/support", base_url),
            format!("{}/privacy", base_url),
            format!("{}/gone", base_url),
        ]
    );

    let emails_at = |suffix: &str| {
        let key = format!("{}{}", base_url, suffix);
        let mut emails: Vec<String> = record.emails_by_url()[&key].iter().cloned().collect();
        emails.sort();
        emails
    };
    assert!(record.emails_by_url()[&url].is_empty());
    assert!(emails_at("/home").is_empty());
    assert_eq!(emails_at("/support"), vec!["help@acme.test", "legal@acme.test"]);
    assert_eq!(
        emails_at("/privacy"),
        vec!["help@acme.test", "press@acme.test", "privacy@acme.test"]
    );
    assert!(emails_at("/gone").is_empty());

    // The union holds each address once
    let mut all: Vec<String> = record.all_emails().iter().cloned().collect();
    all.sort();
    assert_eq!(
        all,
        vec![
            "help@acme.test",
            "legal@acme.test",
            "press@acme.test",
            "privacy@acme.test"
        ]
    );
    assert!(record.has_emails());
}

#[tokio::test]
async fn test_unreachable_listing_yields_minimal_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/us/app/missing/id404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
    let url = format!("{}/us/app/missing/id404", mock_server.uri());
    let record = scrape_app_page(&client, &url).await;

    assert_eq!(record.id(), "id404");
    assert_eq!(record.url(), url);
    assert!(record.is_minimal());
    assert!(record.all_emails().is_empty());
    assert!(record.other_apps().is_empty());
}

#[tokio::test]
async fn test_every_request_carries_browser_user_agent() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let listing = format!(
        r#"<html><body><h1>UA</h1>
           <ul class="inline-list inline-list--app-extensions">
             <li><a href="{}/privacy">Privacy Policy</a></li>
           </ul></body></html>"#,
        base_url
    );

    Mock::given(method("GET"))
        .and(path("/us/app/ua/id1"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/privacy"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="mailto:ua@acme.test">Mail</a>"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
    let record = scrape_app_page(&client, &format!("{}/us/app/ua/id1", base_url)).await;

    // Both mocks only answer when the header matches
    assert_eq!(record.details().title.as_deref(), Some("UA"));
    assert!(record.all_emails().contains("ua@acme.test"));
}
