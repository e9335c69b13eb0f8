//! Integration tests for the hosting provider against a wiremock GitHub API

use chrono::{NaiveDate, Utc};
use repo_activity::facts::RepoSpec;
use repo_activity::facts::hosting::{CommitterActivity, Credentials, Filters, Provider, StateSummary};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const FUTURE: &str = "2999-01-01T00:00:00Z";
const PAST: &str = "2020-01-01T00:00:00Z";

fn repo() -> RepoSpec {
    RepoSpec::parse("o/r").expect("valid repo spec")
}

fn commit(login: Option<&str>) -> Value {
    login.map_or_else(
        || json!({"sha": "0", "committer": null}),
        |login| json!({"sha": "0", "committer": {"login": login, "id": 1}}),
    )
}

fn item(state: &str, created_at: &str) -> Value {
    json!({"number": 1, "state": state, "created_at": created_at})
}

fn link_header(server: &MockServer, resource: &str, last: u32) -> String {
    let base = format!("{}/repos/o/r/{resource}", server.uri());
    format!(r#"<{base}?page=2&per_page=100>; rel="next", <{base}?page={last}&per_page=100>; rel="last""#)
}

async fn mount_page(server: &MockServer, resource: &str, page: u32, body: Value, link: Option<String>, expected_hits: u64) {
    let mut template = ResponseTemplate::new(200).set_body_json(body);
    if let Some(link) = link {
        template = template.insert_header("link", link.as_str());
    }

    Mock::given(method("GET"))
        .and(path(format!("/repos/o/r/{resource}")))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .expect(expected_hits)
        .mount(server)
        .await;
}

async fn requests_for(server: &MockServer, resource: &str) -> Vec<Request> {
    let suffix = format!("/repos/o/r/{resource}");
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|r| r.url.path() == suffix)
        .collect()
}

/// Error text including any context added on the way up
fn describe(err: &ohno::AppError) -> String {
    format!("{err} {err:?}")
}

fn query_value(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

#[tokio::test]
async fn test_top_committers_walks_every_page_in_order() {
    let server = MockServer::start().await;
    let link = link_header(&server, "commits", 3);

    // page 1 is read once for the page count and once for its records
    mount_page(&server, "commits", 1, json!([commit(Some("a")), commit(Some("b")), commit(Some("a"))]), Some(link.clone()), 2).await;
    mount_page(&server, "commits", 2, json!([commit(Some("c")), commit(None), commit(Some("a"))]), Some(link.clone()), 1).await;
    mount_page(&server, "commits", 3, json!([commit(Some("b"))]), Some(link), 1).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let filters = Filters {
        branch: Some("master".to_string()),
        since: None,
        until: None,
    };

    let committers = provider.get_top_committers(&repo(), &filters).await.expect("committers");

    assert_eq!(
        committers,
        vec![
            CommitterActivity {
                login: "a".to_string(),
                commits: 3
            },
            CommitterActivity {
                login: "b".to_string(),
                commits: 2
            },
            CommitterActivity {
                login: "c".to_string(),
                commits: 1
            },
        ]
    );

    let pages: Vec<String> = requests_for(&server, "commits")
        .await
        .iter()
        .filter_map(|r| query_value(r, "page"))
        .collect();
    assert_eq!(pages, vec!["1", "1", "2", "3"]);
}

#[tokio::test]
async fn test_commit_filters_are_sent_as_query_parameters() {
    let server = MockServer::start().await;
    mount_page(&server, "commits", 1, json!([]), None, 2).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let filters = Filters {
        branch: Some("dev".to_string()),
        since: NaiveDate::from_ymd_opt(2024, 1, 1),
        until: NaiveDate::from_ymd_opt(2024, 6, 30),
    };

    let committers = provider.get_top_committers(&repo(), &filters).await.expect("committers");
    assert!(committers.is_empty());

    for request in requests_for(&server, "commits").await {
        assert_eq!(query_value(&request, "per_page").as_deref(), Some("100"));
        assert_eq!(query_value(&request, "sha").as_deref(), Some("dev"));
        assert_eq!(query_value(&request, "since").as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(query_value(&request, "until").as_deref(), Some("2024-06-30T00:00:00Z"));
        assert_eq!(query_value(&request, "state"), None);
        assert_eq!(query_value(&request, "client_id"), None);
    }
}

#[tokio::test]
async fn test_unset_dates_are_not_sent() {
    let server = MockServer::start().await;
    mount_page(&server, "commits", 1, json!([]), None, 2).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let filters = Filters {
        branch: None,
        since: NaiveDate::from_ymd_opt(2024, 1, 1),
        until: None,
    };

    let _ = provider.get_top_committers(&repo(), &filters).await.expect("committers");

    for request in requests_for(&server, "commits").await {
        assert_eq!(query_value(&request, "sha"), None);
        assert_eq!(query_value(&request, "since").as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(query_value(&request, "until"), None);
    }
}

#[tokio::test]
async fn test_pull_requests_are_summarized_across_states() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "pulls",
        1,
        json!([item("open", FUTURE), item("closed", PAST), item("open", PAST), item("closed", PAST), item("closed", FUTURE)]),
        None,
        2,
    )
    .await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let summary = provider.get_pull_requests(&repo(), Utc::now()).await.expect("pull requests");

    assert_eq!(summary, StateSummary { open: 2, closed: 3, stale: 3 });

    for request in requests_for(&server, "pulls").await {
        assert_eq!(query_value(&request, "state").as_deref(), Some("all"));
        assert_eq!(query_value(&request, "sha"), None);
    }
}

#[tokio::test]
async fn test_issues_with_two_pages() {
    let server = MockServer::start().await;
    let link = link_header(&server, "issues", 2);
    mount_page(&server, "issues", 1, json!([item("open", PAST), item("closed", FUTURE)]), Some(link.clone()), 2).await;
    mount_page(&server, "issues", 2, json!([item("open", FUTURE)]), Some(link), 1).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let summary = provider.get_issues(&repo(), Utc::now()).await.expect("issues");

    assert_eq!(summary, StateSummary { open: 2, closed: 1, stale: 1 });
}

#[tokio::test]
async fn test_credentials_are_sent_on_every_request() {
    let server = MockServer::start().await;
    mount_page(&server, "issues", 1, json!([]), None, 2).await;

    let provider = Provider::new(&server.uri(), Some(Credentials::new("my-id", "my-secret"))).expect("provider");
    let summary = provider.get_issues(&repo(), Utc::now()).await.expect("issues");
    assert_eq!(summary, StateSummary::default());

    let requests = requests_for(&server, "issues").await;
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(query_value(&request, "client_id").as_deref(), Some("my-id"));
        assert_eq!(query_value(&request, "client_secret").as_deref(), Some("my-secret"));
    }
}

#[tokio::test]
async fn test_full_activity_report() {
    let server = MockServer::start().await;
    mount_page(&server, "commits", 1, json!([commit(Some("x")), commit(Some("y")), commit(Some("y"))]), None, 2).await;
    mount_page(&server, "pulls", 1, json!([item("open", PAST)]), None, 2).await;
    mount_page(&server, "issues", 1, json!([item("closed", FUTURE)]), None, 2).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let report = provider
        .get_activity(&repo(), &Filters::default(), Utc::now())
        .await
        .expect("activity");

    assert_eq!(report.repository, "o/r");
    assert_eq!(report.top_committers.len(), 2);
    assert_eq!(report.top_committers[0].login, "y");
    assert_eq!(report.pull_requests, StateSummary { open: 1, closed: 0, stale: 1 });
    assert_eq!(report.issues, StateSummary { open: 0, closed: 1, stale: 0 });
}

#[tokio::test]
async fn test_missing_repository_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let err = provider.get_top_committers(&repo(), &Filters::default()).await.unwrap_err();

    assert!(describe(&err).contains("not found"), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_exhausted_rate_limit_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1704067200")
                .set_body_json(json!({"message": "API rate limit exceeded"})),
        )
        .mount(&server)
        .await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let err = provider.get_pull_requests(&repo(), Utc::now()).await.unwrap_err();

    assert!(describe(&err).contains("rate limit exceeded"), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_failure_on_a_later_page_aborts_the_walk() {
    let server = MockServer::start().await;
    let link = link_header(&server, "issues", 3);
    mount_page(&server, "issues", 1, json!([item("open", PAST)]), Some(link), 2).await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // never reached
    mount_page(&server, "issues", 3, json!([]), None, 0).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let err = provider.get_issues(&repo(), Utc::now()).await.unwrap_err();

    assert!(describe(&err).contains("500"), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_malformed_records_fail_to_decode() {
    let server = MockServer::start().await;
    mount_page(&server, "pulls", 1, json!([{"state": "open", "created_at": "2020-01-01"}]), None, 2).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let _ = provider.get_pull_requests(&repo(), Utc::now()).await.unwrap_err();
}

#[tokio::test]
async fn test_invalid_last_page_fails() {
    let server = MockServer::start().await;
    let link = format!(r#"<{}/repos/o/r/commits?page=abc>; rel="last""#, server.uri());
    mount_page(&server, "commits", 1, json!([]), Some(link), 1).await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let _ = provider.get_top_committers(&repo(), &Filters::default()).await.unwrap_err();
}

#[tokio::test]
async fn test_unrecognized_state_counts_toward_age_only() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "issues",
        1,
        json!([item("open", FUTURE), item("draft", PAST), item("closed", FUTURE)]),
        None,
        2,
    )
    .await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let summary = provider.get_issues(&repo(), Utc::now()).await.expect("issues");

    assert_eq!(summary, StateSummary { open: 1, closed: 1, stale: 1 });
}

#[tokio::test]
async fn test_committer_without_login_is_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "commits",
        1,
        json!([commit(Some("a")), {"sha": "1", "committer": {}}, commit(Some("a"))]),
        None,
        2,
    )
    .await;

    let provider = Provider::new(&server.uri(), None).expect("provider");
    let committers = provider.get_top_committers(&repo(), &Filters::default()).await.expect("committers");

    assert_eq!(
        committers,
        vec![CommitterActivity {
            login: "a".to_string(),
            commits: 2
        }]
    );
}
