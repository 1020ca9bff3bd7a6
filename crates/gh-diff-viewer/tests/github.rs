#![cfg(feature = "github")]

use gh_client::{OctocrabClient, PullRequestRef, RequestConfig};
use gh_diff_viewer::github::{load_pull_request, GithubCommentHandler, GithubContextProvider};
use gh_diff_viewer::{
    CommentError, CommentHandler, ContextProvider, DiffAction, DiffEvent, DiffSide,
    ExpandDirection, ReviewEvent,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs
index 111..222 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -3,3 +3,3 @@ mod tests
 fn one() {}
-fn two() {}
+fn two() -> u8 { 2 }
 fn three() {}
";

fn client_for(server: &MockServer, token: Option<&str>) -> Arc<OctocrabClient> {
    let mut config = RequestConfig::new(server.uri());
    if let Some(token) = token {
        config = config.with_token(token);
    }
    Arc::new(OctocrabClient::from_config(&config).unwrap())
}

fn pr() -> PullRequestRef {
    PullRequestRef::new("octo", "widgets", 7)
}

async fn mount_pull_request(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/pulls/7"))
        .and(wiremock::matchers::header("accept", "application/vnd.github.v3.diff"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DIFF))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/pulls/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": 7,
            "title": "Return a number",
            "body": null,
            "state": "open",
            "user": {"login": "author"},
            "head": {"ref": "feature", "sha": "head123"},
            "base": {"ref": "main", "sha": "base456"},
            "html_url": "https://github.com/octo/widgets/pull/7",
            "additions": 1,
            "deletions": 1,
            "changed_files": 1,
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/pulls/7/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": 31,
            "path": "src/lib.rs",
            "line": 4,
            "original_line": 4,
            "side": "RIGHT",
            "body": "nice",
            "user": {"login": "reviewer"},
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn loads_pull_request_into_viewer_state() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    let client = client_for(&server, None);
    let loaded = load_pull_request(client.as_ref(), &pr()).await.unwrap();

    assert_eq!(loaded.pull_request.title, "Return a number");
    assert_eq!(loaded.diff.head_sha, "head123");
    assert_eq!(loaded.diff.files.len(), 1);
    assert_eq!(loaded.comments.len(), 1);
    assert_eq!(loaded.comments[0].author, "reviewer");

    let state = loaded.into_viewer_state();
    assert_eq!(state.remote_comments.len(), 1);
    assert_eq!(state.hidden_lines_before(0, 0), 2);
}

#[tokio::test]
async fn expansion_is_answered_from_head_contents() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/widgets/contents/src/lib.rs"))
        .and(query_param("ref", "head123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("use std::fmt;\n\nfn one() {}\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let mut state = load_pull_request(client.as_ref(), &pr())
        .await
        .unwrap()
        .into_viewer_state();
    let provider = GithubContextProvider::new(client.clone(), pr().repo);

    let events = state.handle_action(DiffAction::ExpandContext {
        file: 0,
        hunk: 0,
        direction: ExpandDirection::Up,
    });
    let request = match &events[..] {
        [DiffEvent::RequestContext(request)] => request.clone(),
        other => panic!("unexpected events {other:?}"),
    };

    let lines = provider.fetch_for(&request).await.unwrap();
    assert_eq!(lines, vec!["use std::fmt;", ""]);
    assert_eq!(state.apply_expansion(&request, lines), Ok(2));
    assert_eq!(state.diff.files[0].hunks[0].header, "@@ -1,5 +1,5 @@ mod tests");
}

#[tokio::test]
async fn submits_drafted_review() {
    let server = MockServer::start().await;
    mount_pull_request(&server).await;

    Mock::given(method("POST"))
        .and(path("/repos/octo/widgets/pulls/7/reviews"))
        .and(body_json(serde_json::json!({
            "commit_id": "head123",
            "body": "Thanks!",
            "event": "REQUEST_CHANGES",
            "comments": [{"path": "src/lib.rs", "line": 4, "side": "LEFT", "body": "keep this"}]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 99, "state": "CHANGES_REQUESTED"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("ghp_test"));
    let mut state = load_pull_request(client.as_ref(), &pr())
        .await
        .unwrap()
        .into_viewer_state();
    let handler = GithubCommentHandler::new(client.clone(), pr(), state.diff.head_sha.clone(), true);

    state.handle_action(DiffAction::StartComment {
        file: 0,
        side: DiffSide::Left,
        line: 4,
    });
    state.handle_action(DiffAction::SetCommentBody("keep this".into()));
    state.handle_action(DiffAction::CommitComment);
    state.handle_action(DiffAction::SetReviewEvent(ReviewEvent::RequestChanges));
    state.handle_action(DiffAction::SetReviewBody("Thanks!".into()));

    let submission = match &state.handle_action(DiffAction::SubmitReview)[..] {
        [DiffEvent::SubmitReview(submission)] => submission.clone(),
        other => panic!("unexpected events {other:?}"),
    };
    let result = handler.submit_review(submission).await;
    assert_eq!(result, Ok(()));

    state.review.finish_submit(result.is_ok());
    assert!(state.review.comments().is_empty());
}

#[tokio::test]
async fn missing_comment_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octo/widgets/pulls/comments/5"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, Some("ghp_test"));
    let handler = GithubCommentHandler::new(client, pr(), "head123", true);
    assert_eq!(handler.delete_comment(5).await, Err(CommentError::NotFound(5)));
}

#[tokio::test]
async fn review_without_token_fails_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let handler = GithubCommentHandler::new(client, pr(), "head123", false);
    assert!(!handler.is_available());

    let result = handler
        .submit_review(gh_diff_viewer::ReviewSubmission {
            event: ReviewEvent::Approve,
            body: None,
            comments: Vec::new(),
        })
        .await;
    assert!(matches!(result, Err(CommentError::Unauthorized(_))));
}
