use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::error::ErrorCode;

use super::models::PushEvent;

#[test]
fn test_parse_push_event() {
    let event_str = include_str!("./push_sample.json");
    let event: PushEvent = serde_json::from_str(event_str).expect("should deserialize");
    let message = event.build_message().unwrap();

    assert_eq!(message.repo, "build-service");
    assert_eq!(message.branch, "refs/heads/feature/very-long-name");
    assert_eq!(message.branch_short, "very-long-");
    assert_eq!(message.ssh_clone_url, "git@github.com:acme/build-service");
    assert_eq!(message.tag2, "refs-heads-feature-very-long-name");
    assert_eq!(message.tag3.as_deref(), Some("a1b2c3d"));
}

#[test]
fn test_push_event_without_commits() {
    for commits in [json!([]), json!(null)] {
        let event: PushEvent = serde_json::from_value(json!({
            "repository": { "name": "svc", "full_name": "org/svc" },
            "push": { "changes": [{ "new": { "name": "main" }, "commits": commits }] }
        }))
        .unwrap();

        assert_eq!(event.build_message().unwrap().tag3, None);
    }

    let event: PushEvent = serde_json::from_value(json!({
        "repository": { "name": "svc", "full_name": "org/svc" },
        "push": { "changes": [{ "new": { "name": "main" } }] }
    }))
    .unwrap();
    assert_eq!(event.build_message().unwrap().tag3, None);
}

#[test]
fn test_push_event_without_changes() {
    let event: PushEvent = serde_json::from_value(json!({
        "repository": { "name": "svc", "full_name": "org/svc" },
        "push": { "changes": [] }
    }))
    .unwrap();

    assert_matches!(
        event.build_message(),
        Err(ErrorCode::MalformedEventBodyField(field, _)) if field == "push.changes"
    );
}

#[test]
fn test_push_event_deleted_branch() {
    let event: PushEvent = serde_json::from_value(json!({
        "repository": { "name": "svc", "full_name": "org/svc" },
        "push": { "changes": [{ "new": null, "commits": [] }] }
    }))
    .unwrap();

    assert_matches!(
        event.build_message(),
        Err(ErrorCode::MalformedEventBodyField(field, _)) if field == "push.changes[0].new"
    );
}
