//! Integration tests for batch sharing to users and groups.

mod helpers;

use sharehub_core::error::ErrorKind;
use sharehub_entity::share::SharePermission;
use sharehub_service::{BatchShareRequest, RequestContext};

fn share_request(username: &str, resource_ids: Vec<String>) -> BatchShareRequest {
    BatchShareRequest {
        operation: "share".to_string(),
        share_type: "user".to_string(),
        username: Some(username.to_string()),
        resource_ids,
        ..Default::default()
    }
}

fn group_request(group_id: i64, resource_ids: Vec<String>) -> BatchShareRequest {
    BatchShareRequest {
        operation: "share".to_string(),
        share_type: "group".to_string(),
        group_id: Some(group_id),
        resource_ids,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_can_share_resources_to_user() {
    let app = helpers::TestApp::new();
    app.create_user("user@test.com");
    app.create_user("admin@test.com");
    let repo = app.create_resource("user@test.com");
    let tmp_repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let result = app
        .batch
        .execute(&ctx, share_request("admin@test.com", vec![repo.clone()]))
        .await
        .unwrap();
    assert_eq!(result.success.len(), 1);
    assert!(result.failed.is_empty());
    assert_eq!(result.success[0].permission, SharePermission::ReadWrite);

    // Sharing the same resource again fails for that resource only.
    let result = app
        .batch
        .execute(
            &ctx,
            share_request("admin@test.com", vec![repo.clone(), tmp_repo.clone()]),
        )
        .await
        .unwrap();
    assert_eq!(result.success.len(), 1);
    assert_eq!(result.success[0].resource_id, tmp_repo);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].resource_id, repo);
}

#[tokio::test]
async fn test_share_with_invalid_operation() {
    let app = helpers::TestApp::new();
    app.create_user("admin@test.com");
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let group = app.create_group(&["user@test.com"]);
    for mut req in [
        share_request("admin@test.com", vec![repo.clone()]),
        group_request(group, vec![repo.clone()]),
    ] {
        req.operation = "invalid_operation".to_string();
        let err = app.batch.execute(&ctx, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_share_with_invalid_share_type() {
    let app = helpers::TestApp::new();
    app.create_user("admin@test.com");
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let group = app.create_group(&["user@test.com"]);
    for mut req in [
        share_request("admin@test.com", vec![repo.clone()]),
        group_request(group, vec![repo.clone()]),
    ] {
        req.share_type = "invalid_share_type".to_string();
        let err = app.batch.execute(&ctx, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_share_with_invalid_permission() {
    let app = helpers::TestApp::new();
    app.create_user("admin@test.com");
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let group = app.create_group(&["user@test.com"]);
    for mut req in [
        share_request("admin@test.com", vec![repo.clone()]),
        group_request(group, vec![repo.clone()]),
    ] {
        req.permission = Some("invalid_permission".to_string());
        let err = app.batch.execute(&ctx, req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

#[tokio::test]
async fn test_share_with_invalid_user() {
    let app = helpers::TestApp::new();
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let err = app
        .batch
        .execute(&ctx, share_request("invalid@user.com", vec![repo]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unknown_and_foreign_resources_fail_individually() {
    let app = helpers::TestApp::new();
    app.create_user("bob@test.com");
    let own = app.create_resource("user@test.com");
    let foreign = app.create_resource("carol@test.com");
    let ctx = RequestContext::new("user@test.com");

    let result = app
        .batch
        .execute(
            &ctx,
            share_request(
                "bob@test.com",
                vec![own.clone(), foreign.clone(), "missing-repo".to_string()],
            ),
        )
        .await
        .unwrap();

    assert_eq!(result.success.len(), 1);
    assert_eq!(result.success[0].resource_id, own);
    assert_eq!(result.failed.len(), 2);
    assert_eq!(result.failed[0].resource_id, foreign);
    assert_eq!(result.failed[0].error_msg, "Permission denied.");
    assert!(result.failed[1].error_msg.contains("not found"));
}

#[tokio::test]
async fn test_resource_admin_can_share_on_owners_behalf() {
    let app = helpers::TestApp::new();
    app.create_user("bob@test.com");
    app.create_user("dave@test.com");
    let repo = app.create_resource("carol@test.com");

    app.registry
        .grant(&repo, "carol@test.com", "bob@test.com", SharePermission::Admin)
        .await
        .unwrap();

    let ctx = RequestContext::new("bob@test.com");
    let mut req = share_request("dave@test.com", vec![repo.clone()]);
    req.permission = Some("r".to_string());
    let result = app.batch.execute(&ctx, req).await.unwrap();
    assert_eq!(result.success.len(), 1);
    assert_eq!(result.success[0].permission, SharePermission::Read);

    // The new record is attributed to the admin who issued it.
    assert_eq!(
        app.registry
            .list_shares_between(&repo, "bob@test.com", "dave@test.com")
            .await
            .unwrap(),
        vec!["bob@test.com".to_string()]
    );
}

#[tokio::test]
async fn test_cannot_share_with_owner() {
    let app = helpers::TestApp::new();
    app.create_user("carol@test.com");
    app.create_user("bob@test.com");
    let repo = app.create_resource("carol@test.com");
    app.registry
        .grant(&repo, "carol@test.com", "bob@test.com", SharePermission::Admin)
        .await
        .unwrap();

    let ctx = RequestContext::new("bob@test.com");
    let result = app
        .batch
        .execute(&ctx, share_request("carol@test.com", vec![repo]))
        .await
        .unwrap();
    assert!(result.success.is_empty());
    assert_eq!(result.failed.len(), 1);
}

#[tokio::test]
async fn test_can_share_resources_to_group() {
    let app = helpers::TestApp::new();
    let group = app.create_group(&["user@test.com", "admin@test.com"]);
    let repo = app.create_resource("user@test.com");
    let tmp_repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let result = app
        .batch
        .execute(&ctx, group_request(group, vec![repo.clone()]))
        .await
        .unwrap();
    assert_eq!(result.success.len(), 1);
    assert!(result.failed.is_empty());
    assert_eq!(result.success[0].group_id, Some(group));
    assert_eq!(
        app.groups.group_share(&repo, group),
        Some(("user@test.com".to_string(), SharePermission::ReadWrite))
    );

    let result = app
        .batch
        .execute(&ctx, group_request(group, vec![repo.clone(), tmp_repo.clone()]))
        .await
        .unwrap();
    assert_eq!(result.success.len(), 1);
    assert_eq!(result.success[0].resource_id, tmp_repo);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].resource_id, repo);

    // Group shares never touch the user share registry.
    assert!(app.registry.list_resource_shares(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_share_with_missing_group() {
    let app = helpers::TestApp::new();
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let err = app
        .batch
        .execute(&ctx, group_request(-1, vec![repo]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_share_to_group_requires_membership() {
    let app = helpers::TestApp::new();
    let group = app.create_group(&["admin@test.com"]);
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let err = app
        .batch
        .execute(&ctx, group_request(group, vec![repo.clone()]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(app.groups.group_share(&repo, group).is_none());
}

#[tokio::test]
async fn test_share_requires_matching_target_field() {
    let app = helpers::TestApp::new();
    let repo = app.create_resource("user@test.com");
    let ctx = RequestContext::new("user@test.com");

    let mut req = group_request(1, vec![repo.clone()]);
    req.group_id = None;
    let err = app.batch.execute(&ctx, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let mut req = share_request("admin@test.com", vec![repo]);
    req.username = None;
    let err = app.batch.execute(&ctx, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
