//! Comment endpoint integration tests
//!
//! - GET/POST /tasks/{id}/comments/
//! - DELETE /tasks/{id}/comments/{comment_id}/

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

mod test_lifecycle {
    use super::*;

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_comment_lifecycle() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let member = app.create_user("Max", "").await.unwrap();
        let board_id = app.create_board(&owner, &[member.id]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();
        let uri = format!("/tasks/{}/comments/", ticket_id);

        let (status, first) = app
            .send(
                Method::POST,
                &uri,
                Some(&owner),
                Some(json!({ "content": "  First!  " })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first["content"], "First!");
        assert_eq!(first["author"], "Olga Owner");
        assert!(first["created_at"].is_string());

        let (status, second) = app
            .send(
                Method::POST,
                &uri,
                Some(&member),
                Some(json!({ "content": "Second" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(second["author"], "Max");

        let (status, body) = app.send(Method::GET, &uri, Some(&member), None).await;
        assert_eq!(status, StatusCode::OK);
        let comments = body.as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["id"], first["id"]);
        assert_eq!(comments[1]["id"], second["id"]);

        let ticket_uri = format!("/tasks/{}/", ticket_id);
        let (_, ticket) = app.send(Method::GET, &ticket_uri, Some(&owner), None).await;
        assert_eq!(ticket["comments_count"], 2);

        // Any board member may delete a comment
        let delete_uri = format!("{}{}/", uri, first["id"]);
        let (status, _) = app
            .send(Method::DELETE, &delete_uri, Some(&member), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app
            .send(Method::DELETE, &delete_uri, Some(&member), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Comment not found.");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_comment_author_falls_back_to_username() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("", "").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();

        let uri = format!("/tasks/{}/comments/", ticket_id);
        let (status, body) = app
            .send(
                Method::POST,
                &uri,
                Some(&owner),
                Some(json!({ "content": "anonymous" })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["author"], owner.email.as_str());

        app.cleanup().await.unwrap();
    }
}

mod test_access {
    use super::*;

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_comment_access_rules() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let outsider = app.create_user("Otto", "Outsider").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();
        let other_ticket = app.create_ticket(&owner, board_id).await.unwrap();
        let uri = format!("/tasks/{}/comments/", ticket_id);

        let (status, body) = app.send(Method::GET, &uri, Some(&outsider), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"]["message"],
            "You are not allowed to comment this task."
        );

        let (status, body) = app
            .send(
                Method::POST,
                &uri,
                Some(&outsider),
                Some(json!({ "content": "let me in" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["error"]["message"],
            "You are not allowed to comment this task."
        );

        let (status, _) = app
            .send(Method::POST, &uri, Some(&owner), Some(json!({ "content": "   " })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = format!("/tasks/{}/comments/", i64::MAX);
        let (status, body) = app.send(Method::GET, &missing, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Task not found.");

        // A comment addressed through another ticket is not found
        let (_, comment) = app
            .send(Method::POST, &uri, Some(&owner), Some(json!({ "content": "hi" })))
            .await;
        let wrong = format!("/tasks/{}/comments/{}/", other_ticket, comment["id"]);
        let (status, _) = app.send(Method::DELETE, &wrong, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_non_numeric_ids_return_json_errors() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();

        let (status, body) = app
            .send(Method::GET, "/tasks/abc/comments/", Some(&owner), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = app
            .send(Method::DELETE, "/tasks/1/comments/first/", Some(&owner), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        app.cleanup().await.unwrap();
    }
}
