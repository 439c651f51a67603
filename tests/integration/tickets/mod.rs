//! Ticket endpoint integration tests
//!
//! - POST /tasks/
//! - GET/PATCH/DELETE /tasks/{id}/
//! - GET /tasks/assigned-to-me/, GET /tasks/reviewing/

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

mod test_create {
    use super::*;

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_create_ticket_with_assignee_and_reviewer() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let member = app.create_user("Max", "Member").await.unwrap();
        let board_id = app.create_board(&owner, &[member.id]).await.unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                "/tasks/",
                Some(&member),
                Some(json!({
                    "board": board_id,
                    "title": "Fix login",
                    "description": "Users cannot log in on Safari",
                    "status": "in-progress",
                    "priority": "medium",
                    "assignee_id": member.id,
                    "reviewer_id": owner.id,
                    "due_date": "2025-02-27",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["board"], board_id);
        assert_eq!(body["status"], "in-progress");
        assert_eq!(body["priority"], "medium");
        assert_eq!(body["assignee"]["id"], member.id);
        assert_eq!(body["assignee"]["fullname"], "Max Member");
        assert_eq!(body["reviewer"]["id"], owner.id);
        assert_eq!(body["due_date"], "2025-02-27");
        assert_eq!(body["comments_count"], 0);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_create_ticket_rules() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let outsider = app.create_user("Otto", "Outsider").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();

        let ticket = |board: i64| {
            json!({ "board": board, "title": "Task", "status": "done", "priority": "low" })
        };

        // Unknown board
        let (status, _) = app
            .send(Method::POST, "/tasks/", Some(&owner), Some(ticket(i64::MAX)))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // Not a member of the board
        let (status, _) = app
            .send(Method::POST, "/tasks/", Some(&outsider), Some(ticket(board_id)))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Assignee outside the board
        let mut body = ticket(board_id);
        body["assignee_id"] = json!(outsider.id);
        let (status, _) = app
            .send(Method::POST, "/tasks/", Some(&owner), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Unknown status
        let mut body = ticket(board_id);
        body["status"] = json!("blocked");
        let (status, _) = app
            .send(Method::POST, "/tasks/", Some(&owner), Some(body))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        app.cleanup().await.unwrap();
    }
}

mod test_update_delete {
    use super::*;

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_patch_ticket_partial_and_clear() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();
        let uri = format!("/tasks/{}/", ticket_id);

        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&owner),
                Some(json!({ "status": "review", "assignee_id": owner.id })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "review");
        assert_eq!(body["priority"], "high");
        assert_eq!(body["assignee"]["id"], owner.id);

        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&owner),
                Some(json!({ "assignee_id": null })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["assignee"].is_null());
        assert_eq!(body["status"], "review");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_patch_ticket_cannot_change_board() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();
        let other_board = app.create_board(&owner, &[]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();
        let uri = format!("/tasks/{}/", ticket_id);

        let (status, _) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&owner),
                Some(json!({ "board": other_board })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Repeating the current board is accepted
        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&owner),
                Some(json!({ "board": board_id, "title": "Renamed" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Renamed");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_ticket_access_for_outsider() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let outsider = app.create_user("Otto", "Outsider").await.unwrap();
        let board_id = app.create_board(&owner, &[]).await.unwrap();
        let ticket_id = app.create_ticket(&owner, board_id).await.unwrap();
        let uri = format!("/tasks/{}/", ticket_id);

        let (status, _) = app.send(Method::GET, &uri, Some(&outsider), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&outsider),
                Some(json!({ "title": "Hijacked" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let uri = format!("/tasks/{}/", i64::MAX);
        let (status, body) = app.send(Method::GET, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Task not found.");

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_delete_ticket_creator_or_owner() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let author = app.create_user("Anna", "Author").await.unwrap();
        let bystander = app.create_user("Bob", "Bystander").await.unwrap();
        let board_id = app
            .create_board(&owner, &[author.id, bystander.id])
            .await
            .unwrap();

        let first = app.create_ticket(&author, board_id).await.unwrap();
        let second = app.create_ticket(&author, board_id).await.unwrap();

        let uri = format!("/tasks/{}/", first);
        let (status, _) = app.send(Method::DELETE, &uri, Some(&bystander), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.send(Method::DELETE, &uri, Some(&author), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let uri = format!("/tasks/{}/", second);
        let (status, _) = app.send(Method::DELETE, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.send(Method::GET, &uri, Some(&owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        app.cleanup().await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_non_numeric_task_id_returns_json_error() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();

        let (status, body) = app.send(Method::GET, "/tasks/abc/", Some(&owner), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        app.cleanup().await.unwrap();
    }
}

mod test_role_listings {
    use super::*;

    #[tokio::test]
    #[ignore = "requires PostgreSQL"]
    async fn test_assigned_to_me_and_reviewing() {
        let app = TestApp::new().await.unwrap();
        let owner = app.create_user("Olga", "Owner").await.unwrap();
        let member = app.create_user("Max", "Member").await.unwrap();
        let board_id = app.create_board(&owner, &[member.id]).await.unwrap();

        let (status, assigned) = app
            .send(
                Method::POST,
                "/tasks/",
                Some(&owner),
                Some(json!({
                    "board": board_id,
                    "title": "Assigned to Max",
                    "status": "to-do",
                    "priority": "low",
                    "assignee_id": member.id,
                    "reviewer_id": owner.id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        app.create_ticket(&owner, board_id).await.unwrap();

        let (status, body) = app
            .send(Method::GET, "/tasks/assigned-to-me/", Some(&member), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let tickets = body.as_array().unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0]["id"], assigned["id"]);

        let (status, body) = app
            .send(Method::GET, "/tasks/reviewing/", Some(&owner), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let tickets = body.as_array().unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0]["title"], "Assigned to Max");

        let (status, body) = app
            .send(Method::GET, "/tasks/reviewing/", Some(&member), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        app.cleanup().await.unwrap();
    }
}
