//! Tests for users API handlers.

use std::collections::BTreeSet;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::{MockFollowGraph, MockUserDirectory};
use crate::domain::test_fixtures::{id, user};
use crate::domain::{Error, FollowSets, UserPatchDraft, UserProfile, UserSummary};
use crate::inbound::http::test_utils::{TestPorts, test_app};

fn alice_followed_by_bob() -> UserProfile {
    UserProfile {
        user: user(1, "Alice"),
        followers: vec![UserSummary::from(&user(2, "Bob"))],
        following: Vec::new(),
    }
}

async fn call(
    ports: TestPorts,
    req: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, req.to_request()).await;
    let status = res.status();
    let body: Value = actix_test::read_body_json(res).await;
    (status, body)
}

fn with_directory(directory: MockUserDirectory) -> TestPorts {
    TestPorts {
        directory,
        ..TestPorts::default()
    }
}

#[actix_web::test]
async fn list_users_returns_decorated_camel_case_json() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list()
        .return_once(|| Ok(vec![alice_followed_by_bob()]));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::get().uri("/api/users"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let first = &body.as_array().expect("array")[0];
    assert_eq!(first["name"], "Alice");
    assert_eq!(first["dob"], "1990-04-01");
    assert_eq!(first["followers"], json!([{"id": 2, "name": "Bob"}]));
    assert_eq!(first["followerCount"], 1);
    assert!(first.get("follower_count").is_none());
}

#[actix_web::test]
async fn get_user_passes_parsed_id() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_get()
        .with(eq(id(1)))
        .return_once(|_| Ok(alice_followed_by_bob()));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::get().uri("/api/users/1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "alice@example.com");
}

#[rstest]
#[case("/api/users/abc")]
#[case("/api/users/0")]
#[case("/api/users/-4")]
#[actix_web::test]
async fn non_positive_or_non_numeric_ids_are_rejected(#[case] uri: &str) {
    let mut directory = MockUserDirectory::new();
    directory.expect_get().never();

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::get().uri(uri),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_id");
}

#[actix_web::test]
async fn unknown_users_are_not_found() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_get()
        .return_once(|_| Err(Error::not_found("User not found")));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::get().uri("/api/users/9"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[actix_web::test]
async fn create_user_returns_created_envelope() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_create()
        .withf(|draft| {
            draft.name.as_deref() == Some("Alice")
                && draft.image_url.as_deref() == Some("https://img.example/a.png")
        })
        .times(1)
        .return_once(|_| {
            Ok(UserProfile {
                user: user(1, "Alice"),
                followers: Vec::new(),
                following: Vec::new(),
            })
        });

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::post().uri("/api/users").set_json(json!({
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "555-0100",
            "dob": "1990-04-01",
            "image_url": "https://img.example/a.png"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created");
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["followingCount"], 0);
}

#[actix_web::test]
async fn create_user_surfaces_conflicts() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_create()
        .return_once(|_| Err(Error::conflict("Email already exists")));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Alice", "email": "ALICE@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}

#[actix_web::test]
async fn update_user_forwards_null_image_as_clear() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update()
        .withf(|target, draft| {
            *target == id(1)
                && *draft
                    == UserPatchDraft {
                        image_url: Some(None),
                        ..UserPatchDraft::default()
                    }
        })
        .times(1)
        .return_once(|_, _| Ok(alice_followed_by_bob()));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(json!({"imageUrl": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated");
    assert_eq!(body["user"]["imageUrl"], Value::Null);
}

#[actix_web::test]
async fn delete_user_confirms_removal() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_remove()
        .with(eq(id(2)))
        .times(1)
        .return_once(|_| Ok(()));

    let (status, body) = call(
        with_directory(directory),
        actix_test::TestRequest::delete().uri("/api/users/2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User deleted"}));
}

#[actix_web::test]
async fn storage_outages_are_service_unavailable() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_remove()
        .return_once(|_| Err(Error::service_unavailable("Storage unavailable")));

    let (status, _) = call(
        with_directory(directory),
        actix_test::TestRequest::delete().uri("/api/users/2"),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn user_edges_lists_ids_by_direction() {
    let mut follows = MockFollowGraph::new();
    follows.expect_edges_for().with(eq(id(1))).return_once(|_| {
        Ok(FollowSets {
            followers: BTreeSet::from([id(3)]),
            following: BTreeSet::from([id(2)]),
        })
    });

    let (status, body) = call(
        TestPorts {
            follows,
            ..TestPorts::default()
        },
        actix_test::TestRequest::get().uri("/api/users/1/edges"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"followers": [3], "following": [2]}));
}

#[actix_web::test]
async fn follow_route_is_not_shadowed_by_user_ids() {
    let mut directory = MockUserDirectory::new();
    directory.expect_get().never();
    let mut follows = MockFollowGraph::new();
    follows.expect_follow().never();

    let (status, body) = call(
        TestPorts {
            directory,
            follows,
            ..TestPorts::default()
        },
        actix_test::TestRequest::post()
            .uri("/api/users/follow")
            .set_json(json!({"followerId": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "followingId");
}
