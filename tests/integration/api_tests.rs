//! API integration tests
//!
//! These run against a live server with an empty-ish database:
//! `cargo test --test api_tests -- --ignored`

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000/api/v1";

/// Create an author with a unique email and return its id
async fn create_author(client: &Client, name: &str) -> String {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "name": name,
            "email": format!("{}@example.org", Uuid::new_v4()),
            "nationality": "GB"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No id in response").to_string()
}

async fn create_book(client: &Client, author_id: &str, title: &str, year: i32, pages: i32, genre: &str) {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "publishedYear": year,
            "pages": pages,
            "genre": genre,
            "authorId": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn delete_author(client: &Client, id: &str) {
    client
        .delete(format!("{}/authors/{}?force=true", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_author_stats() {
    let client = Client::new();
    let author_id = create_author(&client, "Mary Shelley").await;
    create_book(&client, &author_id, "Frankenstein", 1818, 280, "Gothic").await;
    create_book(&client, &author_id, "The Last Man", 1826, 480, "Science Fiction").await;
    create_book(&client, &author_id, "Mathilda", 1819, 110, "Gothic").await;

    let response = client
        .get(format!("{}/authors/{}/stats", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["authorName"], "Mary Shelley");
    assert_eq!(body["totalBooks"], 3);
    assert_eq!(body["averagePages"], 290);
    assert_eq!(body["firstBook"]["title"], "Frankenstein");
    assert_eq!(body["latestBook"]["title"], "The Last Man");
    assert_eq!(body["longestBook"]["title"], "The Last Man");
    assert_eq!(body["shortestBook"]["title"], "Mathilda");
    assert_eq!(body["genres"], json!(["Gothic", "Science Fiction"]));

    delete_author(&client, &author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_delete_author_with_books_requires_force() {
    let client = Client::new();
    let author_id = create_author(&client, "Bram Stoker").await;
    create_book(&client, &author_id, "Dracula", 1897, 418, "Gothic").await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .delete(format!("{}/authors/{}?force=true", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_search_pagination() {
    let client = Client::new();
    let genre = format!("genre-{}", Uuid::new_v4());
    let author_id = create_author(&client, "Page Turner").await;
    for i in 0..7 {
        create_book(&client, &author_id, &format!("Volume {}", i), 2000 + i, 100, &genre).await;
    }

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[
            ("genre", genre.as_str()),
            ("page", "2"),
            ("limit", "3"),
            ("sortBy", "publishedYear"),
            ("order", "asc"),
        ])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["data"][0]["title"], "Volume 3");
    assert_eq!(body["data"][0]["author"]["name"], "Page Turner");
    assert_eq!(body["pagination"]["total"], 7);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNext"], true);
    assert_eq!(body["pagination"]["hasPrev"], true);

    delete_author(&client, &author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_search_wildcards_are_literal() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/search", BASE_URL))
        .query(&[("search", "%_%"), ("genre", "no-such-genre")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
#[ignore]
async fn test_search_rejects_invalid_sort() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/search?sortBy=rating", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
