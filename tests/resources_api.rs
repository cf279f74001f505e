use resource_service::{
    config::AppConfig,
    database::{memory::MemoryStore, predicate::Predicate, store::ResourceStore},
    models::resource::{CreateRecord, Resource, UpdateRecord},
    server,
};
use rocket::{
    figment::Figment,
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
};
use serde_json::{Value, json};

async fn client() -> Client {
    client_with(Box::new(MemoryStore::new())).await
}

async fn client_with(store: Box<dyn ResourceStore>) -> Client {
    let figment = Figment::from(rocket::Config::debug_default()).merge(("log_level", "off"));
    let rocket = server::build(figment, &AppConfig::default(), store);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

async fn create(client: &Client, body: Value) -> LocalResponse<'_> {
    client
        .post("/api/resources")
        .header(ContentType::JSON)
        .body(body.to_string())
        .dispatch()
        .await
}

async fn message(response: LocalResponse<'_>) -> String {
    let body: Value = response.into_json().await.expect("json body");
    body["message"].as_str().expect("message field").to_string()
}

#[rocket::async_test]
async fn health_reports_ok() {
    let client = client().await;
    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[rocket::async_test]
async fn create_trims_name_and_applies_defaults() {
    let client = client().await;
    let response = create(&client, json!({ "name": " Widget " })).await;
    assert_eq!(response.status(), Status::Created);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["name"], json!("Widget"));
    assert_eq!(body["description"], json!(""));
    assert_eq!(body["tags"], json!([]));
    assert_eq!(body["isActive"], json!(true));
    assert!(body["createdAt"].is_string());
    assert!(body.get("tagsCsv").is_none());
}

#[rocket::async_test]
async fn create_keeps_supplied_fields() {
    let client = client().await;
    let response = create(
        &client,
        json!({
            "name": "Gadget",
            "description": "Shiny",
            "tags": [" blue", "small ", "  "],
            "isActive": false,
        }),
    )
    .await;
    assert_eq!(response.status(), Status::Created);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["description"], json!("Shiny"));
    assert_eq!(body["tags"], json!(["blue", "small"]));
    assert_eq!(body["isActive"], json!(false));
}

#[rocket::async_test]
async fn create_rejects_missing_or_blank_name() {
    let client = client().await;
    for body in [json!({ "name": "" }), json!({ "name": "   " }), json!({})] {
        let response = create(&client, body).await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(message(response).await, "Resource name is required");
    }

    let response = client.post("/api/resources").dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(message(response).await, "Resource name is required");
}

#[rocket::async_test]
async fn malformed_json_is_an_unexpected_error() {
    let client = client().await;
    let response = client
        .post("/api/resources")
        .header(ContentType::JSON)
        .body("{ not json")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    let expected = serde_json::from_str::<Value>("{ not json")
        .unwrap_err()
        .to_string();
    assert_eq!(message(response).await, expected);

    let response = client.get("/api/resources").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[rocket::async_test]
async fn get_returns_created_resource() {
    let client = client().await;
    create(&client, json!({ "name": "Widget", "tags": ["a", "b"] })).await;

    let response = client.get("/api/resources/1").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["name"], json!("Widget"));
    assert_eq!(body["tags"], json!(["a", "b"]));
}

#[rocket::async_test]
async fn malformed_ids_are_rejected() {
    let client = client().await;
    for id in ["abc", "-1", "0", "1.5"] {
        let uri = format!("/api/resources/{}", id);

        let response = client.get(uri.clone()).dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(message(response).await, "Resource id must be a positive integer");

        let response = client
            .put(uri.clone())
            .header(ContentType::JSON)
            .body(json!({ "name": "x" }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(message(response).await, "Resource id must be a positive integer");

        let response = client.delete(uri).dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(message(response).await, "Resource id must be a positive integer");
    }
}

#[rocket::async_test]
async fn missing_ids_are_not_found() {
    let client = client().await;

    let response = client.get("/api/resources/99").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(message(response).await, "Resource not found");

    let response = client
        .put("/api/resources/99")
        .header(ContentType::JSON)
        .body(json!({ "name": "x" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(message(response).await, "Resource not found");

    let response = client.delete("/api/resources/99").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(message(response).await, "Resource not found");
}

#[rocket::async_test]
async fn update_replaces_only_supplied_fields() {
    let client = client().await;
    create(
        &client,
        json!({ "name": "Widget", "description": "Old", "tags": ["a"] }),
    )
    .await;

    let response = client
        .put("/api/resources/1")
        .header(ContentType::JSON)
        .body(json!({ "name": " Renamed ", "tags": ["b", "c"], "isActive": "no" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["name"], json!("Renamed"));
    assert_eq!(body["description"], json!("Old"));
    assert_eq!(body["tags"], json!(["b", "c"]));
    assert_eq!(body["isActive"], json!(true));
}

#[rocket::async_test]
async fn update_with_no_valid_fields_is_rejected() {
    let client = client().await;
    create(&client, json!({ "name": "Widget" })).await;

    let response = client
        .put("/api/resources/1")
        .header(ContentType::JSON)
        .body("{}")
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(message(response).await, "No valid fields provided");
}

#[rocket::async_test]
async fn update_with_blank_name_is_rejected() {
    let client = client().await;
    create(&client, json!({ "name": "Widget" })).await;

    for body in [json!({ "name": "  " }), json!({ "name": "", "description": "x" })] {
        let response = client
            .put("/api/resources/1")
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadRequest);
        assert_eq!(message(response).await, "Resource name is required");
    }

    let response = client.get("/api/resources/1").dispatch().await;
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["name"], json!("Widget"));
    assert_eq!(body["description"], json!(""));
}

#[rocket::async_test]
async fn delete_removes_resource() {
    let client = client().await;
    create(&client, json!({ "name": "Widget" })).await;

    let response = client.delete("/api/resources/1").dispatch().await;
    assert_eq!(response.status(), Status::NoContent);
    assert!(response.into_string().await.unwrap_or_default().is_empty());

    let response = client.get("/api/resources/1").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

#[rocket::async_test]
async fn list_is_newest_first() {
    let client = client().await;
    for name in ["first", "second", "third"] {
        create(&client, json!({ "name": name })).await;
    }

    let response = client.get("/api/resources").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Vec<Value> = response.into_json().await.unwrap();
    let names: Vec<&str> = body.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[rocket::async_test]
async fn list_filters_by_search_tag_and_active_flag() {
    let client = client().await;
    create(&client, json!({ "name": "Blue Widget", "tags": ["blue", "small"] })).await;
    create(&client, json!({ "name": "Red Widget", "tags": ["red"], "isActive": false })).await;
    create(&client, json!({ "name": "Gadget", "tags": ["bluegrass"] })).await;

    let names = |body: Vec<Value>| -> Vec<String> {
        body.iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect()
    };

    let response = client.get("/api/resources?search=Widget").dispatch().await;
    assert_eq!(
        names(response.into_json().await.unwrap()),
        vec!["Red Widget", "Blue Widget"]
    );

    let response = client.get("/api/resources?tag=blue").dispatch().await;
    assert_eq!(names(response.into_json().await.unwrap()), vec!["Blue Widget"]);

    let response = client.get("/api/resources?tag=red&tag=bluegrass").dispatch().await;
    assert_eq!(
        names(response.into_json().await.unwrap()),
        vec!["Gadget", "Red Widget"]
    );

    let response = client.get("/api/resources?isActive=false").dispatch().await;
    assert_eq!(names(response.into_json().await.unwrap()), vec!["Red Widget"]);

    let response = client
        .get("/api/resources?search=Widget&isActive=true&tag=small")
        .dispatch()
        .await;
    assert_eq!(names(response.into_json().await.unwrap()), vec!["Blue Widget"]);
}

#[rocket::async_test]
async fn api_prefix_is_configurable() {
    let figment = Figment::from(rocket::Config::debug_default()).merge(("log_level", "off"));
    let config = AppConfig {
        api_prefix: "/v1".to_string(),
        ..AppConfig::default()
    };
    let rocket = server::build(figment, &config, Box::new(MemoryStore::new()));
    let client = Client::tracked(rocket).await.unwrap();

    let response = client.get("/v1/resources").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let response = client.get("/api/resources").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
}

/// A store whose every call fails, for exercising the error boundary.
struct FailingStore;

#[rocket::async_trait]
impl ResourceStore for FailingStore {
    async fn create(&self, _record: CreateRecord) -> anyhow::Result<Resource> {
        Err(anyhow::anyhow!("database is unavailable"))
    }

    async fn find_many(&self, _predicate: &Predicate) -> anyhow::Result<Vec<Resource>> {
        Err(anyhow::anyhow!("database is unavailable"))
    }

    async fn find_unique(&self, _id: i64) -> anyhow::Result<Option<Resource>> {
        Err(anyhow::anyhow!("database is unavailable"))
    }

    async fn update(&self, _id: i64, _record: UpdateRecord) -> anyhow::Result<Resource> {
        Err(anyhow::anyhow!("database is unavailable"))
    }

    async fn delete(&self, _id: i64) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("database is unavailable"))
    }
}

#[rocket::async_test]
async fn store_failures_become_500_with_message() {
    let client = client_with(Box::new(FailingStore)).await;

    let response = create(&client, json!({ "name": "Widget" })).await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(message(response).await, "database is unavailable");

    let response = client.get("/api/resources").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    let response = client.get("/api/resources/1").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);

    let response = client
        .put("/api/resources/1")
        .header(ContentType::JSON)
        .body(json!({ "name": "Renamed" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(message(response).await, "database is unavailable");

    let response = client.delete("/api/resources/1").dispatch().await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(message(response).await, "database is unavailable");

    // Validation still short-circuits before the store is reached.
    let response = create(&client, json!({ "name": " " })).await;
    assert_eq!(response.status(), Status::BadRequest);
}

/// A store that finds every id but loses the row before it can be updated.
struct VanishingStore;

#[rocket::async_trait]
impl ResourceStore for VanishingStore {
    async fn create(&self, _record: CreateRecord) -> anyhow::Result<Resource> {
        Err(anyhow::anyhow!("read only"))
    }

    async fn find_many(&self, _predicate: &Predicate) -> anyhow::Result<Vec<Resource>> {
        Ok(Vec::new())
    }

    async fn find_unique(&self, id: i64) -> anyhow::Result<Option<Resource>> {
        Ok(Some(Resource {
            id,
            name: "Widget".to_string(),
            description: String::new(),
            tags_csv: String::new(),
            is_active: true,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        }))
    }

    async fn update(&self, id: i64, _record: UpdateRecord) -> anyhow::Result<Resource> {
        Err(anyhow::anyhow!("resource {} was removed", id))
    }

    async fn delete(&self, _id: i64) -> anyhow::Result<()> {
        Ok(())
    }
}

#[rocket::async_test]
async fn update_failing_after_lookup_becomes_500() {
    let client = client_with(Box::new(VanishingStore)).await;

    let response = client
        .put("/api/resources/4")
        .header(ContentType::JSON)
        .body(json!({ "name": "Renamed" }).to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(message(response).await, "resource 4 was removed");

    let response = client.get("/api/resources/4").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn unknown_routes_answer_with_json() {
    let client = client().await;
    let response = client.get("/nope").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(message(response).await, "Not Found");
}
