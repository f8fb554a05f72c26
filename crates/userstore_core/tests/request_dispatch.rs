mod common;

use common::{memory_db, ScriptedStore, TABLE};
use serde_json::{json, Value};
use userstore_core::{
    handle_request, Method, RecordStore, Request, Response, SqliteRecordStore, UserService,
};

const ADA: &str = r#"{"email":"ada@example.com","firstname":"Ada","lastname":"Lovelace"}"#;

fn body_json(response: &Response) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn dispatch<S: RecordStore>(service: &UserService<S>, request: Request) -> Response {
    handle_request(&request, service)
}

#[test]
fn post_creates_and_get_fetches_one() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let created = dispatch(&service, Request::new(Method::Post).with_body(ADA));
    assert_eq!(created.status_code, 201);
    assert_eq!(created.headers["Content-Type"], "application/json");
    assert_eq!(body_json(&created)["email"], "ada@example.com");

    let fetched = dispatch(&service, Request::new(Method::Get).with_email("ada@example.com"));
    assert_eq!(fetched.status_code, 200);
    assert_eq!(
        body_json(&fetched),
        json!({"email": "ada@example.com", "firstname": "Ada", "lastname": "Lovelace"})
    );
}

#[test]
fn get_unknown_email_is_not_found() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let response = dispatch(&service, Request::new(Method::Get).with_email("ghost@example.com"));
    assert_eq!(response.status_code, 404);
    assert_eq!(
        body_json(&response),
        json!({"error": "code: 9, message: user does not exist"})
    );
}

#[test]
fn get_without_email_lists_collection() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let empty = dispatch(&service, Request::new(Method::Get));
    assert_eq!(empty.status_code, 200);
    assert_eq!(body_json(&empty), json!([]));

    dispatch(&service, Request::new(Method::Post).with_body(ADA));
    let listed = dispatch(&service, Request::new(Method::Get).with_email(""));
    assert_eq!(listed.status_code, 200);
    assert_eq!(body_json(&listed).as_array().unwrap().len(), 1);
}

#[test]
fn create_failures_map_to_internal_error() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let missing_body = dispatch(&service, Request::new(Method::Post));
    assert_eq!(missing_body.status_code, 500);
    assert_eq!(
        body_json(&missing_body)["error"],
        "code: 2, message: failed to unmarshal record"
    );

    dispatch(&service, Request::new(Method::Post).with_body(ADA));
    let duplicate = dispatch(&service, Request::new(Method::Post).with_body(ADA));
    assert_eq!(duplicate.status_code, 500);
    assert_eq!(
        body_json(&duplicate)["error"],
        "code: 8, message: user already exists"
    );
}

#[test]
fn put_updates_existing_and_rejects_missing() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let missing = dispatch(&service, Request::new(Method::Put).with_body(ADA));
    assert_eq!(missing.status_code, 500);
    assert_eq!(
        body_json(&missing)["error"],
        "code: 9, message: user does not exist"
    );

    dispatch(&service, Request::new(Method::Post).with_body(ADA));
    let updated = dispatch(
        &service,
        Request::new(Method::Put)
            .with_body(r#"{"email":"ada@example.com","firstname":"Augusta","lastname":"King"}"#),
    );
    assert_eq!(updated.status_code, 201);
    assert_eq!(body_json(&updated)["firstname"], "Augusta");
}

#[test]
fn delete_returns_no_content_even_for_missing_user() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let response = dispatch(&service, Request::new(Method::Delete).with_email("ghost@example.com"));
    assert_eq!(response.status_code, 204);
    assert_eq!(response.body, "null");
    assert_eq!(body_json(&response), Value::Null);
}

#[test]
fn backend_failures_map_to_internal_error() {
    let conn = memory_db();
    let mut store = ScriptedStore::new(SqliteRecordStore::try_new(&conn).unwrap());
    store.fail_get = true;
    store.fail_scan = true;
    store.fail_delete = true;
    let service = UserService::new(&store, TABLE);

    for request in [
        Request::new(Method::Get).with_email("ada@example.com"),
        Request::new(Method::Get),
        Request::new(Method::Delete).with_email("ada@example.com"),
    ] {
        let response = dispatch(&service, request);
        assert_eq!(response.status_code, 500);
        assert!(body_json(&response)["error"].is_string());
    }
}

#[test]
fn unsupported_method_is_rejected() {
    let conn = memory_db();
    let service = UserService::new(SqliteRecordStore::try_new(&conn).unwrap(), TABLE);

    let response = dispatch(&service, Request::new("PATCH".parse().unwrap()).with_body(ADA));
    assert_eq!(response.status_code, 405);
    assert!(!response.is_success());
    assert_eq!(
        body_json(&response),
        json!({"error": "code: 10, message: method not allowed"})
    );
    assert!(service.fetch_users().unwrap().is_empty());
}
