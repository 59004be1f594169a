#![allow(dead_code)]

use agent_registry::app::app::build_router;
use agent_registry::model::agent::Agent;
use agent_registry::model::user::User;
use agent_registry::model::write_result::{DeleteResult, InsertResult, UpdateResult};
use agent_registry::repository::record_repo::RecordRepository;
use agent_registry::repository::repository_error::{RepositoryError, RepositoryResult};
use agent_registry::repository::user_repo::UserRepository;
use agent_registry::service::auth_service::AuthServiceImpl;
use agent_registry::service::record_service::RecordServiceImpl;
use async_trait::async_trait;
use axum::{body::Body, http::{Request, StatusCode}, Router};
use bson::oid::ObjectId;
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for .oneshot()

/// Record store kept in a Vec, with the same write-result semantics as the driver
#[derive(Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<Agent>>,
}

impl InMemoryRecordRepository {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Agent>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>> {
        Ok(self.records.lock().unwrap().iter().find(|a| a.id.as_ref() == Some(id)).cloned())
    }

    async fn insert(&self, mut agent: Agent) -> RepositoryResult<InsertResult> {
        let id = ObjectId::new();
        agent.id = Some(id);
        self.records.lock().unwrap().push(agent);
        Ok(InsertResult { acknowledged: true, inserted_id: id.to_hex() })
    }

    async fn update(&self, id: &ObjectId, fields: Agent) -> RepositoryResult<UpdateResult> {
        let mut records = self.records.lock().unwrap();
        let Some(existing) = records.iter_mut().find(|a| a.id.as_ref() == Some(id)) else {
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        };
        existing.name = fields.name;
        existing.region = fields.region;
        existing.rating = fields.rating;
        existing.fee = fields.fee;
        existing.sales = fields.sales;
        existing.updated_at = fields.updated_at;
        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
            upserted_count: 0,
            upserted_id: None,
        })
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<DeleteResult> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|a| a.id.as_ref() != Some(id));
        Ok(DeleteResult { acknowledged: true, deleted_count: (before - records.len()) as u64 })
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn with_user(user: User) -> Self {
        InMemoryUserRepository { users: Mutex::new(vec![user]) }
    }

    pub fn stored(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, mut user: User) -> RepositoryResult<InsertResult> {
        let id = ObjectId::new();
        user.id = Some(id);
        self.users.lock().unwrap().push(user);
        Ok(InsertResult { acknowledged: true, inserted_id: id.to_hex() })
    }
}

/// Misses on lookup, then hits the unique index on insert, like two
/// registrations racing for the same username
pub struct DuplicateKeyUserRepository;

#[async_trait]
impl UserRepository for DuplicateKeyUserRepository {
    async fn find_by_username(&self, _username: &str) -> RepositoryResult<Option<User>> {
        Ok(None)
    }

    async fn insert(&self, _user: User) -> RepositoryResult<InsertResult> {
        Err(RepositoryError::already_exists("E11000 duplicate key error collection: users index: username_1"))
    }
}

/// Every call fails the way an unreachable database would
pub struct FailingRepository;

fn unavailable<T>() -> RepositoryResult<T> {
    Err(RepositoryError::connection("connection refused"))
}

#[async_trait]
impl RecordRepository for FailingRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Agent>> { unavailable() }
    async fn find_by_id(&self, _id: &ObjectId) -> RepositoryResult<Option<Agent>> { unavailable() }
    async fn insert(&self, _agent: Agent) -> RepositoryResult<InsertResult> { unavailable() }
    async fn update(&self, _id: &ObjectId, _fields: Agent) -> RepositoryResult<UpdateResult> { unavailable() }
    async fn delete(&self, _id: &ObjectId) -> RepositoryResult<DeleteResult> { unavailable() }
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn find_by_username(&self, _username: &str) -> RepositoryResult<Option<User>> { unavailable() }
    async fn insert(&self, _user: User) -> RepositoryResult<InsertResult> { unavailable() }
}

pub fn app_with(records: Arc<dyn RecordRepository>, users: Arc<dyn UserRepository>) -> Router {
    build_router(
        Arc::new(RecordServiceImpl::new(records)),
        Arc::new(AuthServiceImpl::new(users)),
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.body))
    }
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    TestResponse { status, content_type, body: String::from_utf8_lossy(&bytes).to_string() }
}
