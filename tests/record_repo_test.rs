//! Runs against a live MongoDB configured through `.env`.
//! `cargo test -- --ignored` to include them.

use agent_registry::config::mongo_conf::MongoConfig;
use agent_registry::model::agent::Agent;
use agent_registry::model::user::User;
use agent_registry::repository::mongo_gateway::MongoGateway;
use agent_registry::repository::record_repo::{MongoRecordRepository, RecordRepository};
use agent_registry::repository::repository_error::{RepositoryError, RepositoryResult};
use agent_registry::repository::user_repo::{MongoUserRepository, UserRepository};
use bson::oid::ObjectId;

async fn setup_gateway() -> RepositoryResult<(MongoGateway, MongoConfig)> {
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env()
        .map_err(|e| RepositoryError::Generic(Box::new(e)))?;
    let gateway = MongoGateway::connect(&config).await?;
    Ok((gateway, config))
}

fn agent(name: &str) -> Agent {
    Agent {
        id: None,
        name: name.to_string(),
        region: "North".to_string(),
        rating: 4.5,
        fee: 120.0,
        sales: 30.0,
        created_at: Some("2024-01-01T00:00:00+00:00".to_string()),
        updated_at: Some("2024-01-01T00:00:00+00:00".to_string()),
    }
}

#[tokio::test]
#[ignore]
async fn test_record_repository_workflow() {
    let (gateway, config) = setup_gateway().await.expect("Failed to connect to MongoDB");
    let repo = MongoRecordRepository::new(&gateway, &config.record_collection);

    let inserted = repo.insert(agent("Repository Test Agent")).await.expect("Failed to insert record");
    assert!(inserted.acknowledged);
    let id = ObjectId::parse_str(&inserted.inserted_id).expect("insertedId is not an ObjectId");

    let fetched = repo.find_by_id(&id).await.expect("Failed to fetch record").expect("Record missing");
    assert_eq!(fetched.name, "Repository Test Agent");
    assert_eq!(fetched.rating, 4.5);

    let mut changes = agent("Repository Test Agent Renamed");
    changes.created_at = None;
    changes.updated_at = Some("2024-02-01T00:00:00+00:00".to_string());
    let updated = repo.update(&id, changes).await.expect("Failed to update record");
    assert_eq!(updated.matched_count, 1);

    let fetched = repo.find_by_id(&id).await.expect("Failed to fetch record").expect("Record missing");
    assert_eq!(fetched.name, "Repository Test Agent Renamed");
    assert_eq!(fetched.created_at.as_deref(), Some("2024-01-01T00:00:00+00:00"));

    let all = repo.find_all().await.expect("Failed to list records");
    assert!(all.iter().any(|a| a.id == Some(id)));

    let deleted = repo.delete(&id).await.expect("Failed to delete record");
    assert_eq!(deleted.deleted_count, 1);
    assert!(repo.find_by_id(&id).await.expect("Failed to fetch record").is_none());

    let missing = repo.update(&ObjectId::new(), agent("Nobody")).await.expect("Failed to update record");
    assert_eq!(missing.matched_count, 0);
}

#[tokio::test]
#[ignore]
async fn test_user_repository_workflow() {
    let (gateway, config) = setup_gateway().await.expect("Failed to connect to MongoDB");
    let repo = MongoUserRepository::new(&gateway, &config.user_collection);
    let username = format!("repo_test_{}", ObjectId::new().to_hex());

    let user = User {
        id: None,
        username: username.clone(),
        email: format!("{}@example.com", username),
        password: "changeme123".to_string(),
        first_name: "Repo".to_string(),
        last_name: "Test".to_string(),
        role: Default::default(),
        is_active: true,
        last_login: None,
        profile_picture: None,
        created_at: None,
        updated_at: None,
    };
    let inserted = repo.insert(user).await.expect("Failed to insert user");
    assert!(inserted.acknowledged);

    let found = repo.find_by_username(&username).await.expect("Failed to find user").expect("User missing");
    assert_eq!(found.email, format!("{}@example.com", username));
    assert!(repo.find_by_username("no-such-user-here").await.expect("Failed to find user").is_none());
}
