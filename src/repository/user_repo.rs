use crate::model::user::User;
use crate::model::write_result::InsertResult;
use crate::repository::mongo_gateway::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use tracing::{error, info};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    async fn insert(&self, user: User) -> RepositoryResult<InsertResult>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(gateway: &MongoGateway, collection_name: &str) -> Self {
        MongoUserRepository {
            collection: gateway.collection::<User>(collection_name),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        let filter = bson::doc! { "username": username };
        let user = self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to find user by username: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(user)
    }

    #[tracing::instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: User) -> RepositoryResult<InsertResult> {
        match self.collection.insert_one(user, None).await {
            Ok(result) => {
                info!("User inserted");
                Ok(InsertResult::from(result))
            }
            Err(e) => {
                error!("Failed to insert user: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
