use crate::model::agent::Agent;
use crate::model::write_result::{DeleteResult, InsertResult, UpdateResult};
use crate::repository::mongo_gateway::MongoGateway;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use tracing::{error, info};

/// Single-document operations on the agent record collection.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Every record, unfiltered and unpaginated
    async fn find_all(&self) -> RepositoryResult<Vec<Agent>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>>;
    async fn insert(&self, agent: Agent) -> RepositoryResult<InsertResult>;
    /// `$set`s the given fields on the matching record
    async fn update(&self, id: &ObjectId, fields: Agent) -> RepositoryResult<UpdateResult>;
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<DeleteResult>;
}

pub struct MongoRecordRepository {
    collection: mongodb::Collection<Agent>,
}

impl MongoRecordRepository {
    pub fn new(gateway: &MongoGateway, collection_name: &str) -> Self {
        MongoRecordRepository {
            collection: gateway.collection::<Agent>(collection_name),
        }
    }
}

#[async_trait]
impl RecordRepository for MongoRecordRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Agent>> {
        let cursor = self.collection.find(None, None).await.map_err(|e| {
            error!("Failed to list records: {}", e);
            RepositoryError::from(e)
        })?;
        let records: Vec<Agent> = cursor.try_collect().await.map_err(|e| {
            error!("Failed to read record cursor: {}", e);
            RepositoryError::from(e)
        })?;
        info!("Fetched {} records", records.len());
        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Agent>> {
        let record = self.collection.find_one(doc! { "_id": id }, None).await.map_err(|e| {
            error!("Failed to fetch record by ID: {}", e);
            RepositoryError::from(e)
        })?;
        Ok(record)
    }

    #[tracing::instrument(skip(self, agent), fields(name = %agent.name))]
    async fn insert(&self, agent: Agent) -> RepositoryResult<InsertResult> {
        match self.collection.insert_one(agent, None).await {
            Ok(result) => {
                let result = InsertResult::from(result);
                info!(inserted_id = %result.inserted_id, "Record created");
                Ok(result)
            }
            Err(e) => {
                error!("Failed to insert record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self, fields), fields(id = %id))]
    async fn update(&self, id: &ObjectId, fields: Agent) -> RepositoryResult<UpdateResult> {
        let mut set = bson::to_document(&fields)?;
        set.remove("_id");
        set.remove("createdAt");
        let update = doc! { "$set": set };
        match self.collection.update_one(doc! { "_id": id }, update, None).await {
            Ok(result) => {
                let result = UpdateResult::from(result);
                info!(matched = result.matched_count, modified = result.modified_count, "Record update applied");
                Ok(result)
            }
            Err(e) => {
                error!("Failed to update record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<DeleteResult> {
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(result) => {
                let result = DeleteResult::from(result);
                info!(deleted = result.deleted_count, "Record delete applied");
                Ok(result)
            }
            Err(e) => {
                error!("Failed to delete record: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }
}
