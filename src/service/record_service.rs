use crate::dto::agent_dto::{AgentPayload, AgentResponseDto};
use crate::model::write_result::{DeleteResult, InsertResult, UpdateResult};
use crate::repository::record_repo::RecordRepository;
use crate::schema::agent_schema::{create_agent_document, sanitize_agent, validate_agent};
use crate::util::error::ServiceError;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[async_trait]
pub trait RecordService: Send + Sync {
    async fn list_records(&self) -> Result<Vec<AgentResponseDto>, ServiceError>;
    async fn get_record(&self, id: ObjectId) -> Result<AgentResponseDto, ServiceError>;
    async fn create_record(&self, payload: AgentPayload) -> Result<InsertResult, ServiceError>;
    async fn update_record(&self, id: ObjectId, payload: AgentPayload) -> Result<UpdateResult, ServiceError>;
    async fn delete_record(&self, id: ObjectId) -> Result<DeleteResult, ServiceError>;
}

pub struct RecordServiceImpl {
    pub record_repo: Arc<dyn RecordRepository>,
}

impl RecordServiceImpl {
    pub fn new(record_repo: Arc<dyn RecordRepository>) -> Self {
        Self { record_repo }
    }
}

#[async_trait]
impl RecordService for RecordServiceImpl {
    #[instrument(skip(self))]
    async fn list_records(&self) -> Result<Vec<AgentResponseDto>, ServiceError> {
        let records = self.record_repo.find_all().await?;
        Ok(records.into_iter().map(AgentResponseDto::from).collect())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_record(&self, id: ObjectId) -> Result<AgentResponseDto, ServiceError> {
        match self.record_repo.find_by_id(&id).await? {
            Some(agent) => Ok(AgentResponseDto::from(agent)),
            None => {
                info!("Record not found");
                Err(ServiceError::NotFound("Not found".to_string()))
            }
        }
    }

    #[instrument(skip(self, payload))]
    async fn create_record(&self, payload: AgentPayload) -> Result<InsertResult, ServiceError> {
        let validation = validate_agent(&payload);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "Rejected record");
            return Err(ServiceError::Validation(validation.errors));
        }
        let document = create_agent_document(&payload);
        Ok(self.record_repo.insert(document).await?)
    }

    #[instrument(skip(self, payload), fields(id = %id))]
    async fn update_record(&self, id: ObjectId, payload: AgentPayload) -> Result<UpdateResult, ServiceError> {
        let validation = validate_agent(&payload);
        if !validation.is_valid {
            warn!(errors = ?validation.errors, "Rejected record update");
            return Err(ServiceError::Validation(validation.errors));
        }
        let fields = sanitize_agent(&payload);
        let result = self.record_repo.update(&id, fields).await?;
        if result.matched_count == 0 {
            info!("No record matched the update");
            return Err(ServiceError::NotFound("Record not found".to_string()));
        }
        Ok(result)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_record(&self, id: ObjectId) -> Result<DeleteResult, ServiceError> {
        Ok(self.record_repo.delete(&id).await?)
    }
}
