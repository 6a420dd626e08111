use crate::model::project::{Project, ProjectStatus, ServiceType, WorkflowStage};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use crate::repository::{newest_first, without_id};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::stream::StreamExt;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub workflow_stage: Option<WorkflowStage>,
    pub service_type: Option<ServiceType>,
}

impl ProjectFilter {
    fn to_document(self) -> RepositoryResult<Document> {
        let mut filter = doc! {};
        if let Some(status) = self.status {
            filter.insert("status", bson::to_bson(&status)?);
        }
        if let Some(stage) = self.workflow_stage {
            filter.insert("workflowStage", bson::to_bson(&stage)?);
        }
        if let Some(service_type) = self.service_type {
            filter.insert("serviceType", bson::to_bson(&service_type)?);
        }
        Ok(filter)
    }
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: Project) -> RepositoryResult<Project>;
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Project>;
    /// Replaces every field except `_id`.
    async fn update(&self, id: ObjectId, project: Project) -> RepositoryResult<Project>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Matching projects, newest first.
    async fn list(&self, filter: ProjectFilter) -> RepositoryResult<Vec<Project>>;
}

pub struct MongoProjectRepository {
    collection: mongodb::Collection<Project>,
}

impl MongoProjectRepository {
    pub fn new(db: &mongodb::Database, collection_name: &str) -> Self {
        MongoProjectRepository {
            collection: db.collection::<Project>(collection_name),
        }
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    #[tracing::instrument(skip(self, project), fields(project_name = %project.project_name))]
    async fn create(&self, mut project: Project) -> RepositoryResult<Project> {
        info!("Creating project request");
        project.id = Some(ObjectId::new());
        match self.collection.insert_one(project.clone(), None).await {
            Ok(_) => Ok(project),
            Err(e) => {
                error!("Failed to create project: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Project> {
        match self.collection.find_one(doc! { "_id": id }, None).await {
            Ok(Some(project)) => Ok(project),
            Ok(None) => Err(RepositoryError::not_found(format!("Project not found for ID: {}", id))),
            Err(e) => {
                error!("Failed to fetch project by ID: {}", e);
                Err(RepositoryError::database(format!("Failed to fetch project by ID: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self, project), fields(id = %id, status = ?project.status))]
    async fn update(&self, id: ObjectId, mut project: Project) -> RepositoryResult<Project> {
        info!("Updating project");
        let document = without_id(bson::to_document(&project)?);
        match self.collection.update_one(doc! { "_id": id }, doc! { "$set": document }, None).await {
            Ok(update_result) if update_result.matched_count > 0 => {
                project.id = Some(id);
                Ok(project)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No project found to update for ID: {}", id))),
            Err(e) => {
                error!("Failed to update project: {}", e);
                Err(RepositoryError::database(format!("Failed to update project: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        info!("Deleting project");
        match self.collection.delete_one(doc! { "_id": id }, None).await {
            Ok(delete_result) if delete_result.deleted_count > 0 => Ok(()),
            Ok(_) => Err(RepositoryError::not_found(format!("No project found to delete for ID: {}", id))),
            Err(e) => {
                error!("Failed to delete project: {}", e);
                Err(RepositoryError::database(format!("Failed to delete project: {}", e)))
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: ProjectFilter) -> RepositoryResult<Vec<Project>> {
        let mut cursor = self
            .collection
            .find(filter.to_document()?, newest_first())
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list projects: {}", e)))?;
        let mut projects = Vec::new();
        while let Some(project) = cursor.next().await {
            match project {
                Ok(p) => projects.push(p),
                Err(e) => {
                    error!("Failed to deserialize project: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize project: {}", e)));
                }
            }
        }
        info!("Fetched {} projects", projects.len());
        Ok(projects)
    }
}
