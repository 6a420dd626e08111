use crate::dto::project_dto::{
    CreateProjectRequest, MilestonesRequest, PaymentScheduleRequest, ProjectListQuery, UpdateProjectRequest,
};
use crate::dto::response::{Page, Pagination};
use crate::model::now_rfc3339;
use crate::model::project::{MilestoneStatus, PaymentStatus, Project, ProjectStatus, Referral};
use crate::model::submission::Submission;
use crate::repository::project_repo::{ProjectFilter, ProjectRepository};
use crate::service::notification_service::{dispatch, Notifier};
use crate::service::pipeline_stats::PipelineStats;
use crate::service::{apply_notes, matches_search};
use crate::util::error::ServiceError;
use crate::util::validation;
use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::{info, instrument};

#[async_trait]
pub trait ProjectService: Send + Sync {
    async fn submit(&self, request: CreateProjectRequest) -> Result<Project, ServiceError>;
    async fn get(&self, id: ObjectId) -> Result<Project, ServiceError>;
    async fn list(&self, query: ProjectListQuery) -> Result<Page<Project>, ServiceError>;
    async fn update(&self, id: ObjectId, request: UpdateProjectRequest) -> Result<Project, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError>;

    // Payments and milestones
    async fn replace_payment_schedule(&self, id: ObjectId, request: PaymentScheduleRequest) -> Result<Project, ServiceError>;
    async fn update_payment_status(&self, id: ObjectId, index: usize, status: PaymentStatus) -> Result<Project, ServiceError>;
    async fn replace_milestones(&self, id: ObjectId, request: MilestonesRequest) -> Result<Project, ServiceError>;
    async fn update_milestone_status(&self, id: ObjectId, index: usize, status: MilestoneStatus) -> Result<Project, ServiceError>;

    async fn stats(&self) -> Result<PipelineStats, ServiceError>;
}

pub struct ProjectServiceImpl {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub notifier: Arc<dyn Notifier>,
}

impl ProjectServiceImpl {
    pub fn new(project_repo: Arc<dyn ProjectRepository>, notifier: Arc<dyn Notifier>) -> Self {
        ProjectServiceImpl { project_repo, notifier }
    }

    async fn save(&self, id: ObjectId, mut project: Project) -> Result<Project, ServiceError> {
        project.updated_at = now_rfc3339();
        Ok(self.project_repo.update(id, project).await?)
    }
}

#[async_trait]
impl ProjectService for ProjectServiceImpl {
    #[instrument(skip(self, request))]
    async fn submit(&self, request: CreateProjectRequest) -> Result<Project, ServiceError> {
        let request = request.normalized();
        request.check()?;
        let (Some(service_type), Some(timeline)) = (request.service_type, request.timeline) else {
            return Err(ServiceError::Validation(vec!["serviceType and timeline are required".to_string()]));
        };

        let now = now_rfc3339();
        let project = Project {
            id: None,
            service_type,
            project_name: request.project_name,
            project_description: request.project_description,
            project_goals: request.project_goals,
            budget: request.budget,
            timeline,
            company_name: request.company_name,
            industry: request.industry,
            target_audience: request.target_audience,
            existing_website: request.existing_website,
            name: request.name,
            email: request.email,
            phone: request.phone,
            status: ProjectStatus::New,
            workflow_stage: None,
            project_value: 0.0,
            payment_schedule: Vec::new(),
            received_payments: 0.0,
            milestones: Vec::new(),
            referred_by: None,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        };
        let project = self.project_repo.create(project).await?;
        info!(id = ?project.id, service_type = ?project.service_type, "Project request stored");

        dispatch(self.notifier.as_ref(), Submission::Project(&project)).await;
        Ok(project)
    }

    async fn get(&self, id: ObjectId) -> Result<Project, ServiceError> {
        Ok(self.project_repo.get_by_id(id).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: ProjectListQuery) -> Result<Page<Project>, ServiceError> {
        let filter = ProjectFilter {
            status: query.status,
            workflow_stage: query.workflow_stage,
            service_type: query.service_type,
        };
        let search = query.search.as_deref();
        let matching: Vec<Project> = self
            .project_repo
            .list(filter)
            .await?
            .into_iter()
            .filter(|p| {
                matches_search(search, &[
                    p.name.as_str(),
                    p.email.as_str(),
                    p.project_name.as_str(),
                    p.company_name.as_str(),
                ])
            })
            .collect();
        Ok(Pagination { page: query.page, limit: query.limit }.apply(matching))
    }

    #[instrument(skip(self, request), fields(id = %id))]
    async fn update(&self, id: ObjectId, request: UpdateProjectRequest) -> Result<Project, ServiceError> {
        request.check()?;
        let mut project = self.project_repo.get_by_id(id).await?;

        if let Some(status) = request.status {
            project.set_status(status);
        }
        if let Some(stage) = request.workflow_stage {
            project.workflow_stage = Some(stage);
        }
        if let Some(value) = request.project_value {
            project.project_value = value;
        }
        if let Some(referral) = request.referred_by {
            project.referred_by = Some(Referral {
                name: validation::trim(referral.name),
                commission_percentage: referral.commission_percentage,
                commission_amount: 0.0,
            });
        }
        project.recompute_commission();
        apply_notes(&mut project.notes, request.notes);

        let project = self.save(id, project).await?;
        info!(status = ?project.status, workflow_stage = ?project.workflow_stage, "Project updated");
        Ok(project)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> Result<(), ServiceError> {
        self.project_repo.delete(id).await?;
        info!("Project deleted");
        Ok(())
    }

    #[instrument(skip(self, request), fields(id = %id, items = request.payment_schedule.len()))]
    async fn replace_payment_schedule(&self, id: ObjectId, request: PaymentScheduleRequest) -> Result<Project, ServiceError> {
        request.check()?;
        let mut project = self.project_repo.get_by_id(id).await?;
        project.payment_schedule = request.into_items(&now_rfc3339());
        project.recompute_received_payments();
        let project = self.save(id, project).await?;
        info!(received = project.received_payments, "Payment schedule replaced");
        Ok(project)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn update_payment_status(&self, id: ObjectId, index: usize, status: PaymentStatus) -> Result<Project, ServiceError> {
        let mut project = self.project_repo.get_by_id(id).await?;
        if !project.set_payment_status(index, status, &now_rfc3339()) {
            return Err(ServiceError::NotFound(format!("Payment {} not found on project {}", index, id)));
        }
        let project = self.save(id, project).await?;
        info!(received = project.received_payments, "Payment status updated");
        Ok(project)
    }

    #[instrument(skip(self, request), fields(id = %id, items = request.milestones.len()))]
    async fn replace_milestones(&self, id: ObjectId, request: MilestonesRequest) -> Result<Project, ServiceError> {
        request.check()?;
        let mut project = self.project_repo.get_by_id(id).await?;
        project.milestones = request
            .milestones
            .into_iter()
            .map(|mut m| {
                m.name = validation::trim(m.name);
                m.due_date = validation::trim(m.due_date);
                m
            })
            .collect();
        let project = self.save(id, project).await?;
        info!("Milestones replaced");
        Ok(project)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn update_milestone_status(&self, id: ObjectId, index: usize, status: MilestoneStatus) -> Result<Project, ServiceError> {
        let mut project = self.project_repo.get_by_id(id).await?;
        let Some(milestone) = project.milestones.get_mut(index) else {
            return Err(ServiceError::NotFound(format!("Milestone {} not found on project {}", index, id)));
        };
        milestone.status = status;
        let project = self.save(id, project).await?;
        info!("Milestone status updated");
        Ok(project)
    }

    async fn stats(&self) -> Result<PipelineStats, ServiceError> {
        let projects = self.project_repo.list(ProjectFilter::default()).await?;
        Ok(PipelineStats::from_projects(&projects))
    }
}
