use crate::model::project::{
    Milestone, MilestoneStatus, PaymentItem, PaymentStatus, ProjectStatus, ServiceType, Timeline, WorkflowStage,
};
use crate::util::error::ServiceError;
use crate::util::validation::{self, trim, trim_optional};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectRequest {
    pub service_type: Option<ServiceType>,
    #[validate(length(min = 1, message = "projectName is required"))]
    pub project_name: String,
    #[validate(length(min = 1, message = "projectDescription is required"))]
    pub project_description: String,
    #[validate(length(min = 1, message = "projectGoals must contain at least one goal"))]
    pub project_goals: Vec<String>,
    #[validate(length(min = 1, message = "budget is required"))]
    pub budget: String,
    pub timeline: Option<Timeline>,
    #[validate(length(min = 1, message = "companyName is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "industry is required"))]
    pub industry: String,
    #[validate(length(min = 1, message = "targetAudience is required"))]
    pub target_audience: String,
    pub existing_website: Option<String>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    pub phone: Option<String>,
}

impl CreateProjectRequest {
    pub fn normalized(self) -> Self {
        CreateProjectRequest {
            service_type: self.service_type,
            project_name: trim(self.project_name),
            project_description: trim(self.project_description),
            project_goals: self
                .project_goals
                .into_iter()
                .map(trim)
                .filter(|goal| !goal.is_empty())
                .collect(),
            budget: trim(self.budget),
            timeline: self.timeline,
            company_name: trim(self.company_name),
            industry: trim(self.industry),
            target_audience: trim(self.target_audience),
            existing_website: trim_optional(self.existing_website),
            name: trim(self.name),
            email: trim(self.email),
            phone: trim_optional(self.phone),
        }
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = validation::validation_messages(self.validate());
        validation::require("serviceType", &self.service_type, &mut errors);
        validation::require("timeline", &self.timeline, &mut errors);
        validation::check_phone("phone", self.phone.as_deref(), &mut errors);
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralInput {
    pub name: String,
    pub commission_percentage: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub status: Option<ProjectStatus>,
    pub notes: Option<String>,
    pub workflow_stage: Option<WorkflowStage>,
    pub project_value: Option<f64>,
    pub referred_by: Option<ReferralInput>,
}

impl UpdateProjectRequest {
    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        if self.status.is_none()
            && self.notes.is_none()
            && self.workflow_stage.is_none()
            && self.project_value.is_none()
            && self.referred_by.is_none()
        {
            errors.push("at least one field must be provided".to_string());
        }
        if let Some(value) = self.project_value {
            validation::check_amount("projectValue", value, &mut errors);
        }
        if let Some(referral) = &self.referred_by {
            if referral.name.trim().is_empty() {
                errors.push("referredBy.name is required".to_string());
            }
            let pct = referral.commission_percentage;
            if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                errors.push("referredBy.commissionPercentage must be between 0 and 100".to_string());
            }
        }
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItemInput {
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub status: PaymentStatus,
    pub paid_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleRequest {
    pub payment_schedule: Vec<PaymentItemInput>,
}

impl PaymentScheduleRequest {
    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        for (index, item) in self.payment_schedule.iter().enumerate() {
            if item.name.trim().is_empty() {
                errors.push(format!("paymentSchedule[{}].name is required", index));
            }
            validation::check_amount(&format!("paymentSchedule[{}].amount", index), item.amount, &mut errors);
            validation::check_date(&format!("paymentSchedule[{}].dueDate", index), item.due_date.trim(), &mut errors);
        }
        validation::into_result(errors)
    }

    /// Paid entries without a paid date are stamped with `now`.
    pub fn into_items(self, now: &str) -> Vec<PaymentItem> {
        self.payment_schedule
            .into_iter()
            .map(|item| {
                let paid_date = match item.status {
                    PaymentStatus::Paid => trim_optional(item.paid_date).or_else(|| Some(now.to_string())),
                    PaymentStatus::Pending | PaymentStatus::Overdue => None,
                };
                PaymentItem {
                    name: trim(item.name),
                    amount: item.amount,
                    due_date: trim(item.due_date),
                    status: item.status,
                    paid_date,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonesRequest {
    pub milestones: Vec<Milestone>,
}

impl MilestonesRequest {
    pub fn check(&self) -> Result<(), ServiceError> {
        let mut errors = Vec::new();
        for (index, milestone) in self.milestones.iter().enumerate() {
            if milestone.name.trim().is_empty() {
                errors.push(format!("milestones[{}].name is required", index));
            }
            validation::check_date(&format!("milestones[{}].dueDate", index), milestone.due_date.trim(), &mut errors);
        }
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMilestoneStatusRequest {
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub workflow_stage: Option<WorkflowStage>,
    pub service_type: Option<ServiceType>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
