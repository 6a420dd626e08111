use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::StatusBadge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Ecommerce,
    Blog,
    Portfolio,
    Landing,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeline {
    Urgent,
    Standard,
    Relaxed,
    NotSure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    New,
    Contacted,
    InProgress,
    Quoted,
    Accepted,
    Declined,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::New,
        ProjectStatus::Contacted,
        ProjectStatus::InProgress,
        ProjectStatus::Quoted,
        ProjectStatus::Accepted,
        ProjectStatus::Declined,
    ];
}

impl StatusBadge for ProjectStatus {
    fn label(&self) -> &'static str {
        match self {
            ProjectStatus::New => "New",
            ProjectStatus::Contacted => "Contacted",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Quoted => "Quoted",
            ProjectStatus::Accepted => "Accepted",
            ProjectStatus::Declined => "Declined",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            ProjectStatus::New => "blue",
            ProjectStatus::Contacted => "purple",
            ProjectStatus::InProgress => "yellow",
            ProjectStatus::Quoted => "orange",
            ProjectStatus::Accepted => "green",
            ProjectStatus::Declined => "red",
        }
    }
}

/// Production phase of an accepted project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Discussion,
    Design,
    ContentCollection,
    Development,
    Revisions,
    Deployment,
    KnowledgeSharing,
    Completed,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 8] = [
        WorkflowStage::Discussion,
        WorkflowStage::Design,
        WorkflowStage::ContentCollection,
        WorkflowStage::Development,
        WorkflowStage::Revisions,
        WorkflowStage::Deployment,
        WorkflowStage::KnowledgeSharing,
        WorkflowStage::Completed,
    ];
}

impl StatusBadge for WorkflowStage {
    fn label(&self) -> &'static str {
        match self {
            WorkflowStage::Discussion => "Discussion",
            WorkflowStage::Design => "Design",
            WorkflowStage::ContentCollection => "Content Collection",
            WorkflowStage::Development => "Development",
            WorkflowStage::Revisions => "Revisions",
            WorkflowStage::Deployment => "Deployment",
            WorkflowStage::KnowledgeSharing => "Knowledge Sharing",
            WorkflowStage::Completed => "Completed",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            WorkflowStage::Discussion => "blue",
            WorkflowStage::Design => "purple",
            WorkflowStage::ContentCollection => "orange",
            WorkflowStage::Development => "yellow",
            WorkflowStage::Revisions => "pink",
            WorkflowStage::Deployment => "teal",
            WorkflowStage::KnowledgeSharing => "indigo",
            WorkflowStage::Completed => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
}

impl StatusBadge for PaymentStatus {
    fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "yellow",
            PaymentStatus::Paid => "green",
            PaymentStatus::Overdue => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl StatusBadge for MilestoneStatus {
    fn label(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "Pending",
            MilestoneStatus::InProgress => "In Progress",
            MilestoneStatus::Completed => "Completed",
            MilestoneStatus::Delayed => "Delayed",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            MilestoneStatus::Pending => "gray",
            MilestoneStatus::InProgress => "blue",
            MilestoneStatus::Completed => "green",
            MilestoneStatus::Delayed => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentItem {
    pub name: String,
    pub amount: f64,
    pub due_date: String,
    #[serde(default)]
    pub status: PaymentStatus,
    pub paid_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub due_date: String,
    #[serde(default)]
    pub status: MilestoneStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referral {
    pub name: String,
    pub commission_percentage: f64,
    #[serde(default)]
    pub commission_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub service_type: ServiceType,
    pub project_name: String,
    pub project_description: String,
    pub project_goals: Vec<String>,
    pub budget: String,
    pub timeline: Timeline,
    pub company_name: String,
    pub industry: String,
    pub target_audience: String,
    pub existing_website: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub workflow_stage: Option<WorkflowStage>,
    #[serde(default)]
    pub project_value: f64,
    #[serde(default)]
    pub payment_schedule: Vec<PaymentItem>,
    #[serde(default)]
    pub received_payments: f64,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    pub referred_by: Option<Referral>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Project {
    /// Sum of the scheduled payments currently marked paid.
    pub fn paid_total(&self) -> f64 {
        self.payment_schedule
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum()
    }

    pub fn recompute_received_payments(&mut self) {
        self.received_payments = self.paid_total();
    }

    pub fn recompute_commission(&mut self) {
        let value = self.project_value;
        if let Some(referral) = self.referred_by.as_mut() {
            referral.commission_amount = value * referral.commission_percentage / 100.0;
        }
    }

    /// Moves to `status`, entering the first workflow stage on acceptance.
    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
        if status == ProjectStatus::Accepted && self.workflow_stage.is_none() {
            self.workflow_stage = Some(WorkflowStage::Discussion);
        }
    }

    /// Sets a payment's status, stamping or clearing its paid date, and
    /// refreshes `received_payments`. Returns false if `index` is out of range.
    pub fn set_payment_status(&mut self, index: usize, status: PaymentStatus, now: &str) -> bool {
        let Some(payment) = self.payment_schedule.get_mut(index) else {
            return false;
        };
        payment.status = status;
        match status {
            PaymentStatus::Paid => {
                if payment.paid_date.is_none() {
                    payment.paid_date = Some(now.to_string());
                }
            }
            PaymentStatus::Pending | PaymentStatus::Overdue => payment.paid_date = None,
        }
        self.recompute_received_payments();
        true
    }
}
