use crate::model::project::{Project, ProjectStatus, WorkflowStage};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sales pipeline summary over every stored project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total: usize,
    pub by_status: BTreeMap<ProjectStatus, usize>,
    /// Accepted projects only
    pub by_workflow_stage: BTreeMap<WorkflowStage, usize>,
    pub total_project_value: f64,
    pub total_received_payments: f64,
    pub outstanding_payments: f64,
    pub avg_project_value: f64,
}

impl PipelineStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut by_status: BTreeMap<ProjectStatus, usize> = ProjectStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_workflow_stage: BTreeMap<WorkflowStage, usize> = WorkflowStage::ALL.iter().map(|s| (*s, 0)).collect();
        let mut total_project_value = 0.0;
        let mut total_received_payments = 0.0;

        for project in projects {
            *by_status.entry(project.status).or_default() += 1;
            if project.status == ProjectStatus::Accepted {
                if let Some(stage) = project.workflow_stage {
                    *by_workflow_stage.entry(stage).or_default() += 1;
                }
            }
            total_project_value += project.project_value;
            total_received_payments += project.received_payments;
        }

        let total = projects.len();
        let avg_project_value = if total == 0 { 0.0 } else { total_project_value / total as f64 };

        PipelineStats {
            total,
            by_status,
            by_workflow_stage,
            total_project_value,
            total_received_payments,
            outstanding_payments: total_project_value - total_received_payments,
            avg_project_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{ServiceType, Timeline};

    fn project(status: ProjectStatus, stage: Option<WorkflowStage>, value: f64, received: f64) -> Project {
        Project {
            id: None,
            service_type: ServiceType::Landing,
            project_name: "Site".to_string(),
            project_description: "A site".to_string(),
            project_goals: vec!["Leads".to_string()],
            budget: "1k".to_string(),
            timeline: Timeline::Relaxed,
            company_name: "Acme".to_string(),
            industry: "Retail".to_string(),
            target_audience: "Shoppers".to_string(),
            existing_website: None,
            name: "Ana".to_string(),
            email: "ana@acme.test".to_string(),
            phone: None,
            status,
            workflow_stage: stage,
            project_value: value,
            payment_schedule: vec![],
            received_payments: received,
            milestones: vec![],
            referred_by: None,
            notes: None,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
            updated_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let stats = PipelineStats::from_projects(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_project_value, 0.0);
        assert_eq!(stats.by_status.len(), ProjectStatus::ALL.len());
        assert!(stats.by_status.values().all(|count| *count == 0));
        assert_eq!(stats.by_workflow_stage.len(), WorkflowStage::ALL.len());
    }

    #[test]
    fn test_totals_and_average() {
        let projects = vec![
            project(ProjectStatus::Accepted, Some(WorkflowStage::Design), 8_000.0, 2_000.0),
            project(ProjectStatus::Accepted, None, 2_000.0, 0.0),
            project(ProjectStatus::Quoted, Some(WorkflowStage::Design), 5_000.0, 500.0),
        ];
        let stats = PipelineStats::from_projects(&projects);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.total_project_value, 15_000.0);
        assert_eq!(stats.total_received_payments, 2_500.0);
        assert_eq!(stats.outstanding_payments, stats.total_project_value - stats.total_received_payments);
        assert_eq!(stats.avg_project_value, 5_000.0);
        assert_eq!(stats.by_status[&ProjectStatus::Accepted], 2);
        assert_eq!(stats.by_status[&ProjectStatus::New], 0);
        // Only the accepted project with a stage is counted
        assert_eq!(stats.by_workflow_stage[&WorkflowStage::Design], 1);
    }

    #[test]
    fn test_serializes_camel_case_with_status_keys() {
        let stats = PipelineStats::from_projects(&[project(ProjectStatus::InProgress, None, 100.0, 0.0)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["byStatus"]["in-progress"], 1);
        assert_eq!(json["byWorkflowStage"]["knowledge_sharing"], 0);
        assert_eq!(json["outstandingPayments"], 100.0);
    }
}
