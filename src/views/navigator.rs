use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DashError;

/// The fixed set of mutually exclusive dashboard surfaces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewName {
    Dashboard,
    Query,
    Ragbot,
    Results,
    Pipeline,
    Reports,
}

impl ViewName {
    /// Shortcut order: position `n` here is shortcut `n + 1`.
    pub const ALL: [ViewName; 6] = [
        Self::Dashboard,
        Self::Query,
        Self::Ragbot,
        Self::Results,
        Self::Pipeline,
        Self::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Query => "query",
            Self::Ragbot => "ragbot",
            Self::Results => "results",
            Self::Pipeline => "pipeline",
            Self::Reports => "reports",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Security Dashboard",
            Self::Query => "Security Query",
            Self::Ragbot => "Risk Intelligence Assistant",
            Self::Results => "Scan Results",
            Self::Pipeline => "Threat Intelligence Pipeline",
            Self::Reports => "Security Reports",
        }
    }

    /// 1-based shortcut position.
    pub fn shortcut(&self) -> usize {
        Self::ALL
            .iter()
            .position(|v| v == self)
            .map(|i| i + 1)
            .unwrap_or(1)
    }

    pub fn from_index(index: usize) -> Result<Self, DashError> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| DashError::UnknownView(format!("#{}", index)))
    }
}

impl std::fmt::Display for ViewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewName {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == lower)
            .ok_or_else(|| DashError::UnknownView(s.to_string()))
    }
}

/// Tracks the single active view. There is no back-stack.
#[derive(Debug, Clone)]
pub struct ViewNavigator {
    active: ViewName,
}

impl ViewNavigator {
    pub fn new() -> Self {
        Self {
            active: ViewName::Dashboard,
        }
    }

    pub fn active(&self) -> ViewName {
        self.active
    }

    pub fn is_active(&self, view: ViewName) -> bool {
        self.active == view
    }

    /// Activate a view by name, deactivating the previous one.
    pub fn activate(&mut self, name: &str) -> Result<ViewName, DashError> {
        let view: ViewName = name.parse()?;
        Ok(self.activate_view(view))
    }

    /// Activate a view by its 1-based shortcut position.
    pub fn activate_index(&mut self, index: usize) -> Result<ViewName, DashError> {
        let view = ViewName::from_index(index)?;
        Ok(self.activate_view(view))
    }

    pub fn activate_view(&mut self, view: ViewName) -> ViewName {
        if self.active != view {
            debug!(from = %self.active, to = %view, "Switching view");
        }
        self.active = view;
        view
    }
}

impl Default for ViewNavigator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_dashboard() {
        let nav = ViewNavigator::new();
        assert_eq!(nav.active(), ViewName::Dashboard);
    }

    #[test]
    fn test_exactly_one_view_active() {
        let mut nav = ViewNavigator::new();
        nav.activate("dashboard").unwrap();
        nav.activate("reports").unwrap();
        assert!(nav.is_active(ViewName::Reports));
        assert!(!nav.is_active(ViewName::Dashboard));
        let active: Vec<_> = ViewName::ALL.iter().filter(|v| nav.is_active(**v)).collect();
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn test_unknown_view_rejected_without_change() {
        let mut nav = ViewNavigator::new();
        nav.activate("results").unwrap();
        let err = nav.activate("settings").unwrap_err();
        assert!(matches!(err, DashError::UnknownView(ref name) if name == "settings"));
        assert_eq!(nav.active(), ViewName::Results);
    }

    #[test]
    fn test_activate_is_case_insensitive() {
        let mut nav = ViewNavigator::new();
        assert_eq!(nav.activate("RagBot").unwrap(), ViewName::Ragbot);
    }

    #[test]
    fn test_shortcut_indices() {
        let mut nav = ViewNavigator::new();
        assert_eq!(nav.activate_index(1).unwrap(), ViewName::Dashboard);
        assert_eq!(nav.activate_index(6).unwrap(), ViewName::Reports);
        assert!(nav.activate_index(0).is_err());
        assert!(nav.activate_index(7).is_err());
        assert_eq!(nav.active(), ViewName::Reports);
        assert_eq!(ViewName::Pipeline.shortcut(), 5);
    }
}
