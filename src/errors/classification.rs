use super::types::DashError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// Rejections the user caused and can correct. Everything else is a
    /// programming or environment fault.
    pub user_facing: bool,
}

impl DashError {
    /// Classify this error to determine its type and whether it is a plain
    /// user-facing rejection.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            DashError::AlreadyRunning => ErrorClassification {
                error_type: "AlreadyRunningError",
                user_facing: true,
            },
            DashError::EmptyInput(_) => ErrorClassification {
                error_type: "EmptyInputError",
                user_facing: true,
            },
            DashError::InvalidArgument(_) => ErrorClassification {
                error_type: "InvalidArgumentError",
                user_facing: true,
            },
            DashError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                user_facing: true,
            },

            // The view set is closed, so reaching this is a caller bug.
            DashError::UnknownView(_) => ErrorClassification {
                error_type: "UnknownViewError",
                user_facing: false,
            },
            DashError::Io(_) => ErrorClassification {
                error_type: "IoError",
                user_facing: false,
            },
            DashError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                user_facing: false,
            },
            DashError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                user_facing: false,
            },
            DashError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                user_facing: false,
            },
        }
    }

    /// Process exit code used by the CLI entry point.
    pub fn exit_code(&self) -> i32 {
        match self {
            DashError::Config(_) => 2,
            DashError::InvalidArgument(_) => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_running_is_user_facing() {
        let class = DashError::AlreadyRunning.classify();
        assert!(class.user_facing);
        assert_eq!(class.error_type, "AlreadyRunningError");
    }

    #[test]
    fn test_unknown_view_is_programming_error() {
        let class = DashError::UnknownView("settings".into()).classify();
        assert!(!class.user_facing);
        assert_eq!(class.error_type, "UnknownViewError");
    }

    #[test]
    fn test_empty_input_is_user_facing() {
        let err = DashError::EmptyInput("Please enter a security query".into());
        assert!(err.classify().user_facing);
        assert_eq!(err.to_string(), "Please enter a security query");
    }

    #[test]
    fn test_internal_not_user_facing() {
        assert!(!DashError::Internal("oops".into()).classify().user_facing);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(DashError::Config("bad".into()).exit_code(), 2);
        assert_eq!(DashError::InvalidArgument("bad".into()).exit_code(), 3);
        assert_eq!(DashError::AlreadyRunning.exit_code(), 1);
    }
}
