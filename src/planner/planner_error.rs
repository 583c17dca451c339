use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    InvalidArgument(String),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerError::InvalidArgument(msg) => write!(f, "PlannerError: invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {}
