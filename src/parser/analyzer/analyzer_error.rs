use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    UnknownSymbol(String),
    UnknownTable(String),
}

impl Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::UnknownSymbol(name) => write!(f, "AnalyzerError: unknown symbol '{}'", name),
            AnalyzerError::UnknownTable(name) => write!(f, "AnalyzerError: table '{}' does not exist", name),
        }
    }
}

impl std::error::Error for AnalyzerError {}
