use std::fmt;

#[derive(Debug)]
pub enum PipelineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty candidate list, missing sheet, etc.).
    ConfigValidation(String),
    /// No candidate header for a required field matched anywhere in the
    /// dataset. Proceeding would emit empty-valued records for every row,
    /// so the build refuses instead.
    MissingColumn { field: String, candidates: Vec<String> },
    /// CSV parse error in the input text.
    CsvParse(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { field, candidates } => {
                write!(
                    f,
                    "required field '{field}': no column matched any of [{}]",
                    candidates.join(", ")
                )
            }
            Self::CsvParse(msg) => write!(f, "CSV parse error: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}
