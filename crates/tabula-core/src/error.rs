use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Length mismatch at construction/replace, duplicate column name,
    /// or a dtype that cannot be inferred.
    #[error("Schema error: {0}")]
    Schema(String),

    /// `min`/`max`/`mean` over zero non-null values.
    #[error("Empty reduction: {op} over zero non-null values")]
    EmptyReduction { op: &'static str },

    /// Integer aggregate outside the `i64` range.
    #[error("Overflow: {op} exceeds the i64 range")]
    Overflow { op: &'static str },

    /// Out-of-range row position.
    #[error("Index out of bounds: index {index} for length {len}")]
    Index { index: usize, len: usize },

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error with context chain for better debugging
    #[error("Error in {context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Add context to an error, creating an error chain.
    ///
    /// # Example
    /// ```rust,no_run
    /// use tabula_core::error::Error;
    /// let err = Error::ColumnNotFound("price".into());
    /// let err = err.with_context("while resolving join keys");
    /// ```
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self) as Box<dyn std::error::Error + Send + Sync>,
        }
    }

    /// Unwrap any context layers and return the innermost core error.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => match source.downcast_ref::<Error>() {
                Some(inner) => inner.root(),
                None => self,
            },
            other => other,
        }
    }

    /// Get suggestions for common errors (e.g., column name suggestions).
    pub fn suggestions(&self) -> Vec<String> {
        match self.root() {
            Error::ColumnNotFound(_) => vec![
                "Check that the column name is spelled correctly".into(),
                "Use DataFrame::columns() to list the available columns".into(),
            ],
            Error::Schema(msg) => {
                if msg.contains("length") {
                    vec!["All columns of a DataFrame must have the same length".into()]
                } else if msg.contains("duplicate") {
                    vec!["Rename one of the columns before combining them".into()]
                } else if msg.contains("infer") {
                    vec!["Pass an explicit dtype hint for all-null or empty columns".into()]
                } else {
                    vec![]
                }
            }
            Error::EmptyReduction { .. } => {
                vec!["sum() returns 0 for columns without non-null values; min/max/mean do not".into()]
            }
            Error::Overflow { .. } => {
                vec!["Use mean() or cast the column to f64 before summing".into()]
            }
            Error::Index { len, .. } => {
                vec![format!("Valid row positions are 0..{}", len)]
            }
            _ => vec![],
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
