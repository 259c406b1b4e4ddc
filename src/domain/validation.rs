use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingPlaceholder { template: String },
    TooManyPlaceholders { template: String, count: usize },
    InvalidUrl { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingPlaceholder { template } => {
                write!(f, "shortener template has no %s placeholder: {template}")
            }
            Self::TooManyPlaceholders { template, count } => {
                write!(
                    f,
                    "shortener template must contain exactly one %s placeholder, found {count}: {template}"
                )
            }
            Self::InvalidUrl { input, reason } => write!(f, "invalid URL {input}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}
