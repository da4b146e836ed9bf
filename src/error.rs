use thiserror::Error;

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors for fitting, matching and loading recipe data.
#[derive(Error, Debug)]
pub enum Error {
    /// fit or match was handed zero documents / rows
    #[error("empty corpus: nothing to fit or match against")]
    EmptyCorpus,
    /// every fit document tokenized to zero terms
    #[error("empty vocabulary: no document produced a usable term")]
    EmptyVocabulary,
    /// recipe CSV is missing a required header
    #[error("recipe data is missing the `{0}` column")]
    MissingColumn(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] serde_cbor::Error),
    /// snapshot decoded but breaks an engine invariant
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

impl Error {
    /// Errors that come from the supplied data rather than the environment.
    /// The CLI reports these as a configuration problem ("fix the data").
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyCorpus | Error::EmptyVocabulary | Error::MissingColumn(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failure() {
        assert!(Error::EmptyCorpus.to_string().contains("empty corpus"));
        assert!(Error::EmptyVocabulary.to_string().contains("empty vocabulary"));
        assert_eq!(
            Error::MissingColumn("Ingredients").to_string(),
            "recipe data is missing the `Ingredients` column"
        );
    }

    #[test]
    fn data_errors_are_classified() {
        assert!(Error::EmptyCorpus.is_data_error());
        assert!(Error::MissingColumn("RecipeName").is_data_error());
        let io = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_data_error());
    }
}
