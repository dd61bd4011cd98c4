use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures the engine reports to its caller. None of these are fatal; the
/// frontend decides what to show the player.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dimension {dimension} is below the 3x3 minimum")]
    DimensionTooSmall { dimension: usize },

    #[error("no undo available: history empty or budget exhausted")]
    UndoUnavailable,
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn dimension_error_names_the_offending_value() {
        let error = Error::DimensionTooSmall { dimension: 2 };
        assert_eq!(error.to_string(), "dimension 2 is below the 3x3 minimum");
    }

    #[test]
    fn undo_error_mentions_both_causes() {
        let message = Error::UndoUnavailable.to_string();
        assert!(message.contains("history"));
        assert!(message.contains("budget"));
    }
}
