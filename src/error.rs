//! Error type shared by the int-keyed containers.

/// Represents errors that can occur when consuming an int-keyed container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A key was requested from a key sequence that has no keys left
    ExhaustedIterator,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExhaustedIterator => f.write_str("no more keys in sequence"),
        }
    }
}

impl std::error::Error for Error {}

/// Container result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_names_condition() {
        assert_eq!(Error::ExhaustedIterator.to_string(), "no more keys in sequence");
    }

    #[test]
    fn is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(Error::ExhaustedIterator);
        assert!(e.source().is_none());
    }
}
