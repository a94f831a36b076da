//! Configuration errors

/// Errors raised while turning command line input into a [`RunConfig`](super::RunConfig)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid CLI argument value
    #[error("Invalid CLI argument: {argument}='{value}' (expected: {expected})")]
    InvalidCliArgument {
        argument: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    /// Build an invalid argument error
    pub fn invalid_cli_argument(argument: &str, value: &str, expected: &str) -> Self {
        ConfigError::InvalidCliArgument {
            argument: argument.to_owned(),
            value: value.to_owned(),
            expected: expected.to_owned(),
        }
    }
}
