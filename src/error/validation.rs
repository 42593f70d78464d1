use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Invalid endpoint '{value}'. Expected 'PATH[:REQUESTS[:WORKERS]]'.")]
    InvalidEndpointFormat { value: String },
    #[error("Invalid endpoint '{value}'. Path must start with '/'.")]
    EndpointPathNotAbsolute { value: String },
    #[error("Invalid {field} in endpoint '{value}': {source}")]
    InvalidEndpointCount {
        value: String,
        field: &'static str,
        #[source]
        source: Box<ValidationError>,
    },
    #[error("Invalid credential format. Expected 'EMAIL:PASSWORD'.")]
    InvalidCredentialFormat,
    #[error("Credential email and password must not be empty.")]
    CredentialFieldEmpty,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
