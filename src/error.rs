use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// One-way password hashing failed.
#[derive(Error, Debug, Clone)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// Errors raised by the table CRUD controller.
///
/// `Validation`, `Integrity`, `MissingPrimaryKey` and `RecordNotFound` are
/// user-facing: the web layer turns them into messages, never server faults.
#[derive(Error, Debug)]
pub enum CrudError {
    /// Table name is outside the allow-list.
    #[error("table not found: {0}")]
    NotFound(String),

    /// A required field was left blank.
    #[error("{field} is required.")]
    Validation { field: String },

    /// The database rejected the write with a constraint violation.
    #[error("{0}")]
    Integrity(String),

    #[error("{table} has no primary key; its rows cannot be edited or deleted.")]
    MissingPrimaryKey { table: String },

    #[error("No record with id {id} in {table}.")]
    RecordNotFound { table: String, id: String },

    /// An allow-listed table does not exist in the database.
    #[error("allow-listed table {table} does not exist")]
    MissingTable { table: String },

    /// Rows are addressed by a single key column only.
    #[error(
        "table {table} has a composite primary key ({columns}); \
         only single-column keys are supported"
    )]
    CompositePrimaryKey { table: String, columns: String },

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

impl CrudError {
    /// True for failures that are reported to the user as a message.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::Integrity(_)
                | Self::MissingPrimaryKey { .. }
                | Self::RecordNotFound { .. }
        )
    }
}

/// Authentication and session errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{field} is required.")]
    MissingField { field: &'static str },

    #[error("User {0} is already registered.")]
    UsernameTaken(String),

    #[error("Incorrect username.")]
    UnknownUser,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

impl AuthError {
    /// True for failures shown on the login/register form.
    #[must_use]
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::UsernameTaken(_)
                | Self::UnknownUser
                | Self::IncorrectPassword
        )
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Crud(#[from] CrudError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<actix_web::error::BlockingError> for Error {
    fn from(err: actix_web::error::BlockingError) -> Self {
        Error::Runtime(err.to_string())
    }
}
