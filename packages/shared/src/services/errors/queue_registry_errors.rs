#[derive(Debug)]
pub enum QueueRegistryError {
    DuplicateId,
    NotFound,
    QueueFull,
    AlreadyJoined,
    ValidationError(String),
    InvariantViolation(String),
}

impl std::fmt::Display for QueueRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueRegistryError::DuplicateId => write!(f, "Queue id already registered"),
            QueueRegistryError::NotFound => write!(f, "Queue not found"),
            QueueRegistryError::QueueFull => write!(f, "Queue is already full"),
            QueueRegistryError::AlreadyJoined => write!(f, "User is already in the queue"),
            QueueRegistryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
            QueueRegistryError::InvariantViolation(msg) => {
                write!(f, "Invariant violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for QueueRegistryError {}
