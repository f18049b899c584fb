#![forbid(unsafe_code)]

pub mod ids {
    /// Normalized email address (lowercased, shape-checked).
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Email(String);

    impl Email {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, EmailError> {
            let value = value.into().trim().to_ascii_lowercase();
            validate_email(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum EmailError {
        Empty,
        TooLong,
        MissingAt,
        EmptyLocalPart,
        EmptyDomain,
        InvalidChar { ch: char, index: usize },
    }

    impl std::fmt::Display for EmailError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                EmailError::Empty => write!(f, "email must not be empty"),
                EmailError::TooLong => write!(f, "email must be at most 254 characters"),
                EmailError::MissingAt => write!(f, "email must contain '@'"),
                EmailError::EmptyLocalPart => write!(f, "email local part must not be empty"),
                EmailError::EmptyDomain => write!(f, "email domain must not be empty"),
                EmailError::InvalidChar { ch, index } => {
                    write!(f, "email has invalid character {ch:?} at index {index}")
                }
            }
        }
    }

    impl std::error::Error for EmailError {}

    fn validate_email(value: &str) -> Result<(), EmailError> {
        if value.is_empty() {
            return Err(EmailError::Empty);
        }
        if value.len() > 254 {
            return Err(EmailError::TooLong);
        }
        let Some((local, domain)) = value.split_once('@') else {
            return Err(EmailError::MissingAt);
        };
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        if domain.is_empty() || domain.contains('@') {
            return Err(EmailError::EmptyDomain);
        }
        for (index, ch) in value.chars().enumerate() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '@' | '.' | '_' | '+' | '-') {
                continue;
            }
            return Err(EmailError::InvalidChar { ch, index });
        }
        Ok(())
    }

    /// Entity ids minted by the store ("COURSE-001", "LSN-042", ...).
    /// Incoming ids from callers are only shape-checked, never trusted.
    pub fn is_plausible_entity_id(value: &str) -> bool {
        !value.is_empty()
            && value.len() <= 64
            && value
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_'))
    }
}

pub mod model {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Role {
        Learner,
        Admin,
    }

    impl Role {
        pub fn as_str(self) -> &'static str {
            match self {
                Role::Learner => "learner",
                Role::Admin => "admin",
            }
        }

        pub fn from_str(value: &str) -> Option<Self> {
            match value {
                "learner" => Some(Role::Learner),
                "admin" => Some(Role::Admin),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum UploadStatus {
        Pending,
        Attached,
    }

    impl UploadStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                UploadStatus::Pending => "pending",
                UploadStatus::Attached => "attached",
            }
        }

        pub fn from_str(value: &str) -> Option<Self> {
            match value {
                "pending" => Some(UploadStatus::Pending),
                "attached" => Some(UploadStatus::Attached),
                _ => None,
            }
        }
    }
}
