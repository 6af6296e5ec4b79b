use std::fmt;

/// Namespace used for local storage keys unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "edunexus";

/// The five record collections, each reachable under one backend endpoint
/// and one local storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Quizzes,
    Results,
    Materials,
    Messages,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Self::Users,
        Self::Quizzes,
        Self::Results,
        Self::Materials,
        Self::Messages,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Quizzes => "quizzes",
            Self::Results => "results",
            Self::Materials => "materials",
            Self::Messages => "messages",
        }
    }

    /// Backend path, relative to the API base URL.
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Users => "/users",
            Self::Quizzes => "/quizzes",
            Self::Results => "/results",
            Self::Materials => "/materials",
            Self::Messages => "/messages",
        }
    }

    /// Local storage key, e.g. `edunexus_users`.
    pub fn storage_key(self, namespace: &str) -> String {
        format!("{}_{}", namespace, self.name())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
