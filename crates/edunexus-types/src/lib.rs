pub mod api;
pub mod collection;
pub mod models;
pub mod seed;

pub use collection::{Collection, DEFAULT_NAMESPACE};
pub use models::{
    MaterialKind, Message, Question, Quiz, QuizResult, Record, StudyMaterial, User, UserRole,
};

/// Fresh record id: `<prefix>_<unix millis>_<random suffix>`.
///
/// The millisecond part keeps ids roughly time-ordered; the suffix keeps two
/// records created in the same millisecond apart.
pub fn new_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, millis, &suffix[..8])
}
