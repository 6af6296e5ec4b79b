use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::collection::Collection;

/// A stored entity. Ties the type to its collection and declares how an
/// incoming record joins the local copy when the backend is unreachable.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// Built-in records served when nothing usable is stored locally.
    fn seed(_anchor: DateTime<Utc>) -> Vec<Self> {
        Vec::new()
    }

    /// Pure merge used on the local fallback path. Every collection in this
    /// version is append-only, so the default appends and keeps prior order.
    fn merge_append(mut current: Vec<Self>, incoming: Self) -> Vec<Self> {
        current.push(incoming);
        current
    }
}

// -- Users --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Teacher,
    Student,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}

impl Record for User {
    const COLLECTION: Collection = Collection::Users;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(anchor: DateTime<Utc>) -> Vec<Self> {
        crate::seed::users(anchor)
    }
}

// -- Quizzes --

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    /// URL or data URL of an illustration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Question {
    /// Build a question with a fresh id.
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_answer_index: usize) -> Self {
        Self {
            id: crate::new_id("qn"),
            text: text.into(),
            options,
            correct_answer_index,
            image_url: None,
        }
    }

    /// The store does not enforce this; callers check before adding a quiz.
    pub fn has_valid_answer(&self) -> bool {
        self.correct_answer_index < self.options.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Order is significant.
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl Record for Quiz {
    const COLLECTION: Collection = Collection::Quizzes;

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(anchor: DateTime<Utc>) -> Vec<Self> {
        crate::seed::quizzes(anchor)
    }
}

// -- Results --

/// One attempt at a quiz. Several attempts by the same student are all kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    /// Snapshot of the student's name when the attempt was recorded.
    pub student_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Score as a percentage of the question count; 0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }
}

impl Record for QuizResult {
    const COLLECTION: Collection = Collection::Results;

    fn id(&self) -> &str {
        &self.id
    }
}

// -- Materials --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Video,
    Image,
    Pdf,
    Doc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyMaterial {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    /// Link or inline data URL.
    pub url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Record for StudyMaterial {
    const COLLECTION: Collection = Collection::Materials;

    fn id(&self) -> &str {
        &self.id
    }
}

// -- Messages --

/// A question sent by a student to the teachers.
///
/// `is_read` has no mutator in this version; every message is stored unread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl Record for Message {
    const COLLECTION: Collection = Collection::Messages;

    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_uses_wire_names() {
        let user = User {
            id: "u9".into(),
            name: "Dana".into(),
            email: None,
            role: UserRole::Student,
            last_login: Some("2024-03-01T10:00:00Z".parse().unwrap()),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "STUDENT");
        assert_eq!(json["lastLogin"], "2024-03-01T10:00:00Z");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn material_kind_is_serialized_as_type() {
        let raw = r#"{"id":"mat_1","title":"Slides","type":"pdf","url":"https://x/y.pdf",
                      "description":"week 1","createdAt":"2024-03-01T10:00:00.000Z"}"#;
        let material: StudyMaterial = serde_json::from_str(raw).unwrap();
        assert_eq!(material.kind, MaterialKind::Pdf);

        let json = serde_json::to_value(&material).unwrap();
        assert_eq!(json["type"], "pdf");
    }

    #[test]
    fn merge_append_keeps_prior_records_in_order() {
        let q = |id: &str| Quiz {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            questions: vec![],
            created_at: Utc::now(),
        };
        let merged = Quiz::merge_append(vec![q("a"), q("b")], q("c"));
        let ids: Vec<_> = merged.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn percentage_handles_empty_quiz() {
        let mut result = QuizResult {
            id: "r".into(),
            quiz_id: "q".into(),
            student_id: "s".into(),
            student_name: "S".into(),
            score: 3,
            total_questions: 4,
            completed_at: Utc::now(),
        };
        assert_eq!(result.percentage(), 75.0);

        result.total_questions = 0;
        assert_eq!(result.percentage(), 0.0);
    }

    #[test]
    fn answer_index_check() {
        let mut q = Question::new("2 + 2?", vec!["3".into(), "4".into()], 1);
        assert!(q.has_valid_answer());
        q.correct_answer_index = 2;
        assert!(!q.has_valid_answer());
    }
}
