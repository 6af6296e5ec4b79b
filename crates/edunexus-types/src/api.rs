use serde::{Deserialize, Serialize};

use crate::models::{MaterialKind, Question, UserRole};

pub const LOGIN_ENDPOINT: &str = "/users/login";
pub const INIT_ENDPOINT: &str = "/init";

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

// -- Quizzes --

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

// -- Results --

#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub quiz_id: String,
    pub student_id: String,
    pub student_name: String,
    pub score: u32,
    pub total_questions: u32,
}

// -- Materials --

#[derive(Debug, Clone)]
pub struct NewStudyMaterial {
    pub title: String,
    pub kind: MaterialKind,
    pub url: String,
    pub description: String,
}

// -- Messages --

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub student_id: String,
    pub student_name: String,
    pub content: String,
}
