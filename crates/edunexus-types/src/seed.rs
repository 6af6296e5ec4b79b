use chrono::{DateTime, Duration, Utc};

use crate::models::{Question, Quiz, User, UserRole};

/// Demo users: one teacher, two students. Login times are relative to `anchor`.
pub fn users(anchor: DateTime<Utc>) -> Vec<User> {
    vec![
        User {
            id: "u1".into(),
            name: "Dr. Smith".into(),
            email: None,
            role: UserRole::Teacher,
            last_login: Some(anchor),
        },
        User {
            id: "u2".into(),
            name: "Alice Johnson".into(),
            email: None,
            role: UserRole::Student,
            last_login: Some(anchor - Duration::days(1)),
        },
        User {
            id: "u3".into(),
            name: "Bob Williams".into(),
            email: None,
            role: UserRole::Student,
            last_login: Some(anchor - Duration::days(2)),
        },
    ]
}

pub fn quizzes(anchor: DateTime<Utc>) -> Vec<Quiz> {
    vec![Quiz {
        id: "q1".into(),
        title: "Introduction to Physics".into(),
        description: "Basic concepts of motion and force.".into(),
        created_at: anchor,
        questions: vec![
            Question {
                id: "qn1".into(),
                text: "What is the unit of Force?".into(),
                options: strings(&["Joule", "Newton", "Watt", "Pascal"]),
                correct_answer_index: 1,
                image_url: None,
            },
            Question {
                id: "qn2".into(),
                text: "Speed is a _____ quantity.".into(),
                options: strings(&["Scalar", "Vector", "Complex", "None"]),
                correct_answer_index: 0,
                image_url: None,
            },
        ],
    }]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_users_are_one_teacher_two_students() {
        let anchor = Utc::now();
        let users = users(anchor);
        assert_eq!(users.len(), 3);
        assert_eq!(users.iter().filter(|u| u.is_teacher()).count(), 1);
        assert_eq!(users.iter().filter(|u| u.is_student()).count(), 2);
        assert_eq!(users[2].last_login, Some(anchor - Duration::days(2)));
    }

    #[test]
    fn seed_quiz_answers_are_in_range() {
        for quiz in quizzes(Utc::now()) {
            assert!(quiz.questions.iter().all(Question::has_valid_answer));
        }
    }
}
