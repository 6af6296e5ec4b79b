use std::marker::PhantomData;

use chrono::{DateTime, Utc};

use edunexus_types::api::{
    LOGIN_ENDPOINT, LoginRequest, NewMessage, NewQuiz, NewQuizResult, NewStudyMaterial, NewUser,
};
use edunexus_types::{Message, Quiz, QuizResult, Record, StudyMaterial, User, UserRole, new_id};

use crate::error::StoreError;
use crate::failover::FailoverStore;

/// Typed view of one collection.
pub struct Records<'a, T> {
    store: &'a FailoverStore,
    _record: PhantomData<fn() -> T>,
}

pub type Users<'a> = Records<'a, User>;
pub type Quizzes<'a> = Records<'a, Quiz>;
pub type Results<'a> = Records<'a, QuizResult>;
pub type Materials<'a> = Records<'a, StudyMaterial>;
pub type Messages<'a> = Records<'a, Message>;

impl<'a, T: Record> Records<'a, T> {
    pub(crate) fn new(store: &'a FailoverStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Every record in the collection. Falls back to local or built-in data
    /// instead of failing.
    pub async fn list_all(&self) -> Vec<T> {
        self.store.read::<T>().await.records
    }
}

impl Records<'_, User> {
    /// Register a user. The registration instant counts as the first login.
    pub async fn add(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User {
            id: new_id("u"),
            name: new.name,
            email: new.email,
            role: new.role,
            last_login: Some(Utc::now()),
        };
        self.store.append(user).await
    }

    /// Stamp `user_id`'s last login with the current time. Other users are
    /// left as they are; an unknown id changes nothing.
    pub async fn record_login(&self, user_id: &str) -> Result<(), StoreError> {
        let body = LoginRequest {
            user_id: user_id.to_string(),
        };
        let id = user_id.to_string();
        let at = Utc::now();

        self.store
            .update::<User, _, _>(LOGIN_ENDPOINT, &body, move |users| touch_login(users, &id, at))
            .await?;
        Ok(())
    }

    pub async fn students(&self) -> Vec<User> {
        self.with_role(UserRole::Student).await
    }

    pub async fn teachers(&self) -> Vec<User> {
        self.with_role(UserRole::Teacher).await
    }

    async fn with_role(&self, role: UserRole) -> Vec<User> {
        let mut users = self.list_all().await;
        users.retain(|u| u.role == role);
        users
    }
}

/// Set one user's `last_login`. `None` when the id is unknown.
pub fn touch_login(mut users: Vec<User>, user_id: &str, at: DateTime<Utc>) -> Option<Vec<User>> {
    let user = users.iter_mut().find(|u| u.id == user_id)?;
    user.last_login = Some(at);
    Some(users)
}

impl Records<'_, Quiz> {
    pub async fn add(&self, new: NewQuiz) -> Result<Quiz, StoreError> {
        let quiz = Quiz {
            id: new_id("quiz"),
            title: new.title,
            description: new.description,
            questions: new.questions,
            created_at: Utc::now(),
        };
        self.store.append(quiz).await
    }
}

impl Records<'_, QuizResult> {
    pub async fn add(&self, new: NewQuizResult) -> Result<QuizResult, StoreError> {
        let result = QuizResult {
            id: new_id("res"),
            quiz_id: new.quiz_id,
            student_id: new.student_id,
            student_name: new.student_name,
            score: new.score,
            total_questions: new.total_questions,
            completed_at: Utc::now(),
        };
        self.store.append(result).await
    }

    /// All attempts by one student, oldest first.
    pub async fn for_student(&self, student_id: &str) -> Vec<QuizResult> {
        let mut results = self.list_all().await;
        results.retain(|r| r.student_id == student_id);
        results.sort_by_key(|r| r.completed_at);
        results
    }

    pub async fn progress_for(&self, student_id: &str) -> StudentProgress {
        StudentProgress::from_results(&self.for_student(student_id).await)
    }
}

impl Records<'_, StudyMaterial> {
    pub async fn add(&self, new: NewStudyMaterial) -> Result<StudyMaterial, StoreError> {
        let material = StudyMaterial {
            id: new_id("mat"),
            title: new.title,
            kind: new.kind,
            url: new.url,
            description: new.description,
            created_at: Utc::now(),
        };
        self.store.append(material).await
    }
}

impl Records<'_, Message> {
    pub async fn add(&self, new: NewMessage) -> Result<Message, StoreError> {
        let message = Message {
            id: new_id("msg"),
            student_id: new.student_id,
            student_name: new.student_name,
            content: new.content,
            timestamp: Utc::now(),
            is_read: false,
        };
        self.store.append(message).await
    }
}

/// Per-student summary shown on the teacher dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StudentProgress {
    pub attempts: usize,
    /// Mean of per-attempt percentages, rounded; 0 without attempts.
    pub average_percent: u32,
}

impl StudentProgress {
    pub fn from_results(results: &[QuizResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }
        let total: f64 = results.iter().map(QuizResult::percentage).sum();
        Self {
            attempts: results.len(),
            average_percent: (total / results.len() as f64).round() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use edunexus_types::seed;

    fn result(score: u32, total: u32) -> QuizResult {
        QuizResult {
            id: new_id("res"),
            quiz_id: "q1".into(),
            student_id: "u2".into(),
            student_name: "Alice Johnson".into(),
            score,
            total_questions: total,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn touch_login_updates_only_target() {
        let anchor = Utc::now() - Duration::days(10);
        let users = seed::users(anchor);
        let at = Utc::now();

        let updated = touch_login(users.clone(), "u2", at).unwrap();
        assert_eq!(updated[1].last_login, Some(at));
        assert_eq!(updated[0], users[0]);
        assert_eq!(updated[2], users[2]);
    }

    #[test]
    fn touch_login_unknown_user_is_noop() {
        assert!(touch_login(seed::users(Utc::now()), "nobody", Utc::now()).is_none());
    }

    #[test]
    fn progress_averages_percentages() {
        // 50% and 100% -> 75%; 2/3 rounds to 67%
        let progress = StudentProgress::from_results(&[result(1, 2), result(4, 4)]);
        assert_eq!(progress, StudentProgress { attempts: 2, average_percent: 75 });

        let progress = StudentProgress::from_results(&[result(2, 3)]);
        assert_eq!(progress.average_percent, 67);
    }

    #[test]
    fn progress_without_attempts_is_zero() {
        assert_eq!(StudentProgress::from_results(&[]), StudentProgress::default());
    }
}
