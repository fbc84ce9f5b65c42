//! Driving port for job postings, applications and question threads.

use async_trait::async_trait;

use crate::domain::{Document, DocumentId, Error, InsertOutcome, WriteOutcome};

/// Append a candidate to a job's `applicants`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    pub job_id: DocumentId,
    pub user_id: DocumentId,
    pub email: String,
}

/// Open a question thread on a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobQuestion {
    pub job_id: DocumentId,
    pub user_id: DocumentId,
    pub email: String,
    pub question: String,
}

/// Answer the thread opened by `user_id`.
///
/// Without `job_id` the first job (in insertion order) holding a thread from
/// that user receives the reply. When the user has asked on several jobs
/// that choice is arbitrary from the caller's point of view, so clients
/// should send `job_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReply {
    pub user_id: DocumentId,
    pub reply: String,
    pub job_id: Option<DocumentId>,
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn list_jobs(&self) -> Result<Vec<Document>, Error>;

    async fn create_job(&self, job: Document) -> Result<InsertOutcome, Error>;

    async fn get_job(&self, id: DocumentId) -> Result<Option<Document>, Error>;

    /// Jobs whose owner `email` equals `email`.
    async fn list_jobs_posted_by(&self, email: &str) -> Result<Vec<Document>, Error>;

    /// Jobs with an applicant whose email equals `email`, without the
    /// `applicants` field.
    async fn list_jobs_applied_to_by(&self, email: &str) -> Result<Vec<Document>, Error>;

    /// Not idempotent: each call appends another applicant entry.
    async fn apply_to_job(&self, application: &JobApplication) -> Result<WriteOutcome, Error>;

    async fn ask_question(&self, question: &JobQuestion) -> Result<WriteOutcome, Error>;

    async fn reply_to_question(&self, reply: &QuestionReply) -> Result<WriteOutcome, Error>;
}
