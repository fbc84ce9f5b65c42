//! Job board service: postings, applications and question threads.
//!
//! All mutations are single `update_one` calls against the `job` collection:
//!
//! | operation | filter | update |
//! |---|---|---|
//! | apply | `_id` | push `{id, email}` onto `applicants` |
//! | ask | `_id` | push `{id, email, question, reply: []}` onto `queries` |
//! | reply | `queries` contains `{id}` (and `_id` when given) | push onto `reply` of the `queries` elements with that `id` |

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ports::{DocumentStore, JobApplication, JobBoard, JobQuestion, QuestionReply};
use crate::domain::{
    Collection, Document, DocumentId, Error, Filter, InsertOutcome, Projection, Update,
    WriteOutcome,
};

use super::{require_insert_acknowledged, require_write_acknowledged};

const OWNER_EMAIL: &str = "email";
const APPLICANTS: &str = "applicants";
const QUERIES: &str = "queries";
const REPLY: &str = "reply";
const THREAD_ID: &str = "id";

/// [`JobBoard`] implementation over an injected [`DocumentStore`].
pub struct JobBoardService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> JobBoardService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: ?Sized> Clone for JobBoardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn single_field(field: &str, value: Value) -> Document {
    Document::from_iter([(field.to_owned(), value)])
}

/// Filter selecting jobs with a `queries` element asked by `user_id`.
fn thread_owner_filter(user_id: DocumentId) -> Filter {
    Filter::matching(single_field(
        QUERIES,
        json!([{ THREAD_ID: user_id.to_value() }]),
    ))
}

impl<S> JobBoardService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn push(&self, filter: Filter, update: Update) -> Result<WriteOutcome, Error> {
        let outcome = self
            .store
            .update_one(Collection::Jobs, &filter, &update)
            .await?;
        if outcome.matched_count == 0 {
            debug!(
                field = update.target_field(),
                id = ?filter.id(),
                "job update matched no document"
            );
        }
        require_write_acknowledged(outcome, Collection::Jobs)
    }
}

#[async_trait]
impl<S> JobBoard for JobBoardService<S>
where
    S: DocumentStore + ?Sized,
{
    async fn list_jobs(&self) -> Result<Vec<Document>, Error> {
        Ok(self
            .store
            .find(Collection::Jobs, &Filter::all(), &Projection::Full)
            .await?)
    }

    async fn create_job(&self, job: Document) -> Result<InsertOutcome, Error> {
        let outcome = self.store.insert_one(Collection::Jobs, job).await?;
        require_insert_acknowledged(outcome, Collection::Jobs)
    }

    async fn get_job(&self, id: DocumentId) -> Result<Option<Document>, Error> {
        Ok(self
            .store
            .find_one(Collection::Jobs, &Filter::by_id(id))
            .await?)
    }

    async fn list_jobs_posted_by(&self, email: &str) -> Result<Vec<Document>, Error> {
        let filter = Filter::matching(single_field(OWNER_EMAIL, Value::String(email.to_owned())));
        Ok(self
            .store
            .find(Collection::Jobs, &filter, &Projection::Full)
            .await?)
    }

    async fn list_jobs_applied_to_by(&self, email: &str) -> Result<Vec<Document>, Error> {
        let filter = Filter::matching(single_field(APPLICANTS, json!([{ "email": email }])));
        Ok(self
            .store
            .find(
                Collection::Jobs,
                &filter,
                &Projection::excluding(&[APPLICANTS]),
            )
            .await?)
    }

    async fn apply_to_job(&self, application: &JobApplication) -> Result<WriteOutcome, Error> {
        let update = Update::Push {
            field: APPLICANTS.to_owned(),
            value: json!({
                "id": application.user_id.to_value(),
                "email": application.email,
            }),
        };
        self.push(Filter::by_id(application.job_id), update).await
    }

    async fn ask_question(&self, question: &JobQuestion) -> Result<WriteOutcome, Error> {
        let update = Update::Push {
            field: QUERIES.to_owned(),
            value: json!({
                "id": question.user_id.to_value(),
                "email": question.email,
                "question": question.question,
                "reply": [],
            }),
        };
        self.push(Filter::by_id(question.job_id), update).await
    }

    async fn reply_to_question(&self, reply: &QuestionReply) -> Result<WriteOutcome, Error> {
        let filter = match reply.job_id {
            Some(job_id) => thread_owner_filter(reply.user_id).and_id(job_id),
            None => thread_owner_filter(reply.user_id),
        };
        let update = Update::PushToMatchingElements {
            array: QUERIES.to_owned(),
            element: single_field(THREAD_ID, reply.user_id.to_value()),
            field: REPLY.to_owned(),
            value: Value::String(reply.reply.clone()),
        };
        self.push(filter, update).await
    }
}
