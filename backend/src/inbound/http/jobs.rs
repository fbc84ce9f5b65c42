//! Job board handlers.
//!
//! ```text
//! GET   /jobs
//! POST  /job
//! GET   /job/{id}
//! GET   /posted-jobs/{email}
//! GET   /applied-jobs/{email}
//! PATCH /apply   {"jobId":"…","userId":"…","email":"dev@example.com"}
//! PATCH /query   {"jobId":"…","userId":"…","email":"dev@example.com","question":"Remote?"}
//! PATCH /reply   {"userId":"…","reply":"Yes","jobId":"…"}
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{JobApplication, JobQuestion, QuestionReply};
use crate::domain::{Document, DocumentId, Error, InsertOutcome, WriteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{
    DocumentEnvelopeSchema, DocumentListEnvelopeSchema, DocumentSchema, InsertEnvelopeSchema,
    WriteEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;

/// Request body for `PATCH /apply`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub job_id: String,
    pub user_id: String,
    pub email: String,
}

impl TryFrom<ApplyRequest> for JobApplication {
    type Error = Error;

    fn try_from(value: ApplyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: DocumentId::parse(&value.job_id)?,
            user_id: DocumentId::parse(&value.user_id)?,
            email: value.email,
        })
    }
}

/// Request body for `PATCH /query`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub job_id: String,
    pub user_id: String,
    pub email: String,
    pub question: String,
}

impl TryFrom<QuestionRequest> for JobQuestion {
    type Error = Error;

    fn try_from(value: QuestionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            job_id: DocumentId::parse(&value.job_id)?,
            user_id: DocumentId::parse(&value.user_id)?,
            email: value.email,
            question: value.question,
        })
    }
}

/// Request body for `PATCH /reply`.
///
/// Without `jobId` the reply lands on the first job, in insertion order,
/// holding a thread from `userId`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub user_id: String,
    pub reply: String,
    #[serde(default)]
    pub job_id: Option<String>,
}

impl TryFrom<ReplyRequest> for QuestionReply {
    type Error = Error;

    fn try_from(value: ReplyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: DocumentId::parse(&value.user_id)?,
            reply: value.reply,
            job_id: value.job_id.as_deref().map(DocumentId::parse).transpose()?,
        })
    }
}

/// List every job posting.
#[utoipa::path(
    get,
    path = "/jobs",
    responses((status = 200, description = "All jobs", body = DocumentListEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "listJobs"
)]
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Envelope<Vec<Document>>>> {
    Ok(Envelope::json(state.jobs.list_jobs().await?))
}

/// Store a job posting as supplied.
#[utoipa::path(
    post,
    path = "/job",
    request_body = DocumentSchema,
    responses((status = 200, description = "Insert outcome", body = InsertEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/job")]
pub async fn create_job(
    state: web::Data<HttpState>,
    payload: web::Json<Document>,
) -> ApiResult<web::Json<Envelope<InsertOutcome>>> {
    Ok(Envelope::json(
        state.jobs.create_job(payload.into_inner()).await?,
    ))
}

/// Fetch one job; `data` is `null` when the id is unknown.
#[utoipa::path(
    get,
    path = "/job/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "The job or null; status false for a malformed id", body = DocumentEnvelopeSchema)
    ),
    tags = ["jobs"],
    operation_id = "getJob"
)]
#[get("/job/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Option<Document>>>> {
    let id = DocumentId::parse(&id)?;
    Ok(Envelope::json(state.jobs.get_job(id).await?))
}

/// Jobs whose owner `email` equals the path segment.
#[utoipa::path(
    get,
    path = "/posted-jobs/{email}",
    params(("email" = String, Path, description = "Owner email")),
    responses((status = 200, description = "Jobs posted by the owner", body = DocumentListEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "listJobsPostedBy"
)]
#[get("/posted-jobs/{email}")]
pub async fn posted_jobs(
    state: web::Data<HttpState>,
    email: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<Document>>>> {
    Ok(Envelope::json(
        state.jobs.list_jobs_posted_by(&email).await?,
    ))
}

/// Jobs the candidate applied to, with the applicant list removed.
#[utoipa::path(
    get,
    path = "/applied-jobs/{email}",
    params(("email" = String, Path, description = "Candidate email")),
    responses((status = 200, description = "Jobs without `applicants`", body = DocumentListEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "listJobsAppliedToBy"
)]
#[get("/applied-jobs/{email}")]
pub async fn applied_jobs(
    state: web::Data<HttpState>,
    email: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<Document>>>> {
    Ok(Envelope::json(
        state.jobs.list_jobs_applied_to_by(&email).await?,
    ))
}

/// Append an applicant to a job.
#[utoipa::path(
    patch,
    path = "/apply",
    request_body = ApplyRequest,
    responses((status = 200, description = "Write outcome", body = WriteEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "applyToJob"
)]
#[patch("/apply")]
pub async fn apply(
    state: web::Data<HttpState>,
    payload: web::Json<ApplyRequest>,
) -> ApiResult<web::Json<Envelope<WriteOutcome>>> {
    let application = JobApplication::try_from(payload.into_inner())?;
    Ok(Envelope::json(state.jobs.apply_to_job(&application).await?))
}

/// Open a question thread on a job.
#[utoipa::path(
    patch,
    path = "/query",
    request_body = QuestionRequest,
    responses((status = 200, description = "Write outcome", body = WriteEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "askQuestion"
)]
#[patch("/query")]
pub async fn ask(
    state: web::Data<HttpState>,
    payload: web::Json<QuestionRequest>,
) -> ApiResult<web::Json<Envelope<WriteOutcome>>> {
    let question = JobQuestion::try_from(payload.into_inner())?;
    Ok(Envelope::json(state.jobs.ask_question(&question).await?))
}

/// Append a reply to the asking user's thread.
#[utoipa::path(
    patch,
    path = "/reply",
    request_body = ReplyRequest,
    responses((status = 200, description = "Write outcome", body = WriteEnvelopeSchema)),
    tags = ["jobs"],
    operation_id = "replyToQuestion"
)]
#[patch("/reply")]
pub async fn reply(
    state: web::Data<HttpState>,
    payload: web::Json<ReplyRequest>,
) -> ApiResult<web::Json<Envelope<WriteOutcome>>> {
    let reply = QuestionReply::try_from(payload.into_inner())?;
    Ok(Envelope::json(state.jobs.reply_to_question(&reply).await?))
}
