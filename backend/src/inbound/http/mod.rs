//! HTTP inbound adapter exposing the REST endpoints.

pub mod chats;
pub mod envelope;
pub mod error;
pub mod health;
pub mod jobs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every document route and the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    error::extractor_config(cfg);
    cfg.service(users::list_users)
        .service(users::create_user)
        .service(users::find_user)
        .service(jobs::apply)
        .service(jobs::ask)
        .service(jobs::reply)
        .service(jobs::applied_jobs)
        .service(jobs::list_jobs)
        .service(jobs::get_job)
        .service(jobs::create_job)
        .service(jobs::posted_jobs)
        .service(chats::get_chat)
        .service(chats::list_chats)
        .service(chats::get_conversation)
        .service(chats::create_chat)
        .service(chats::append_message);
}
