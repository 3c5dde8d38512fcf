use super::UserSummary;
use super::books::Book;
use crate::EmptyResponse;
use crate::macros::setter;
use crate::request::{Request, RequestData};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: u64,
    pub user: UserSummary,
    /// ISBN-13 of the reviewed book
    pub book: String,
    pub book_title: String,
    pub title: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadDetail {
    pub id: u64,
    pub user: UserSummary,
    pub book: Book,
    pub comments: Vec<Comment>,
    pub like_count: u64,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub like_users: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user: UserSummary,
    pub thread: u64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListThreads;

impl ListThreads {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListThreads {
    type Data = ();
    type Response = Vec<ThreadSummary>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/community/threads/".into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateThread {
    book_isbn13: String,
    title: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<i32>,
}

impl CreateThread {
    pub fn new(
        book_isbn13: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            book_isbn13: book_isbn13.into(),
            title: title.into(),
            content: content.into(),
            rating: None,
        }
    }

    setter!(opt rating: i32);
}

impl Request for CreateThread {
    type Data = Self;
    type Response = ThreadSummary;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/community/threads/".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct GetThread {
    id: u64,
}

impl GetThread {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Request for GetThread {
    type Data = ();
    type Response = ThreadDetail;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/threads/{}/", self.id).into()
    }
}

/// Partial update; only the fields that were set are sent
#[derive(Debug, Clone, Serialize)]
pub struct UpdateThread {
    #[serde(skip)]
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<i32>,
}

impl UpdateThread {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            title: None,
            content: None,
            rating: None,
        }
    }

    setter!(opt title: String);
    setter!(opt content: String);
    setter!(opt rating: i32);
}

impl Request for UpdateThread {
    type Data = Self;
    type Response = ThreadDetail;
    const METHOD: Method = Method::PUT;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/threads/{}/", self.id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteThread {
    id: u64,
}

impl DeleteThread {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Request for DeleteThread {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/threads/{}/", self.id).into()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateComment {
    #[serde(skip)]
    thread_id: u64,
    content: String,
}

impl CreateComment {
    pub fn new(thread_id: u64, content: impl Into<String>) -> Self {
        Self {
            thread_id,
            content: content.into(),
        }
    }
}

impl Request for CreateComment {
    type Data = Self;
    type Response = Comment;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/threads/{}/comments/", self.thread_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteComment {
    id: u64,
}

impl DeleteComment {
    pub fn new(id: u64) -> Self {
        Self { id }
    }
}

impl Request for DeleteComment {
    type Data = ();
    type Response = EmptyResponse;
    const METHOD: Method = Method::DELETE;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/comments/{}/", self.id).into()
    }
}

/// Like or unlike a thread, depending on the current state
#[derive(Debug, Clone)]
pub struct ToggleLike {
    thread_id: u64,
}

impl ToggleLike {
    pub fn new(thread_id: u64) -> Self {
        Self { thread_id }
    }
}

impl Request for ToggleLike {
    type Data = ();
    type Response = LikeStatus;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/community/threads/{}/likes/", self.thread_id).into()
    }
}

// Responses

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeStatus {
    pub liked: bool,
    pub count: u64,
}
