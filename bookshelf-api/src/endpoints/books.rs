use super::path_segment;
use crate::request::Request;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn13: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub cover: String,
    pub descriptions: String,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListBooks;

impl ListBooks {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListBooks {
    type Data = ();
    type Response = Vec<Book>;

    fn endpoint(&self) -> Cow<'_, str> {
        "/books/".into()
    }
}

#[derive(Debug, Clone)]
pub struct GetBook {
    isbn13: String,
    segment: Option<String>,
}

impl GetBook {
    pub fn new(isbn13: impl Into<String>) -> Self {
        let isbn13 = isbn13.into();
        Self {
            segment: path_segment(&isbn13),
            isbn13,
        }
    }
}

impl Request for GetBook {
    type Data = ();
    type Response = Book;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/books/{}/", self.segment.as_deref().unwrap_or_default()).into()
    }

    fn validate(&self) -> Result<(), String> {
        match self.segment {
            Some(_) => Ok(()),
            None => Err(format!("{:?} is not a valid ISBN", self.isbn13)),
        }
    }
}
