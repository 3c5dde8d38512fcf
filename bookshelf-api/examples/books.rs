use bookshelf_api::{ApiError, Client, ClientConfig, Request, TokenSource};
use std::sync::Arc;

struct Anonymous;

impl TokenSource for Anonymous {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new(ClientConfig::default(), Arc::new(Anonymous))?;

    let books = client.send(Request::books().list()).await?;
    for book in books {
        println!("{} - {} ({})", book.isbn13, book.title, book.author);
    }
    Ok(())
}
