use crate::endpoints::{
    accounts::{FollowUser, GetProfile, ObtainToken, Signup},
    books::{GetBook, ListBooks},
    community::{
        CreateComment, CreateThread, DeleteComment, DeleteThread, GetThread, ListThreads,
        ToggleLike, UpdateThread,
    },
};
use secrecy::SecretString;

#[derive(Default)]
pub struct AccountRepository;

impl AccountRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn token(
        &self,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> ObtainToken {
        ObtainToken::new(username, password)
    }

    pub fn signup(
        &self,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Signup {
        Signup::new(username, password)
    }

    pub fn profile(&self, username: impl Into<String>) -> GetProfile {
        GetProfile::new(username)
    }

    pub fn follow(&self, user_id: u64) -> FollowUser {
        FollowUser::new(user_id)
    }
}

#[derive(Default)]
pub struct BookRepository;

impl BookRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn list(&self) -> ListBooks {
        ListBooks::new()
    }

    pub fn get(&self, isbn13: impl Into<String>) -> GetBook {
        GetBook::new(isbn13)
    }
}

#[derive(Default)]
pub struct CommunityRepository;

impl CommunityRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn threads(&self) -> ListThreads {
        ListThreads::new()
    }

    pub fn create_thread(
        &self,
        book_isbn13: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> CreateThread {
        CreateThread::new(book_isbn13, title, content)
    }

    pub fn get_thread(&self, id: u64) -> GetThread {
        GetThread::new(id)
    }

    pub fn update_thread(&self, id: u64) -> UpdateThread {
        UpdateThread::new(id)
    }

    pub fn delete_thread(&self, id: u64) -> DeleteThread {
        DeleteThread::new(id)
    }

    pub fn comment(&self, thread_id: u64, content: impl Into<String>) -> CreateComment {
        CreateComment::new(thread_id, content)
    }

    pub fn delete_comment(&self, id: u64) -> DeleteComment {
        DeleteComment::new(id)
    }

    pub fn toggle_like(&self, thread_id: u64) -> ToggleLike {
        ToggleLike::new(thread_id)
    }
}
