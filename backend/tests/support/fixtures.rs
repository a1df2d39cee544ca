//! Aggregate builders for integration tests.

use bookshelf::domain::{
    Book, BookDraft, BookId, Rating, ReadingList, ReadingListDraft, ReadingListId, Review,
    ReviewDraft, ReviewId, User, UserId, UserProfile,
};
use pagination::PageRequest;

pub fn book(title: &str) -> Book {
    Book::new(BookId::random(), BookDraft::titled(title)).expect("valid book")
}

pub fn book_by(title: &str, author: &str) -> Book {
    Book::new(BookId::random(), BookDraft::titled(title).by(author)).expect("valid book")
}

pub fn user(username: &str) -> User {
    User::new(UserId::random(), UserProfile::named(username)).expect("valid user")
}

pub fn reading_list(owner: UserId, name: &str, books: &[BookId]) -> ReadingList {
    ReadingList::new(
        ReadingListId::random(),
        owner,
        ReadingListDraft {
            books: books.to_vec(),
            ..ReadingListDraft::named(name)
        },
    )
    .expect("valid reading list")
}

pub fn review(owner: UserId, book: BookId, stars: u8, comment: &str) -> Review {
    Review::new(
        ReviewId::random(),
        owner,
        ReviewDraft {
            book,
            rating: Rating::new(stars).expect("valid rating"),
            comment: Some(comment.to_owned()),
        },
    )
}

pub fn page(number: usize, size: usize) -> PageRequest {
    PageRequest::new(number, size).expect("valid page request")
}
