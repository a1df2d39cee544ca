//! Black-box checks every repository backend must pass.
//!
//! Each check receives empty repositories and exercises them only through
//! the port traits. Backend suites expand [`conformance_suite!`] to run the
//! whole list.

use std::collections::BTreeSet;

use bookshelf::domain::ports::RepositoryError;
use bookshelf::domain::{Book, BookDraft, BookId, Rating, ReadingList, Reference, Review, UserId};
use pagination::SortSpec;
use tokio::task::JoinSet;

use super::Repos;
use super::fixtures::{book, book_by, page, reading_list, review, user};

fn titles(books: &[Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

fn member_ids(list: &ReadingList) -> Vec<BookId> {
    list.books.iter().map(Reference::id).collect()
}

async fn stored_list(repos: &Repos, list: &ReadingList) -> ReadingList {
    repos
        .reading_lists
        .find_by_id(list.id)
        .await
        .expect("find list")
        .expect("list exists")
}

pub async fn aggregates_round_trip(repos: Repos) {
    let dune = Book::new(
        BookId::random(),
        BookDraft {
            isbn: Some("9780441013593".to_owned()),
            genre: Some("Science fiction".to_owned()),
            publication_year: Some(1965),
            ..BookDraft::titled("Dune").by("Frank Herbert")
        },
    )
    .expect("valid book");
    let messiah = book("Dune Messiah");
    let reader = user("reader");
    let list = reading_list(reader.id, "Arrakis", &[messiah.id, dune.id]);
    let verdict = review(reader.id, dune.id, 5, "spice");

    repos.books.create(&dune).await.expect("create book");
    repos.books.create(&messiah).await.expect("create book");
    repos.users.create(&reader).await.expect("create user");
    repos.reading_lists.create(&list).await.expect("create list");
    repos.reviews.create(&verdict).await.expect("create review");

    assert_eq!(repos.books.find_by_id(dune.id).await.expect("find"), Some(dune));
    assert_eq!(repos.users.find_by_id(reader.id).await.expect("find"), Some(reader));
    assert_eq!(stored_list(&repos, &list).await, list);
    assert_eq!(repos.reviews.find_by_id(verdict.id).await.expect("find"), Some(verdict));
}

pub async fn duplicate_ids_are_rejected(repos: Repos) {
    let original = book("Original");
    repos.books.create(&original).await.expect("create");
    let err = repos.books.create(&original).await.expect_err("duplicate book");
    assert_eq!(err, RepositoryError::duplicate::<Book>(original.id));

    let list = reading_list(UserId::random(), "Twice", &[original.id]);
    repos.reading_lists.create(&list).await.expect("create");
    let err = repos.reading_lists.create(&list).await.expect_err("duplicate list");
    assert_eq!(err, RepositoryError::duplicate::<ReadingList>(list.id));
}

pub async fn updating_an_absent_aggregate_fails(repos: Repos) {
    let ghost = book("Ghost");
    let err = repos.books.update(&ghost).await.expect_err("absent book");
    assert_eq!(err, RepositoryError::missing::<Book>(ghost.id));
    assert_eq!(repos.books.find_by_id(ghost.id).await.expect("find"), None);

    let list = reading_list(UserId::random(), "Nowhere", &[]);
    let err = repos.reading_lists.update(&list).await.expect_err("absent list");
    assert_eq!(err, RepositoryError::missing::<ReadingList>(list.id));

    let orphan = review(UserId::random(), ghost.id, 3, "?");
    let err = repos.reviews.update(&orphan).await.expect_err("absent review");
    assert_eq!(err, RepositoryError::missing::<Review>(orphan.id));
}

pub async fn updates_return_the_stored_state(repos: Repos) {
    let draft = book_by("Frankenstein", "Mary Shelley");
    repos.books.create(&draft).await.expect("create");
    let revised = Book {
        title: "Frankenstein; or, The Modern Prometheus".to_owned(),
        genre: Some("Gothic".to_owned()),
        ..draft.clone()
    };
    assert_eq!(repos.books.update(&revised).await.expect("update"), revised);
    assert_eq!(repos.books.find_by_id(draft.id).await.expect("find"), Some(revised));

    let list = reading_list(UserId::random(), "Gothic", &[draft.id]);
    repos.reading_lists.create(&list).await.expect("create list");
    let renamed = ReadingList {
        name: "Gothic classics".to_owned(),
        description: Some("Shelley and friends".to_owned()),
        books: Vec::new(),
        ..list.clone()
    };
    let stored = repos.reading_lists.update(&renamed).await.expect("update list");
    assert_eq!(stored.name, "Gothic classics");
    assert_eq!(member_ids(&stored), vec![draft.id]);

    let verdict = review(UserId::random(), draft.id, 2, "grim");
    repos.reviews.create(&verdict).await.expect("create review");
    let rerated = Review {
        rating: Rating::new(4).expect("valid rating"),
        comment: None,
        book: Reference::stub(BookId::random()),
        ..verdict.clone()
    };
    let stored = repos.reviews.update(&rerated).await.expect("update review");
    assert_eq!(stored.rating.get(), 4);
    assert_eq!(stored.comment, None);
    assert_eq!(stored.book.id(), draft.id);
}

pub async fn batch_lookup_collapses_duplicates_and_skips_unknown(repos: Repos) {
    let first = book("First");
    let second = book("Second");
    repos.books.create(&first).await.expect("create");
    repos.books.create(&second).await.expect("create");

    let found = repos
        .books
        .find_by_ids(&[first.id, first.id, BookId::random()])
        .await
        .expect("lookup");
    assert_eq!(titles(&found), vec!["First"]);

    let found: BTreeSet<BookId> = repos
        .books
        .find_by_ids(&[first.id, second.id, first.id, BookId::random()])
        .await
        .expect("lookup")
        .into_iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(found, BTreeSet::from([first.id, second.id]));

    assert!(repos.books.find_by_ids(&[]).await.expect("lookup").is_empty());
}

pub async fn deletes_are_idempotent(repos: Repos) {
    let doomed = book("Doomed");
    repos.books.create(&doomed).await.expect("create");
    assert!(repos.books.delete_by_id(doomed.id).await.expect("first delete"));
    assert!(!repos.books.delete_by_id(doomed.id).await.expect("second delete"));
    assert_eq!(repos.books.find_by_id(doomed.id).await.expect("find"), None);

    let list = reading_list(UserId::random(), "Short lived", &[doomed.id]);
    repos.reading_lists.create(&list).await.expect("create list");
    assert!(repos.reading_lists.delete_by_id(list.id).await.expect("delete list"));
    assert!(!repos.reading_lists.delete_by_id(list.id).await.expect("delete list again"));
}

pub async fn listing_sorts_and_limits(repos: Repos) {
    for title in ["Beta", "Alpha", "Gamma"] {
        repos.books.create(&book(title)).await.expect("create");
    }

    let listed = repos.books.list(None, None).await.expect("list");
    assert_eq!(titles(&listed), vec!["Beta", "Alpha", "Gamma"]);

    let listed = repos
        .books
        .list(Some(&SortSpec::asc("title")), Some(2))
        .await
        .expect("list");
    assert_eq!(titles(&listed), vec!["Alpha", "Beta"]);

    let listed = repos
        .books
        .list(Some(&SortSpec::desc("title")), None)
        .await
        .expect("list");
    assert_eq!(titles(&listed), vec!["Gamma", "Beta", "Alpha"]);

    let listed = repos
        .books
        .list(Some(&SortSpec::asc("shelfMark")), None)
        .await
        .expect("list");
    assert_eq!(titles(&listed), vec!["Beta", "Alpha", "Gamma"]);
}

pub async fn blank_search_is_empty(repos: Repos) {
    repos.books.create(&book("Anything")).await.expect("create");
    for query in [None, Some(""), Some("   ")] {
        let results = repos
            .books
            .search(query, None, page(0, 10))
            .await
            .expect("search");
        assert!(results.content().is_empty(), "query {query:?}");
        assert_eq!(results.total_elements(), 0);
    }
}

pub async fn search_pages_case_insensitive_matches(repos: Repos) {
    for (title, author) in [
        ("The Great Gatsby", "F. Scott Fitzgerald"),
        ("Great Expectations", "Charles Dickens"),
        ("Gatsby Girls", "F. Scott Fitzgerald"),
        ("Dune", "Frank Herbert"),
    ] {
        repos.books.create(&book_by(title, author)).await.expect("create");
    }
    let by_title = SortSpec::asc("title");

    let first = repos
        .books
        .search(Some("GATSBY"), Some(&by_title), page(0, 1))
        .await
        .expect("search");
    assert_eq!(titles(first.content()), vec!["Gatsby Girls"]);
    assert_eq!(first.total_elements(), 2);
    assert_eq!(first.total_pages(), 2);
    assert!(first.is_first());

    let second = repos
        .books
        .search(Some("gatsby"), Some(&by_title), page(1, 1))
        .await
        .expect("search");
    assert_eq!(titles(second.content()), vec!["The Great Gatsby"]);
    assert!(second.is_last());

    let past_end = repos
        .books
        .search(Some("gatsby"), Some(&by_title), page(7, 1))
        .await
        .expect("search");
    assert!(past_end.content().is_empty());
    assert_eq!(past_end.total_elements(), 2);

    let by_author = repos
        .books
        .search(Some(" dickens "), None, page(0, 10))
        .await
        .expect("search");
    assert_eq!(titles(by_author.content()), vec!["Great Expectations"]);
}

pub async fn search_treats_wildcards_literally(repos: Repos) {
    for title in ["100% Organic", "1000 Ways", "snake_case for poets"] {
        repos.books.create(&book(title)).await.expect("create");
    }

    let percent = repos.books.search(Some("100%"), None, page(0, 10)).await.expect("search");
    assert_eq!(titles(percent.content()), vec!["100% Organic"]);

    let underscore = repos.books.search(Some("_"), None, page(0, 10)).await.expect("search");
    assert_eq!(titles(underscore.content()), vec!["snake_case for poets"]);
}

pub async fn search_folds_accented_capitals(repos: Repos) {
    for title in ["ÉCOLE DES FEMMES", "Ecole buissonnière", "Straße der Ölmühlen"] {
        repos.books.create(&book(title)).await.expect("create");
    }
    let owner = UserId::random();
    repos
        .reading_lists
        .create(&reading_list(owner, "LECTURES D'ÉTÉ", &[]))
        .await
        .expect("create list");
    repos
        .reviews
        .create(&review(owner, BookId::random(), 4, "ÜBERRASCHEND GUT"))
        .await
        .expect("create review");

    let books = repos.books.search(Some("école"), None, page(0, 10)).await.expect("search");
    assert_eq!(titles(books.content()), vec!["ÉCOLE DES FEMMES"]);
    assert_eq!(books.total_elements(), 1);

    let books = repos.books.search(Some("ÖLMÜHLEN"), None, page(0, 10)).await.expect("search");
    assert_eq!(titles(books.content()), vec!["Straße der Ölmühlen"]);

    let lists = repos
        .reading_lists
        .search(Some("été"), None, page(0, 10))
        .await
        .expect("search lists");
    assert_eq!(lists.total_elements(), 1);

    let reviews = repos
        .reviews
        .search(Some("überraschend"), None, page(0, 10))
        .await
        .expect("search reviews");
    assert_eq!(reviews.total_elements(), 1);
}

pub async fn user_search_covers_every_profile_field(repos: Repos) {
    let mut ann = user("ann");
    ann.display_name = Some("Ann Atkins".to_owned());
    let mut bob = user("bob");
    bob.email = Some("bob@atkins.example".to_owned());
    let carol = user("carol");
    for person in [&ann, &bob, &carol] {
        repos.users.create(person).await.expect("create");
    }

    let results = repos
        .users
        .search(Some("ATKINS"), Some(&SortSpec::asc("username")), page(0, 10))
        .await
        .expect("search");
    let names: Vec<&str> = results.content().iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["ann", "bob"]);
}

pub async fn membership_changes_report_whether_anything_changed(repos: Repos) {
    let book_id = BookId::random();
    let list = reading_list(UserId::random(), "Toggle", &[]);
    repos.reading_lists.create(&list).await.expect("create");

    assert!(repos.reading_lists.add_book(list.id, book_id).await.expect("add"));
    assert!(!repos.reading_lists.add_book(list.id, book_id).await.expect("re-add"));
    assert!(repos.reading_lists.remove_book(list.id, book_id).await.expect("remove"));
    assert!(!repos.reading_lists.remove_book(list.id, book_id).await.expect("re-remove"));

    let absent = reading_list(UserId::random(), "Absent", &[]);
    let err = repos
        .reading_lists
        .add_book(absent.id, book_id)
        .await
        .expect_err("absent list");
    assert_eq!(err, RepositoryError::missing::<ReadingList>(absent.id));
    let err = repos
        .reading_lists
        .remove_book(absent.id, book_id)
        .await
        .expect_err("absent list");
    assert_eq!(err, RepositoryError::missing::<ReadingList>(absent.id));
}

pub async fn membership_keeps_insertion_order(repos: Repos) {
    let [a, b, c] = [BookId::random(), BookId::random(), BookId::random()];
    let list = reading_list(UserId::random(), "Ordered", &[a, b]);
    repos.reading_lists.create(&list).await.expect("create");

    repos.reading_lists.add_book(list.id, c).await.expect("add c");
    assert_eq!(member_ids(&stored_list(&repos, &list).await), vec![a, b, c]);

    repos.reading_lists.remove_book(list.id, b).await.expect("remove b");
    repos.reading_lists.add_book(list.id, b).await.expect("re-add b");
    assert_eq!(member_ids(&stored_list(&repos, &list).await), vec![a, c, b]);
}

pub async fn concurrent_additions_are_not_lost(repos: Repos) {
    let list = reading_list(UserId::random(), "Busy", &[]);
    repos.reading_lists.create(&list).await.expect("create");

    let mut tasks = JoinSet::new();
    for _ in 0..16 {
        let lists = repos.reading_lists.clone();
        let list_id = list.id;
        tasks.spawn(async move { lists.add_book(list_id, BookId::random()).await });
    }
    while let Some(outcome) = tasks.join_next().await {
        assert!(outcome.expect("task").expect("add"));
    }

    assert_eq!(stored_list(&repos, &list).await.books.len(), 16);
}

pub async fn lists_are_found_by_owner(repos: Repos) {
    let owner = UserId::random();
    for (who, name) in [(owner, "First"), (UserId::random(), "Other"), (owner, "Second")] {
        repos
            .reading_lists
            .create(&reading_list(who, name, &[]))
            .await
            .expect("create");
    }

    let names: Vec<String> = repos
        .reading_lists
        .find_by_owner(owner)
        .await
        .expect("by owner")
        .into_iter()
        .map(|list| list.name)
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

pub async fn lists_sort_by_book_count(repos: Repos) {
    let ids = [BookId::random(), BookId::random()];
    for (name, books) in [("Pair", &ids[..]), ("None", &[][..]), ("Single", &ids[..1])] {
        repos
            .reading_lists
            .create(&reading_list(UserId::random(), name, books))
            .await
            .expect("create");
    }

    let names: Vec<String> = repos
        .reading_lists
        .list(Some(&SortSpec::desc("bookCount")), None)
        .await
        .expect("list")
        .into_iter()
        .map(|list| list.name)
        .collect();
    assert_eq!(names, vec!["Pair", "Single", "None"]);
}

pub async fn deleted_books_stay_listed_as_ids(repos: Repos) {
    let gone = book("Gone");
    repos.books.create(&gone).await.expect("create");
    let list = reading_list(UserId::random(), "Dangling", &[gone.id]);
    repos.reading_lists.create(&list).await.expect("create list");

    repos.books.delete_by_id(gone.id).await.expect("delete book");

    assert_eq!(member_ids(&stored_list(&repos, &list).await), vec![gone.id]);
}

pub async fn reviews_are_found_by_book_and_owner(repos: Repos) {
    let [shelley, stoker] = [UserId::random(), UserId::random()];
    let [dracula, carmilla] = [BookId::random(), BookId::random()];
    for (owner, book_id, stars) in [(shelley, dracula, 4), (stoker, dracula, 5), (shelley, carmilla, 3)] {
        repos
            .reviews
            .create(&review(owner, book_id, stars, "noted"))
            .await
            .expect("create");
    }

    let stars: Vec<u8> = repos
        .reviews
        .find_by_book(dracula)
        .await
        .expect("by book")
        .iter()
        .map(|review| review.rating.get())
        .collect();
    assert_eq!(stars, vec![4, 5]);

    let books: Vec<BookId> = repos
        .reviews
        .find_by_owner(shelley)
        .await
        .expect("by owner")
        .iter()
        .map(|review| review.book.id())
        .collect();
    assert_eq!(books, vec![dracula, carmilla]);
}

/// Expand one test per conformance check, each run through `$runner`.
///
/// `$runner` receives the check as `fn(Repos) -> impl Future<Output = ()>`.
macro_rules! conformance_suite {
    ($runner:path) => {
        $crate::support::conformance::conformance_suite!(
            @expand $runner;
            aggregates_round_trip,
            duplicate_ids_are_rejected,
            updating_an_absent_aggregate_fails,
            updates_return_the_stored_state,
            batch_lookup_collapses_duplicates_and_skips_unknown,
            deletes_are_idempotent,
            listing_sorts_and_limits,
            blank_search_is_empty,
            search_pages_case_insensitive_matches,
            search_treats_wildcards_literally,
            search_folds_accented_capitals,
            user_search_covers_every_profile_field,
            membership_changes_report_whether_anything_changed,
            membership_keeps_insertion_order,
            concurrent_additions_are_not_lost,
            lists_are_found_by_owner,
            lists_sort_by_book_count,
            deleted_books_stay_listed_as_ids,
            reviews_are_found_by_book_and_owner,
        );
    };
    (@expand $runner:path; $($check:ident),* $(,)?) => {
        $(
            #[rstest::rstest]
            fn $check() {
                $runner(stringify!($check), $crate::support::conformance::$check);
            }
        )*
    };
}

pub(crate) use conformance_suite;
