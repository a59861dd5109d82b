//! Regression coverage for the book catalog service.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::ports::{BookStoreError, MockBookStore, MockUserStore};
use crate::domain::{BookDetails, BookId, Price, UserDraft};

fn details(name: &str) -> BookDetails {
    BookDetails {
        name: name.to_owned(),
        author: "Anon".to_owned(),
        published_on: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
        description: String::new(),
        price: Price::new(10.0).expect("valid price"),
        quantity: 1,
    }
}

fn user(id: i64, name: &str) -> User {
    User::new(
        UserId::new(id),
        UserDraft {
            name: UserName::new(name).expect("valid name"),
            password: "pw".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
        },
    )
}

fn name(raw: &str) -> UserName {
    UserName::new(raw).expect("valid name")
}

fn service(
    books: MockBookStore,
    users: MockUserStore,
) -> CatalogService<MockBookStore, MockUserStore> {
    CatalogService::new(Arc::new(books), Arc::new(users))
}

#[rstest]
#[tokio::test]
async fn all_books_are_annotated_with_their_owner() {
    let mut books = MockBookStore::new();
    books.expect_find_all().returning(|| {
        Ok(vec![
            Book::new(BookId::new(1), details("Book A"), UserId::new(7)),
            Book::new(BookId::new(2), details("Book B"), UserId::new(8)),
        ])
    });
    let mut users = MockUserStore::new();
    users
        .expect_find_all()
        .returning(|| Ok(vec![user(7, "alice"), user(8, "bob")]));

    let listings = service(books, users).get_all_books().await;
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].owner.as_str(), "alice");
    assert_eq!(listings[1].owner.as_str(), "bob");
}

#[rstest]
#[tokio::test]
async fn books_with_unresolvable_owners_are_dropped() {
    let mut books = MockBookStore::new();
    books.expect_find_all().returning(|| {
        Ok(vec![
            Book::new(BookId::new(1), details("Kept"), UserId::new(7)),
            Book::new(BookId::new(2), details("Orphaned"), UserId::new(99)),
        ])
    });
    let mut users = MockUserStore::new();
    users.expect_find_all().returning(|| Ok(vec![user(7, "alice")]));

    let listings = service(books, users).get_all_books().await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].details.name, "Kept");
}

#[rstest]
#[tokio::test]
async fn store_fault_folds_into_an_empty_list() {
    let mut books = MockBookStore::new();
    books
        .expect_find_all()
        .returning(|| Err(BookStoreError::connection("db offline")));
    let users = MockUserStore::new();

    assert!(service(books, users).get_all_books().await.is_empty());
}

#[rstest]
#[tokio::test]
async fn books_for_user_use_the_owner_index() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books
        .expect_find_by_owner()
        .withf(|owner| *owner == UserId::new(7))
        .times(1)
        .returning(|_| Ok(vec![Book::new(BookId::new(3), details("Mine"), UserId::new(7))]));

    let listings = service(books, users).get_books_for_user(&name("alice")).await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].public_id, "BK3");
    assert_eq!(listings[0].owner.as_str(), "alice");
}

#[rstest]
#[tokio::test]
async fn books_for_unknown_user_are_empty() {
    let mut users = MockUserStore::new();
    users.expect_find_by_name().returning(|_| Ok(None));
    let mut books = MockBookStore::new();
    books.expect_find_by_owner().times(0);

    assert!(
        service(books, users)
            .get_books_for_user(&name("ghost"))
            .await
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn books_of_others_exclude_the_current_user() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    users
        .expect_find_all()
        .returning(|| Ok(vec![user(7, "alice"), user(8, "bob")]));
    let mut books = MockBookStore::new();
    books.expect_find_all().returning(|| {
        Ok(vec![
            Book::new(BookId::new(1), details("Mine"), UserId::new(7)),
            Book::new(BookId::new(2), details("Theirs"), UserId::new(8)),
        ])
    });

    let listings = service(books, users).get_books_of_others(&name("alice")).await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].details.name, "Theirs");
    assert_eq!(listings[0].owner.as_str(), "bob");
}

#[rstest]
#[case("BK99")]
#[case("BKxyz")]
#[case("")]
#[tokio::test]
async fn missing_or_malformed_ids_fold_into_not_found(#[case] raw: &str) {
    let mut books = MockBookStore::new();
    books.expect_find_by_id().returning(|_| Ok(None));
    let users = MockUserStore::new();

    assert!(service(books, users).get_book_for_id(raw).await.is_none());
}

#[rstest]
#[tokio::test]
async fn book_for_id_reports_the_true_owner() {
    let mut books = MockBookStore::new();
    books
        .expect_find_by_id()
        .withf(|id| *id == BookId::new(3))
        .returning(|_| Ok(Some(Book::new(BookId::new(3), details("Found"), UserId::new(8)))));
    let mut users = MockUserStore::new();
    users
        .expect_find_by_id()
        .withf(|id| *id == UserId::new(8))
        .returning(|_| Ok(Some(user(8, "bob"))));

    let listing = service(books, users)
        .get_book_for_id("BK3")
        .await
        .expect("book found");
    assert_eq!(listing.owner.as_str(), "bob");
}

#[rstest]
#[tokio::test]
async fn add_book_resolves_the_owner_before_writing() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books
        .expect_create()
        .withf(|new_book| new_book.owner == UserId::new(7))
        .times(1)
        .returning(|new_book| Ok(Book::new(BookId::new(3), new_book.details.clone(), new_book.owner)));

    let submission = BookSubmission {
        details: details("Fresh"),
        owner: name("alice"),
    };
    assert!(service(books, users).add_book(&submission).await);
}

#[rstest]
#[tokio::test]
async fn add_book_fails_when_owner_is_unresolvable() {
    let mut users = MockUserStore::new();
    users.expect_find_by_name().returning(|_| Ok(None));
    let mut books = MockBookStore::new();
    books.expect_create().times(0);

    let submission = BookSubmission {
        details: details("Fresh"),
        owner: name("ghost"),
    };
    assert!(!service(books, users).add_book(&submission).await);
}

#[rstest]
#[tokio::test]
async fn update_book_rebuilds_the_record_from_the_listing() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books
        .expect_update()
        .withf(|book| {
            book.id() == BookId::new(3)
                && book.public_id().as_str() == "BK3"
                && book.owner() == UserId::new(7)
        })
        .times(1)
        .returning(|_| Ok(()));

    let listing = BookListing {
        public_id: "BK3".to_owned(),
        details: details("Edited"),
        owner: name("alice"),
    };
    assert!(service(books, users).update_book(&listing).await);
}

#[rstest]
#[tokio::test]
async fn update_book_fails_on_malformed_public_id_without_mutating() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books.expect_update().times(0);

    let listing = BookListing {
        public_id: "oops".to_owned(),
        details: details("Edited"),
        owner: name("alice"),
    };
    assert!(!service(books, users).update_book(&listing).await);
}

#[rstest]
#[tokio::test]
async fn delete_book_fails_when_owner_is_unresolvable() {
    let mut users = MockUserStore::new();
    users.expect_find_by_name().returning(|_| Ok(None));
    let mut books = MockBookStore::new();
    books.expect_delete().times(0);

    let listing = BookListing {
        public_id: "BK3".to_owned(),
        details: details("Gone"),
        owner: name("ghost"),
    };
    assert!(!service(books, users).delete_book(&listing).await);
}

#[rstest]
#[tokio::test]
async fn delete_book_removes_by_parsed_internal_id() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books
        .expect_delete()
        .withf(|id| *id == BookId::new(3))
        .times(1)
        .returning(|_| Ok(()));

    let listing = BookListing {
        public_id: "BK3".to_owned(),
        details: details("Gone"),
        owner: name("alice"),
    };
    assert!(service(books, users).delete_book(&listing).await);
}

#[rstest]
#[tokio::test]
async fn bulk_delete_for_unknown_user_is_a_no_op_success() {
    let mut users = MockUserStore::new();
    users.expect_find_by_name().returning(|_| Ok(None));
    let mut books = MockBookStore::new();
    books.expect_delete_all_for_owner().times(0);

    assert!(
        service(books, users)
            .delete_all_books_for_user(&name("ghost"))
            .await
    );
}

#[rstest]
#[tokio::test]
async fn bulk_delete_folds_store_fault_into_false() {
    let mut users = MockUserStore::new();
    users
        .expect_find_by_name()
        .returning(|_| Ok(Some(user(7, "alice"))));
    let mut books = MockBookStore::new();
    books
        .expect_delete_all_for_owner()
        .returning(|_| Err(BookStoreError::query("constraint failure")));

    assert!(
        !service(books, users)
            .delete_all_books_for_user(&name("alice"))
            .await
    );
}
