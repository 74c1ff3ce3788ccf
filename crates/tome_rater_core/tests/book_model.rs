mod support;

use std::collections::HashSet;
use support::{capture_logs, take_warnings};
use tome_rater_core::{Book, BookKind, RatingError};

#[test]
fn add_rating_accepts_only_in_range_values() {
    let mut book = Book::new("Dune", "001");

    book.add_rating(Some(0)).unwrap();
    book.add_rating(Some(4)).unwrap();
    assert_eq!(book.add_rating(Some(-1)), Err(RatingError::OutOfRange(-1)));
    assert_eq!(book.add_rating(Some(5)), Err(RatingError::OutOfRange(5)));
    assert_eq!(book.add_rating(None), Err(RatingError::Missing));

    assert_eq!(book.ratings(), &[0, 4]);
}

#[test]
fn average_rating_is_none_without_ratings() {
    let mut book = Book::new("Dune", "001");
    assert_eq!(book.average_rating(), None);

    book.add_rating(Some(3)).unwrap();
    book.add_rating(Some(4)).unwrap();
    assert_eq!(book.average_rating(), Some(3.5));
}

#[test]
fn equality_and_hash_ignore_kind() {
    let plain = Book::new("Dune", "001");
    let novel = Book::fiction("Dune", "Frank Herbert", "001");
    let other_isbn = Book::new("Dune", "002");

    assert_eq!(plain, novel);
    assert_ne!(plain, other_isbn);
    assert_eq!(plain.key(), novel.key());

    let set: HashSet<Book> = [plain, novel, other_isbn].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn set_isbn_replaces_identity() {
    let mut book = Book::new("Dune", "001");
    book.set_isbn("999");
    assert_eq!(book.isbn(), "999");
    assert_eq!(book.key().isbn, "999");
}

#[test]
fn kind_accessors_and_display() {
    let novel = Book::fiction("Alice In Wonderland", "Lewis Carroll", "12345");
    assert_eq!(novel.author(), Some("Lewis Carroll"));
    assert_eq!(novel.subject(), None);
    assert_eq!(novel.to_string(), "Alice In Wonderland by Lewis Carroll");

    let manual = Book::non_fiction("Society of Mind", "AI", "beginner", "23456");
    assert_eq!(manual.subject(), Some("AI"));
    assert_eq!(manual.level(), Some("beginner"));
    assert_eq!(manual.author(), None);
    assert_eq!(manual.to_string(), "Society of Mind, a beginner manual on AI");

    let plain = Book::new("Algorithms", "34567");
    assert_eq!(plain.kind(), &BookKind::Plain);
    assert_eq!(plain.to_string(), "Algorithms (ISBN 34567)");
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut manual = Book::non_fiction("Society of Mind", "AI", "beginner", "23456");
    manual.add_rating(Some(2)).unwrap();

    let json = serde_json::to_value(&manual).unwrap();
    assert_eq!(json["title"], "Society of Mind");
    assert_eq!(json["isbn"], "23456");
    assert_eq!(json["kind"], "non_fiction");
    assert_eq!(json["subject"], "AI");
    assert_eq!(json["level"], "beginner");
    assert_eq!(json["ratings"], serde_json::json!([2]));

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, manual);
    assert_eq!(decoded.kind(), manual.kind());
    assert_eq!(decoded.ratings(), manual.ratings());
}

#[test]
fn deserialize_rejects_out_of_range_ratings() {
    let value = serde_json::json!({
        "title": "Dune",
        "isbn": "001",
        "kind": "plain",
        "ratings": [9, 200]
    });

    let err = serde_json::from_value::<Book>(value).unwrap_err();
    assert!(
        err.to_string().contains("rating 9 is outside 0..=4"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_accepts_missing_ratings_as_empty() {
    let value = serde_json::json!({
        "title": "Emma",
        "isbn": "002",
        "kind": "fiction",
        "author": "Jane Austen"
    });

    let book = serde_json::from_value::<Book>(value).unwrap();
    assert_eq!(book.author(), Some("Jane Austen"));
    assert!(book.ratings().is_empty());
    assert_eq!(book.average_rating(), None);
}

#[test]
fn rejected_rating_emits_warning_and_accepted_rating_does_not() {
    capture_logs();
    let mut book = Book::new("Dune", "001");

    book.add_rating(Some(2)).expect("in-range rating should be accepted");
    assert!(take_warnings().is_empty());

    for rating in [Some(-1), Some(5), None] {
        book.add_rating(rating)
            .expect_err("invalid rating should be rejected");
        let warnings = take_warnings();
        assert_eq!(warnings.len(), 1, "one warning per rejection: {warnings:?}");
        assert!(warnings[0].contains("event=rating_rejected"));
        assert!(warnings[0].contains("isbn=001"));
    }
    assert_eq!(book.ratings(), &[2]);
}
