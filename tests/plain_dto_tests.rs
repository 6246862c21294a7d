use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use usecase_http::dto::{BackedEnum, PlainDto};
use usecase_http::undefined::{Patch, Undefined};

#[derive(Debug, Clone, Copy)]
pub enum Status {
    Draft,
    Published,
}

impl BackedEnum for Status {
    fn backing_value(&self) -> Value {
        match self {
            Status::Draft => json!("draft"),
            Status::Published => json!("published"),
        }
    }
}

pub struct Isbn(&'static str);

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ISBN {}", self.0)
    }
}

#[derive(Serialize)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

#[derive(PlainDto)]
pub struct Author {
    pub name: String,
    pub nickname: Patch<String>,
}

#[derive(PlainDto)]
#[plain_dto(accessors(get_title, isAvailable, summary))]
pub struct Book {
    pub title: String,
    pub subtitle: Patch<Option<String>>,
    pub pages: Option<u32>,
    pub ratings: Vec<Patch<i64>>,
    #[plain_dto(backed)]
    pub status: Status,
    #[plain_dto(backed)]
    pub history: Vec<Status>,
    #[plain_dto(text)]
    pub isbn: Isbn,
    #[plain_dto(nested)]
    pub author: Author,
    #[plain_dto(nested)]
    pub co_authors: Vec<Author>,
    #[plain_dto(serialize)]
    pub dimensions: Dimensions,
    #[plain_dto(skip)]
    pub internal_notes: String,
    stock: u32,
}

impl Book {
    pub fn get_title(&self) -> String {
        self.title.to_uppercase()
    }

    #[allow(non_snake_case)]
    pub fn isAvailable(&self) -> bool {
        self.stock > 0
    }

    pub fn summary(&self) -> Undefined {
        Undefined
    }
}

fn book() -> Book {
    Book {
        title: "Dune".to_string(),
        subtitle: Patch::Undefined,
        pages: None,
        ratings: vec![Patch::Value(5), Patch::Undefined, Patch::Value(4)],
        status: Status::Published,
        history: vec![Status::Draft, Status::Published],
        isbn: Isbn("978-0441013593"),
        author: Author {
            name: "Frank Herbert".to_string(),
            nickname: Patch::Undefined,
        },
        co_authors: vec![Author {
            name: "Brian Herbert".to_string(),
            nickname: Patch::Value("B".to_string()),
        }],
        dimensions: Dimensions {
            width: 11,
            height: 18,
        },
        internal_notes: "do not show".to_string(),
        stock: 3,
    }
}

#[test]
fn test_full_projection() {
    let json = Value::Object(book().json_serialize());
    assert_eq!(
        json,
        json!({
            "title": "DUNE",
            "pages": null,
            "ratings": [5, 4],
            "status": "published",
            "history": ["draft", "published"],
            "isbn": "ISBN 978-0441013593",
            "author": {"name": "Frank Herbert"},
            "co_authors": [{"name": "Brian Herbert", "nickname": "B"}],
            "dimensions": {"width": 11, "height": 18},
            "available": true,
        })
    );
}

#[test]
fn test_accessor_wins_over_field_and_keeps_position() {
    let map = book().json_serialize();
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys.first(), Some(&"title"));
    assert_eq!(map["title"], "DUNE");
}

#[test]
fn test_sentinels_are_omitted_not_nulled() {
    let map = book().json_serialize();
    assert!(!map.contains_key("subtitle"));
    assert!(!map.contains_key("summary"));
    assert_eq!(map["pages"], Value::Null);
}

#[test]
fn test_private_and_skipped_fields_are_hidden() {
    let map = book().json_serialize();
    assert!(!map.contains_key("stock"));
    assert!(!map.contains_key("internal_notes"));
}

#[test]
fn test_defined_patch_values_are_projected() {
    let mut b = book();
    b.subtitle = Patch::Value(Some("Book One".to_string()));
    let map = b.json_serialize();
    assert_eq!(map["subtitle"], "Book One");

    b.subtitle = Patch::Value(None);
    assert_eq!(b.json_serialize()["subtitle"], Value::Null);
}

#[test]
fn test_unit_struct_projects_to_empty_object() {
    #[derive(PlainDto)]
    pub struct Nothing;

    assert!(Nothing.json_serialize().is_empty());
}

#[test]
fn test_projection_drives_result_item() {
    use usecase_http::response::{ResultRestRenderer, UseCaseResult};

    let author = Author {
        name: "Ursula".to_string(),
        nickname: Patch::Undefined,
    };
    let result = UseCaseResult::success().with(Value::Object(author.json_serialize()));
    let body = ResultRestRenderer::render(&result);
    assert_eq!(body["item"], json!({"name": "Ursula"}));
}

#[derive(PlainDto)]
pub struct Review {
    pub body: String,
    #[plain_dto(nested)]
    pub reviewer: Option<Author>,
    #[plain_dto(nested)]
    pub editor: Patch<Author>,
}

#[test]
fn test_optional_and_undefined_nested_dtos() {
    let review = Review {
        body: "Great".to_string(),
        reviewer: None,
        editor: Patch::Undefined,
    };
    assert_eq!(
        Value::Object(review.json_serialize()),
        json!({"body": "Great", "reviewer": null})
    );

    let review = Review {
        body: "Great".to_string(),
        reviewer: Some(Author {
            name: "Ursula".to_string(),
            nickname: Patch::Undefined,
        }),
        editor: Patch::Value(Author {
            name: "Ted".to_string(),
            nickname: Patch::Value("T".to_string()),
        }),
    };
    assert_eq!(
        Value::Object(review.json_serialize()),
        json!({
            "body": "Great",
            "reviewer": {"name": "Ursula"},
            "editor": {"name": "Ted", "nickname": "T"},
        })
    );
}
