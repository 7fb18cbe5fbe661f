use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Book as returned by the persistence API, plus client-side display
/// fields that are attached after creation and never round-tripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Denormalized display name; may be stale relative to the live
    /// author collection.
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

/// Create payload for POST /api/Authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewAuthor {
    pub name: String,
}

/// Create payload for POST /api/Books. Kept minimal: the backend does
/// not accept the client-side display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub year: i32,
    pub author_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_deserializes_without_optional_fields() {
        let book: Book =
            serde_json::from_str(r#"{"id":1,"title":"Dune","year":1965}"#).unwrap();
        assert_eq!(book.author_id, None);
        assert_eq!(book.author_name, None);
        assert_eq!(book.isbn, None);
        assert_eq!(book.cover_url, None);
    }

    #[test]
    fn book_keeps_denormalized_author_name() {
        let book: Book = serde_json::from_str(
            r#"{"id":2,"title":"Dune","year":1965,"authorId":7,"authorName":"Frank Herbert"}"#,
        )
        .unwrap();
        assert_eq!(book.author_id, Some(7));
        assert_eq!(book.author_name.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn new_book_serializes_camel_case_with_explicit_null() {
        let payload = serde_json::to_value(NewBook {
            title: "Dune".to_string(),
            year: 1965,
            author_id: None,
        })
        .unwrap();
        assert_eq!(
            payload,
            serde_json::json!({"title": "Dune", "year": 1965, "authorId": null})
        );
    }

    #[test]
    fn client_only_fields_are_not_serialized_when_absent() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            year: 1965,
            author_id: Some(7),
            author_name: Some("Frank Herbert".to_string()),
            isbn: None,
            cover_url: None,
            description: None,
            info_link: None,
        };
        let value = serde_json::to_value(&book).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("isbn"));
        assert!(!object.contains_key("coverUrl"));
        assert!(!object.contains_key("infoLink"));
    }
}
