//! Author model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Full author record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    /// Contact address, unique across authors
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Author together with the number of books they own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithCount {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub author: Author,
    pub book_count: i64,
}

/// Subset of the author embedded in book search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub nationality: Option<String>,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
            email: author.email.clone(),
            nationality: author.nationality.clone(),
        }
    }
}

/// Create or replace an author. `PUT` uses the same shape: omitted optional
/// fields are cleared.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 320, message = "Email must be at most 320 characters")
    )]
    pub email: String,
    pub bio: Option<String>,
    #[validate(length(max = 100, message = "Nationality must be at most 100 characters"))]
    pub nationality: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Birth year must be between 0 and 9999"))]
    pub birth_year: Option<i32>,
}

impl AuthorInput {
    /// Trim text fields and turn blank optionals into `None`
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            bio: non_blank(self.bio),
            nationality: non_blank(self.nationality),
            birth_year: self.birth_year,
        }
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clears_blank_optionals() {
        let input = AuthorInput {
            name: "  Frank Herbert ".into(),
            email: "frank@example.org ".into(),
            bio: Some("   ".into()),
            nationality: Some(" US ".into()),
            birth_year: Some(1920),
        }
        .normalized();

        assert_eq!(input.name, "Frank Herbert");
        assert_eq!(input.email, "frank@example.org");
        assert_eq!(input.bio, None);
        assert_eq!(input.nationality.as_deref(), Some("US"));
    }

    #[test]
    fn test_validation_rejects_bad_email() {
        let input = AuthorInput {
            name: "Ursula K. Le Guin".into(),
            email: "not-an-email".into(),
            bio: None,
            nationality: None,
            birth_year: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_long_nationality() {
        let input = AuthorInput {
            name: "Ursula K. Le Guin".into(),
            email: "ursula@example.org".into(),
            bio: None,
            nationality: Some("n".repeat(101)),
            birth_year: None,
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nationality"));
    }

    #[test]
    fn test_author_serializes_camel_case() {
        let author = Author {
            id: Uuid::nil(),
            name: "Isaac Asimov".into(),
            email: "isaac@example.org".into(),
            bio: None,
            nationality: Some("US".into()),
            birth_year: Some(1920),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let with_count = AuthorWithCount { author, book_count: 3 };
        let json = serde_json::to_value(&with_count).unwrap();

        assert_eq!(json["birthYear"], 1920);
        assert_eq!(json["bookCount"], 3);
        assert!(json.get("createdAt").is_some());
    }
}
