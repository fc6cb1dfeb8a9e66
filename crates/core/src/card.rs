//! Card lifecycle rules, field limits and the transfer representation.
//!
//! A card is the single persisted entity of the service. Everything that
//! decides *what* a card looks like (defaults, validation, status parsing)
//! lives here; persisting it is the repository's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldErrors};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Entity name used in not-found errors.
pub const ENTITY_CARD: &str = "Card";

/// Presentation color given to cards created without one.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Card lifecycle status, stored as its upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    Active,
    Archived,
    Deleted,
}

impl CardStatus {
    pub const ALL: [CardStatus; 3] = [CardStatus::Active, CardStatus::Archived, CardStatus::Deleted];

    /// The value persisted in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            CardStatus::Active => "ACTIVE",
            CardStatus::Archived => "ARCHIVED",
            CardStatus::Deleted => "DELETED",
        }
    }

    /// Whether moving a card into this status stamps `deleted_at`.
    ///
    /// Leaving `Deleted` never clears the stamp.
    pub fn stamps_deletion(self) -> bool {
        self == CardStatus::Deleted
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = CoreError;

    /// Parse a status name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::InvalidArgument(format!(
                    "Invalid card status '{s}', expected one of ACTIVE, ARCHIVED, DELETED"
                ))
            })
    }
}

impl TryFrom<String> for CardStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Named priority levels. Priorities outside these levels are still legal
/// and compare numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl Priority {
    pub fn value(self) -> i32 {
        self as i32
    }
}

// ---------------------------------------------------------------------------
// Transfer representation
// ---------------------------------------------------------------------------

/// The card shape accepted at the API boundary.
///
/// Carries validation constraints only. Defaults are applied by
/// [`CardDefaults::apply`] when a card is created; server-managed fields
/// (`createdAt`, `updatedAt`, `deletedAt`) are ignored if sent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub id: Option<DbId>,

    #[validate(
        required(message = "title must not be blank"),
        custom(function = "not_blank", message = "title must not be blank"),
        length(max = 200, message = "title must be at most 200 characters")
    )]
    pub title: Option<String>,

    pub content: Option<String>,

    #[validate(length(max = 100, message = "category must be at most 100 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 500, message = "tags must be at most 500 characters"))]
    pub tags: Option<String>,

    pub priority: Option<i32>,

    pub status: Option<CardStatus>,

    #[validate(length(max = 20, message = "color must be at most 20 characters"))]
    pub color: Option<String>,

    pub is_favorite: Option<bool>,

    pub is_public: Option<bool>,

    pub view_count: Option<i32>,

    #[validate(length(max = 100, message = "createdBy must be at most 100 characters"))]
    pub created_by: Option<String>,

    #[validate(length(max = 100, message = "updatedBy must be at most 100 characters"))]
    pub updated_by: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl CardInput {
    /// Run the field constraints, collecting one message per failing field.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(field_errors(&errors)))
    }

    fn into_title(self) -> Result<(String, Self), CoreError> {
        self.check()?;
        let mut input = self;
        match input.title.take() {
            Some(title) => Ok((title, input)),
            None => Err(CoreError::field("title", "title must not be blank")),
        }
    }
}

/// Flatten validator output into a field -> first message map, keyed by the
/// wire (camelCase) field name.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let field = wire_name(&field);
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                (field, message)
            })
        })
        .collect()
}

fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Values given to fields a creation request leaves unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDefaults {
    pub priority: i32,
    pub status: CardStatus,
    pub color: String,
    pub is_favorite: bool,
    pub is_public: bool,
    pub view_count: i32,
}

impl Default for CardDefaults {
    fn default() -> Self {
        Self {
            priority: Priority::Low.value(),
            status: CardStatus::Active,
            color: DEFAULT_COLOR.to_string(),
            is_favorite: false,
            is_public: false,
            view_count: 0,
        }
    }
}

/// A fully resolved card ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub priority: i32,
    pub status: CardStatus,
    pub color: String,
    pub is_favorite: bool,
    pub is_public: bool,
    pub view_count: i32,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl CardDefaults {
    /// Validate `input` and fill every unset optional field.
    pub fn apply(&self, input: CardInput) -> Result<NewCard, CoreError> {
        let (title, input) = input.into_title()?;
        Ok(NewCard {
            title,
            content: input.content,
            category: input.category,
            tags: input.tags,
            priority: input.priority.unwrap_or(self.priority),
            status: input.status.unwrap_or(self.status),
            color: input.color.unwrap_or_else(|| self.color.clone()),
            is_favorite: input.is_favorite.unwrap_or(self.is_favorite),
            is_public: input.is_public.unwrap_or(self.is_public),
            view_count: input.view_count.unwrap_or(self.view_count),
            created_by: input.created_by,
            updated_by: input.updated_by,
        })
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// The editable subset of a card written by an update.
///
/// `content`, `category`, `tags` and `updated_by` are overwritten as given
/// (absent clears them). `priority` and `color` are NOT NULL columns, so an
/// absent value keeps the stored one. Status, flags and the view counter
/// have dedicated operations and are never touched here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardChanges {
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub priority: Option<i32>,
    pub color: Option<String>,
    pub updated_by: Option<String>,
}

impl CardChanges {
    pub fn from_input(input: CardInput) -> Result<Self, CoreError> {
        let (title, input) = input.into_title()?;
        Ok(CardChanges {
            title,
            content: input.content,
            category: input.category,
            tags: input.tags,
            priority: input.priority,
            color: input.color,
            updated_by: input.updated_by,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
