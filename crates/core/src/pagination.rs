//! Paging and sorting directives for card listings.
//!
//! A [`PageSpec`] is a zero-based page index, a page size and a sort
//! directive. Sort fields come from a closed whitelist so they can be spliced
//! into SQL without binding.

use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the caller does not give one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size into `1..=max`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page index to non-negative.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Card properties a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Content,
    Category,
    Tags,
    Priority,
    Status,
    Color,
    IsFavorite,
    IsPublic,
    ViewCount,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

impl SortField {
    const NAMES: [(&'static str, SortField); 16] = [
        ("id", SortField::Id),
        ("title", SortField::Title),
        ("content", SortField::Content),
        ("category", SortField::Category),
        ("tags", SortField::Tags),
        ("priority", SortField::Priority),
        ("status", SortField::Status),
        ("color", SortField::Color),
        ("isFavorite", SortField::IsFavorite),
        ("isPublic", SortField::IsPublic),
        ("viewCount", SortField::ViewCount),
        ("createdBy", SortField::CreatedBy),
        ("updatedBy", SortField::UpdatedBy),
        ("createdAt", SortField::CreatedAt),
        ("updatedAt", SortField::UpdatedAt),
        ("deletedAt", SortField::DeletedAt),
    ];

    /// The `cards` column backing this property.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Content => "content",
            SortField::Category => "category",
            SortField::Tags => "tags",
            SortField::Priority => "priority",
            SortField::Status => "status",
            SortField::Color => "color",
            SortField::IsFavorite => "is_favorite",
            SortField::IsPublic => "is_public",
            SortField::ViewCount => "view_count",
            SortField::CreatedBy => "created_by",
            SortField::UpdatedBy => "updated_by",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::DeletedAt => "deleted_at",
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    /// Accepts the wire name (`viewCount`) or the column name (`view_count`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::NAMES
            .iter()
            .find(|(name, field)| *name == s || field.column() == s)
            .map(|(_, field)| *field)
            .ok_or_else(|| CoreError::InvalidArgument(format!("Unknown sort field '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` in any case means descending; anything else is ascending.
    pub fn parse_lenient(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Render as an `ORDER BY` body. `id` breaks ties so pages are stable.
    pub fn order_by(&self) -> String {
        let dir = self.direction.sql();
        match self.field {
            SortField::Id => format!("id {dir}"),
            field => format!("{} {dir}, id {dir}", field.column()),
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Sort::desc(SortField::CreatedAt)
    }
}

// ---------------------------------------------------------------------------
// Page request / result
// ---------------------------------------------------------------------------

/// A bounded slice request: zero-based page index, page size, ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page: i64,
    pub size: i64,
    pub sort: Sort,
}

impl PageSpec {
    /// Build a spec from raw query values, clamping out-of-range input.
    pub fn new(page: Option<i64>, size: Option<i64>, sort: Sort) -> Self {
        Self {
            page: clamp_page(page),
            size: clamp_limit(size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            sort,
        }
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        PageSpec::new(None, None, Sort::default())
    }
}

/// One page of results with total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, spec: &PageSpec, total_elements: i64) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            (total_elements + spec.size - 1) / spec.size
        };
        Self {
            content,
            page: spec.page,
            size: spec.size,
            total_elements,
            total_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
