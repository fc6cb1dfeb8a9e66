//! Shared query parameter types for API handlers.

use mindcard_core::card::CardStatus;
use mindcard_core::error::CoreError;
use mindcard_core::pagination::{PageSpec, Sort, SortDirection, SortField};
use serde::Deserialize;

/// Paging parameters (`?page=&size=`), plus optional sorting
/// (`&sortBy=&sortDir=`) for endpoints that honour it.
///
/// Out-of-range values are clamped when converted to a [`PageSpec`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PageParams {
    /// Page spec honouring `sortBy`/`sortDir`, defaulting to newest first.
    pub fn to_sorted_spec(&self) -> Result<PageSpec, CoreError> {
        let field = match self.sort_by.as_deref() {
            Some(name) if !name.trim().is_empty() => name.parse::<SortField>()?,
            _ => SortField::CreatedAt,
        };
        let direction = self
            .sort_dir
            .as_deref()
            .map(SortDirection::parse_lenient)
            .unwrap_or(SortDirection::Desc);
        Ok(PageSpec::new(self.page, self.size, Sort { field, direction }))
    }

    /// Page spec for endpoints whose ordering is fixed by the query itself.
    pub fn to_spec(&self) -> PageSpec {
        PageSpec::new(self.page, self.size, Sort::default())
    }
}

/// `?status=` on status-changing endpoints.
#[derive(Debug, Deserialize)]
pub struct StatusParam {
    pub status: String,
}

impl StatusParam {
    pub fn parse(&self) -> Result<CardStatus, CoreError> {
        self.status.parse()
    }
}

/// `?keyword=&page=&size=` for keyword search.
#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    pub keyword: String,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// `?title=` for title search.
#[derive(Debug, Deserialize)]
pub struct TitleParams {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn sorted_spec_defaults_to_created_at_desc() {
        let spec = PageParams::default().to_sorted_spec().unwrap();
        assert_eq!(spec.page, 0);
        assert_eq!(spec.size, 10);
        assert_eq!(spec.sort, Sort::desc(SortField::CreatedAt));
    }

    #[test]
    fn sorted_spec_reads_field_and_direction() {
        let params = PageParams {
            page: Some(2),
            size: Some(500),
            sort_by: Some("viewCount".into()),
            sort_dir: Some("asc".into()),
        };
        let spec = params.to_sorted_spec().unwrap();
        assert_eq!(spec.page, 2);
        assert_eq!(spec.size, 100);
        assert_eq!(spec.sort, Sort::asc(SortField::ViewCount));
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        let params = PageParams {
            sort_by: Some("nope".into()),
            ..Default::default()
        };
        assert_matches!(params.to_sorted_spec(), Err(CoreError::InvalidArgument(_)));
    }

    #[test]
    fn status_param_parses_case_insensitively() {
        let param = StatusParam {
            status: "archived".into(),
        };
        assert_eq!(param.parse().unwrap(), CardStatus::Archived);
    }
}
