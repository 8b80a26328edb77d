use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Normalized user search input
///
/// `title` holds a film title or a track name, `artist` holds a person (film)
/// or an artist (music). Blank fields are stored as `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
    pub page: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            title: None,
            artist: None,
            album: None,
            year: None,
            page: 1,
        }
    }
}

impl SearchCriteria {
    /// Builds criteria from raw form values, trimming text and clamping the page to 1
    pub fn new(
        title: Option<&str>,
        artist: Option<&str>,
        album: Option<&str>,
        year: Option<&str>,
        page: u32,
    ) -> Self {
        Self {
            title: normalize(title),
            artist: normalize(artist),
            album: normalize(album),
            year: normalize(year),
            page: page.max(1),
        }
    }

    /// Parses a page number as sent by the search form
    ///
    /// Missing or blank values fall back to page 1.
    pub fn parse_page(raw: Option<&str>) -> AppResult<u32> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(1),
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| {
                    AppError::Validation(format!("Page must be a positive integer, got '{}'", value))
                }),
        }
    }

    pub fn has_free_text(&self) -> bool {
        self.title.is_some() || self.artist.is_some() || self.album.is_some() || self.year.is_some()
    }

    /// Rejects criteria with nothing to search for
    pub fn validate(&self) -> AppResult<()> {
        if self.has_free_text() {
            Ok(())
        } else {
            Err(AppError::Validation(
                "Please enter at least one search term".to_string(),
            ))
        }
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_drops_blank_fields() {
        let criteria = SearchCriteria::new(Some("  Matrix "), Some("   "), None, Some("1999"), 0);
        assert_eq!(criteria.title.as_deref(), Some("Matrix"));
        assert_eq!(criteria.artist, None);
        assert_eq!(criteria.album, None);
        assert_eq!(criteria.year.as_deref(), Some("1999"));
        assert_eq!(criteria.page, 1);
    }

    #[test]
    fn test_validate_requires_free_text() {
        let empty = SearchCriteria::new(Some(""), Some(" "), Some(""), None, 3);
        let err = empty.validate().unwrap_err();
        assert!(err.is_validation());

        let year_only = SearchCriteria::new(None, None, None, Some("2001"), 1);
        assert!(year_only.validate().is_ok());
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(SearchCriteria::parse_page(None).unwrap(), 1);
        assert_eq!(SearchCriteria::parse_page(Some("")).unwrap(), 1);
        assert_eq!(SearchCriteria::parse_page(Some(" 4 ")).unwrap(), 4);
        assert!(SearchCriteria::parse_page(Some("0")).unwrap_err().is_validation());
        assert!(SearchCriteria::parse_page(Some("two")).unwrap_err().is_validation());
    }

    #[test]
    fn test_default_starts_on_first_page() {
        let criteria = SearchCriteria::default();
        assert_eq!(criteria.page, 1);
        assert!(!criteria.has_free_text());
    }
}
