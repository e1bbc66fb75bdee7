//! Which storefront page is showing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A top-level storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Gallery,
    About,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 2] = [Self::Gallery, Self::About];

    /// URL slug, also used as the form value.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Gallery => "gallery",
            Self::About => "about",
        }
    }

    /// Label shown in the navigation bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Gallery => "Gallery",
            Self::About => "About",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A page name that is not one of [`Page::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page: {0}")]
pub struct PageParseError(pub String);

impl FromStr for Page {
    type Err = PageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PageParseError(s.to_owned()))
    }
}

/// The navigation shell's only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    current_page: Page,
}

impl NavigationState {
    #[must_use]
    pub const fn new(current_page: Page) -> Self {
        Self { current_page }
    }

    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.current_page
    }

    pub const fn navigate(&mut self, page: Page) {
        self.current_page = page;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_is_gallery() {
        assert_eq!(NavigationState::default().current_page(), Page::Gallery);
    }

    #[test]
    fn test_navigate() {
        let mut nav = NavigationState::default();
        nav.navigate(Page::About);
        assert_eq!(nav.current_page(), Page::About);
        nav.navigate(Page::Gallery);
        assert_eq!(nav.current_page(), Page::Gallery);
    }

    #[test]
    fn test_page_parse() {
        assert_eq!("gallery".parse::<Page>().unwrap(), Page::Gallery);
        assert_eq!(" About ".parse::<Page>().unwrap(), Page::About);

        let err = "checkout".parse::<Page>().unwrap_err();
        assert_eq!(err.to_string(), "unknown page: checkout");
    }

    #[test]
    fn test_page_display_matches_slug() {
        for page in Page::ALL {
            assert_eq!(page.to_string(), page.slug());
            assert_eq!(page.slug().parse::<Page>().unwrap(), page);
        }
    }
}
