//! Content sections of the platform.
//!
//! Every category, subcategory, and content item belongs to one section. The
//! section decides which endpoint serves its items, how items are formatted for
//! display, and whether empty categories are shown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownSection;

/// A content domain managed from the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentSection {
    OnlineCourse,
    DailyQuiz,
    CurrentAffairs,
    #[serde(rename = "E_BOOK")]
    EBook,
    Publication,
    PreviousPaper,
}

impl ContentSection {
    /// All sections, in dashboard menu order.
    pub const ALL: [ContentSection; 6] = [
        Self::OnlineCourse,
        Self::DailyQuiz,
        Self::CurrentAffairs,
        Self::EBook,
        Self::Publication,
        Self::PreviousPaper,
    ];

    /// Tag used by the API to filter categories and subcategories.
    pub fn api_tag(self) -> &'static str {
        match self {
            Self::OnlineCourse => "ONLINE_COURSE",
            Self::DailyQuiz => "DAILY_QUIZ",
            Self::CurrentAffairs => "CURRENT_AFFAIRS",
            Self::EBook => "E_BOOK",
            Self::Publication => "PUBLICATION",
            Self::PreviousPaper => "PREVIOUS_PAPER",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::OnlineCourse => "Online Courses",
            Self::DailyQuiz => "Daily Quiz",
            Self::CurrentAffairs => "Current Affairs",
            Self::EBook => "E-Books",
            Self::Publication => "Publications",
            Self::PreviousPaper => "Previous Papers",
        }
    }

    /// Collection endpoint for items, relative to the API base.
    ///
    /// Previous papers have no item endpoint; their view lists categories and
    /// subcategories only. Current affairs are split per kind, see
    /// [`CurrentAffairKind::path`].
    pub fn items_path(self) -> Option<&'static str> {
        match self {
            Self::OnlineCourse => Some("/admin/courses"),
            Self::DailyQuiz => Some("/admin/daily-quizzes"),
            Self::CurrentAffairs => Some("/admin/current-affairs"),
            Self::EBook => Some("/admin/ebooks"),
            Self::Publication => Some("/admin/publications"),
            Self::PreviousPaper => None,
        }
    }

    /// Extra query filter appended to the item listing.
    pub fn items_query(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::OnlineCourse => Some(("contentType", "ONLINE_COURSE")),
            _ => None,
        }
    }

    /// Whether categories with no visible items stay in the tree.
    pub fn retains_empty_categories(self) -> bool {
        !matches!(self, Self::Publication)
    }

    /// Slug used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::OnlineCourse => "online-course",
            Self::DailyQuiz => "daily-quiz",
            Self::CurrentAffairs => "current-affairs",
            Self::EBook => "e-book",
            Self::Publication => "publication",
            Self::PreviousPaper => "previous-paper",
        }
    }
}

impl fmt::Display for ContentSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ContentSection {
    type Err = UnknownSection;

    /// Accepts the slug (`e-book`) or the API tag (`E_BOOK`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| {
                section.slug().eq_ignore_ascii_case(needle)
                    || section.api_tag().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Kinds of current affairs; each has its own admin endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CurrentAffairKind {
    Latest,
    Monthly,
    Sports,
    State,
    International,
    Politics,
    Local,
}

impl CurrentAffairKind {
    pub const ALL: [CurrentAffairKind; 7] = [
        Self::Latest,
        Self::Monthly,
        Self::Sports,
        Self::State,
        Self::International,
        Self::Politics,
        Self::Local,
    ];

    /// Value stored in an item's `type` field.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Latest => "LATEST",
            Self::Monthly => "MONTHLY",
            Self::Sports => "SPORTS",
            Self::State => "STATE",
            Self::International => "INTERNATIONAL",
            Self::Politics => "POLITICS",
            Self::Local => "LOCAL",
        }
    }

    /// Endpoint serving this kind.
    pub fn path(self) -> String {
        format!("/admin/current-affairs/{}", self.tag().to_lowercase())
    }
}

impl FromStr for CurrentAffairKind {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}
