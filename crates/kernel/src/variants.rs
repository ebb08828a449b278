//! Table layouts for each section's item listing.

use crate::models::ContentSection;

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field of the formatted item shown in this column.
    pub key: &'static str,
    pub label: &'static str,
    /// Relative width hint (CSS-style), when the layout fixes one.
    pub width: Option<&'static str>,
}

/// Listing layout for a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub key: &'static str,
    pub label: &'static str,
    pub add_button_text: &'static str,
    pub columns: &'static [Column],
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column {
        key,
        label,
        width: None,
    }
}

const fn sized(key: &'static str, label: &'static str, width: &'static str) -> Column {
    Column {
        key,
        label,
        width: Some(width),
    }
}

pub const COURSES: Variant = Variant {
    key: "courses",
    label: "Online Courses",
    add_button_text: "Add Course",
    columns: &[
        col("name", "Course Name"),
        col("languages", "Languages Available"),
        col("validity", "Validity"),
        col("price", "Price"),
    ],
};

pub const QUIZZES: Variant = Variant {
    key: "quizzes",
    label: "Daily Quizzes",
    add_button_text: "Add Quiz",
    columns: &[
        col("name", "Quiz Name"),
        col("language", "Language"),
        col("questions", "No. of Questions"),
    ],
};

pub const CURRENT_AFFAIRS: Variant = Variant {
    key: "currentAffairs",
    label: "Current Affairs",
    add_button_text: "+ Add Current Affair",
    columns: &[
        sized("categoryType", "Type", "15%"),
        sized("title", "Title", "35%"),
        sized("date", "Date", "15%"),
        sized("language", "Language", "15%"),
    ],
};

pub const EBOOKS: Variant = Variant {
    key: "ebooks",
    label: "E-books",
    add_button_text: "Add E-book",
    columns: &[
        col("title", "Book Name"),
        col("language", "Language"),
        col("pages", "Pages"),
        col("price", "Price"),
    ],
};

pub const PUBLICATIONS: Variant = Variant {
    key: "publications",
    label: "Publications",
    add_button_text: "Add Publication",
    columns: &[
        col("title", "Title"),
        col("price", "Price"),
        col("language", "Language"),
        col("date", "Date"),
    ],
};

pub const PREVIOUS_PAPERS: Variant = Variant {
    key: "previousPapers",
    label: "Previous Question Papers",
    add_button_text: "Add Question Paper",
    columns: &[
        col("exam", "Exam"),
        col("year", "Year"),
        col("language", "Language"),
    ],
};

impl ContentSection {
    /// Listing layout for this section's items.
    pub fn variant(self) -> &'static Variant {
        match self {
            Self::OnlineCourse => &COURSES,
            Self::DailyQuiz => &QUIZZES,
            Self::CurrentAffairs => &CURRENT_AFFAIRS,
            Self::EBook => &EBOOKS,
            Self::Publication => &PUBLICATIONS,
            Self::PreviousPaper => &PREVIOUS_PAPERS,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::hierarchy::ItemFormatter;
    use serde_json::json;

    #[test]
    fn formatted_items_fill_every_formatted_column() {
        // Columns produced by formatting must exist on a formatted item even
        // when the raw record is bare.
        let bare = json!({"_id": "x"});
        let bare = bare.as_object().unwrap();
        for section in ContentSection::ALL {
            let out = section.format(bare);
            for column in section.variant().columns {
                if matches!(column.key, "name" | "pages") {
                    continue;
                }
                assert!(
                    out.contains_key(column.key),
                    "{section}: missing {}",
                    column.key
                );
            }
        }
    }

    #[test]
    fn only_current_affairs_fix_widths() {
        for section in ContentSection::ALL {
            let sized = section.variant().columns.iter().any(|c| c.width.is_some());
            assert_eq!(sized, section == ContentSection::CurrentAffairs);
        }
    }
}
