//! Content records as served by the admin API.

pub mod category;
pub mod reference;
pub mod section;

pub use category::{Category, CategoryInput, SubCategory, SubCategoryInput};
pub use reference::{record_id, resolve_id, resolve_ids};
pub use section::{ContentSection, CurrentAffairKind};
