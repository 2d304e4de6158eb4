use std::ops::{Index, IndexMut};

use crate::foundation::error::{EmojiError, EmojiResult};

/// One of the five fixed feature slots.
///
/// Declaration order is significant: it is both the tab order of the picker and the compositing
/// z-order (head at the bottom, detail on top).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Base face shape. Mandatory, so it has no none slot.
    Head,
    /// Eyes layer.
    Eyes,
    /// Eyebrows layer.
    Eyebrows,
    /// Mouth layer.
    Mouth,
    /// Accessories and other details, drawn last.
    Detail,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 5;

    /// All categories in tab / z-order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Head,
        Category::Eyes,
        Category::Eyebrows,
        Category::Mouth,
        Category::Detail,
    ];

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase identifier used in CLI arguments and config.
    pub fn name(self) -> &'static str {
        match self {
            Category::Head => "head",
            Category::Eyes => "eyes",
            Category::Eyebrows => "eyebrows",
            Category::Mouth => "mouth",
            Category::Detail => "detail",
        }
    }

    /// Directory holding this category's variants under an asset root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Detail => "details",
            other => other.name(),
        }
    }

    /// Whether index 0 of this category's variant list is the synthetic none slot.
    pub fn has_none_slot(self) -> bool {
        self != Category::Head
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Category {
    type Err = EmojiError;

    fn from_str(s: &str) -> EmojiResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == lower || c.dir_name() == lower)
            .ok_or_else(|| EmojiError::validation(format!("unknown category '{s}'")))
    }
}

/// Fixed-size table holding one value per [`Category`], indexable by category.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct PerCategory<T>(pub [T; Category::COUNT]);

impl<T> PerCategory<T> {
    /// Build a table by calling `f` once per category in z-order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Category::ALL[i])))
    }

    /// Iterate `(category, value)` pairs in z-order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }

    /// Map every value, keeping category positions.
    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> PerCategory<U> {
        PerCategory::from_fn(|c| f(c, &self.0[c.index()]))
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
