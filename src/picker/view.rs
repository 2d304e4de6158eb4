use crate::{
    assets::{library::AssetLibrary, source::AssetRef},
    foundation::{
        core::{Category, PerCategory},
        error::EmojiResult,
    },
    render::rasterize::{RasterLayer, rasterize_layer},
    selection::state::SelectionState,
};

/// User input understood by the picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerAction {
    /// Show `category`'s gallery. Does not change the selection.
    SelectTab(Category),
    /// Select `index` in the active tab's category.
    SelectVariant(usize),
}

/// One category tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabView {
    /// Category shown by the tab.
    pub category: Category,
    /// Whether this tab's gallery is visible.
    pub active: bool,
    /// Source of the resolved selection shown on the tab; `None` for none slots or while
    /// unresolved.
    pub thumbnail: Option<AssetRef>,
}

/// One gallery entry of the active category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Index into the category's variant list.
    pub index: usize,
    /// Source shown in the entry; `None` for the none slot.
    pub asset: Option<AssetRef>,
    /// Whether this entry is the current selection.
    pub selected: bool,
}

/// Snapshot of everything the picker displays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerView {
    /// All tabs in category order.
    pub tabs: Vec<TabView>,
    /// Category whose gallery is shown.
    pub active: Category,
    /// Entries of the active category.
    pub gallery: Vec<GalleryEntry>,
}

/// Tab state of the category picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Picker {
    active: Category,
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            active: Category::Head,
        }
    }
}

impl Picker {
    /// Create a picker with the head tab active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active tab.
    pub fn active(&self) -> Category {
        self.active
    }

    /// Apply `action`. Returns `true` when the selection changed.
    pub fn dispatch(&mut self, action: PickerAction, selection: &mut SelectionState) -> bool {
        match action {
            PickerAction::SelectTab(category) => {
                self.active = category;
                false
            }
            PickerAction::SelectVariant(index) => selection.set(self.active, index),
        }
    }

    /// Build the view from the library and the live selection.
    ///
    /// `drawn` reports, per category, the index whose image is currently on the composite; tabs
    /// show that variant.
    pub fn view(
        &self,
        library: &AssetLibrary,
        selection: &PerCategory<usize>,
        drawn: impl Fn(Category) -> Option<usize>,
    ) -> PickerView {
        let tabs = Category::ALL
            .into_iter()
            .map(|category| {
                let thumbnail = drawn(category)
                    .and_then(|index| library.variant(category, index))
                    .and_then(|v| v.asset.clone());
                TabView {
                    category,
                    active: category == self.active,
                    thumbnail,
                }
            })
            .collect();

        let gallery = library
            .list(self.active)
            .variants()
            .iter()
            .enumerate()
            .map(|(index, v)| GalleryEntry {
                index,
                asset: v.asset.clone(),
                selected: index == selection[self.active],
            })
            .collect();

        PickerView {
            tabs,
            active: self.active,
            gallery,
        }
    }
}

/// Rasterize a gallery or tab thumbnail. `None` for none slots and out-of-range indices.
pub fn render_thumbnail(
    library: &AssetLibrary,
    category: Category,
    index: usize,
    size: u32,
) -> EmojiResult<Option<RasterLayer>> {
    let Some(layer) = library
        .variant(category, index)
        .and_then(|v| v.layer.as_ref())
    else {
        return Ok(None);
    };
    rasterize_layer(layer, size).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/picker/view.rs"]
mod tests;
