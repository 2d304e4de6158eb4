use std::sync::Arc;

use rayon::prelude::*;

use crate::{
    assets::{
        decode::{PreparedLayer, decode_layer},
        source::{AssetRef, AssetSource},
    },
    foundation::core::{Category, PerCategory},
};

/// One selectable option within a category.
#[derive(Clone, Debug)]
pub struct Variant {
    /// Source reference, `None` for the synthetic none slot.
    pub asset: Option<AssetRef>,
    /// Decoded handle, `None` for the synthetic none slot.
    pub layer: Option<Arc<PreparedLayer>>,
}

impl Variant {
    /// The synthetic "no feature" entry.
    pub fn none() -> Self {
        Self {
            asset: None,
            layer: None,
        }
    }

    /// Whether this is the none slot.
    pub fn is_none_slot(&self) -> bool {
        self.asset.is_none()
    }
}

/// Ordered variants of one category.
#[derive(Clone, Debug)]
pub struct VariantList {
    category: Category,
    variants: Vec<Variant>,
}

impl VariantList {
    /// Build a list from loaded variants, prepending the none slot where the category has one.
    pub fn new(category: Category, loaded: Vec<Variant>) -> Self {
        let mut variants = Vec::with_capacity(loaded.len() + 1);
        if category.has_none_slot() {
            variants.push(Variant::none());
        }
        variants.extend(loaded);
        Self { category, variants }
    }

    /// Category of this list.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of selectable entries, including the none slot.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// `true` when no entry is selectable (only possible for head).
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Variant> {
        self.variants.get(index)
    }

    /// All entries in order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

/// A source that was listed but could not be loaded.
#[derive(Clone, Debug)]
pub struct DroppedAsset {
    /// Offending source.
    pub asset: AssetRef,
    /// Rendered error message.
    pub reason: String,
}

/// Immutable variant lists for every category, populated once at startup.
#[derive(Clone, Debug)]
pub struct AssetLibrary {
    lists: PerCategory<VariantList>,
    dropped: Vec<DroppedAsset>,
}

impl AssetLibrary {
    /// Enumerate and decode every category of `source`.
    ///
    /// Individual failures drop the affected variant; a failing listing leaves the category with
    /// only its none slot. Decoding fans out across the rayon pool and is joined before return.
    #[tracing::instrument(skip(source))]
    pub fn load(source: &dyn AssetSource) -> Self {
        let mut dropped = Vec::new();
        let mut loaded: PerCategory<Vec<Variant>> = PerCategory::default();

        for category in Category::ALL {
            let refs = match source.list(category) {
                Ok(refs) => refs,
                Err(e) => {
                    tracing::warn!(%category, error = %e, "failed to list category");
                    Vec::new()
                }
            };

            let results: Vec<_> = refs
                .into_par_iter()
                .map(|asset| {
                    let layer = source
                        .read(&asset)
                        .and_then(|bytes| decode_layer(asset.kind, &bytes));
                    (asset, layer)
                })
                .collect();

            for (asset, layer) in results {
                match layer {
                    Ok(layer) => loaded[category].push(Variant {
                        asset: Some(asset),
                        layer: Some(Arc::new(layer)),
                    }),
                    Err(e) => {
                        tracing::warn!(locator = %asset.locator, error = %e, "dropping asset");
                        dropped.push(DroppedAsset {
                            asset,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let lists = PerCategory::from_fn(|c| {
            VariantList::new(c, std::mem::take(&mut loaded[c]))
        });
        for (category, list) in lists.iter() {
            tracing::debug!(%category, len = list.len(), "category loaded");
        }

        Self { lists, dropped }
    }

    /// Variant list of `category`.
    pub fn list(&self, category: Category) -> &VariantList {
        &self.lists[category]
    }

    /// List lengths per category.
    pub fn lens(&self) -> PerCategory<usize> {
        self.lists.map(|_, l| l.len())
    }

    /// Sources dropped during [`AssetLibrary::load`].
    pub fn dropped(&self) -> &[DroppedAsset] {
        &self.dropped
    }

    /// Entry selected by `index` in `category`, if in bounds.
    pub fn variant(&self, category: Category, index: usize) -> Option<&Variant> {
        self.lists[category].get(index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
