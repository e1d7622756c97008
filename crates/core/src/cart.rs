//! The shopping cart and its reducer.
//!
//! A [`Cart`] is a plain value. Every transition takes the current cart by
//! reference and returns the next one, so callers decide where the new value
//! lives (a session record, a test variable) and nothing here does I/O.
//!
//! Two invariants hold for every cart produced by this module:
//!
//! - at most one line per product id
//! - every line has a quantity of at least one
//!
//! Line order is insertion order. Adding a product that is already present
//! bumps its quantity in place; new products go to the end.

use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product, ProductId};

/// One product in the cart together with how many of it were selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLineItem {
    /// A fresh line for `product` with quantity one.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.product.title
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.product.price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// A requested cart change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of this product.
    Add(Product),
    /// Take one unit of this product away.
    Remove(ProductId),
}

/// An ordered list of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Apply `action` and return the resulting cart.
    #[must_use]
    pub fn apply(&self, action: &CartAction) -> Self {
        match action {
            CartAction::Add(product) => self.add(product),
            CartAction::Remove(id) => self.remove(*id),
        }
    }

    /// Add one unit of `product`.
    ///
    /// An existing line for the same id has its quantity incremented and
    /// keeps its position. Otherwise a new line with quantity one is
    /// appended. Quantities saturate at `u32::MAX`.
    #[must_use]
    pub fn add(&self, product: &Product) -> Self {
        let mut items = self.items.clone();
        match items.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => items.push(CartLineItem::new(product.clone())),
        }
        Self { items }
    }

    /// Remove one unit of the product with `id`.
    ///
    /// A line at quantity one disappears; a larger quantity is decremented.
    /// Unknown ids leave the cart unchanged.
    #[must_use]
    pub fn remove(&self, id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter_map(|line| {
                if line.id() != id {
                    return Some(line.clone());
                }
                NonZeroU32::new(line.quantity.get() - 1).map(|quantity| CartLineItem {
                    product: line.product.clone(),
                    quantity,
                })
            })
            .collect();
        Self { items }
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Visibility of the cart drawer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawerState {
    Open,
    #[default]
    Closed,
}

impl DrawerState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}
