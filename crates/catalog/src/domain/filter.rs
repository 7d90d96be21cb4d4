use crate::model::product::Product;
use chrono::{DateTime, Utc};

/// Inclusive bounds. An unbounded range matches everything, including missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Range<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
        }
    }
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(min: Option<T>, max: Option<T>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: Option<T>) -> bool {
        if self.is_unbounded() {
            return true;
        }

        match value {
            Some(v) => {
                self.min.is_none_or(|min| v >= min) && self.max.is_none_or(|max| v <= max)
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePresence {
    WithPrice,
    WithoutPrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletedFilter {
    #[default]
    ExcludeDeleted,
    IncludeDeleted,
    OnlyDeleted,
}

/// Storage-agnostic product predicate. Postgres translates it to SQL, the
/// memory store evaluates [`ProductFilter::matches`] directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name_contains: Option<String>,
    pub category: Option<String>,
    pub price: Range<f64>,
    pub price_presence: Option<PricePresence>,
    pub stock: Range<i64>,
    pub created_at: Range<DateTime<Utc>>,
    pub deleted: DeletedFilter,
}

impl ProductFilter {
    pub fn with_deleted(mut self, deleted: DeletedFilter) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        let deleted_ok = match self.deleted {
            DeletedFilter::ExcludeDeleted => !product.deleted,
            DeletedFilter::IncludeDeleted => true,
            DeletedFilter::OnlyDeleted => product.deleted,
        };

        let name_ok = self.name_contains.as_ref().is_none_or(|needle| {
            product
                .name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase()))
        });

        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|category| product.category.as_deref() == Some(category.as_str()));

        let presence_ok = match self.price_presence {
            Some(PricePresence::WithPrice) => product.price.is_some(),
            Some(PricePresence::WithoutPrice) => product.price.is_none(),
            None => true,
        };

        deleted_ok
            && name_ok
            && category_ok
            && presence_ok
            && self.price.contains(product.price)
            && self.stock.contains(product.stock)
            && self.created_at.contains(product.created_at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: i64,
    pub limit: i64,
}
