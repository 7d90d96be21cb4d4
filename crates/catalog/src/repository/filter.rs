use crate::domain::filter::{DeletedFilter, PricePresence, ProductFilter};
use sqlx::{Postgres, QueryBuilder};

pub const PRODUCT_COLUMNS: &str = "id, external_id, sku, name, brand, model, category, color, \
     price, currency, stock, created_at, updated_at, deleted";

/// Makes `%`, `_` and `\` match literally inside an ILIKE pattern.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Appends a `WHERE` clause for `filter`. Every predicate is a bound parameter.
pub fn push_product_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    builder.push(" WHERE TRUE");

    match filter.deleted {
        DeletedFilter::ExcludeDeleted => {
            builder.push(" AND deleted = FALSE");
        }
        DeletedFilter::OnlyDeleted => {
            builder.push(" AND deleted = TRUE");
        }
        DeletedFilter::IncludeDeleted => {}
    }

    if let Some(name) = &filter.name_contains {
        builder
            .push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)))
            .push(" ESCAPE '\\'");
    }

    if let Some(category) = &filter.category {
        builder.push(" AND category = ").push_bind(category.clone());
    }

    if let Some(min) = filter.price.min {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filter.price.max {
        builder.push(" AND price <= ").push_bind(max);
    }

    match filter.price_presence {
        Some(PricePresence::WithPrice) => {
            builder.push(" AND price IS NOT NULL");
        }
        Some(PricePresence::WithoutPrice) => {
            builder.push(" AND price IS NULL");
        }
        None => {}
    }

    if let Some(min) = filter.stock.min {
        builder.push(" AND stock >= ").push_bind(min);
    }
    if let Some(max) = filter.stock.max {
        builder.push(" AND stock <= ").push_bind(max);
    }

    if let Some(start) = filter.created_at.min {
        builder.push(" AND created_at >= ").push_bind(start);
    }
    if let Some(end) = filter.created_at.max {
        builder.push(" AND created_at <= ").push_bind(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::Range;
    use pretty_assertions::assert_eq;

    fn count_sql(filter: &ProductFilter) -> String {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_product_filter(&mut builder, filter);
        builder.sql().to_string()
    }

    #[test]
    fn default_filter_only_excludes_deleted() {
        assert_eq!(
            count_sql(&ProductFilter::default()),
            "SELECT COUNT(*) FROM products WHERE TRUE AND deleted = FALSE"
        );
    }

    #[test]
    fn compound_list_filter() {
        let filter = ProductFilter {
            name_contains: Some("phone".into()),
            category: Some("Electronics".into()),
            price: Range::new(Some(100.0), Some(500.0)),
            ..Default::default()
        };

        assert_eq!(
            count_sql(&filter),
            "SELECT COUNT(*) FROM products WHERE TRUE AND deleted = FALSE \
             AND name ILIKE $1 ESCAPE '\\' AND category = $2 AND price >= $3 AND price <= $4"
        );
    }

    #[test]
    fn report_filters() {
        let filter = ProductFilter {
            price_presence: Some(PricePresence::WithoutPrice),
            stock: Range::new(Some(1), None),
            ..Default::default()
        }
        .with_deleted(DeletedFilter::IncludeDeleted);

        assert_eq!(
            count_sql(&filter),
            "SELECT COUNT(*) FROM products WHERE TRUE AND price IS NULL AND stock >= $1"
        );

        let only = ProductFilter::default().with_deleted(DeletedFilter::OnlyDeleted);
        assert_eq!(
            count_sql(&only),
            "SELECT COUNT(*) FROM products WHERE TRUE AND deleted = TRUE"
        );
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
