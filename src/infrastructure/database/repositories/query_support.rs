//! Sorting and windowing shared by the SeaORM collections

use log::debug;
use sea_orm::{EntityTrait, IdenStatic, Iterable, QueryOrder, QuerySelect, Select};

use crate::shared::{column_name, FindQuery, SortDirection, SortSpec};

fn find_column<E: EntityTrait>(field: &str) -> Option<E::Column> {
    let name = column_name(field);
    E::Column::iter().find(|c| c.as_str() == name)
}

/// Order by each known sort key, then by `id`. Unknown keys are skipped.
pub(super) fn apply_sort<E: EntityTrait>(mut select: Select<E>, sort: &SortSpec) -> Select<E> {
    for (field, direction) in sort.iter() {
        let Some(column) = find_column::<E>(field) else {
            debug!("Ignoring sort on unknown field '{}'", field);
            continue;
        };
        select = match direction {
            SortDirection::Ascending => select.order_by_asc(column),
            SortDirection::Descending => select.order_by_desc(column),
        };
    }
    if let Some(id) = find_column::<E>("id") {
        select = select.order_by_asc(id);
    }
    select
}

/// Largest offset SQLite accepts as a bound parameter.
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Apply sort, offset and limit from a [`FindQuery`].
///
/// Offsets past `i64::MAX` are capped; they are beyond any table anyway.
pub(super) fn apply_window<E: EntityTrait, F>(
    select: Select<E>,
    query: &FindQuery<'_, F>,
) -> Select<E> {
    let select = apply_sort(select, &query.sort.clone().unwrap_or_default());
    let select = if query.skip > 0 {
        select.offset(query.skip.min(MAX_OFFSET))
    } else {
        select
    };
    match query.limit {
        Some(limit) => select.limit(limit),
        None => select,
    }
}
