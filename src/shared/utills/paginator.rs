//! Generic offset pagination over any [`QueryableCollection`].
//!
//! Normalizes the caller's options, runs the page read and the total count
//! concurrently, and derives the page metadata from both.

use futures_util::future::try_join;

use crate::shared::types::{
    FindQuery, PageMeta, PageResult, PaginationError, PaginationOptions, QueryableCollection,
};

/// Fetch one page of `collection` matching `filter`.
///
/// Selection and expansion are forwarded only when present; sort, skip and
/// limit are always applied. Either storage failure aborts the whole call
/// with a [`PaginationError`]; nothing is retried.
///
/// ```ignore
/// let options = PaginationOptions::new().with_page(2).with_limit(20);
/// let page = paginate(repos.rooms(), &RoomFilter::default(), options).await?;
/// assert!(page.data.len() <= 20);
/// ```
pub async fn paginate<C>(
    collection: &C,
    filter: &C::Filter,
    options: PaginationOptions,
) -> Result<PageResult<C::Record>, PaginationError>
where
    C: QueryableCollection + ?Sized,
{
    let window = options.window();

    let mut query = FindQuery::new(filter);
    if let Some(select) = options.select {
        query = query.select(select);
    }
    if let Some(populate) = options.populate {
        query = query.populate(populate);
    }
    let query = query
        .sort(options.sort.unwrap_or_default())
        .skip(window.skip())
        .limit(window.limit);

    let (data, total) = try_join(collection.find(query), collection.count(filter)).await?;

    Ok(PageResult::new(data, PageMeta::new(window, total)))
}
