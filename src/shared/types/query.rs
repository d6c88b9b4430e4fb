//! Queryable collection capability
//!
//! The paginator talks to storage only through [`QueryableCollection`].
//! Filters, projections and expansions are opaque at this level: the
//! collection decides what they mean.

use async_trait::async_trait;

use super::errors::DomainResult;
use super::pagination::{Populate, Projection, SortSpec};

/// A composable read against a collection.
///
/// ```ignore
/// let query = FindQuery::new(&filter)
///     .select(Projection::new("name floor"))
///     .populate(Populate::from("room"))
///     .sort(SortSpec::default())
///     .skip(20)
///     .limit(10);
/// let records = collection.find(query).await?;
/// ```
#[derive(Debug, Clone)]
pub struct FindQuery<'a, F> {
    pub filter: &'a F,
    pub select: Option<Projection>,
    pub populate: Option<Populate>,
    pub sort: Option<SortSpec>,
    pub skip: u64,
    pub limit: Option<u64>,
}

impl<'a, F> FindQuery<'a, F> {
    pub fn new(filter: &'a F) -> Self {
        Self {
            filter,
            select: None,
            populate: None,
            sort: None,
            skip: 0,
            limit: None,
        }
    }

    pub fn select(mut self, projection: Projection) -> Self {
        self.select = Some(projection);
        self
    }

    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = Some(populate);
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read access to a filtered set of records.
#[async_trait]
pub trait QueryableCollection: Send + Sync {
    type Record: Send;
    type Filter: Send + Sync;

    /// Run a read and return the matching records in query order.
    async fn find(&self, query: FindQuery<'_, Self::Filter>) -> DomainResult<Vec<Self::Record>>;

    /// Number of records matching `filter`, ignoring any paging.
    async fn count(&self, filter: &Self::Filter) -> DomainResult<u64>;
}
