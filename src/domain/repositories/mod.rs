//! Repository traits for the domain layer
//!
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use async_trait::async_trait;

use super::clinic_room::ClinicRoomRepository;
use super::schedule_slot::ScheduleSlotRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id("7f0c...").await?;
///     let page = paginate(repos.slots(), &SlotFilter::for_room("7f0c..."), options).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn ClinicRoomRepository;
    fn slots(&self) -> &dyn ScheduleSlotRepository;

    /// Cheap round-trip to the backing store, used by health checks.
    async fn ping(&self) -> DomainResult<()>;
}
