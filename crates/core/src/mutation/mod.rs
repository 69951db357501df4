//! Optimistic mutations of the favorites collection.
//!
//! Every mutation runs the same sequence through [`MutationCoordinator`]:
//!
//! 1. cancel any in-flight favorites refetch,
//! 2. snapshot the cached favorites,
//! 3. install the predicted collection,
//! 4. write through the [`FavoritesSource`](crate::source::FavoritesSource),
//! 5. restore the snapshot if the write failed,
//! 6. mark favorites stale so the next read reconciles with the source.
//!
//! Steps 1 to 3 run without yielding, so no refetch can land between the
//! snapshot and the optimistic write.

mod coordinator;
mod kinds;

pub use coordinator::{MutationCoordinator, MutationError, MutationState};
pub use kinds::{AddFavorite, ClearFavorites, FavoritesMutation, RemoveFavorite};
