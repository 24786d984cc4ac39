//! Favorite toggle outcome.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether a listing is in the user's favorites after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteState {
    /// `true` when the listing is now favorited.
    pub favorited: bool,
}

impl FavoriteState {
    /// State reported after a toggle that found the favorite `present`.
    pub fn after_toggle(present: bool) -> Self {
        Self {
            favorited: !present,
        }
    }
}
