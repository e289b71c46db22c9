//! Player profile: high score, coins and cosmetic skins.

pub mod shop;
pub mod skins;
pub mod types;

pub use shop::{Shop, ShopError, ShopOutcome};
pub use skins::{Skin, DEFAULT_SKIN_ID, SKINS};
pub use types::{PersistentProfile, SkinId};
