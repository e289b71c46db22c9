//! Buying and equipping skins.

use super::skins::{self, SKINS};
use super::types::{PersistentProfile, SkinId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("no skin named {0}")]
    UnknownSkin(SkinId),
    #[error("{0} is already owned")]
    AlreadyOwned(SkinId),
    #[error("{skin} costs {price} coins, only {available} saved")]
    InsufficientCoins {
        skin: SkinId,
        price: u64,
        available: u64,
    },
    #[error("{0} is not owned")]
    NotOwned(SkinId),
}

impl PersistentProfile {
    /// Deduct the price and add the skin to the owned set. Does not equip.
    pub fn purchase_skin(&mut self, id: &SkinId) -> Result<(), ShopError> {
        let skin = skins::find(id).ok_or_else(|| ShopError::UnknownSkin(id.clone()))?;
        if self.owns(id) {
            return Err(ShopError::AlreadyOwned(id.clone()));
        }
        if self.saved_coins < skin.price {
            return Err(ShopError::InsufficientCoins {
                skin: id.clone(),
                price: skin.price,
                available: self.saved_coins,
            });
        }
        self.saved_coins -= skin.price;
        self.owned_skins.insert(id.clone());
        Ok(())
    }

    pub fn equip_skin(&mut self, id: &SkinId) -> Result<(), ShopError> {
        if skins::find(id).is_none() {
            return Err(ShopError::UnknownSkin(id.clone()));
        }
        if !self.owns(id) {
            return Err(ShopError::NotOwned(id.clone()));
        }
        self.current_skin = id.clone();
        Ok(())
    }
}

/// What a shop selection did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopOutcome {
    Equipped(SkinId),
    Purchased(SkinId),
    Rejected(ShopError),
}

/// Shop overlay state. Lives only while the game is in READY.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shop {
    pub open: bool,
    pub cursor: usize,
    pub last_outcome: Option<ShopOutcome>,
}

impl Shop {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.last_outcome = None;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.last_outcome = None;
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.checked_sub(1).unwrap_or(SKINS.len() - 1);
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1) % SKINS.len();
    }

    pub fn selected(&self) -> SkinId {
        SkinId::new(SKINS[self.cursor.min(SKINS.len() - 1)].id)
    }

    /// Equip the highlighted skin if owned, otherwise try to buy then equip it.
    pub fn select(&mut self, profile: &mut PersistentProfile) -> &ShopOutcome {
        let id = self.selected();
        let outcome = if profile.owns(&id) {
            match profile.equip_skin(&id) {
                Ok(()) => ShopOutcome::Equipped(id),
                Err(e) => ShopOutcome::Rejected(e),
            }
        } else {
            match profile.purchase_skin(&id).and_then(|()| profile.equip_skin(&id)) {
                Ok(()) => ShopOutcome::Purchased(id),
                Err(e) => ShopOutcome::Rejected(e),
            }
        };
        self.last_outcome.insert(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rich_profile(coins: u64) -> PersistentProfile {
        PersistentProfile {
            saved_coins: coins,
            ..PersistentProfile::default()
        }
    }

    #[test]
    fn test_purchase_deducts_price() {
        let mut profile = rich_profile(120);
        profile.purchase_skin(&SkinId::new("cardinal")).unwrap();
        assert_eq!(profile.saved_coins, 20);
        assert!(profile.owns(&SkinId::new("cardinal")));
        assert!(profile.current_skin.is_default());
    }

    #[test]
    fn test_purchase_insufficient_coins() {
        let mut profile = rich_profile(49);
        let err = profile.purchase_skin(&SkinId::new("blue_jay")).unwrap_err();
        assert_eq!(
            err,
            ShopError::InsufficientCoins {
                skin: SkinId::new("blue_jay"),
                price: 50,
                available: 49,
            }
        );
        assert_eq!(profile.saved_coins, 49);
        assert!(!profile.owns(&SkinId::new("blue_jay")));
    }

    #[test]
    fn test_purchase_twice_rejected() {
        let mut profile = rich_profile(500);
        profile.purchase_skin(&SkinId::new("ninja")).unwrap();
        assert_eq!(
            profile.purchase_skin(&SkinId::new("ninja")),
            Err(ShopError::AlreadyOwned(SkinId::new("ninja")))
        );
        assert_eq!(profile.saved_coins, 350);
    }

    #[test]
    fn test_purchase_unknown_skin() {
        let mut profile = rich_profile(500);
        assert_eq!(
            profile.purchase_skin(&SkinId::new("dodo")),
            Err(ShopError::UnknownSkin(SkinId::new("dodo")))
        );
    }

    #[test]
    fn test_equip_requires_ownership() {
        let mut profile = rich_profile(0);
        assert_eq!(
            profile.equip_skin(&SkinId::new("ghost")),
            Err(ShopError::NotOwned(SkinId::new("ghost")))
        );
        assert!(profile.current_skin.is_default());
    }

    #[test]
    fn test_shop_select_buys_then_equips() {
        let mut profile = rich_profile(60);
        let mut shop = Shop::default();
        shop.move_down(); // blue_jay
        let outcome = shop.select(&mut profile).clone();
        assert_eq!(outcome, ShopOutcome::Purchased(SkinId::new("blue_jay")));
        assert_eq!(profile.current_skin, SkinId::new("blue_jay"));
        assert_eq!(profile.saved_coins, 10);

        shop.move_up(); // default
        let outcome = shop.select(&mut profile).clone();
        assert_eq!(outcome, ShopOutcome::Equipped(SkinId::default()));
        assert!(profile.current_skin.is_default());
    }

    #[test]
    fn test_cursor_wraps() {
        let mut shop = Shop::default();
        shop.move_up();
        assert_eq!(shop.cursor, SKINS.len() - 1);
        shop.move_down();
        assert_eq!(shop.cursor, 0);
    }
}
