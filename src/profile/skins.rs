//! The skin catalog.

use super::types::SkinId;

pub type Rgb = (u8, u8, u8);

/// One purchasable bird appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub body: Rgb,
    pub wing: Rgb,
    pub beak: Rgb,
    pub eye: Rgb,
}

pub const DEFAULT_SKIN_ID: &str = "default";

const BLACK: Rgb = (0, 0, 0);
const WHITE: Rgb = (255, 255, 255);

/// Shop order.
pub const SKINS: &[Skin] = &[
    Skin {
        id: DEFAULT_SKIN_ID,
        name: "Default",
        price: 0,
        body: (255, 185, 0),
        wing: (255, 140, 0),
        beak: (255, 69, 0),
        eye: BLACK,
    },
    Skin {
        id: "blue_jay",
        name: "Blue Jay",
        price: 50,
        body: (100, 149, 237),
        wing: (65, 105, 225),
        beak: (211, 211, 211),
        eye: BLACK,
    },
    Skin {
        id: "cardinal",
        name: "Cardinal",
        price: 100,
        body: (220, 20, 60),
        wing: (139, 0, 0),
        beak: (255, 140, 0),
        eye: BLACK,
    },
    Skin {
        id: "rainbow",
        name: "Rainbow",
        price: 200,
        body: (255, 0, 255),
        wing: (0, 255, 255),
        beak: (255, 255, 0),
        eye: WHITE,
    },
    Skin {
        id: "ninja",
        name: "Ninja",
        price: 150,
        body: (32, 32, 32),
        wing: (20, 20, 20),
        beak: (64, 64, 64),
        eye: (255, 0, 0),
    },
    Skin {
        id: "ghost",
        name: "Ghost",
        price: 175,
        body: (240, 240, 255),
        wing: (200, 200, 255),
        beak: (220, 220, 255),
        eye: (0, 0, 255),
    },
    Skin {
        id: "phoenix",
        name: "Phoenix",
        price: 250,
        body: (255, 69, 0),
        wing: (255, 140, 0),
        beak: (255, 215, 0),
        eye: (255, 255, 0),
    },
    Skin {
        id: "emerald",
        name: "Emerald",
        price: 150,
        body: (46, 139, 87),
        wing: (0, 100, 0),
        beak: (32, 178, 170),
        eye: (152, 251, 152),
    },
    Skin {
        id: "robot",
        name: "Robot",
        price: 300,
        body: (192, 192, 192),
        wing: (128, 128, 128),
        beak: (169, 169, 169),
        eye: (0, 255, 255),
    },
];

pub fn find(id: &SkinId) -> Option<&'static Skin> {
    SKINS.iter().find(|skin| skin.id == id.as_str())
}

/// Catalog entry for `id`, falling back to the default skin.
pub fn find_or_default(id: &SkinId) -> &'static Skin {
    find(id).unwrap_or(&SKINS[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_skin_is_first_and_free() {
        assert_eq!(SKINS[0].id, DEFAULT_SKIN_ID);
        assert_eq!(SKINS[0].price, 0);
    }

    #[test]
    fn test_ids_unique() {
        let ids: HashSet<_> = SKINS.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), SKINS.len());
    }

    #[test]
    fn test_find_unknown_falls_back() {
        let unknown = SkinId::new("dodo");
        assert!(find(&unknown).is_none());
        assert_eq!(find_or_default(&unknown).id, DEFAULT_SKIN_ID);
        assert_eq!(find(&SkinId::new("robot")).map(|s| s.price), Some(300));
    }
}
