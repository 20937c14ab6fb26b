//! The [`Card`] record: the immutable identity of one 802.11 virtual
//! interface.

use getset::Getters;

/// A physical-wiphy-index / device-name / interface-index triple.
///
/// Identity is purely structural: two cards are equal iff all three
/// fields match. A `Card` stays valid only as long as the interface it
/// names is unchanged; callers re-establish validity by looking the
/// device up again and comparing the result.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct Card {
    phy: u32,
    dev: String,
    ifindex: u32,
}

impl Card {
    pub fn new(phy: u32, dev: String, ifindex: u32) -> Self {
        Card { phy, dev, ifindex }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        let a = Card::new(1, "wlan0".into(), 3);
        let b = Card::new(1, "wlan0".into(), 3);
        let c = Card::new(1, "wlan0".into(), 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
