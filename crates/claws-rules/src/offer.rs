//! Upgrade offers: a random 3-of-N sample with a wrapping cursor.

use rand::seq::SliceRandom;
use rand::Rng;

use claws_core::constants::UPGRADE_OFFER_SIZE;
use claws_core::enums::UpgradeKey;

use crate::upgrades::UpgradeOption;

/// One open upgrade episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOffer {
    options: Vec<UpgradeKey>,
    cursor: usize,
}

impl UpgradeOffer {
    /// Shuffle the catalog and keep the first three. Distinct by
    /// construction.
    pub fn sample<R: Rng + ?Sized>(catalog: &[UpgradeOption], rng: &mut R) -> Self {
        let mut keys: Vec<UpgradeKey> = catalog.iter().map(|o| o.key).collect();
        keys.shuffle(rng);
        keys.truncate(UPGRADE_OFFER_SIZE);
        Self {
            options: keys,
            cursor: 0,
        }
    }

    /// Offer with a fixed option list and the cursor on the first entry.
    pub fn new(options: Vec<UpgradeKey>) -> Self {
        Self { options, cursor: 0 }
    }

    pub fn options(&self) -> &[UpgradeKey] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        let len = self.options.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.options.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Currently highlighted option.
    pub fn selected(&self) -> Option<UpgradeKey> {
        self.options.get(self.cursor).copied()
    }
}
