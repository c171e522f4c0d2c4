//! Upgrade Deck
//!
//! Categorized, rarity-tiered upgrade cards that mutate fighter stats
//! between fights. The deck is rebuilt once per run: cards are grouped by
//! stat category, each group is shuffled, category order is shuffled, and
//! the groups are interleaved round-robin so consecutive draws rarely
//! repeat a category. One randomly chosen legendary is injected per run.
//! Draw/pick/return cycles never create or destroy cards.

use std::collections::VecDeque;

use crate::combat::fighter::Fighter;
use crate::combat::rng::GameRng;

/// Card rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Which family of stats a card touches; drives deck interleaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Offense,
    Defense,
    Sustain,
    Utility,
}

impl StatCategory {
    pub fn name(self) -> &'static str {
        match self {
            StatCategory::Offense => "Offense",
            StatCategory::Defense => "Defense",
            StatCategory::Sustain => "Sustain",
            StatCategory::Utility => "Utility",
        }
    }
}

/// An immutable upgrade card definition. `apply` is a pure mutation of a
/// fighter's stats.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeCard {
    pub id: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub category: StatCategory,
    pub apply: fn(&mut Fighter),
}

/// The standard (non-legendary) card pool.
pub fn all_cards() -> Vec<UpgradeCard> {
    vec![
        // === Offense ===
        UpgradeCard {
            id: "sharpened_grip",
            name: "Sharpened Grip",
            rarity: Rarity::Common,
            category: StatCategory::Offense,
            apply: |f| f.base_attack += 3,
        },
        UpgradeCard {
            id: "combat_flow",
            name: "Combat Flow",
            rarity: Rarity::Common,
            category: StatCategory::Offense,
            apply: |f| f.attack_speed += 0.25,
        },
        UpgradeCard {
            id: "keen_eye",
            name: "Keen Eye",
            rarity: Rarity::Uncommon,
            category: StatCategory::Offense,
            apply: |f| f.crit_chance += 0.10,
        },
        UpgradeCard {
            id: "heavy_hands",
            name: "Heavy Hands",
            rarity: Rarity::Rare,
            category: StatCategory::Offense,
            apply: |f| f.attack_bonus += 0.25,
        },
        UpgradeCard {
            id: "executioner",
            name: "Executioner",
            rarity: Rarity::Rare,
            category: StatCategory::Offense,
            apply: |f| f.execute += 0.5,
        },
        // === Defense ===
        UpgradeCard {
            id: "padded_vest",
            name: "Padded Vest",
            rarity: Rarity::Common,
            category: StatCategory::Defense,
            apply: |f| f.armor += 2,
        },
        UpgradeCard {
            id: "iron_skin",
            name: "Iron Skin",
            rarity: Rarity::Uncommon,
            category: StatCategory::Defense,
            apply: |f| f.armor += 4,
        },
        UpgradeCard {
            id: "spiked_guard",
            name: "Spiked Guard",
            rarity: Rarity::Uncommon,
            category: StatCategory::Defense,
            apply: |f| f.thorns += 4,
        },
        UpgradeCard {
            id: "bulk_up",
            name: "Bulk Up",
            rarity: Rarity::Common,
            category: StatCategory::Defense,
            apply: |f| {
                // Max-hp gains also grant the hp immediately
                f.max_hp += 20;
                f.hp += 20;
            },
        },
        // === Sustain ===
        UpgradeCard {
            id: "second_wind",
            name: "Second Wind",
            rarity: Rarity::Common,
            category: StatCategory::Sustain,
            apply: |f| f.regen += 2,
        },
        UpgradeCard {
            id: "leech_strikes",
            name: "Leech Strikes",
            rarity: Rarity::Uncommon,
            category: StatCategory::Sustain,
            apply: |f| f.lifesteal += 0.15,
        },
        UpgradeCard {
            id: "field_dressing",
            name: "Field Dressing",
            rarity: Rarity::Rare,
            category: StatCategory::Sustain,
            apply: |f| {
                f.regen += 3;
                f.max_hp += 10;
                f.hp += 10;
            },
        },
        // === Utility ===
        UpgradeCard {
            id: "serrated_edge",
            name: "Serrated Edge",
            rarity: Rarity::Uncommon,
            category: StatCategory::Utility,
            apply: |f| f.bleed += 0.02,
        },
        UpgradeCard {
            id: "stagger_jab",
            name: "Stagger Jab",
            rarity: Rarity::Rare,
            category: StatCategory::Utility,
            apply: |f| f.stun_chance += 0.10,
        },
        UpgradeCard {
            id: "adrenaline",
            name: "Adrenaline",
            rarity: Rarity::Uncommon,
            category: StatCategory::Utility,
            apply: |f| {
                f.attack_speed += 0.15;
                f.regen += 1;
            },
        },
    ]
}

/// The legendary pool; exactly one of these is injected per run.
pub fn legendary_cards() -> Vec<UpgradeCard> {
    vec![
        UpgradeCard {
            id: "colossus",
            name: "Colossus",
            rarity: Rarity::Legendary,
            category: StatCategory::Defense,
            apply: |f| {
                f.max_hp += 60;
                f.hp += 60;
                f.armor += 4;
            },
        },
        UpgradeCard {
            id: "berserker_rage",
            name: "Berserker Rage",
            rarity: Rarity::Legendary,
            category: StatCategory::Offense,
            apply: |f| {
                f.attack_bonus += 0.5;
                f.attack_speed += 0.25;
            },
        },
        UpgradeCard {
            id: "vampire_lord",
            name: "Vampire Lord",
            rarity: Rarity::Legendary,
            category: StatCategory::Sustain,
            apply: |f| {
                f.lifesteal += 0.35;
                f.crit_chance += 0.10;
            },
        },
        UpgradeCard {
            id: "butcher",
            name: "Butcher",
            rarity: Rarity::Legendary,
            category: StatCategory::Utility,
            apply: |f| {
                f.bleed += 0.04;
                f.execute += 0.5;
            },
        },
    ]
}

/// Look up a card (standard or legendary) by id.
pub fn find_card(id: &str) -> Option<UpgradeCard> {
    all_cards()
        .into_iter()
        .chain(legendary_cards())
        .find(|card| card.id == id)
}

/// A run's upgrade deck. Cards are drawn from the front; unpicked cards
/// return to the bottom.
pub struct UpgradeDeck {
    cards: VecDeque<UpgradeCard>,
    /// Ids of every upgrade applied this run, for display/audit
    pub applied: Vec<&'static str>,
}

impl UpgradeDeck {
    /// Build a fresh deck: all standard cards plus one random legendary,
    /// shuffled within categories and interleaved across them.
    pub fn build(rng: &mut GameRng) -> Self {
        let mut pool = all_cards();
        let legendaries = legendary_cards();
        pool.push(legendaries[rng.random_index(legendaries.len())]);

        // Group by category, preserving first-seen category order for the
        // moment; the order itself gets shuffled below.
        let mut groups: Vec<(StatCategory, Vec<UpgradeCard>)> = Vec::new();
        for card in pool {
            match groups.iter_mut().find(|(category, _)| *category == card.category) {
                Some((_, group)) => group.push(card),
                None => groups.push((card.category, vec![card])),
            }
        }

        for (_, group) in groups.iter_mut() {
            rng.shuffle(group);
        }
        rng.shuffle(&mut groups);

        // Round-robin across groups so consecutive cards differ in
        // category whenever more than one group still has cards.
        let mut cards = VecDeque::new();
        loop {
            let mut drew_any = false;
            for (_, group) in groups.iter_mut() {
                if let Some(card) = group.pop() {
                    cards.push_back(card);
                    drew_any = true;
                }
            }
            if !drew_any {
                break;
            }
        }

        Self {
            cards,
            applied: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw up to `n` cards from the front of the deck.
    pub fn draw_cards(&mut self, n: usize) -> Vec<UpgradeCard> {
        let mut hand = Vec::with_capacity(n);
        for _ in 0..n {
            match self.cards.pop_front() {
                Some(card) => hand.push(card),
                None => break,
            }
        }
        hand
    }

    /// Take the card at `index` out of a drawn hand, returning the rest to
    /// the bottom of the deck. An out-of-range index returns `None` and
    /// puts the whole hand back, so no card is ever lost.
    pub fn pick_card(&mut self, mut hand: Vec<UpgradeCard>, index: usize) -> Option<UpgradeCard> {
        if index >= hand.len() {
            self.return_to_bottom(hand);
            return None;
        }
        let picked = hand.remove(index);
        self.return_to_bottom(hand);
        Some(picked)
    }

    /// Return cards to the bottom of the deck.
    pub fn return_to_bottom(&mut self, cards: Vec<UpgradeCard>) {
        for card in cards {
            self.cards.push_back(card);
        }
    }

    /// Run a card's mutation against a fighter and record the id.
    pub fn apply_upgrade(&mut self, card: &UpgradeCard, fighter: &mut Fighter) {
        (card.apply)(fighter);
        self.applied.push(card.id);
    }

    /// Iterate the deck front-to-back (for display and tests).
    pub fn iter(&self) -> impl Iterator<Item = &UpgradeCard> {
        self.cards.iter()
    }
}
