use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    DownStairs,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::DownStairs)
    }
}

/// Identity of an immutable blueprint. Live entities are instantiated from a
/// template; the template itself is never placed on a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Template {
    Player,
    Orc,
    Troll,
    HealthPotion,
    ConfusionScroll,
    LightningScroll,
    FireballScroll,
    Sword,
    ChainMail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateCategory {
    Player,
    Monster,
    Item,
}

impl Template {
    pub const ALL: [Template; 9] = [
        Template::Player,
        Template::Orc,
        Template::Troll,
        Template::HealthPotion,
        Template::ConfusionScroll,
        Template::LightningScroll,
        Template::FireballScroll,
        Template::Sword,
        Template::ChainMail,
    ];

    pub fn category(self) -> TemplateCategory {
        match self {
            Template::Player => TemplateCategory::Player,
            Template::Orc | Template::Troll => TemplateCategory::Monster,
            Template::HealthPotion
            | Template::ConfusionScroll
            | Template::LightningScroll
            | Template::FireballScroll
            | Template::Sword
            | Template::ChainMail => TemplateCategory::Item,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Template::Player => "player",
            Template::Orc => "orc",
            Template::Troll => "troll",
            Template::HealthPotion => "health_potion",
            Template::ConfusionScroll => "confusion_scroll",
            Template::LightningScroll => "lightning_scroll",
            Template::FireballScroll => "fireball_scroll",
            Template::Sword => "sword",
            Template::ChainMail => "chain_mail",
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Template::Player => 0,
            Template::Orc => 1,
            Template::Troll => 2,
            Template::HealthPotion => 3,
            Template::ConfusionScroll => 4,
            Template::LightningScroll => 5,
            Template::FireballScroll => 6,
            Template::Sword => 7,
            Template::ChainMail => 8,
        }
    }
}
