//! Built-in blueprints and the standard depth progression tables.

use crate::config::SpawnConfig;
use crate::curve::Curve;
use crate::entity::{Blueprint, EntityFactory};
use crate::mapgen::SpawnTable;
use crate::types::Template;

pub fn blueprint_for(template: Template) -> Blueprint {
    let (name, glyph) = match template {
        Template::Player => ("Player", '@'),
        Template::Orc => ("Orc", 'o'),
        Template::Troll => ("Troll", 'T'),
        Template::HealthPotion => ("Health Potion", '!'),
        Template::ConfusionScroll => ("Confusion Scroll", '~'),
        Template::LightningScroll => ("Lightning Scroll", '~'),
        Template::FireballScroll => ("Fireball Scroll", '~'),
        Template::Sword => ("Sword", '/'),
        Template::ChainMail => ("Chain Mail", '['),
    };
    Blueprint { template, name, glyph }
}

/// Instantiates the built-in blueprints.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardFactory;

impl EntityFactory for StandardFactory {
    fn blueprint(&self, template: Template) -> Blueprint {
        blueprint_for(template)
    }
}

pub fn max_items_by_floor() -> Curve {
    Curve::from_points([(1.0, 1.0), (4.0, 2.0)])
}

pub fn max_monsters_by_floor() -> Curve {
    Curve::from_points([(1.0, 2.0), (4.0, 3.0), (6.0, 5.0)])
}

pub fn item_chances() -> SpawnTable {
    SpawnTable::new()
        .with(Template::HealthPotion, Curve::from_points([(0.0, 35.0)]))
        .with(Template::ConfusionScroll, Curve::from_points([(1.0, 0.0), (2.0, 10.0)]))
        .with(Template::LightningScroll, Curve::from_points([(3.0, 0.0), (4.0, 25.0)]))
        .with(Template::Sword, Curve::from_points([(3.0, 0.0), (4.0, 5.0)]))
        .with(Template::FireballScroll, Curve::from_points([(5.0, 0.0), (6.0, 25.0)]))
        .with(Template::ChainMail, Curve::from_points([(5.0, 0.0), (6.0, 15.0)]))
}

pub fn enemy_chances() -> SpawnTable {
    SpawnTable::new().with(Template::Orc, Curve::from_points([(1.0, 80.0)])).with(
        Template::Troll,
        Curve::from_points([(2.0, 0.0), (3.0, 15.0), (5.0, 30.0), (7.0, 60.0)]),
    )
}

impl SpawnConfig {
    /// The stock progression: orcs from the start, trolls from floor 3, better
    /// loot every couple of floors.
    pub fn standard() -> Self {
        Self {
            max_monsters_per_room: max_monsters_by_floor(),
            max_items_per_room: max_items_by_floor(),
            monsters: enemy_chances(),
            items: item_chances(),
        }
    }
}
