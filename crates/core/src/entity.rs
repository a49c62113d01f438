//! Live entities and the blueprint factory that instantiates them.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Template, TemplateCategory};

/// Immutable description of something that can be spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    pub template: Template,
    pub name: &'static str,
    pub glyph: char,
}

impl Blueprint {
    pub fn blocks_movement(&self) -> bool {
        self.template.category() != TemplateCategory::Item
    }

    /// A fresh entity copied from this blueprint, placed at `pos`.
    pub fn spawn(&self, pos: Pos) -> Entity {
        let mut entity = self.unplaced();
        entity.place(pos);
        entity
    }

    pub fn unplaced(&self) -> Entity {
        Entity {
            template: self.template,
            name: self.name.to_string(),
            glyph: self.glyph,
            blocks_movement: self.blocks_movement(),
            location: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub template: Template,
    pub name: String,
    pub glyph: char,
    pub blocks_movement: bool,
    /// `None` until the entity has been put on a map.
    pub location: Option<Pos>,
}

impl Entity {
    /// Moves the entity to `pos`, returning where it was before.
    pub fn place(&mut self, pos: Pos) -> Option<Pos> {
        self.location.replace(pos)
    }

    pub fn is_placed(&self) -> bool {
        self.location.is_some()
    }

    pub fn is_at(&self, pos: Pos) -> bool {
        self.location == Some(pos)
    }
}

/// Turns a template identity into a live entity.
pub trait EntityFactory {
    fn blueprint(&self, template: Template) -> Blueprint;

    fn instantiate(&self, template: Template, pos: Pos) -> Entity {
        self.blueprint(template).spawn(pos)
    }
}
