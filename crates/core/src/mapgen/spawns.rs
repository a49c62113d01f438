//! Depth-weighted spawn tables and room population.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::SpawnConfig;
use crate::curve::{Curve, CurveError};
use crate::entity::EntityFactory;
use crate::types::{EntityId, Pos, Template};

use super::model::GeneratedLevel;
use super::random::RandomSource;
use super::room::RectangularRoom;

/// Spawn-weight curves keyed by template. Iteration follows template order so
/// seeded runs stay reproducible.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpawnTable {
    entries: BTreeMap<Template, Curve>,
}

impl SpawnTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, template: Template, curve: Curve) -> Self {
        self.insert(template, curve);
        self
    }

    pub fn insert(&mut self, template: Template, curve: Curve) -> Option<Curve> {
        self.entries.insert(template, curve)
    }

    pub fn get(&self, template: Template) -> Option<&Curve> {
        self.entries.get(&template)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Template, &Curve)> {
        self.entries.iter().map(|(&template, curve)| (template, curve))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Templates with a positive weight at `floor`, with that weight.
    pub fn eligible_at(&self, floor: u32) -> Result<Vec<(Template, f64)>, CurveError> {
        let mut eligible = Vec::with_capacity(self.entries.len());
        for (template, curve) in self.iter() {
            let weight = curve.evaluate(f64::from(floor))?;
            if weight > 0.0 {
                eligible.push((template, weight));
            }
        }
        Ok(eligible)
    }
}

/// The curve's value at `floor`, truncated toward zero.
pub fn max_for_floor(curve: &Curve, floor: u32) -> Result<i32, CurveError> {
    Ok(curve.evaluate(f64::from(floor))? as i32)
}

/// Draws `count` templates independently, with replacement, in proportion to
/// their weight at `floor`.
///
/// When nothing has a positive weight the result is empty rather than an
/// error; callers see fewer spawns, never a failed floor.
pub fn sample_entities(
    table: &SpawnTable,
    count: usize,
    floor: u32,
    rng: &mut impl RandomSource,
) -> Result<Vec<Template>, CurveError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let eligible = table.eligible_at(floor)?;
    if eligible.is_empty() {
        debug!(floor, count, "no template has a positive spawn weight");
        return Ok(Vec::new());
    }

    let weights: Vec<f64> = eligible.iter().map(|&(_, weight)| weight).collect();
    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(index) = rng.weighted_index(&weights) {
            chosen.push(eligible[index].0);
        }
    }
    Ok(chosen)
}

/// Rolls monster and item counts for `room`, samples templates for each and
/// spawns them on random interior cells.
///
/// Placement is best effort: a template whose single position draw lands on
/// an occupied cell is dropped.
pub fn place_entities(
    room: &RectangularRoom,
    level: &mut GeneratedLevel,
    spawns: &SpawnConfig,
    rng: &mut impl RandomSource,
    factory: &impl EntityFactory,
) -> Result<Vec<EntityId>, CurveError> {
    let floor = level.floor;
    let monster_cap = max_for_floor(&spawns.max_monsters_per_room, floor)?.max(0);
    let item_cap = max_for_floor(&spawns.max_items_per_room, floor)?.max(0);
    let monster_count = rng.int_in_range(0, monster_cap) as usize;
    let item_count = rng.int_in_range(0, item_cap) as usize;

    let monsters = sample_entities(&spawns.monsters, monster_count, floor, rng)?;
    let items = sample_entities(&spawns.items, item_count, floor, rng)?;

    let inner = room.inner_bounds();
    let mut spawned = Vec::with_capacity(monsters.len() + items.len());
    for template in monsters.into_iter().chain(items) {
        let x = rng.int_in_range(inner.x1, inner.x2);
        let y = rng.int_in_range(inner.y1, inner.y2);
        let pos = Pos { y, x };
        if level.entity_at(pos).is_some() {
            trace!(?template, ?pos, "spawn cell occupied, skipping");
            continue;
        }
        spawned.push(level.add_entity(factory.instantiate(template, pos)));
    }

    debug!(floor, monster_count, item_count, placed = spawned.len(), "room populated");
    Ok(spawned)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::content::StandardFactory;
    use crate::mapgen::random::floor_rng;

    fn counts(templates: &[Template]) -> BTreeMap<Template, usize> {
        let mut counts = BTreeMap::new();
        for &template in templates {
            *counts.entry(template).or_insert(0) += 1;
        }
        counts
    }

    fn enemy_table() -> SpawnTable {
        SpawnTable::new().with(Template::Orc, Curve::from_points([(1.0, 80.0)])).with(
            Template::Troll,
            Curve::from_points([(2.0, 0.0), (3.0, 15.0), (5.0, 30.0), (7.0, 60.0)]),
        )
    }

    #[test]
    fn max_for_floor_truncates_toward_zero() {
        let curve = Curve::from_points([(1.0, 1.0), (4.0, 2.0)]);
        assert_eq!(max_for_floor(&curve, 1), Ok(1));
        assert_eq!(max_for_floor(&curve, 3), Ok(1));
        assert_eq!(max_for_floor(&curve, 4), Ok(2));

        let negative = Curve::from_points([(0.0, -0.5), (10.0, -9.5)]);
        assert_eq!(max_for_floor(&negative, 1), Ok(-1));
        assert_eq!(max_for_floor(&Curve::new(), 1), Err(CurveError::Empty));
    }

    #[test]
    fn single_eligible_template_is_always_chosen() {
        let mut rng = floor_rng(7, 1);
        let table = SpawnTable::new().with(Template::Orc, Curve::from_points([(1.0, 80.0)]));
        let drawn = sample_entities(&table, 1_000, 1, &mut rng).expect("curves are non-empty");
        assert_eq!(counts(&drawn).get(&Template::Orc), Some(&1_000));
    }

    #[test]
    fn zero_weight_templates_are_never_drawn() {
        let mut rng = floor_rng(8, 1);
        let drawn = sample_entities(&enemy_table(), 5_000, 2, &mut rng).expect("valid table");
        assert_eq!(drawn.len(), 5_000);
        assert!(drawn.iter().all(|&template| template == Template::Orc));
    }

    #[test]
    fn nothing_eligible_yields_an_empty_draw() {
        let mut rng = floor_rng(9, 1);
        let table = SpawnTable::new().with(Template::Troll, Curve::from_points([(5.0, 0.0)]));
        assert_eq!(sample_entities(&table, 10, 1, &mut rng), Ok(Vec::new()));
        assert_eq!(sample_entities(&SpawnTable::new(), 3, 1, &mut rng), Ok(Vec::new()));
    }

    #[test]
    fn empty_curve_in_table_is_reported() {
        let mut rng = floor_rng(10, 1);
        let table = SpawnTable::new().with(Template::Sword, Curve::new());
        assert_eq!(sample_entities(&table, 2, 1, &mut rng), Err(CurveError::Empty));
        assert_eq!(sample_entities(&table, 0, 1, &mut rng), Ok(Vec::new()));
    }

    #[test]
    fn draws_with_replacement_repeat_templates() {
        let mut rng = floor_rng(11, 3);
        let drawn = sample_entities(&enemy_table(), 50, 3, &mut rng).expect("valid table");
        assert_eq!(drawn.len(), 50);
        let tally = counts(&drawn);
        assert!(tally.values().any(|&count| count > 1));
    }

    #[test]
    fn populated_entities_land_inside_the_room_without_stacking() {
        let room = RectangularRoom::new(10, 10, 8, 8);
        let player = StandardFactory.blueprint(Template::Player).unplaced();
        let mut level = GeneratedLevel::new(6, 40, 30, player);
        level.grid.carve_inner(room.inner_bounds());
        let spawns = SpawnConfig::standard();

        let mut rng = floor_rng(12, 6);
        let mut all = Vec::new();
        for _ in 0..20 {
            all.extend(
                place_entities(&room, &mut level, &spawns, &mut rng, &StandardFactory)
                    .expect("standard tables evaluate"),
            );
        }

        assert!(!all.is_empty());
        let inner = room.inner_bounds();
        let mut cells = Vec::new();
        for id in all {
            let entity = &level.entities[id];
            let pos = entity.location.expect("spawned entities are placed");
            assert!(inner.contains(pos), "{pos:?} escaped {inner:?}");
            cells.push(pos);
        }
        let before = cells.len();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), before, "two spawns share a cell");
    }
}
