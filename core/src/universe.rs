//! The bundled Doctor Who universe: characters, species, episodes and the
//! actors who played them.
//!
//! Nodes carry one identifying property depending on what they are:
//! `name` (characters), `species`, `title` (episodes, plus `series`) or
//! `actor`.

use crate::dataset::load_json;
use crate::error::Result;
use crate::graph::Graph;

pub const APPEARED_IN: &str = "APPEARED_IN";
pub const REGENERATED_TO: &str = "REGENERATED_TO";
pub const PLAYED: &str = "PLAYED";
pub const IS_A: &str = "IS_A";
pub const COMPANION_OF: &str = "COMPANION_OF";
pub const ENEMY_OF: &str = "ENEMY_OF";

/// Raw JSON document, in [`crate::Dataset`] format.
pub const DOCTOR_WHO_JSON: &str = include_str!("../data/doctor_who_universe.json");

/// Build the bundled universe graph.
pub fn doctor_who() -> Result<Graph> {
    load_json(DOCTOR_WHO_JSON)
}
