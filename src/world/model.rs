use std::collections::HashMap;

/// Static content tables, immutable after load. Mutable runtime state
/// (item positions, open containers, visited rooms) lives in
/// `engine::scope::WorldState`.
pub struct World {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub start: String,
    pub locations: HashMap<String, Location>,
    pub items: HashMap<String, Item>,
    pub actions: HashMap<String, ActionDef>,
    // Declaration order from the world file. Candidate fallback and
    // disambiguation listings depend on a stable iteration order, which
    // the HashMaps above do not give us.
    pub location_order: Vec<String>,
    pub item_order: Vec<String>,
    pub action_order: Vec<String>,
    pub swear_words: Vec<String>,
    pub swear_response: String,
}

pub struct Location {
    pub id: String,
    /// Room title, printed on every entry ("West of House").
    pub brief_desc: String,
    /// Full description, printed on first visit and on LOOK.
    pub long_desc: String,
    pub dark: bool,
    /// Keyed by lowercase direction ("north", "in", ...).
    pub exits: HashMap<String, ExitSpec>,
    pub extra: HashMap<String, toml::Value>,
}

/// One direction out of a location.
#[derive(Clone, Debug, PartialEq)]
pub enum ExitSpec {
    /// Plain movement to another location.
    To(String),
    /// Movement gated on a door-like item being open.
    Door { to: String, door: String },
    /// No movement; print this instead.
    Refusal(String),
}

pub struct Item {
    pub id: String,
    /// Display name ("brass lantern").
    pub name: String,
    /// Noun words that refer to this item, uppercase.
    pub words: Vec<String>,
    /// Adjective qualifiers, uppercase.
    pub adjectives: Vec<String>,
    /// Listing description; falls back to `name` when empty.
    pub long_desc: String,
    pub examine_text: String,
    pub takeable: bool,
    pub openable: bool,
    /// Initial open state (seeds `WorldState::open`).
    pub open: bool,
    pub locked: bool,
    pub container: bool,
    /// Initially giving light (seeds `WorldState::lit`).
    pub light_source: bool,
    pub do_not_list: bool,
    /// Suppress "the" in reconstructed prompts ("What do you want to put
    /// the coin in?").
    pub no_article: bool,
    /// Location id, "PLAYER", or a container item id. None = off-stage.
    pub init_loc: Option<String>,
    pub extra: HashMap<String, toml::Value>,
}

pub struct ActionDef {
    pub id: String,
    /// Surface verb words, uppercase ("GET", "TAKE", "GRAB").
    pub words: Vec<String>,
    pub requires_object: bool,
    /// Uppercase. Non-empty means this entry only matches commands using
    /// one of these prepositions (or none, as an elided default).
    pub prepositions: Vec<String>,
    /// Preposition binds to a single object ("TURN ON LAMP") instead of
    /// introducing a second one ("PUT COIN IN SLOT").
    pub no_second_item: bool,
    pub is_move: bool,
    pub supports_all: bool,
    pub suppress_in_listing: bool,
    /// Rewrite to another action key after matching.
    pub mimic: Option<String>,
    /// Printed when no handler claims the command.
    pub default_result: Option<String>,
    pub extra: HashMap<String, toml::Value>,
}
