use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use super::model::{ActionDef, ExitSpec, Item, Location, World};

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    action: Vec<ActionConfig>, // [[action]] blocks
    #[serde(default)]
    item: Vec<ItemConfig>, // [[item]] blocks
    #[serde(default)]
    location: Vec<LocationConfig>, // [[location]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    start: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    swear_words: Vec<String>,
    #[serde(default)]
    swear_response: Option<String>,
}

#[derive(Deserialize)]
struct ActionConfig {
    id: String,
    words: Vec<String>,

    #[serde(default)]
    requires_object: bool,

    #[serde(default)]
    prepositions: Vec<String>,

    #[serde(default)]
    no_second_item: bool,

    #[serde(default)]
    is_move: bool,

    #[serde(default)]
    supports_all: bool,

    #[serde(default)]
    suppress_in_listing: bool,

    #[serde(default)]
    mimic: Option<String>,

    #[serde(default)]
    default_result: Option<String>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct ItemConfig {
    id: String,
    name: String,

    #[serde(default)]
    words: Vec<String>,

    #[serde(default)]
    adjectives: Vec<String>,

    #[serde(default)]
    long_desc: String,

    #[serde(default)]
    examine: String,

    /// Where the item starts: a location id, "PLAYER", or a container
    /// item id. Omitted = off-stage until a handler places it.
    #[serde(default)]
    init_loc: Option<String>,

    #[serde(default)]
    takeable: bool,

    #[serde(default)]
    openable: bool,

    #[serde(default)]
    open: bool,

    #[serde(default)]
    locked: bool,

    #[serde(default)]
    container: bool,

    #[serde(default)]
    light_source: bool,

    #[serde(default)]
    do_not_list: bool,

    #[serde(default)]
    no_article: bool,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

#[derive(Deserialize)]
struct LocationConfig {
    id: String,
    brief: String,

    #[serde(default)]
    long: String,

    #[serde(default)]
    dark: bool,

    /// direction -> "LOC", "LOC|DOOR_ITEM", or a refusal sentence
    /// (anything containing a space).
    #[serde(default)]
    exits: HashMap<String, String>,

    #[serde(flatten)]
    extra: HashMap<String, toml::Value>,
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> io::Result<World> {
    let contents = fs::read_to_string(path)?;
    load_world_from_str(&contents)
}

/// Public API: load a world from TOML text (tests, wasm).
pub fn load_world_from_str(contents: &str) -> io::Result<World> {
    let world_file: WorldFile = toml::from_str(contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    if world_file.world.id.trim().is_empty() {
        return Err(invalid("world.id may not be empty"));
    }
    if world_file.world.start.trim().is_empty() {
        return Err(invalid("world.start may not be empty"));
    }

    // Build action table
    let mut actions_map: HashMap<String, ActionDef> = HashMap::new();
    let mut action_order: Vec<String> = Vec::new();

    for ac in world_file.action {
        let id = ac.id.trim().to_uppercase();
        if id.is_empty() {
            return Err(invalid("action.id may not be empty"));
        }
        if actions_map.contains_key(&id) {
            return Err(invalid(format!("Duplicate action id: {}", id)));
        }
        if ac.words.is_empty() {
            return Err(invalid(format!("Action '{}' has no words", id)));
        }

        actions_map.insert(
            id.clone(),
            ActionDef {
                id: id.clone(),
                words: uppercase_words(&ac.words),
                requires_object: ac.requires_object,
                prepositions: uppercase_words(&ac.prepositions),
                no_second_item: ac.no_second_item,
                is_move: ac.is_move,
                supports_all: ac.supports_all,
                suppress_in_listing: ac.suppress_in_listing,
                mimic: ac.mimic.map(|m| m.trim().to_uppercase()),
                default_result: ac.default_result.map(|s| normalize_multiline_desc(&s)),
                extra: ac.extra,
            },
        );
        action_order.push(id);
    }

    // Build item table
    let mut items_map: HashMap<String, Item> = HashMap::new();
    let mut item_order: Vec<String> = Vec::new();

    for ic in world_file.item {
        let id = ic.id.trim().to_uppercase();
        if id.is_empty() {
            return Err(invalid("item.id may not be empty"));
        }
        if items_map.contains_key(&id) {
            return Err(invalid(format!("Duplicate item id: {}", id)));
        }
        if ic.name.trim().is_empty() {
            return Err(invalid(format!("Item '{}' has an empty name", id)));
        }
        if ic.words.is_empty() {
            return Err(invalid(format!("Item '{}' has no noun words", id)));
        }

        items_map.insert(
            id.clone(),
            Item {
                id: id.clone(),
                name: ic.name.trim().to_string(),
                words: uppercase_words(&ic.words),
                adjectives: uppercase_words(&ic.adjectives),
                long_desc: normalize_multiline_desc(&ic.long_desc),
                examine_text: normalize_multiline_desc(&ic.examine),
                takeable: ic.takeable,
                openable: ic.openable,
                open: ic.open,
                locked: ic.locked,
                container: ic.container,
                light_source: ic.light_source,
                do_not_list: ic.do_not_list,
                no_article: ic.no_article,
                init_loc: ic.init_loc.map(|l| l.trim().to_uppercase()),
                extra: ic.extra,
            },
        );
        item_order.push(id);
    }

    // Build location table
    let mut locations_map: HashMap<String, Location> = HashMap::new();
    let mut location_order: Vec<String> = Vec::new();

    for lc in world_file.location {
        let id = lc.id.trim().to_uppercase();
        if id.is_empty() {
            return Err(invalid("location.id may not be empty"));
        }
        if locations_map.contains_key(&id) {
            return Err(invalid(format!("Duplicate location id: {}", id)));
        }

        let mut exits: HashMap<String, ExitSpec> = HashMap::new();
        for (dir, spec) in lc.exits {
            let exit = parse_exit_spec(&spec)
                .map_err(|msg| invalid(format!("location '{}' exit '{}': {}", id, dir, msg)))?;
            exits.insert(dir.trim().to_lowercase(), exit);
        }

        locations_map.insert(
            id.clone(),
            Location {
                id: id.clone(),
                brief_desc: lc.brief.trim().to_string(),
                long_desc: normalize_multiline_desc(&lc.long),
                dark: lc.dark,
                exits,
                extra: lc.extra,
            },
        );
        location_order.push(id);
    }

    let start = world_file.world.start.trim().to_uppercase();
    if !locations_map.contains_key(&start) {
        return Err(invalid(format!(
            "start location '{}' not found among locations",
            start
        )));
    }

    Ok(World {
        id: world_file.world.id,
        name: world_file.world.name,
        desc: normalize_multiline_desc(&world_file.world.desc),
        start,
        locations: locations_map,
        items: items_map,
        actions: actions_map,
        location_order,
        item_order,
        action_order,
        swear_words: uppercase_words(&world_file.world.swear_words),
        swear_response: world_file
            .world
            .swear_response
            .unwrap_or_else(|| "Such language!".to_string()),
    })
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn uppercase_words(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Exit spec notation:
/// - "CAVE"              plain movement
/// - "KITCHEN|WINDOW"    movement gated on the WINDOW item being open
/// - "The cliff is far too steep to climb."   refusal text
fn parse_exit_spec(s: &str) -> Result<ExitSpec, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty exit spec".to_string());
    }

    if s.contains(' ') {
        return Ok(ExitSpec::Refusal(s.to_string()));
    }

    if let Some((to, door)) = s.split_once('|') {
        let to = to.trim();
        let door = door.trim();
        if to.is_empty() || door.is_empty() {
            return Err(format!("invalid door exit '{}'", s));
        }
        return Ok(ExitSpec::Door {
            to: to.to_uppercase(),
            door: door.to_uppercase(),
        });
    }

    Ok(ExitSpec::To(s.to_uppercase()))
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;
    let mut first_text_seen = false;

    for line in raw.lines() {
        // Strip *all* leading/trailing whitespace so indentation in TOML
        // doesn't affect what the player sees.
        let trimmed = line.trim();

        let is_blank = trimmed.is_empty();

        if is_blank {
            pending_blank_lines += 1;
            continue;
        }

        if !first_text_seen {
            result.push_str(trimmed);
            first_text_seen = true;
        } else {
            match pending_blank_lines {
                0 => {
                    // Wrapped line: single newline in TOML -> space in output
                    result.push(' ');
                    result.push_str(trimmed);
                }
                1 => {
                    result.push('\n');
                    result.push_str(trimmed);
                }
                _ => {
                    result.push_str("\n\n");
                    result.push_str(trimmed);
                }
            }
        }

        pending_blank_lines = 0;
    }

    result
}
