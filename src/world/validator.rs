use super::model::{ExitSpec, World};

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(msg: impl Into<String>) -> Self {
        ValidationError {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Cross-reference checks over a loaded world. Load-time concern only; the
/// parser assumes a validated world and never re-checks these.
pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if world.locations.is_empty() {
        errors.push(ValidationError::new("world has no locations"));
    }

    if !world.locations.contains_key(&world.start) {
        errors.push(ValidationError::new(format!(
            "start location '{}' not found among locations",
            world.start
        )));
    }

    // Exits must target real locations; doors must be openable items.
    for (loc_id, loc) in &world.locations {
        for (dir, exit) in &loc.exits {
            match exit {
                ExitSpec::To(target) => {
                    if !world.locations.contains_key(target) {
                        errors.push(ValidationError::new(format!(
                            "location '{}' exit '{}' targets missing location '{}'",
                            loc_id, dir, target
                        )));
                    }
                }
                ExitSpec::Door { to, door } => {
                    if !world.locations.contains_key(to) {
                        errors.push(ValidationError::new(format!(
                            "location '{}' exit '{}' targets missing location '{}'",
                            loc_id, dir, to
                        )));
                    }
                    match world.items.get(door) {
                        None => errors.push(ValidationError::new(format!(
                            "location '{}' exit '{}' references missing door item '{}'",
                            loc_id, dir, door
                        ))),
                        Some(item) if !item.openable => {
                            errors.push(ValidationError::new(format!(
                                "location '{}' exit '{}' door item '{}' is not openable",
                                loc_id, dir, door
                            )))
                        }
                        Some(_) => {}
                    }
                }
                ExitSpec::Refusal(_) => {}
            }
        }
    }

    // Item start locations must resolve to exactly one owner, and
    // container chains must bottom out at a location or the player.
    for item in world.items.values() {
        let Some(loc) = &item.init_loc else { continue };

        if loc == "PLAYER" {
            continue;
        }
        if loc == &item.id {
            errors.push(ValidationError::new(format!(
                "item '{}' cannot start inside itself",
                item.id
            )));
            continue;
        }
        let in_location = world.locations.contains_key(loc);
        let in_container = world
            .items
            .get(loc)
            .map(|holder| holder.container)
            .unwrap_or(false);
        if !in_location && !in_container {
            errors.push(ValidationError::new(format!(
                "item '{}' init_loc '{}' is neither a location, PLAYER, nor a container item",
                item.id, loc
            )));
            continue;
        }

        // Mutually nested containers would leave everything inside the
        // loop unreachable from any room.
        if in_container {
            let mut seen: Vec<&str> = vec![item.id.as_str()];
            let mut cursor = loc.as_str();
            loop {
                if seen.contains(&cursor) {
                    errors.push(ValidationError::new(format!(
                        "item '{}' sits in a containment cycle; its init_loc chain never reaches a location",
                        item.id
                    )));
                    break;
                }
                seen.push(cursor);
                match world.items.get(cursor).and_then(|h| h.init_loc.as_deref()) {
                    Some(next) if world.items.contains_key(next) => cursor = next,
                    // PLAYER, a location, or off-stage ends the chain;
                    // dangling ids are flagged on their own item.
                    _ => break,
                }
            }
        }
    }

    // Actions: mimic targets must exist, move actions need a lowercase
    // direction that can appear as an exit key.
    for action in world.actions.values() {
        if let Some(target) = &action.mimic {
            if !world.actions.contains_key(target) {
                errors.push(ValidationError::new(format!(
                    "action '{}' mimics missing action '{}'",
                    action.id, target
                )));
            }
        }
        for word in &action.words {
            if word.trim().is_empty() {
                errors.push(ValidationError::new(format!(
                    "action '{}' has an empty word entry",
                    action.id
                )));
            }
        }
        if !action.no_second_item && action.is_move && !action.prepositions.is_empty() {
            errors.push(ValidationError::new(format!(
                "move action '{}' cannot take a second object",
                action.id
            )));
        }
    }

    errors
}
