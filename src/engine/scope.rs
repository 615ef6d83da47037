use std::collections::{HashMap, HashSet};

use crate::engine::command::{ItemRef, ItemToken};
use crate::world::World;

/// Live, mutable world state. Static tables stay in `World`; everything a
/// handler can change is here, and execution is strictly sequential so no
/// locking is involved.
pub struct WorldState {
    pub hp: i32,
    pub location: String,
    /// Ordered: listing and ALL iteration follow acquisition order.
    pub inventory: Vec<String>,
    pub location_items: HashMap<String, Vec<String>>,
    /// Container item id -> contained item ids, ordered.
    pub contents: HashMap<String, Vec<String>>,
    pub open: HashSet<String>,
    pub locked: HashSet<String>,
    /// Items currently giving light. Handlers toggle membership to switch
    /// lamps on and off.
    pub lit: HashSet<String>,
    /// Locations whose full description has been shown.
    pub touched: HashSet<String>,
    /// Game-specific scratch flags for handlers.
    pub flags: HashSet<String>,
}

/// Where an item can be placed.
#[derive(Debug, Clone, PartialEq)]
pub enum Holder {
    Location(String),
    Player,
    Item(String),
}

impl WorldState {
    pub fn new(world: &World) -> Self {
        let mut state = WorldState {
            hp: 100,
            location: world.start.clone(),
            inventory: Vec::new(),
            location_items: world
                .locations
                .keys()
                .map(|id| (id.clone(), Vec::new()))
                .collect(),
            contents: world
                .items
                .values()
                .filter(|i| i.container)
                .map(|i| (i.id.clone(), Vec::new()))
                .collect(),
            open: HashSet::new(),
            locked: HashSet::new(),
            lit: HashSet::new(),
            touched: HashSet::new(),
            flags: HashSet::new(),
        };

        for key in &world.item_order {
            let item = &world.items[key];
            if item.open {
                state.open.insert(key.clone());
            }
            if item.locked {
                state.locked.insert(key.clone());
            }
            if item.light_source {
                state.lit.insert(key.clone());
            }
            match item.init_loc.as_deref() {
                Some("PLAYER") => state.inventory.push(key.clone()),
                Some(loc) => state.place(key, resolve_holder(world, loc)),
                None => {}
            }
        }

        state
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Open for interaction purposes: non-openable containers never
    /// block access to their contents.
    pub fn is_open(&self, world: &World, item_id: &str) -> bool {
        match world.items.get(item_id) {
            Some(item) if item.openable => self.open.contains(item_id),
            Some(_) => true,
            None => false,
        }
    }

    pub fn carrying(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|id| id == item_id)
    }

    /// Remove an item from wherever it currently is. Safe on off-stage
    /// items.
    pub fn remove_item(&mut self, item_id: &str) {
        self.inventory.retain(|id| id != item_id);
        for items in self.location_items.values_mut() {
            items.retain(|id| id != item_id);
        }
        for items in self.contents.values_mut() {
            items.retain(|id| id != item_id);
        }
    }

    pub fn place(&mut self, item_id: &str, holder: Holder) {
        match holder {
            Holder::Player => self.inventory.push(item_id.to_string()),
            Holder::Location(loc) => {
                self.location_items
                    .entry(loc)
                    .or_default()
                    .push(item_id.to_string());
            }
            Holder::Item(container) => {
                self.contents
                    .entry(container)
                    .or_default()
                    .push(item_id.to_string());
            }
        }
    }

    /// The single-owner move primitive handlers use.
    pub fn move_item(&mut self, item_id: &str, holder: Holder) {
        self.remove_item(item_id);
        self.place(item_id, holder);
    }

    pub fn items_at(&self, location_id: &str) -> &[String] {
        self.location_items
            .get(location_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contents_of(&self, container_id: &str) -> &[String] {
        self.contents
            .get(container_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn resolve_holder(world: &World, loc: &str) -> Holder {
    if world.locations.contains_key(loc) {
        Holder::Location(loc.to_string())
    } else {
        // Validated at load time to be a container item.
        Holder::Item(loc.to_string())
    }
}

/// Is `item_id` in this list, descending into containers? Nested finds
/// only count when the container is open (unless `must_be_open` is off,
/// e.g. for "already carrying" checks on closed bags).
pub fn list_contains_item(
    world: &World,
    state: &WorldState,
    item_id: &str,
    list: &[String],
    must_be_open: bool,
) -> bool {
    if list.iter().any(|id| id == item_id) {
        return true;
    }
    for holder in list {
        if must_be_open && !state.is_open(world, holder) {
            continue;
        }
        if list_contains_item(world, state, item_id, state.contents_of(holder), must_be_open) {
            return true;
        }
    }
    false
}

/// Is the current location dark with no active light source in reach?
pub fn is_dark(world: &World, state: &WorldState) -> bool {
    let Some(location) = world.locations.get(&state.location) else {
        return false;
    };
    if !location.dark {
        return false;
    }
    !items_present(world, state).iter().any(|id| state.lit.contains(id))
}

/// Item keys reachable by reference right now: inventory, the current
/// location, and the contents of any open container among them.
pub fn items_present(world: &World, state: &WorldState) -> Vec<String> {
    let mut present: Vec<String> = Vec::new();
    present.extend(state.inventory.iter().cloned());
    present.extend(state.items_at(&state.location).iter().cloned());

    let mut i = 0;
    while i < present.len() {
        let id = present[i].clone();
        if state.is_open(world, &id) {
            present.extend(state.contents_of(&id).iter().cloned());
        }
        i += 1;
    }
    present
}

/// Visibility check applied to a resolved slot before dispatch. ALL and
/// numbers are always "here"; a concrete item must be held or present in
/// a lit location.
pub fn item_is_here(world: &World, state: &WorldState, token: &ItemToken) -> bool {
    let id = match &token.target {
        ItemRef::All | ItemRef::Number(_) => return true,
        ItemRef::Key(id) => id,
    };
    if list_contains_item(world, state, id, &state.inventory, true) {
        return true;
    }
    if is_dark(world, state) {
        return false;
    }
    list_contains_item(world, state, id, state.items_at(&state.location), true)
}
