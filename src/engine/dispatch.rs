use std::collections::HashMap;

use crate::engine::Context;
use crate::engine::command::{ItemRef, ItemToken, ResolvedCommand};
use crate::engine::movement;
use crate::engine::scope::item_is_here;
use crate::world::ActionDef;

/// Claims a command at the current location; runs before anything else
/// and can veto default movement and LOOK.
pub type WhenHereHandler = Box<dyn Fn(&mut Context<'_>, &ResolvedCommand) -> bool>;
/// Runs on entering a location; `true` suppresses the default entry text.
pub type EnterHandler = Box<dyn Fn(&mut Context<'_>, bool) -> bool>;
/// Replaces the long description on LOOK.
pub type LookHandler = Box<dyn Fn(&mut Context<'_>)>;
/// Claims a command naming this item. Receives the action key, the other
/// item slot if any, and whether this item was the secondary one.
pub type ItemHandler = Box<dyn Fn(&mut Context<'_>, &str, Option<&ItemToken>, bool) -> bool>;
/// The action's own generic behavior.
pub type ActionHandler = Box<dyn Fn(&mut Context<'_>, &ResolvedCommand)>;

/// Per-key handler registrations. Built-in verbs are ordinary action
/// handlers here, so a game can override any of them.
#[derive(Default)]
pub struct HandlerRegistry {
    when_here: HashMap<String, WhenHereHandler>,
    enter: HashMap<String, EnterHandler>,
    look: HashMap<String, LookHandler>,
    item: HashMap<String, ItemHandler>,
    action: HashMap<String, ActionHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock verb handlers (GET, DROP, PUT,
    /// OPEN, CLOSE, EXAMINE, INVENTORY, HELP, ACTIONS, WAIT, QUIT,
    /// RESTART, YES, NO).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::engine::items::register_defaults(&mut registry);
        registry
    }

    pub fn on_when_here(
        &mut self,
        location_id: &str,
        handler: impl Fn(&mut Context<'_>, &ResolvedCommand) -> bool + 'static,
    ) {
        self.when_here
            .insert(location_id.to_uppercase(), Box::new(handler));
    }

    pub fn on_enter(
        &mut self,
        location_id: &str,
        handler: impl Fn(&mut Context<'_>, bool) -> bool + 'static,
    ) {
        self.enter
            .insert(location_id.to_uppercase(), Box::new(handler));
    }

    pub fn on_look(&mut self, location_id: &str, handler: impl Fn(&mut Context<'_>) + 'static) {
        self.look
            .insert(location_id.to_uppercase(), Box::new(handler));
    }

    pub fn on_item(
        &mut self,
        item_id: &str,
        handler: impl Fn(&mut Context<'_>, &str, Option<&ItemToken>, bool) -> bool + 'static,
    ) {
        self.item.insert(item_id.to_uppercase(), Box::new(handler));
    }

    pub fn on_action(
        &mut self,
        action_id: &str,
        handler: impl Fn(&mut Context<'_>, &ResolvedCommand) + 'static,
    ) {
        self.action
            .insert(action_id.to_uppercase(), Box::new(handler));
    }

    pub fn enter_handler(&self, location_id: &str) -> Option<&EnterHandler> {
        self.enter.get(location_id)
    }

    pub fn look_handler(&self, location_id: &str) -> Option<&LookHandler> {
        self.look.get(location_id)
    }
}

/// Route a fully resolved command through the precedence chain: location
/// when-here handler, primary item handler, secondary item handler,
/// action handler, built-in movement/LOOK fallbacks, default text.
pub fn dispatch(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    // Reaching dispatch means the command parsed; this turn counts even
    // if a visibility check below aborts it.
    ctx.turn.parse_successful = true;

    let handlers = ctx.handlers;
    let Some(typed) = ctx.world.actions.get(&cmd.action.key) else {
        ctx.out.say("I don't understand that command.");
        return;
    };
    // A mimic entry borrows another action's handlers; its own grammar
    // flags still gate the command.
    let action = typed
        .mimic
        .as_ref()
        .and_then(|key| ctx.world.actions.get(key))
        .unwrap_or(typed);

    if !cmd.items.is_empty() && !typed.requires_object {
        ctx.out.say("I don't understand that command.");
        return;
    }

    // Referenced items must be in reach; ALL must be supported.
    for (slot, token) in cmd.items.iter().enumerate() {
        match &token.target {
            ItemRef::Key(_) => {
                if !item_is_here(ctx.world, ctx.state, token) {
                    ctx.out.say(format!(
                        "You can't see any {} here!",
                        token.user_words.join(" ").to_lowercase()
                    ));
                    return;
                }
            }
            ItemRef::All => {
                if slot > 0 || !typed.supports_all {
                    print_action_default(ctx, action);
                    return;
                }
            }
            ItemRef::Number(_) => {}
        }
    }

    if let Some(handler) = handlers.when_here.get(&ctx.state.location) {
        if handler(ctx, cmd) {
            return;
        }
    }

    if cmd.items.is_empty() {
        if let Some(handler) = handlers.action.get(&action.id) {
            handler(ctx, cmd);
        } else if action.is_move {
            movement::handle_move(ctx, &action.id);
        } else if action.id == "LOOK" {
            movement::do_look(ctx);
        } else {
            print_action_default(ctx, action);
        }
        return;
    }

    if let Some(ItemRef::Key(id)) = cmd.first().map(|t| &t.target) {
        if let Some(handler) = handlers.item.get(id) {
            if handler(ctx, &action.id, cmd.second(), false) {
                return;
            }
        }
    }

    if let Some(ItemRef::Key(id)) = cmd.second().map(|t| &t.target) {
        if let Some(handler) = handlers.item.get(id) {
            if handler(ctx, &action.id, cmd.first(), true) {
                return;
            }
        }
    }

    if let Some(handler) = handlers.action.get(&action.id) {
        handler(ctx, cmd);
        return;
    }

    print_action_default(ctx, action);
}

/// The action was understood but nothing claimed it.
pub fn print_action_default(ctx: &mut Context<'_>, action: &ActionDef) {
    match &action.default_result {
        Some(text) => ctx.out.say(text.clone()),
        None => ctx.out.say("You can't do that."),
    }
}
