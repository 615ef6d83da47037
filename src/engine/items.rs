use crate::engine::Context;
use crate::engine::command::{ItemRef, ResolvedCommand};
use crate::engine::dispatch::HandlerRegistry;
use crate::engine::render;
use crate::engine::scope::{Holder, list_contains_item};

/// Stock verb handlers. They are registered as ordinary action handlers
/// so a game can replace any of them, and item or location handlers can
/// still intercept first.
pub fn register_defaults(registry: &mut HandlerRegistry) {
    registry.on_action("GET", do_get);
    registry.on_action("DROP", do_drop);
    registry.on_action("PUT", do_put);
    registry.on_action("OPEN", do_open);
    registry.on_action("CLOSE", do_close);
    registry.on_action("EXAMINE", do_examine);
    registry.on_action("INVENTORY", do_inventory);
    registry.on_action("HELP", do_help);
    registry.on_action("ACTIONS", do_actions);
    registry.on_action("WAIT", do_wait);
    registry.on_action("QUIT", do_quit);
    registry.on_action("RESTART", do_restart);
    registry.on_action("YES", do_yes);
    registry.on_action("NO", do_no);
}

pub fn do_get(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let Some(token) = cmd.first() else {
        ctx.out.say("You can't do that.");
        return;
    };

    match &token.target {
        ItemRef::All => get_all(ctx),
        ItemRef::Number(_) => ctx.out.say("You can't pick that up!"),
        ItemRef::Key(id) => {
            let id = id.clone();
            if ctx.state.carrying(&id) {
                let msg = ctx.item_in_string("You're already carrying @.", &id);
                ctx.out.say(msg);
            } else if !ctx.world.items[&id].takeable {
                ctx.out.say("You can't pick that up!");
            } else {
                ctx.state.move_item(&id, Holder::Player);
                ctx.out.say("Taken.");
            }
        }
    }
}

fn get_all(ctx: &mut Context<'_>) {
    let get_list: Vec<String> = ctx
        .state
        .items_at(&ctx.state.location)
        .iter()
        .filter(|id| ctx.world.items[id.as_str()].takeable)
        .cloned()
        .collect();

    if get_list.is_empty() {
        ctx.out.say("There is nothing here to take!");
        return;
    }

    for id in get_list {
        let name = capitalize(&ctx.world.items[&id].name);
        ctx.state.move_item(&id, Holder::Player);
        ctx.out.say(format!("{}: Taken.", name));
    }
}

pub fn do_drop(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let Some(token) = cmd.first() else {
        ctx.out.say("You can't do that.");
        return;
    };

    match &token.target {
        ItemRef::All => drop_all(ctx),
        ItemRef::Number(_) => ctx.out.say("You're not carrying that."),
        ItemRef::Key(id) => {
            let id = id.clone();
            if !ctx.state.carrying(&id) {
                let msg = ctx.item_in_string("You're not carrying @.", &id);
                ctx.out.say(msg);
            } else {
                let here = ctx.state.location.clone();
                ctx.state.move_item(&id, Holder::Location(here));
                ctx.out.say("Dropped.");
            }
        }
    }
}

fn drop_all(ctx: &mut Context<'_>) {
    let drop_list = ctx.state.inventory.clone();
    if drop_list.is_empty() {
        ctx.out.say("You aren't carrying anything!");
        return;
    }

    let here = ctx.state.location.clone();
    for id in drop_list {
        let name = capitalize(&ctx.world.items[&id].name);
        ctx.state.move_item(&id, Holder::Location(here.clone()));
        ctx.out.say(format!("{}: Dropped.", name));
    }
}

pub fn do_put(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let (Some(token), Some(dest)) = (cmd.first(), cmd.second()) else {
        ctx.out.say("You can't do that.");
        return;
    };

    let ItemRef::Key(container_id) = &dest.target else {
        ctx.out.say("You can't do that.");
        return;
    };
    let container_id = container_id.clone();

    if !ctx.world.items[&container_id].container {
        let msg = ctx.item_in_string("You can't put anything in @.", &container_id);
        ctx.out.say(msg);
        return;
    }

    match &token.target {
        ItemRef::All => put_all_in(ctx, &container_id),
        ItemRef::Number(_) => ctx.out.say("You can't do that."),
        ItemRef::Key(item_id) => {
            let item_id = item_id.clone();
            if item_id == container_id {
                let msg = ctx.item_in_string("You can't put @ inside itself!", &item_id);
                ctx.out.say(msg);
                return;
            }
            if !ctx.state.carrying(&item_id) {
                let msg = ctx.item_in_string("You're not carrying @.", &item_id);
                ctx.out.say(msg);
                return;
            }
            if !ctx.state.is_open(ctx.world, &container_id) {
                let msg = ctx.item_in_string("The @ is closed.", &container_id);
                ctx.out.say(msg);
                return;
            }
            // A container can't end up inside its own contents.
            if list_contains_item(
                ctx.world,
                ctx.state,
                &container_id,
                ctx.state.contents_of(&item_id),
                false,
            ) {
                let msg = ctx.item_in_string("You can't put @ inside itself!", &container_id);
                ctx.out.say(msg);
                return;
            }
            ctx.state.move_item(&item_id, Holder::Item(container_id));
            ctx.out.say("Done.");
        }
    }
}

fn put_all_in(ctx: &mut Context<'_>, container_id: &str) {
    if !ctx.state.is_open(ctx.world, container_id) {
        let msg = ctx.item_in_string("The @ is closed.", container_id);
        ctx.out.say(msg);
        return;
    }

    let put_list: Vec<String> = ctx
        .state
        .inventory
        .iter()
        .filter(|id| {
            id.as_str() != container_id
                && !list_contains_item(
                    ctx.world,
                    ctx.state,
                    container_id,
                    ctx.state.contents_of(id),
                    false,
                )
        })
        .cloned()
        .collect();

    if put_list.is_empty() {
        let mut msg = "You aren't carrying anything".to_string();
        if !ctx.state.inventory.is_empty() {
            msg.push_str(&format!(
                " that you can place in the {}",
                ctx.world.items[container_id].name
            ));
        }
        msg.push('!');
        ctx.out.say(msg);
        return;
    }

    for id in put_list {
        let name = capitalize(&ctx.world.items[&id].name);
        ctx.state
            .move_item(&id, Holder::Item(container_id.to_string()));
        ctx.out.say(format!("{}: Done.", name));
    }
}

pub fn do_open(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let Some(ItemRef::Key(id)) = cmd.first().map(|t| &t.target) else {
        ctx.out.say("You can't do that.");
        return;
    };
    let id = id.clone();
    let item = &ctx.world.items[&id];

    if !item.openable {
        let msg = ctx.item_in_string("You can't open @.", &id);
        ctx.out.say(msg);
        return;
    }
    if ctx.state.locked.contains(&id) {
        let msg = ctx.item_in_string("The @ is locked.", &id);
        ctx.out.say(msg);
        return;
    }
    if ctx.state.open.contains(&id) {
        let msg = ctx.item_in_string("The @ is already open.", &id);
        ctx.out.say(msg);
        return;
    }

    ctx.state.open.insert(id.clone());
    ctx.out.say("Opened.");

    if item.container && !ctx.state.contents_of(&id).is_empty() {
        let msg = ctx.item_in_string("The @ contains:", &id);
        ctx.out.say(msg);
        let contents = ctx.state.contents_of(&id).to_vec();
        render::list_items(ctx, &contents, "@", "a", 2, false);
    }
}

pub fn do_close(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let Some(ItemRef::Key(id)) = cmd.first().map(|t| &t.target) else {
        ctx.out.say("You can't do that.");
        return;
    };
    let id = id.clone();

    if !ctx.world.items[&id].openable {
        let msg = ctx.item_in_string("You can't close @.", &id);
        ctx.out.say(msg);
        return;
    }
    if !ctx.state.open.contains(&id) {
        let msg = ctx.item_in_string("The @ is already closed.", &id);
        ctx.out.say(msg);
        return;
    }

    ctx.state.open.remove(&id);
    ctx.out.say("Closed.");
}

pub fn do_examine(ctx: &mut Context<'_>, cmd: &ResolvedCommand) {
    let Some(ItemRef::Key(id)) = cmd.first().map(|t| &t.target) else {
        ctx.out.say("You see nothing special.");
        return;
    };
    let id = id.clone();
    let item = &ctx.world.items[&id];

    if item.examine_text.trim().is_empty() {
        let msg = ctx.item_in_string("You see nothing special about @.", &id);
        ctx.out.say(msg);
    } else {
        ctx.out.say(item.examine_text.clone());
    }

    if item.container && ctx.state.is_open(ctx.world, &id) {
        if ctx.state.contents_of(&id).is_empty() {
            let msg = ctx.item_in_string("The @ is empty.", &id);
            ctx.out.say(msg);
        } else {
            let msg = ctx.item_in_string("The @ contains:", &id);
            ctx.out.say(msg);
            let contents = ctx.state.contents_of(&id).to_vec();
            render::list_items(ctx, &contents, "@", "a", 2, false);
        }
    }
}

pub fn do_inventory(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("You are carrying:");
    if ctx.state.inventory.is_empty() {
        ctx.out.say("  Nothing");
        return;
    }
    let carried = ctx.state.inventory.clone();
    render::list_items(ctx, &carried, "@", "a", 2, false);
}

pub fn do_help(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("This is a text adventure game.");
    ctx.out.say(
        "Enter commands like 'GO NORTH' or 'TAKE ROCK' to tell the computer what you would \
         like to do.",
    );
    ctx.out.say("Most commands are either one or two words.");
    ctx.out
        .say("For a full list of commands, type 'ACTIONS'.");
}

pub fn do_actions(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("Available actions:");
    let mut keys: Vec<&String> = ctx.world.actions.keys().collect();
    keys.sort();
    for key in keys {
        let action = &ctx.world.actions[key];
        if action.suppress_in_listing {
            continue;
        }
        ctx.out.say(format!("  {}", action.words.join(" / ")));
    }
}

pub fn do_wait(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("Time passes...");
}

pub fn do_quit(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("Are you sure you want to quit (Y/N)?");
    ctx.turn.pending = crate::engine::command::Pending::AwaitingQuitConfirm;
}

pub fn do_restart(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("Are you sure you want to restart (Y/N)?");
    ctx.turn.pending = crate::engine::command::Pending::AwaitingRestartConfirm;
}

pub fn do_yes(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("You sound really positive!");
}

pub fn do_no(ctx: &mut Context<'_>, _cmd: &ResolvedCommand) {
    ctx.out.say("You sound awfully negative!");
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
