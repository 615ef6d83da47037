use crate::engine::Context;
use crate::engine::render;
use crate::engine::scope::is_dark;
use crate::world::ExitSpec;

/// Try to move through the exit named `direction` at the current
/// location. Doors must be open; in the dark, only exits to locations
/// already visited can be taken.
pub fn handle_move(ctx: &mut Context<'_>, direction: &str) {
    // Exit tables are keyed by lowercase direction; action ids arrive
    // uppercase.
    let exit = ctx
        .world
        .locations
        .get(&ctx.state.location)
        .and_then(|loc| loc.exits.get(&direction.to_lowercase()));

    match exit {
        Some(ExitSpec::Refusal(text)) => {
            let text = text.clone();
            ctx.out.say(text);
        }
        Some(ExitSpec::Door { to, door }) => {
            let (to, door) = (to.clone(), door.clone());
            if !ctx.state.is_open(ctx.world, &door) {
                let msg = ctx.item_in_string("The @ is closed.", &door);
                ctx.out.say(msg);
            } else {
                enter_room(ctx, &to);
            }
        }
        Some(ExitSpec::To(to)) => {
            let to = to.clone();
            if is_dark(ctx.world, ctx.state) && !ctx.state.touched.contains(&to) {
                ctx.out.say(
                    "It's hard to tell in the dark if it's possible to move in that location.",
                );
            } else {
                enter_room(ctx, &to);
            }
        }
        None => {
            if is_dark(ctx.world, ctx.state) {
                ctx.out.say(
                    "It's hard to tell in the dark if it's possible to move in that location.",
                );
            } else {
                ctx.out.say("You can't go in that direction.");
            }
        }
    }
}

/// Move the player and describe the destination: the full description on
/// a first visit, the brief line plus the item listing after that. An
/// enter handler returning `true` suppresses all of it.
pub fn enter_room(ctx: &mut Context<'_>, new_location: &str) {
    let first_time = !ctx.state.touched.contains(new_location);
    let handlers = ctx.handlers;
    if let Some(handler) = handlers.enter_handler(new_location) {
        if handler(ctx, first_time) {
            return;
        }
    }

    ctx.state.location = new_location.to_string();
    if first_time {
        do_look(ctx);
    } else {
        let brief = ctx.world.locations[new_location].brief_desc.clone();
        ctx.out.say(brief);
        if !is_dark(ctx.world, ctx.state) {
            render::describe_room_items(ctx);
        }
    }
}

/// The LOOK action. Looking in a lit room marks it touched, so later
/// visits get the brief form.
pub fn do_look(ctx: &mut Context<'_>) {
    let here = ctx.state.location.clone();
    let brief = ctx.world.locations[&here].brief_desc.clone();
    ctx.out.say(brief);

    if is_dark(ctx.world, ctx.state) {
        ctx.out.say("It is pitch dark in here.");
        return;
    }

    ctx.state.touched.insert(here.clone());
    let handlers = ctx.handlers;
    if let Some(handler) = handlers.look_handler(&here) {
        handler(ctx);
    } else {
        let long = ctx.world.locations[&here].long_desc.clone();
        if !long.is_empty() {
            ctx.out.say(long);
        }
    }
    render::describe_room_items(ctx);
}
