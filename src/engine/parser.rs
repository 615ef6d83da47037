use crate::engine::Context;
use crate::engine::command::{ActionToken, ItemRef, Pending};
use crate::engine::dispatch;
use crate::engine::resolver::{Resolution, resolve_item};
use crate::engine::tokenizer::{first_unknown, splice_oops, tokenize};

/// Parse and execute one line of player input. Sets
/// `turn.parse_successful` only when the line reaches dispatch; prompts,
/// typos, and confirmations do not count as turns.
pub fn parse_line(ctx: &mut Context<'_>, input: &str) {
    ctx.turn.this_input = Some(input.to_string());
    ctx.turn.parse_successful = false;

    let mut words = tokenize(input);

    for word in &words {
        if ctx.world.swear_words.contains(word) {
            let response = ctx.world.swear_response.clone();
            ctx.out.say(response);
            return;
        }
    }

    if words.is_empty() {
        ctx.out.say("Eh?");
        return;
    }

    // Digits are only vocabulary while a prompt is outstanding (a dial
    // asked for a number, say); in a fresh command they are typos.
    let allow_number = ctx.turn.pending.awaiting_item();
    if let Some((index, oops)) = first_unknown(ctx.vocab, &words, allow_number) {
        ctx.out
            .say(format!("I don't understand the word \"{}\".", words[index]));
        ctx.turn.oops = Some(oops);
        return;
    }

    if words[0] == "OOPS" {
        match (&ctx.turn.oops, words.len() > 1) {
            (Some(oops), true) => {
                words = splice_oops(oops, &words[1..]);
            }
            _ => {
                ctx.out.say(
                    "You can use 'OOPS' to correct typing mistakes. Just type 'OOPS' and then \
                     the word you meant to type.",
                );
                return;
            }
        }
    }

    if ctx.turn.pending == Pending::AwaitingQuitConfirm && words.len() == 1 {
        match words[0].as_str() {
            "Y" | "YES" => {
                ctx.out.say("Quitting...");
                ctx.turn.quit_confirmed = true;
                return;
            }
            "N" | "NO" => {
                ctx.out.say("Okay, Quit cancelled.");
                ctx.turn.pending = Pending::Idle;
                return;
            }
            _ => {}
        }
    }

    if ctx.turn.pending == Pending::AwaitingRestartConfirm && words.len() == 1 {
        match words[0].as_str() {
            "Y" | "YES" => {
                ctx.out.say("Restarting...");
                ctx.turn.restart_confirmed = true;
                return;
            }
            "N" | "NO" => {
                // Declining a death restart is declining to play on.
                if ctx.state.is_alive() {
                    ctx.out.say("Okay, Restart cancelled.");
                    ctx.turn.pending = Pending::Idle;
                } else {
                    ctx.out.say("Quitting...");
                    ctx.turn.quit_confirmed = true;
                }
                return;
            }
            _ => {}
        }
    }

    if !ctx.state.is_alive() {
        ctx.out
            .say("You can't do that on account of the fact that you're dead.");
        ctx.kill(None);
        return;
    }

    // "GO NORTH" is just "NORTH".
    if words[0] == "GO" {
        if words.len() == 1 {
            ctx.out.say("Where would you like to go?");
            return;
        }
        words.remove(0);
    }

    // One preposition at most. A word that is both a verb and a
    // preposition counts as the verb in first position ("IN" alone vs
    // "PUT COIN IN SLOT").
    let mut prep_index: Option<usize> = None;
    let mut preps_found = 0;
    for (i, word) in words.iter().enumerate() {
        if ctx.vocab.is_preposition(word) {
            if i == 0 && ctx.vocab.is_action_word(word) {
                continue;
            }
            prep_index = Some(i);
            preps_found += 1;
        }
    }
    if preps_found > 1 {
        ctx.out
            .say("There were too many prepositions in that command.");
        return;
    }

    let action_matches = ctx.vocab.actions_for(&words[0]);

    if !action_matches.is_empty() {
        // The same verb word can belong to several actions; the typed
        // preposition picks between them ("TURN ON" vs "TURN OFF").
        let mut final_matches: Vec<&String> = Vec::new();
        for key in action_matches {
            let candidate = &ctx.world.actions[key];
            match prep_index {
                Some(pi) => {
                    if !candidate.prepositions.contains(&words[pi]) {
                        continue;
                    }
                }
                None => {
                    if !candidate.prepositions.is_empty() {
                        continue;
                    }
                }
            }
            final_matches.push(key);
        }

        let action_key: String = match final_matches.first() {
            Some(key) => (*key).clone(),
            None if prep_index.is_some() => {
                // Verb matched, but not with that preposition.
                ctx.out.say("I don't understand that command.");
                return;
            }
            // No preposition typed where one was expected; assume the
            // elided default and prompt for the rest.
            None => action_matches[0].clone(),
        };

        let action = &ctx.world.actions[&action_key];
        let mut user_words = vec![words[0].clone()];
        if let Some(pi) = prep_index {
            user_words.push(words[pi].clone());
        }

        // A new verb cancels any outstanding prompt or correction. The
        // buffer keeps the typed action key; dispatch resolves mimics,
        // so prompting below follows the typed entry's grammar.
        ctx.turn.clear_pending();
        ctx.turn.command.action = Some(ActionToken {
            key: action_key.clone(),
            user_words,
        });

        let mut spans: Vec<Vec<String>> = Vec::new();
        match prep_index {
            Some(pi) if action.no_second_item => {
                // "TURN ON FLASHLIGHT": one object, preposition glued to
                // the verb.
                let span: Vec<String> = words
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != 0 && *i != pi)
                    .map(|(_, w)| w.clone())
                    .collect();
                if !span.is_empty() {
                    spans.push(span);
                }
            }
            Some(pi) => {
                // "PUT COIN IN SLOT": objects on both sides of the
                // preposition.
                if pi < 2 || pi == words.len() - 1 {
                    ctx.out.say("I don't understand that command.");
                    return;
                }
                spans.push(words[1..pi].to_vec());
                spans.push(words[pi + 1..].to_vec());
            }
            None => {
                if words.len() > 1 {
                    spans.push(words[1..].to_vec());
                }
            }
        }

        for span in spans {
            match resolve_item(ctx.world, ctx.state, ctx.turn, &span) {
                Resolution::Found(token) => ctx.turn.command.items.push(Some(token)),
                Resolution::Ambiguous {
                    question,
                    candidates,
                } => {
                    ctx.out.say(question);
                    ctx.turn.pending = Pending::AwaitingDisambiguation(candidates);
                    ctx.turn.command.items.push(None);
                    return;
                }
                Resolution::Unresolved(message) => {
                    ctx.out.say(message);
                    return;
                }
            }
        }
    } else if ctx.turn.pending.awaiting_item() {
        // Not a verb, but we asked for an item (disambiguation, missing
        // object, or a number) and this line answers it.
        match resolve_item(ctx.world, ctx.state, ctx.turn, &words) {
            Resolution::Found(token) => {
                ctx.turn.pending = Pending::Idle;
                ctx.turn.command.fill_pending_slot(token);
            }
            Resolution::Ambiguous {
                question,
                candidates,
            } => {
                ctx.out.say(question);
                ctx.turn.pending = Pending::AwaitingDisambiguation(candidates);
                return;
            }
            Resolution::Unresolved(message) => {
                ctx.out.say(message);
                return;
            }
        }
    } else {
        ctx.out.say("I don't understand that command.");
        return;
    }

    finish_or_prompt(ctx);
}

/// The buffer now holds a verb and zero or more resolved items. Either
/// prompt for what is still missing or hand the command to dispatch.
fn finish_or_prompt(ctx: &mut Context<'_>) {
    let Some(action_token) = ctx.turn.command.action.clone() else {
        return;
    };
    let Some(action) = ctx.world.actions.get(&action_token.key) else {
        ctx.out.say("I don't understand that command.");
        return;
    };
    let slots = ctx.turn.command.items.len();

    if action.requires_object && slots == 0 {
        let mut prompt = format!(
            "What do you want to {}",
            action_token.user_words[0].to_lowercase()
        );
        if action.no_second_item {
            if let Some(prep) = action_token.user_words.get(1) {
                prompt.push(' ');
                prompt.push_str(&prep.to_lowercase());
            } else if let Some(prep) = action.prepositions.first() {
                prompt.push(' ');
                prompt.push_str(&prep.to_lowercase());
            }
        }
        ctx.out.say(format!("{}?", prompt));
        ctx.turn.pending = Pending::AwaitingObject;
        return;
    }

    if !action.prepositions.is_empty() && !action.no_second_item && slots < 2 {
        let Some(Some(first)) = ctx.turn.command.items.first().cloned() else {
            return;
        };
        let mut prompt = format!(
            "What do you want to {}",
            action_token.user_words[0].to_lowercase()
        );
        let no_article = match &first.target {
            ItemRef::Key(id) => ctx.world.items[id].no_article,
            _ => false,
        };
        if !no_article {
            prompt.push_str(" the");
        }
        prompt.push(' ');
        prompt.push_str(&first.user_words.join(" ").to_lowercase());
        prompt.push(' ');
        match action_token.user_words.get(1) {
            Some(prep) => prompt.push_str(&prep.to_lowercase()),
            None => prompt.push_str(&action.prepositions[0].to_lowercase()),
        }
        ctx.out.say(format!("{}?", prompt));
        ctx.turn.pending = Pending::AwaitingSecondObject;
        return;
    }

    if action_token.key == "AGAIN" && slots == 0 {
        let Some(last) = ctx.turn.last_command.clone() else {
            ctx.out.say("You can't type 'AGAIN' before doing something.");
            return;
        };
        // Replay: the repeated command becomes this turn's buffer, so a
        // further AGAIN repeats it too.
        ctx.turn.command.action = Some(last.action.clone());
        ctx.turn.command.items = last.items.iter().cloned().map(Some).collect();
        dispatch::dispatch(ctx, &last);
        return;
    }

    let Some(cmd) = ctx.turn.command.resolved() else {
        return;
    };
    dispatch::dispatch(ctx, &cmd);
}
