/// Parsed-token and turn-state types shared by the parser, resolver, and
/// dispatch router.

/// The verb slot of a parsed command. `user_words` keeps what the player
/// actually typed (verb, plus the preposition if one was used) for prompt
/// reconstruction and AGAIN.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionToken {
    pub key: String,
    pub user_words: Vec<String>,
}

/// What an item slot resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemRef {
    Key(String),
    All,
    Number(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemToken {
    pub target: ItemRef,
    pub user_words: Vec<String>,
}

/// The in-progress parse across turns. Item slots hold `None` while a
/// disambiguation or missing-object prompt is outstanding.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub action: Option<ActionToken>,
    pub items: Vec<Option<ItemToken>>,
}

impl CommandBuffer {
    pub fn clear(&mut self) {
        self.action = None;
        self.items.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.action.is_some() && self.items.iter().all(Option::is_some)
    }

    /// Merge a prompt answer into the first unresolved (or next free)
    /// item slot.
    pub fn fill_pending_slot(&mut self, token: ItemToken) {
        for slot in self.items.iter_mut() {
            if slot.is_none() {
                *slot = Some(token);
                return;
            }
        }
        self.items.push(Some(token));
    }

    /// Collapse into a dispatchable command; None until every slot is
    /// resolved.
    pub fn resolved(&self) -> Option<ResolvedCommand> {
        let action = self.action.clone()?;
        let mut items = Vec::with_capacity(self.items.len());
        for slot in &self.items {
            items.push(slot.clone()?);
        }
        Some(ResolvedCommand { action, items })
    }
}

/// The core's output contract: action key plus zero, one, or two item
/// slots, each carrying the literal words the player used for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCommand {
    pub action: ActionToken,
    pub items: Vec<ItemToken>,
}

impl ResolvedCommand {
    pub fn first(&self) -> Option<&ItemToken> {
        self.items.first()
    }

    pub fn second(&self) -> Option<&ItemToken> {
        self.items.get(1)
    }
}

/// Every pending-prompt state is a named variant; transitions are matched
/// exhaustively instead of being reconstructed from flag combinations.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Pending {
    #[default]
    Idle,
    /// "What do you want to <verb>?"
    AwaitingObject,
    /// "What do you want to <verb> the <item> <prep>?"
    AwaitingSecondObject,
    /// "Which rock do you mean: ...?" Candidate item keys narrow the next
    /// resolution.
    AwaitingDisambiguation(Vec<String>),
    AwaitingQuitConfirm,
    AwaitingRestartConfirm,
}

impl Pending {
    /// States in which the next line is read as an item answer, not a
    /// fresh command.
    pub fn awaiting_item(&self) -> bool {
        matches!(
            self,
            Pending::AwaitingObject
                | Pending::AwaitingSecondObject
                | Pending::AwaitingDisambiguation(_)
        )
    }
}

/// Remembers where an unknown word sat so OOPS can splice a correction
/// into the rest of the command.
#[derive(Debug, Clone)]
pub struct OopsBuffer {
    /// Index the replacement goes to.
    pub index: usize,
    /// The command words with the unknown word removed.
    pub words: Vec<String>,
}

#[derive(Debug, Default)]
pub struct TurnState {
    /// Advances only on successfully parsed commands; prompts and parse
    /// failures do not count as turns.
    pub counter: u64,
    pub pending: Pending,
    pub command: CommandBuffer,
    /// Last successfully completed command, for AGAIN and IT.
    pub last_command: Option<ResolvedCommand>,
    pub this_input: Option<String>,
    pub last_input: Option<String>,
    pub parse_successful: bool,
    pub oops: Option<OopsBuffer>,
    pub quit_confirmed: bool,
    pub restart_confirmed: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a fresh command. Called when a new action verb matches,
    /// which also cancels any outstanding prompt.
    pub fn clear_pending(&mut self) {
        self.pending = Pending::Idle;
        self.command.clear();
        self.oops = None;
    }

    /// End-of-turn bookkeeping: only a successful parse advances the
    /// counter and becomes the AGAIN/IT referent.
    pub fn finish_turn(&mut self) {
        if !self.parse_successful {
            return;
        }
        self.counter += 1;
        if let Some(cmd) = self.command.resolved() {
            self.last_command = Some(cmd);
        }
        self.last_input = self.this_input.take();
        self.oops = None;
        self.pending = match std::mem::take(&mut self.pending) {
            p if p.awaiting_item() => Pending::Idle,
            other => other,
        };
    }
}
