use crate::engine::Context;

/// A one-shot callback fired on a turn boundary. It may reschedule itself
/// through the queue in its context.
pub type EventFn = Box<dyn FnOnce(&mut Context)>;

struct ScheduledEvent {
    trigger_turn: u64,
    run: EventFn,
}

/// Delayed events, checked once per *successful* turn. Prompt turns and
/// parse failures do not advance the counter, so they never fire events.
#[derive(Default)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, trigger_turn: u64, run: EventFn) {
        self.events.push(ScheduledEvent { trigger_turn, run });
    }

    /// Remove and return everything due at `turn`, in schedule order. The
    /// caller runs them; removal first keeps the queue borrowable for
    /// rescheduling.
    pub fn take_due(&mut self, turn: u64) -> Vec<EventFn> {
        let mut due: Vec<EventFn> = Vec::new();
        let mut keep: Vec<ScheduledEvent> = Vec::new();
        for event in self.events.drain(..) {
            if event.trigger_turn <= turn {
                due.push(event.run);
            } else {
                keep.push(event);
            }
        }
        self.events = keep;
        due
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
