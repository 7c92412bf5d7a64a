/// Lifecycle of one submit-and-reply exchange.
///
/// This enum is the actual guard on submissions: `begin` refuses while a
/// turn is in flight, and `settle` only fires for the turn id that
/// started it, so a late outcome from an earlier turn can never mutate
/// state. UI affordances (dimmed input, typing indicator) are derived
/// from this state, never the other way around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Sending {
        turn_id: u64,
    },
}

impl TurnState {
    pub fn is_idle(self) -> bool {
        self == TurnState::Idle
    }

    pub fn is_sending(self) -> bool {
        matches!(self, TurnState::Sending { .. })
    }

    /// Idle → Sending. Returns false (and changes nothing) if a turn is
    /// already in flight.
    pub fn begin(&mut self, turn_id: u64) -> bool {
        match self {
            TurnState::Idle => {
                *self = TurnState::Sending { turn_id };
                true
            }
            TurnState::Sending { .. } => false,
        }
    }

    /// Sending → Idle, but only for the matching turn id. Returns false
    /// for stale or duplicate outcomes.
    pub fn settle(&mut self, turn_id: u64) -> bool {
        match self {
            TurnState::Sending { turn_id: current } if *current == turn_id => {
                *self = TurnState::Idle;
                true
            }
            _ => false,
        }
    }
}
