//! Turn order for the units taking part in a tactical encounter.
//!
//! The sequencer only tracks whose turn it is and which phase the turn is in.
//! It returns the events each transition produces instead of calling
//! listeners, so callers decide what to do with them.

use crate::types::UnitId;
use serde::{Deserialize, Serialize};

/// A unit in the turn order with its movement budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub unit: UnitId,
    /// Range passed to movement queries on this unit's turn.
    pub movement_range: u32,
}

impl Participant {
    pub fn new(unit: UnitId, movement_range: u32) -> Self {
        Self {
            unit,
            movement_range,
        }
    }
}

/// Phase of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TurnPhase {
    /// Turn order set, turn not started yet.
    #[default]
    PreTurn,
    /// The current participant is acting.
    Turn,
    /// The current participant has finished.
    PostTurn,
}

/// What happened during a turn transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEventKind {
    PreTurn,
    Started,
    Ended,
}

/// A turn transition, tagged with the turn it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub kind: TurnEventKind,
    /// Index into the turn order.
    pub turn_index: usize,
    /// Round number, starting at 1.
    pub round: u32,
}

/// Cycles through participants, one turn each per round.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TurnSequencer {
    participants: Vec<Participant>,
    current_index: usize,
    round: u32,
    phase: TurnPhase,
}

impl TurnSequencer {
    pub fn new(participants: Vec<Participant>) -> Self {
        let mut sequencer = Self::default();
        sequencer.initialize_turn_order(participants);
        sequencer
    }

    /// Replace the turn order and reset to the first participant of round 1.
    pub fn initialize_turn_order(&mut self, participants: Vec<Participant>) {
        tracing::debug!(count = participants.len(), "initialized turn order");
        self.participants = participants;
        self.current_index = 0;
        self.round = 1;
        self.phase = TurnPhase::PreTurn;
    }

    /// Participants in turn order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Whose turn it is. `None` when the order is empty.
    pub fn current(&self) -> Option<&Participant> {
        self.participants.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Begin the current participant's turn.
    ///
    /// Emits `PreTurn` then `Started` and leaves the phase at
    /// [`TurnPhase::Turn`]. Does nothing for an empty order.
    pub fn start_turn(&mut self) -> Vec<TurnEvent> {
        if self.participants.is_empty() {
            return Vec::new();
        }

        self.phase = TurnPhase::PreTurn;
        let pre = self.event(TurnEventKind::PreTurn);
        self.phase = TurnPhase::Turn;
        let started = self.event(TurnEventKind::Started);

        tracing::debug!(
            index = self.current_index,
            round = self.round,
            unit = ?self.current().map(|p| p.unit),
            "turn started"
        );
        vec![pre, started]
    }

    /// Finish the current turn, move to the next participant and start it.
    ///
    /// Wrapping past the last participant begins a new round. Does nothing
    /// for an empty order.
    pub fn end_turn(&mut self) -> Vec<TurnEvent> {
        if self.participants.is_empty() {
            return Vec::new();
        }

        self.phase = TurnPhase::PostTurn;
        let mut events = vec![self.event(TurnEventKind::Ended)];

        self.advance_turn_index();
        events.extend(self.start_turn());
        events
    }

    fn advance_turn_index(&mut self) {
        self.current_index += 1;
        if self.current_index >= self.participants.len() {
            self.current_index = 0;
            self.round += 1;
            tracing::debug!(round = self.round, "new round");
        }
    }

    fn event(&self, kind: TurnEventKind) -> TurnEvent {
        TurnEvent {
            kind,
            turn_index: self.current_index,
            round: self.round,
        }
    }
}
