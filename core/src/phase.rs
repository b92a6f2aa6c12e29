use serde::{Deserialize, Serialize};

/// Valid transitions:
/// - Waiting -> Selected (first pick)
/// - Selected -> Swapping (adjacent second pick)
/// - Waiting | Selected -> Moving (bomb detonated)
/// - Waiting -> Moving (matches found or tokens falling)
/// - Swapping -> Moving (swap animation settled, kept or reverted)
/// - Moving -> Waiting (all animations settled)
/// - Waiting -> Losing (no move left and no bomb on the board)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Idle, accepting clicks
    Waiting,
    /// One token picked, waiting for its neighbor
    Selected,
    /// Two tokens animating into each other's slots
    Swapping,
    /// Resolving matches, falls and refills; input is ignored
    Moving,
    /// Terminal: the board is being faded out
    Losing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    Pick,
    Swap,
    Detonate,
    /// Matches or falling tokens need animation frames
    Cascade,
    Stalemate,
    /// Every token finished its animation this frame
    Settled,
}

impl Phase {
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::Waiting | Self::Selected)
    }

    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Swapping | Self::Moving)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Losing)
    }

    /// Transition function of the board; events that make no sense in the
    /// current phase leave it unchanged.
    pub const fn on(self, event: PhaseEvent) -> Phase {
        use Phase::*;
        use PhaseEvent::*;
        match (self, event) {
            (Losing, _) => Losing,
            (Waiting, Pick) => Selected,
            (Selected, Swap) => Swapping,
            (Waiting | Selected, Detonate) => Moving,
            (Waiting, Cascade) => Moving,
            (Waiting, Stalemate) => Losing,
            (Swapping, Settled) => Moving,
            (Moving, Settled) => Waiting,
            (phase, _) => phase,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Phase::*;
    use PhaseEvent::*;

    #[test]
    fn selection_and_swap_cycle_returns_to_waiting() {
        let phase = Waiting.on(Pick).on(Swap).on(Settled).on(Settled);
        assert_eq!(phase, Waiting);
    }

    #[test]
    fn swap_requires_selection() {
        assert_eq!(Waiting.on(Swap), Waiting);
        assert_eq!(Moving.on(Pick), Moving);
        assert_eq!(Swapping.on(Detonate), Swapping);
    }

    #[test]
    fn detonation_is_accepted_while_selecting() {
        assert_eq!(Waiting.on(Detonate), Moving);
        assert_eq!(Selected.on(Detonate), Moving);
    }

    #[test]
    fn losing_is_terminal() {
        let losing = Waiting.on(Stalemate);
        assert_eq!(losing, Losing);
        for event in [Pick, Swap, Detonate, Cascade, Stalemate, Settled] {
            assert_eq!(losing.on(event), Losing);
        }
        assert!(losing.is_final());
        assert!(!losing.accepts_clicks());
    }

    #[test]
    fn stalemate_only_counts_while_waiting() {
        assert_eq!(Moving.on(Stalemate), Moving);
        assert_eq!(Selected.on(Stalemate), Selected);
    }
}
