//=========================================================================
// Panel State
//=========================================================================
//
// Per-panel flags owned by the registry, plus the transition function
// that maps a flag change onto the hooks it implies.
//
//   (from, to) → transitions() → [Pause|Resume] [Cover|Reveal]
//
//=========================================================================

//=== PanelHook ===========================================================

/// State-transition hooks fired while a group recomputes its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelHook {
    Pause,
    Resume,
    Cover,
    Reveal,
}

//=== PanelState ==========================================================

/// Visibility and stacking flags of a single panel.
///
/// A freshly registered panel is hidden, paused and covered, so the first
/// time it reaches the top of a stack it receives `Resume` and `Reveal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub paused: bool,
    pub covered: bool,
}

impl PanelState {
    /// State of a panel that is cached but not stacked.
    pub const CACHED: Self = Self {
        visible: false,
        paused: true,
        covered: true,
    };

    /// Returns a copy with the paused flag replaced.
    pub fn with_paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    /// Returns a copy with the covered flag replaced.
    pub fn with_covered(self, covered: bool) -> Self {
        Self { covered, ..self }
    }

    /// Hooks implied by moving from `from` to `to`, pause before cover.
    ///
    /// Visibility is not part of the result; it is driven by open/close
    /// and by the hooks themselves.
    pub fn transitions(from: PanelState, to: PanelState) -> impl Iterator<Item = PanelHook> {
        let pause = match (from.paused, to.paused) {
            (false, true) => Some(PanelHook::Pause),
            (true, false) => Some(PanelHook::Resume),
            _ => None,
        };

        let cover = match (from.covered, to.covered) {
            (false, true) => Some(PanelHook::Cover),
            (true, false) => Some(PanelHook::Reveal),
            _ => None,
        };

        pause.into_iter().chain(cover)
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self::CACHED
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hooks(from: PanelState, to: PanelState) -> Vec<PanelHook> {
        PanelState::transitions(from, to).collect()
    }

    #[test]
    fn default_is_cached_state() {
        let state = PanelState::default();
        assert!(!state.visible);
        assert!(state.paused);
        assert!(state.covered);
    }

    #[test]
    fn equal_flags_yield_no_hooks() {
        let state = PanelState::CACHED;
        assert!(hooks(state, state).is_empty());

        let open = PanelState { visible: true, paused: false, covered: false };
        assert!(hooks(open, open).is_empty());
    }

    #[test]
    fn reaching_the_top_resumes_then_reveals() {
        let to = PanelState::CACHED.with_paused(false).with_covered(false);
        assert_eq!(hooks(PanelState::CACHED, to), vec![PanelHook::Resume, PanelHook::Reveal]);
    }

    #[test]
    fn being_stacked_over_pauses_then_covers() {
        let from = PanelState { visible: true, paused: false, covered: false };
        let to = from.with_paused(true).with_covered(true);
        assert_eq!(hooks(from, to), vec![PanelHook::Pause, PanelHook::Cover]);
    }

    #[test]
    fn visibility_change_alone_fires_nothing() {
        let from = PanelState::CACHED;
        let to = PanelState { visible: true, ..from };
        assert!(hooks(from, to).is_empty());
    }
}
