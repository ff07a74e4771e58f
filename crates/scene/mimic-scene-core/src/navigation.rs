//! Current step index, host navigation, and Play/Pause auto-advance.

use serde::{Deserialize, Serialize};

use crate::data::SequenceStep;

/// Label reported while no step is applied.
pub const INITIAL_LABEL: &str = "Initial Scene";

/// Step metadata shown next to the navigation controls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub current: u32,
    pub total: u32,
    pub label: String,
}

/// Human label for `current`.
///
/// Prefers the first entry numbered `current`; otherwise falls back to the
/// entry at array position `current - 1`, which matches sequences whose step
/// numbers follow array order.
pub fn step_label(sequence: &[SequenceStep], current: u32) -> String {
    if current == 0 {
        return INITIAL_LABEL.to_string();
    }
    let by_number = sequence.iter().find(|s| s.step == current);
    let by_position = sequence.get(current as usize - 1);
    by_number
        .or(by_position)
        .and_then(|s| s.label.clone())
        .unwrap_or_default()
}

/// Step index in `0..=total`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepCursor {
    current: u32,
    total: u32,
}

impl StepCursor {
    pub fn new(total: u32) -> Self {
        Self { current: 0, total }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn at_end(&self) -> bool {
        self.current >= self.total
    }

    /// Clamp and set. Returns the previous step when the index changed.
    pub fn set(&mut self, step: i64) -> Option<u32> {
        let clamped = step.clamp(0, i64::from(self.total)) as u32;
        self.replace(clamped)
    }

    pub fn next(&mut self) -> Option<u32> {
        if self.current < self.total {
            self.replace(self.current + 1)
        } else {
            None
        }
    }

    /// Step back, never below step 1; use [`reset`](Self::reset) for step 0.
    pub fn prev(&mut self) -> Option<u32> {
        if self.current > 1 {
            self.replace(self.current - 1)
        } else {
            None
        }
    }

    pub fn reset(&mut self) -> Option<u32> {
        self.replace(0)
    }

    fn replace(&mut self, step: u32) -> Option<u32> {
        if step == self.current {
            return None;
        }
        let old = self.current;
        self.current = step;
        Some(old)
    }

    pub fn info(&self, sequence: &[SequenceStep]) -> StepInfo {
        StepInfo {
            current: self.current,
            total: self.total,
            label: step_label(sequence, self.current),
        }
    }
}

/// Result of advancing the auto-advance clock by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Idle,
    /// One interval elapsed; the cursor should step forward.
    Advance,
}

/// Play/Pause clock that requests one step per interval.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AutoAdvance {
    playing: bool,
    timer: f32,
}

impl AutoAdvance {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Returns `true` if playback was not already running.
    pub fn play(&mut self) -> bool {
        let started = !self.playing;
        self.playing = true;
        self.timer = 0.0;
        started
    }

    /// Returns `true` if playback was running.
    pub fn pause(&mut self) -> bool {
        let was = self.playing;
        self.playing = false;
        self.timer = 0.0;
        was
    }

    /// Accumulate `dt` (already sanitized). At most one step per frame; the
    /// remainder past the interval carries into the next one.
    pub fn tick(&mut self, dt: f32, interval: f32) -> Tick {
        if !self.playing {
            return Tick::Idle;
        }
        let interval = interval.max(0.0);
        self.timer += dt;
        if self.timer >= interval {
            self.timer -= interval;
            Tick::Advance
        } else {
            Tick::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::StepAction;

    fn entry(step: u32, label: Option<&str>) -> SequenceStep {
        SequenceStep {
            step,
            target_id: "a".into(),
            action: StepAction::Appear,
            label: label.map(str::to_string),
        }
    }

    #[test]
    fn set_clamps_to_range() {
        let mut c = StepCursor::new(3);
        assert_eq!(c.set(-5), None);
        assert_eq!(c.current(), 0);
        assert_eq!(c.set(99), Some(0));
        assert_eq!(c.current(), 3);
        assert!(c.at_end());
    }

    #[test]
    fn next_stops_at_total_and_prev_at_one() {
        let mut c = StepCursor::new(2);
        assert_eq!(c.prev(), None);
        assert_eq!(c.next(), Some(0));
        assert_eq!(c.next(), Some(1));
        assert_eq!(c.next(), None);
        assert_eq!(c.prev(), Some(2));
        assert_eq!(c.prev(), None);
        assert_eq!(c.current(), 1);
        assert_eq!(c.reset(), Some(1));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn empty_sequence_never_moves() {
        let mut c = StepCursor::new(0);
        assert_eq!(c.next(), None);
        assert_eq!(c.set(4), None);
        assert_eq!(c.info(&[]).label, INITIAL_LABEL);
    }

    #[test]
    fn label_prefers_step_number_then_position() {
        let seq = vec![entry(1, Some("one")), entry(3, Some("three")), entry(3, None)];
        assert_eq!(step_label(&seq, 0), INITIAL_LABEL);
        assert_eq!(step_label(&seq, 1), "one");
        assert_eq!(step_label(&seq, 3), "three");
        // no entry numbered 2; array position 1 holds "three"
        assert_eq!(step_label(&seq, 2), "three");
        assert_eq!(step_label(&seq, 7), "");
    }

    #[test]
    fn auto_advance_fires_once_per_interval() {
        let mut a = AutoAdvance::default();
        assert_eq!(a.tick(10.0, 2.5), Tick::Idle);
        assert!(a.play());
        assert!(!a.play());
        assert_eq!(a.tick(1.0, 2.5), Tick::Idle);
        assert_eq!(a.tick(1.0, 2.5), Tick::Idle);
        assert_eq!(a.tick(1.0, 2.5), Tick::Advance);
        assert_eq!(a.tick(1.0, 2.5), Tick::Idle);
        assert!(a.pause());
        assert!(!a.pause());
        assert_eq!(a.tick(5.0, 2.5), Tick::Idle);
    }

    #[test]
    fn uneven_frames_keep_the_interval() {
        let mut a = AutoAdvance::default();
        a.play();
        assert_eq!(a.tick(0.7, 1.0), Tick::Idle);
        assert_eq!(a.tick(0.7, 1.0), Tick::Advance);
        // 0.4 carried over
        assert_eq!(a.tick(0.7, 1.0), Tick::Advance);

        let mut a = AutoAdvance::default();
        a.play();
        let steps = (0..100)
            .filter(|_| a.tick(0.7, 1.0) == Tick::Advance)
            .count();
        assert!((69..=70).contains(&steps), "{steps} steps in 70s");
    }
}
