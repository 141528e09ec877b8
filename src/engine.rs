use std::time::{Duration, Instant};

/// Scheduling state: at most one cadence is ever armed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum EngineState {
    Idle,
    Armed { interval: Duration, deadline: Instant },
}

/// Cancellable repeating tick schedule driving the simulation.
///
/// The engine never fires callbacks itself; the owning loop polls it with
/// the current instant. That keeps stepping serialized on one thread and
/// makes the timing logic testable without sleeping. All transitions are
/// caller-driven: construction and `stop` yield `Idle`, `start` yields
/// `Armed`, and nothing re-arms implicitly.
#[derive(Debug, Clone, Copy)]
pub struct TickEngine {
    state: EngineState,
}

impl Default for TickEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TickEngine {
    /// Creates an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: EngineState::Idle,
        }
    }

    /// Arms the recurring schedule at `interval`, cancelling any prior one.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.state = EngineState::Armed {
            interval,
            deadline: now + interval,
        };
    }

    /// Cancels the schedule. Required before a reset and on collision.
    pub fn stop(&mut self) {
        self.state = EngineState::Idle;
    }

    /// Re-arms at `new_interval`, keeping the at-most-one-schedule invariant.
    ///
    /// A no-op while idle, so a speed change can never resurrect a schedule
    /// that was already stopped.
    pub fn on_speed_changed(&mut self, new_interval: Duration, now: Instant) {
        if let EngineState::Armed { .. } = self.state {
            self.start(new_interval, now);
        }
    }

    /// Returns true when a tick is due, consuming it and re-arming.
    ///
    /// At most one tick per call: a stalled loop gets a single late tick
    /// instead of a catch-up burst, and the next deadline counts from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let EngineState::Armed { interval, deadline } = self.state else {
            return false;
        };

        if now < deadline {
            return false;
        }

        self.state = EngineState::Armed {
            interval,
            deadline: now + interval,
        };
        true
    }

    /// Returns true while a schedule is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, EngineState::Armed { .. })
    }

    /// Returns the armed cadence, if any.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        match self.state {
            EngineState::Armed { interval, .. } => Some(interval),
            EngineState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::TickEngine;

    #[test]
    fn idle_engine_never_fires() {
        let mut engine = TickEngine::new();
        let now = Instant::now();

        assert!(!engine.is_armed());
        assert!(!engine.poll(now + Duration::from_secs(10)));
    }

    #[test]
    fn armed_engine_fires_after_interval() {
        let mut engine = TickEngine::new();
        let start = Instant::now();
        engine.start(Duration::from_millis(120), start);

        assert!(!engine.poll(start + Duration::from_millis(119)));
        assert!(engine.poll(start + Duration::from_millis(120)));

        // The tick was consumed; the next one is a full interval away.
        assert!(!engine.poll(start + Duration::from_millis(121)));
        assert!(engine.poll(start + Duration::from_millis(240)));
    }

    #[test]
    fn stop_cancels_pending_tick() {
        let mut engine = TickEngine::new();
        let start = Instant::now();
        engine.start(Duration::from_millis(50), start);

        engine.stop();

        assert!(!engine.is_armed());
        assert!(!engine.poll(start + Duration::from_secs(1)));
    }

    #[test]
    fn restart_replaces_existing_schedule() {
        let mut engine = TickEngine::new();
        let start = Instant::now();
        engine.start(Duration::from_millis(50), start);

        // A second start supersedes the first deadline entirely.
        let restart = start + Duration::from_millis(40);
        engine.start(Duration::from_millis(100), restart);

        assert!(!engine.poll(start + Duration::from_millis(60)));
        assert!(engine.poll(restart + Duration::from_millis(100)));
        assert_eq!(engine.interval(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn speed_change_rearms_at_new_interval() {
        let mut engine = TickEngine::new();
        let start = Instant::now();
        engine.start(Duration::from_millis(120), start);

        let change = start + Duration::from_millis(30);
        engine.on_speed_changed(Duration::from_millis(110), change);

        assert_eq!(engine.interval(), Some(Duration::from_millis(110)));
        assert!(!engine.poll(start + Duration::from_millis(120)));
        assert!(engine.poll(change + Duration::from_millis(110)));
    }

    #[test]
    fn speed_change_while_idle_stays_idle() {
        let mut engine = TickEngine::new();

        engine.on_speed_changed(Duration::from_millis(60), Instant::now());

        assert!(!engine.is_armed());
        assert_eq!(engine.interval(), None);
    }

    #[test]
    fn stalled_poll_yields_a_single_tick() {
        let mut engine = TickEngine::new();
        let start = Instant::now();
        engine.start(Duration::from_millis(20), start);

        // Way past several deadlines: exactly one tick is reported.
        let late = start + Duration::from_millis(500);
        assert!(engine.poll(late));
        assert!(!engine.poll(late));
        assert!(engine.poll(late + Duration::from_millis(20)));
    }
}
