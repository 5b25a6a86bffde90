use crate::shared::Tick;

/**
 * Door dwell timer driven by the fleet's logical clock.
 *
 * Nothing here sleeps; the owner passes the current tick in and asks whether the deadline passed.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct DwellTimer {
    duration: Tick,
    deadline: Option<Tick>,
}

impl DwellTimer {
    pub fn new(duration: Tick) -> DwellTimer {
        DwellTimer {
            duration,
            deadline: None,
        }
    }

    // Restarting an armed timer pushes the deadline out
    pub fn start(&mut self, now: Tick) {
        self.deadline = Some(now.saturating_add(self.duration));
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self, now: Tick) -> bool {
        match self.deadline {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }

    pub fn deadline(&self) -> Option<Tick> {
        self.deadline
    }
}
