/// Countdown between two sets.
///
/// The timer is advanced by calling [`RestTimer::tick`] once per second. Invalid operations (e.g.
/// pausing an inactive timer) leave the timer unchanged and return `false`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RestTimer {
    #[default]
    Inactive,
    Active {
        remaining: u32,
        paused: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Running(u32),
    Finished,
}

impl RestTimer {
    /// Starts a new rest period, replacing any running one.
    pub fn start(&mut self, seconds: u32) {
        *self = if seconds == 0 {
            RestTimer::Inactive
        } else {
            RestTimer::Active {
                remaining: seconds,
                paused: false,
            }
        };
    }

    pub fn pause(&mut self) -> bool {
        match self {
            RestTimer::Active { paused, .. } if !*paused => {
                *paused = true;
                true
            }
            _ => false,
        }
    }

    pub fn resume(&mut self) -> bool {
        match self {
            RestTimer::Active { paused, .. } if *paused => {
                *paused = false;
                true
            }
            _ => false,
        }
    }

    pub fn skip(&mut self) -> bool {
        if self.is_active() {
            *self = RestTimer::Inactive;
            true
        } else {
            false
        }
    }

    pub fn add_time(&mut self, seconds: u32) -> bool {
        match self {
            RestTimer::Active { remaining, .. } if seconds > 0 => {
                *remaining = remaining.saturating_add(seconds);
                true
            }
            _ => false,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        match self {
            RestTimer::Active {
                remaining,
                paused: false,
            } => {
                if *remaining <= 1 {
                    *self = RestTimer::Inactive;
                    TickOutcome::Finished
                } else {
                    *remaining -= 1;
                    TickOutcome::Running(*remaining)
                }
            }
            _ => TickOutcome::Idle,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, RestTimer::Active { .. })
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, RestTimer::Active { paused: true, .. })
    }

    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        match self {
            RestTimer::Active { remaining, .. } => Some(*remaining),
            RestTimer::Inactive => None,
        }
    }
}
