use crate::registry::{self, AppId};

// ── Softkeys ──────────────────────────────────────────────────────────────────

/// Labels shown above the two soft buttons. Declared by the active module and
/// cleared on every app switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Softkeys {
    pub left: Option<String>,
    pub right: Option<String>,
}

// ── Navigation state ──────────────────────────────────────────────────────────

/// Which app is active, where "back" leads, and what the softkeys say.
/// Created once per session; mutated only through the four operations below.
pub struct Navigator {
    active: AppId,
    stack: Vec<AppId>,
    softkeys: Softkeys,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            active: registry::HOME,
            stack: Vec::new(),
            softkeys: Softkeys::default(),
        }
    }

    pub fn active(&self) -> AppId {
        self.active
    }

    pub fn stack(&self) -> &[AppId] {
        &self.stack
    }

    pub fn softkeys(&self) -> &Softkeys {
        &self.softkeys
    }

    /// Push the current app onto the history stack and switch. The id is not
    /// validated against the registry; unknown ids surface as a "not found"
    /// screen. Re-opening the active app pushes a self-referential entry —
    /// callers avoid that themselves.
    pub fn open_app(&mut self, id: AppId) {
        self.stack.push(self.active);
        self.active = id;
        self.softkeys = Softkeys::default();
    }

    /// Pop the most recent app, or fall back to home when the stack is empty
    /// and we are not already there. On home with an empty stack: no-op.
    pub fn go_back(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.active = prev;
            self.softkeys = Softkeys::default();
        } else if self.active != registry::HOME {
            self.active = registry::HOME;
            self.softkeys = Softkeys::default();
        }
    }

    pub fn go_home(&mut self) {
        self.active = registry::HOME;
        self.stack.clear();
        self.softkeys = Softkeys::default();
    }

    pub fn set_softkeys(&mut self, left: Option<&str>, right: Option<&str>) {
        self.softkeys = Softkeys {
            left: left.map(str::to_string),
            right: right.map(str::to_string),
        };
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
