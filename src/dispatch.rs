use std::time::{Duration, Instant};

use crate::input::Action;
use crate::registry::AppId;

/// Two presses closer together than this are treated as key bounce and the
/// second one is discarded.
pub const DEBOUNCE: Duration = Duration::from_millis(50);

// ── Handler stack ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(u64);

/// The shell side of a dispatch: key-press feedback plus routing an action to
/// the module that owns the topmost handler.
pub trait HandlerHost {
    /// Invoked once per accepted dispatch, before the handler runs. Must not
    /// fail; sound problems stay inside the implementation.
    fn feedback(&mut self);

    fn handle(&mut self, owner: AppId, action: Action) -> anyhow::Result<()>;
}

/// Stack of registered key handlers. The most recently registered handler is
/// the only one that receives input; nested UI states can push a narrower
/// handler without the outer one knowing.
pub struct Dispatcher {
    stack: Vec<(HandlerId, AppId)>,
    last_accepted: Option<Instant>,
    next_id: u64,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            last_accepted: None,
            next_id: 0,
        }
    }

    /// Push a handler owned by `owner`. Callers keep mount/unmount symmetry;
    /// the dispatcher does not deduplicate.
    pub fn register(&mut self, owner: AppId) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.stack.push((id, owner));
        id
    }

    /// Remove a handler by identity. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: HandlerId) {
        self.stack.retain(|(h, _)| *h != id);
    }

    pub fn top_owner(&self) -> Option<AppId> {
        self.stack.last().map(|(_, owner)| *owner)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Dispatch an action to the topmost handler, if any. Debounced input is
    /// discarded silently; handler failures are logged here and never
    /// propagate. Dispatching to an empty stack is a no-op, not an error.
    pub fn dispatch(&mut self, action: Action, host: &mut dyn HandlerHost) {
        self.dispatch_at(action, host, Instant::now());
    }

    pub(crate) fn dispatch_at(&mut self, action: Action, host: &mut dyn HandlerHost, now: Instant) {
        if let Some(prev) = self.last_accepted {
            if now.duration_since(prev) < DEBOUNCE {
                return;
            }
        }
        self.last_accepted = Some(now);

        host.feedback();

        if let Some(&(_, owner)) = self.stack.last() {
            if let Err(err) = host.handle(owner, action) {
                log::error!("handler for {owner} failed on {action:?}: {err:#}");
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
