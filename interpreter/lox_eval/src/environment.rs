//! Environment for variable scoping in the evaluator.
//!
//! Scopes form a tree of frames rooted at one global frame. Frames live in
//! an arena and are addressed by stable [`FrameId`]; each frame stores the
//! id of its parent, fixed at creation and never reassigned. Closures hold
//! a `FrameId` instead of a reference, so captured scopes may outlive the
//! block that created them without reference cycles.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::value::Value;

/// Stable handle to a scope frame in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(u32);

impl FrameId {
    /// The global frame, alive for the whole run.
    pub const GLOBAL: FrameId = FrameId(0);
}

/// A single scope: name-to-value bindings plus a fixed parent link.
#[derive(Debug, Default)]
struct Frame {
    bindings: FxHashMap<String, Value>,
    parent: Option<FrameId>,
    /// For command invocations only: the frame of the dynamic caller,
    /// threaded in as an implicit leading argument.
    caller: Option<FrameId>,
}

/// Arena of scope frames. Frames are appended, never detached or
/// reparented; bindings inside a frame are mutated in place.
#[derive(Debug)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// Create an environment holding only the empty global frame.
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::default()],
        }
    }

    /// Create a new child frame of `parent` with the given initial
    /// bindings. The parent is not mutated.
    pub fn push(
        &mut self,
        parent: FrameId,
        bindings: impl IntoIterator<Item = (String, Value)>,
    ) -> FrameId {
        debug_assert!((parent.0 as usize) < self.frames.len());
        let id = FrameId(u32::try_from(self.frames.len()).unwrap_or(u32::MAX));
        trace!(frame = ?id, parent = ?parent, "new frame");
        self.frames.push(Frame {
            bindings: bindings.into_iter().collect(),
            parent: Some(parent),
            caller: None,
        });
        id
    }

    /// Create a new empty child frame of `parent`.
    pub fn push_empty(&mut self, parent: FrameId) -> FrameId {
        self.push(parent, [])
    }

    /// Insert or overwrite `name` in `frame` itself, shadowing any
    /// same-named binding in an ancestor.
    pub fn define(&mut self, frame: FrameId, name: impl Into<String>, value: Value) {
        self.frames[frame.0 as usize].bindings.insert(name.into(), value);
    }

    /// Resolve `name` by searching `frame` and then its ancestors.
    pub fn lookup(&self, frame: FrameId, name: &str) -> Option<Value> {
        let mut current = Some(frame);
        while let Some(id) = current {
            let frame = &self.frames[id.0 as usize];
            if let Some(value) = frame.bindings.get(name) {
                return Some(value.clone());
            }
            current = frame.parent;
        }
        None
    }

    /// Mutate the binding for `name` in the innermost frame that already
    /// contains it. Returns `false` when no frame defines `name`;
    /// assignment never creates a binding.
    #[must_use]
    pub fn assign(&mut self, frame: FrameId, name: &str, value: Value) -> bool {
        let mut current = Some(frame);
        while let Some(id) = current {
            let frame = &mut self.frames[id.0 as usize];
            if let Some(slot) = frame.bindings.get_mut(name) {
                *slot = value;
                return true;
            }
            current = frame.parent;
        }
        false
    }

    /// Record the dynamic caller of a command invocation frame.
    pub fn set_caller(&mut self, frame: FrameId, caller: FrameId) {
        self.frames[frame.0 as usize].caller = Some(caller);
    }

    /// The dynamic caller recorded on `frame`, if it was entered as a
    /// command invocation.
    pub fn caller_of(&self, frame: FrameId) -> Option<FrameId> {
        self.frames[frame.0 as usize].caller
    }

    /// The parent of `frame`, `None` for the global frame.
    pub fn parent_of(&self, frame: FrameId) -> Option<FrameId> {
        self.frames[frame.0 as usize].parent
    }

    /// Number of frames allocated so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Ids of all frames allocated so far, in creation order.
    pub fn frame_ids(&self) -> impl Iterator<Item = FrameId> {
        let count = u32::try_from(self.frames.len()).unwrap_or(u32::MAX);
        (0..count).map(FrameId)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
