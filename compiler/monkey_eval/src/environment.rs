//! Lexical environments.
//!
//! An [`Environment`] is a shared handle to one scope frame. Frames link to
//! their enclosing frame, forming the chain identifiers are resolved
//! against. Function values hold a handle to the frame they were defined
//! in, which keeps that frame alive after its call returns.
//!
//! A closure stored in the frame it captured (`let f = fn() { f }`) forms
//! an `Rc` cycle. Every frame created with [`Environment::new_enclosed`] is
//! recorded, by weak handle, in a registry shared with its root.
//! [`Environment::reclaim`] counts the references among those frames and
//! the arrays and hashes they hold, and clears the frames that nothing
//! outside the root can still reach. Frames behind a value the caller kept
//! stay intact.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use monkey_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::value::{Heap, Value};

/// Single-threaded shared cell: `Rc<RefCell<T>>` behind a factory.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn downgrade(&self) -> WeakScope<T> {
        WeakScope(Rc::downgrade(&self.0))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Address of the shared allocation, for identity maps.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

/// Weak counterpart of [`LocalScope`].
pub struct WeakScope<T>(Weak<RefCell<T>>);

impl<T> WeakScope<T> {
    pub fn upgrade(&self) -> Option<LocalScope<T>> {
        self.0.upgrade().map(LocalScope)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl<T> Clone for WeakScope<T> {
    fn clone(&self) -> Self {
        WeakScope(Weak::clone(&self.0))
    }
}

/// Frames below this count are never pruned.
const MIN_PRUNE_THRESHOLD: usize = 1024;

/// Weak handles to every call frame created under one root.
struct FrameRegistry {
    frames: Vec<WeakScope<Scope>>,
    prune_at: usize,
}

impl FrameRegistry {
    fn new() -> Self {
        FrameRegistry {
            frames: Vec::new(),
            prune_at: MIN_PRUNE_THRESHOLD,
        }
    }

    fn register(&mut self, frame: WeakScope<Scope>) {
        if self.frames.len() >= self.prune_at {
            self.frames.retain(WeakScope::is_alive);
            self.prune_at = (self.frames.len() * 2).max(MIN_PRUNE_THRESHOLD);
            trace!(live = self.frames.len(), "pruned frame registry");
        }
        self.frames.push(frame);
    }
}

/// One scope frame: bindings plus the enclosing frame.
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<Environment>,
    registry: LocalScope<FrameRegistry>,
}

/// Shared handle to a scope frame.
#[derive(Clone)]
pub struct Environment(LocalScope<Scope>);

impl Environment {
    /// An empty root frame.
    pub fn new() -> Self {
        Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: None,
            registry: LocalScope::new(FrameRegistry::new()),
        }))
    }

    /// A fresh empty frame whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Environment) -> Self {
        let registry = outer.0.borrow().registry.clone();
        let frame = Environment(LocalScope::new(Scope {
            bindings: FxHashMap::default(),
            parent: Some(outer.clone()),
            registry: registry.clone(),
        }));
        registry.borrow_mut().register(frame.0.downgrade());
        frame
    }

    /// Resolve `name` in this frame, then outward through the chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        let mut frame = self.clone();
        loop {
            let parent = {
                let scope = frame.0.borrow();
                if let Some(value) = scope.bindings.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            frame = parent?;
        }
    }

    /// Bind `name` in this frame only, shadowing any outer binding.
    /// Returns the bound value.
    pub fn set(&self, name: impl Into<String>, value: Value) -> Value {
        self.0.borrow_mut().bindings.insert(name.into(), value.clone());
        value
    }

    /// Whether `name` is bound in this frame itself.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// Drop every binding and the link to the enclosing frame.
    pub fn clear(&self) {
        let (bindings, parent) = {
            let mut scope = self.0.borrow_mut();
            (std::mem::take(&mut scope.bindings), scope.parent.take())
        };
        // Dropped after the borrow ends: releasing a closure may release
        // other frames.
        drop(bindings);
        drop(parent);
    }

    /// Give up this handle and clear every frame under its root that is
    /// no longer reachable from outside. Returns the number cleared.
    ///
    /// A frame, array or hash is reachable from outside when it has more
    /// strong references than the frames and values under this root
    /// account for. Everything such a node leads to is kept, so a closure
    /// the caller still holds keeps its captured frames and their bindings.
    pub fn reclaim(self) -> usize {
        let registry = self.0.borrow().registry.clone();
        let registered = std::mem::take(&mut registry.borrow_mut().frames);
        let mut frames = vec![self];
        for frame in registered.iter().filter_map(WeakScope::upgrade) {
            if !frame.ptr_eq(&frames[0].0) {
                frames.push(Environment(frame));
            }
        }

        let live = FrameGraph::build(&frames).live(frames.len());
        let mut cleared = 0usize;
        let mut kept = Vec::new();
        for (frame, live) in frames.iter().zip(live) {
            if live {
                if frame.0.borrow().parent.is_some() {
                    kept.push(frame.0.downgrade());
                }
            } else {
                frame.clear();
                cleared += 1;
            }
        }
        trace!(cleared, kept = kept.len(), "reclaimed call frames");
        registry.borrow_mut().frames.extend(kept);
        cleared
    }

    /// Number of registered call frames still alive.
    pub fn live_frames(&self) -> usize {
        let registry = self.0.borrow().registry.clone();
        let count = registry
            .borrow()
            .frames
            .iter()
            .filter(|f| f.is_alive())
            .count();
        count
    }

    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(self.0.downgrade())
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

// Bindings can refer back to this frame; print names only.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&str> = scope.bindings.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("enclosed", &scope.parent.is_some())
            .finish()
    }
}

/// Strong references among a root's frames and the arrays and hashes their
/// bindings hold. Frames come first, in the order given to `build`.
struct FrameGraph {
    nodes: Vec<GraphNode>,
    /// Allocation address to node.
    index: FxHashMap<usize, usize>,
}

struct GraphNode {
    /// Strong count when the node was found.
    strong: usize,
    /// References held by the collector itself.
    held: usize,
    /// References from other nodes.
    internal: usize,
    edges: Vec<usize>,
}

impl FrameGraph {
    fn build(frames: &[Environment]) -> Self {
        let mut graph = FrameGraph {
            nodes: Vec::with_capacity(frames.len()),
            index: FxHashMap::default(),
        };
        for frame in frames {
            graph.add(frame.0.addr(), frame.0.strong_count(), 1);
        }
        for (id, frame) in frames.iter().enumerate() {
            let scope = frame.0.borrow();
            if let Some(parent) = &scope.parent {
                graph.link_frame(id, parent);
            }
            for value in scope.bindings.values() {
                graph.scan(id, value);
            }
        }
        graph
    }

    fn add(&mut self, addr: usize, strong: usize, held: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(GraphNode {
            strong,
            held,
            internal: 0,
            edges: Vec::new(),
        });
        self.index.insert(addr, id);
        id
    }

    fn link(&mut self, from: usize, to: usize) {
        self.nodes[from].edges.push(to);
        self.nodes[to].internal += 1;
    }

    // Frames under another root are not part of the graph.
    fn link_frame(&mut self, from: usize, frame: &Environment) {
        if let Some(&to) = self.index.get(&frame.0.addr()) {
            self.link(from, to);
        }
    }

    fn scan(&mut self, from: usize, value: &Value) {
        match value {
            Value::Function(func) => self.link_frame(from, func.env()),
            Value::Array(items) => {
                if let Some(to) = self.link_heap(from, items) {
                    for item in items.iter() {
                        ensure_sufficient_stack(|| self.scan(to, item));
                    }
                }
            }
            Value::Hash(hash) => {
                if let Some(to) = self.link_heap(from, hash) {
                    for (_, item) in hash.iter() {
                        ensure_sufficient_stack(|| self.scan(to, item));
                    }
                }
            }
            _ => {}
        }
    }

    /// Link `from` to a heap node. Returns the node when it is new and its
    /// contents still need scanning.
    fn link_heap<T>(&mut self, from: usize, heap: &Heap<T>) -> Option<usize> {
        let addr = Heap::addr(heap);
        if let Some(&to) = self.index.get(&addr) {
            self.link(from, to);
            return None;
        }
        let to = self.add(addr, Heap::strong_count(heap), 0);
        self.link(from, to);
        Some(to)
    }

    /// For each of the first `frames` nodes, whether something outside the
    /// graph can reach it.
    fn live(&self, frames: usize) -> Vec<bool> {
        let mut live = vec![false; self.nodes.len()];
        let mut pending: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.strong > node.held + node.internal)
            .map(|(id, _)| id)
            .collect();
        while let Some(id) = pending.pop() {
            if std::mem::replace(&mut live[id], true) {
                continue;
            }
            pending.extend(self.nodes[id].edges.iter().copied().filter(|&to| !live[to]));
        }
        live.truncate(frames);
        live
    }
}

/// Weak handle to a frame, for checking whether it has been released.
#[derive(Clone)]
pub struct WeakEnvironment(WeakScope<Scope>);

impl WeakEnvironment {
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }

    pub fn is_alive(&self) -> bool {
        self.0.is_alive()
    }
}
