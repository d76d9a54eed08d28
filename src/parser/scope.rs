use crate::symbols::{MemberProperty, Symbol};

/// Everything collected while one declaration's scope is open.
#[derive(Debug, Default)]
pub struct Frame {
    /// Finished symbols declared directly inside this scope, in source order.
    pub children: Vec<Symbol>,
    /// Member bindings declared directly inside this scope's body.
    pub properties: Vec<MemberProperty>,
}

/// Stack of open declaration scopes.
///
/// The bottom frame is a synthetic root that is never emitted; its children
/// are the top-level symbols. Depth above the root equals the current
/// declaration nesting depth.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Number of open declaration scopes, not counting the root.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Close the innermost scope, build its symbol from the collected frame
    /// and append the symbol to the enclosing scope.
    ///
    /// # Panics
    ///
    /// Panics if no declaration scope is open. That only happens when the
    /// walker pops without a matching push.
    pub fn pop_and_finalize(&mut self, build: impl FnOnce(Frame) -> Symbol) {
        assert!(
            self.frames.len() > 1,
            "pop_and_finalize called with no open declaration scope"
        );
        let frame = self.frames.pop().unwrap_or_default();
        let symbol = build(frame);
        if let Some(parent) = self.frames.last_mut() {
            parent.children.push(symbol);
        }
    }

    /// Record a member binding on the innermost open scope.
    pub fn add_property(&mut self, property: MemberProperty) {
        if let Some(frame) = self.frames.last_mut() {
            frame.properties.push(property);
        }
    }

    /// Symbols finished so far in the innermost scope.
    pub fn current_children(&self) -> &[Symbol] {
        self.frames.last().map(|f| f.children.as_slice()).unwrap_or(&[])
    }

    /// Consume the stack and return the root forest.
    pub fn into_root(mut self) -> Vec<Symbol> {
        debug_assert_eq!(self.depth(), 0, "unbalanced scope stack at end of walk");
        self.frames.truncate(1);
        self.frames.pop().map(|root| root.children).unwrap_or_default()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
