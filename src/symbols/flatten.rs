use super::Symbol;

/// Linearize a symbol forest in pre-order: each symbol before its children,
/// siblings in stored order.
///
/// Uses an explicit stack, so deeply nested input cannot overflow the call stack.
pub fn flatten(symbols: &[Symbol]) -> Vec<&Symbol> {
    let mut out = Vec::new();
    let mut stack: Vec<&Symbol> = symbols.iter().rev().collect();

    while let Some(sym) = stack.pop() {
        out.push(sym);
        stack.extend(sym.children().iter().rev());
    }

    out
}

/// `symbols.flattened()` sugar over [`flatten`].
pub trait Flatten {
    fn flattened(&self) -> Vec<&Symbol>;
}

impl Flatten for [Symbol] {
    fn flattened(&self) -> Vec<&Symbol> {
        flatten(self)
    }
}
