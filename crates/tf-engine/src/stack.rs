//! Evaluation stack: detects cyclic record references and bounds nesting.

use crate::error::{EngineError, EngineResult};
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Substance,
    Reaction,
    ReactionFromReactants,
    Solvent,
    Electro,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substance => write!(f, "substance"),
            Self::Reaction => write!(f, "reaction"),
            Self::ReactionFromReactants => write!(f, "reaction (from reactants)"),
            Self::Solvent => write!(f, "solvent"),
            Self::Electro => write!(f, "solvent electro"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    kind: FrameKind,
    symbol: String,
    t: u64,
    p: u64,
}

impl Frame {
    fn label(&self) -> String {
        format!("{} {}", self.kind, self.symbol)
    }
}

#[derive(Debug)]
pub(crate) struct EvalStack {
    frames: RefCell<Vec<Frame>>,
    max_depth: usize,
}

/// Pops its frame when dropped.
pub(crate) struct StackGuard<'s> {
    frames: &'s RefCell<Vec<Frame>>,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.frames.borrow_mut().pop();
    }
}

impl EvalStack {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            frames: RefCell::new(Vec::new()),
            max_depth,
        }
    }

    pub(crate) fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Push a frame for the evaluation of `symbol` at (t, p).
    ///
    /// Fails if the same evaluation is already in progress, or if the stack is full.
    pub(crate) fn enter(
        &self,
        kind: FrameKind,
        symbol: &str,
        t: f64,
        p: f64,
    ) -> EngineResult<StackGuard<'_>> {
        let frame = Frame {
            kind,
            symbol: symbol.to_string(),
            t: t.to_bits(),
            p: p.to_bits(),
        };
        let mut frames = self.frames.borrow_mut();
        if let Some(start) = frames.iter().position(|f| *f == frame) {
            let mut chain: Vec<String> = frames[start..].iter().map(Frame::label).collect();
            chain.push(frame.label());
            return Err(EngineError::CyclicDependency { chain });
        }
        if frames.len() >= self.max_depth {
            return Err(EngineError::DepthExceeded {
                limit: self.max_depth,
                symbol: symbol.to_string(),
            });
        }
        frames.push(frame);
        Ok(StackGuard {
            frames: &self.frames,
        })
    }
}
