//! Depth-bounded stochastic expression generator
//!
//! Expansion runs breadth-first in rounds instead of recursing:
//!
//! 1. A mask is drawn and spliced at the root's anchor. Every slot of the
//!    root and the mask becomes *pending*, in left-to-right order.
//! 2. For each depth `i` in `0..=D`, the pending slots become *active* and
//!    each active slot is replaced by a function or a terminal. Slots created
//!    by a function join the pending queue for the next round, never the
//!    current one.
//! 3. Literal placeholders are replaced with fresh draws while the result is
//!    rendered left to right.
//!
//! Because a function's children always sit between its neighbours, FIFO
//! order of the queues equals left-to-right order in the output text. The
//! draw sequence, and therefore the output, depends only on the engine.

use crate::grammar::{check_root, Catalog, Grammar, GrammarError};
use crate::template::{Template, Token};
use glint_core::{RangeError, Random};
use std::collections::VecDeque;
use thiserror::Error;

/// Largest depth whose square still fits the engine's `i32` range draws.
pub const MAX_DEPTH: u32 = 46_340;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("depth {depth} exceeds the maximum of {max}")]
    DepthTooLarge { depth: u32, max: u32 },

    #[error("invalid depth range: {0}")]
    DepthRange(#[from] RangeError),

    #[error("depth range produced negative depth {0}")]
    NegativeDepth(i32),
}

/// Expands a root template into a finished expression text.
#[derive(Debug, Clone)]
pub struct ExpressionGenerator {
    grammar: Grammar,
    root: Template,
}

impl ExpressionGenerator {
    /// Build a generator; `root` must contain exactly one mask anchor.
    pub fn new(grammar: Grammar, root: Template) -> Result<Self, GrammarError> {
        check_root(&root)?;
        Ok(Self { grammar, root })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn root(&self) -> &Template {
        &self.root
    }

    /// Generate one expression text with maximum depth `max_depth`.
    pub fn generate(&self, rng: &mut Random, max_depth: u32) -> Result<String, GenerateError> {
        if max_depth > MAX_DEPTH {
            return Err(GenerateError::DepthTooLarge {
                depth: max_depth,
                max: MAX_DEPTH,
            });
        }

        let mask = self.pick(rng, Catalog::Masks);
        let mut expansion = Expansion::default();
        expansion.root = expansion.lower(&self.root, Some(mask));

        for depth in 0..=max_depth {
            let active = std::mem::take(&mut expansion.pending);
            if active.is_empty() {
                break;
            }

            for slot in active {
                let catalog = if self.roll_function(rng, depth, max_depth)? {
                    Catalog::Functions
                } else {
                    Catalog::Terminals
                };
                let template = self.pick(rng, catalog);
                expansion.resolve(slot, template);
            }
        }

        // Only a depth of zero leaves slots behind: its single round is all functions
        while let Some(slot) = expansion.pending.pop_front() {
            let template = self.pick(rng, Catalog::Terminals);
            expansion.resolve(slot, template);
        }

        let text = expansion.render(rng);
        tracing::debug!(
            max_depth,
            slots = expansion.slots.len(),
            len = text.len(),
            "expression generated"
        );
        Ok(text)
    }

    // At depth i of D, draw r on [1, D^2) and expand a function when r > i^2,
    // so depth 0 always expands and depth D never does. Below D = 2 that
    // range is empty and the outcome is fixed without drawing.
    fn roll_function(
        &self,
        rng: &mut Random,
        depth: u32,
        max_depth: u32,
    ) -> Result<bool, GenerateError> {
        if max_depth < 2 {
            return Ok(depth == 0);
        }
        let limit = (max_depth * max_depth) as i32;
        let roll = rng.int_between(1, limit)?;
        Ok(roll > (depth * depth) as i32)
    }

    /// Same draw as `Random::element`; `Grammar::new` guarantees every catalog is non-empty.
    fn pick(&self, rng: &mut Random, catalog: Catalog) -> &Template {
        let entries = self.grammar.catalog(catalog);
        &entries[rng.next_u32() as usize % entries.len()]
    }
}

#[derive(Debug, Clone, Copy)]
enum Node<'g> {
    Text(&'g str),
    Literal,
    Slot(usize),
}

/// In-progress generation state. Slots live in an arena indexed by id and
/// stay empty until resolved; every slot is resolved before rendering.
#[derive(Default)]
struct Expansion<'g> {
    root: Vec<Node<'g>>,
    slots: Vec<Vec<Node<'g>>>,
    pending: VecDeque<usize>,
}

impl<'g> Expansion<'g> {
    /// Convert template tokens to nodes, registering each new slot as pending.
    fn lower(&mut self, template: &'g Template, mask: Option<&'g Template>) -> Vec<Node<'g>> {
        let mut nodes = Vec::with_capacity(template.tokens().len());
        for token in template.tokens() {
            match token {
                Token::Text(text) => nodes.push(Node::Text(text)),
                Token::Literal => nodes.push(Node::Literal),
                Token::Slot => {
                    let id = self.slots.len();
                    self.slots.push(Vec::new());
                    self.pending.push_back(id);
                    nodes.push(Node::Slot(id));
                }
                Token::Anchor => {
                    if let Some(mask) = mask {
                        let spliced = self.lower(mask, None);
                        nodes.extend(spliced);
                    }
                }
            }
        }
        nodes
    }

    fn resolve(&mut self, slot: usize, template: &'g Template) {
        let nodes = self.lower(template, None);
        self.slots[slot] = nodes;
    }

    /// Flatten the tree left to right, drawing one literal per placeholder.
    fn render(&self, rng: &mut Random) -> String {
        let mut out = String::new();
        let mut stack = vec![self.root.iter()];

        while let Some(nodes) = stack.last_mut() {
            match nodes.next() {
                None => {
                    stack.pop();
                }
                Some(Node::Text(text)) => out.push_str(text),
                Some(Node::Literal) => out.push_str(&format_literal(rng.f32_open())),
                Some(&Node::Slot(id)) => stack.push(self.slots[id].iter()),
            }
        }
        out
    }
}

/// Literal token for a value on `(0, 1)`: six decimals and an `f` suffix.
pub fn format_literal(value: f32) -> String {
    format!("{:.6}f", value)
}
