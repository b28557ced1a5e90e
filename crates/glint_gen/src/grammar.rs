//! Grammar catalogs for expression generation
//!
//! A grammar holds three immutable catalogs:
//! - terminals: leaf expressions without slots
//! - functions: call templates with up to four slots
//! - masks: post-processing templates with up to two slots, applied once
//!
//! Repeating an entry is how a catalog weights it.

use crate::template::Template;
use std::fmt;
use thiserror::Error;

pub const MAX_FUNCTION_ARITY: usize = 4;
pub const MAX_MASK_ARITY: usize = 2;

/// Which catalog an entry or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Terminals,
    Functions,
    Masks,
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Catalog::Terminals => "terminal",
            Catalog::Functions => "function",
            Catalog::Masks => "mask",
        };
        f.write_str(name)
    }
}

/// Errors that make a grammar or root template unusable for generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("{0} catalog is empty")]
    EmptyCatalog(Catalog),

    #[error("terminal {index} ('{template}') has {slots} slot(s); terminals must have none")]
    TerminalHasSlots {
        index: usize,
        template: String,
        slots: usize,
    },

    #[error("{catalog} {index} ('{template}') has {arity} slots; at most {max} allowed")]
    TooManySlots {
        catalog: Catalog,
        index: usize,
        template: String,
        arity: usize,
        max: usize,
    },

    #[error("{catalog} {index} ('{template}') contains a mask anchor")]
    UnexpectedAnchor {
        catalog: Catalog,
        index: usize,
        template: String,
    },

    #[error("root template must contain exactly one mask anchor, found {found}")]
    RootAnchors { found: usize },
}

/// Validated terminal, function and mask catalogs.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminals: Vec<Template>,
    functions: Vec<Template>,
    masks: Vec<Template>,
}

impl Grammar {
    pub fn new(
        terminals: Vec<Template>,
        functions: Vec<Template>,
        masks: Vec<Template>,
    ) -> Result<Self, GrammarError> {
        // Without a slot-free terminal the final round could never close its slots
        check_catalog(Catalog::Terminals, &terminals, 0)?;
        check_catalog(Catalog::Functions, &functions, MAX_FUNCTION_ARITY)?;
        check_catalog(Catalog::Masks, &masks, MAX_MASK_ARITY)?;

        Ok(Self {
            terminals,
            functions,
            masks,
        })
    }

    /// Parse each catalog from template sources.
    pub fn from_sources(
        terminals: &[&str],
        functions: &[&str],
        masks: &[&str],
    ) -> Result<Self, GrammarError> {
        let parse = |sources: &[&str]| -> Vec<Template> {
            sources.iter().map(|s| Template::parse(s)).collect()
        };
        Self::new(parse(terminals), parse(functions), parse(masks))
    }

    pub fn terminals(&self) -> &[Template] {
        &self.terminals
    }

    pub fn functions(&self) -> &[Template] {
        &self.functions
    }

    pub fn masks(&self) -> &[Template] {
        &self.masks
    }

    pub fn catalog(&self, catalog: Catalog) -> &[Template] {
        match catalog {
            Catalog::Terminals => &self.terminals,
            Catalog::Functions => &self.functions,
            Catalog::Masks => &self.masks,
        }
    }
}

fn check_catalog(
    catalog: Catalog,
    entries: &[Template],
    max_arity: usize,
) -> Result<(), GrammarError> {
    if entries.is_empty() {
        return Err(GrammarError::EmptyCatalog(catalog));
    }

    for (index, entry) in entries.iter().enumerate() {
        if entry.anchors() > 0 {
            return Err(GrammarError::UnexpectedAnchor {
                catalog,
                index,
                template: entry.source(),
            });
        }
        if entry.arity() > max_arity {
            return Err(match catalog {
                Catalog::Terminals => GrammarError::TerminalHasSlots {
                    index,
                    template: entry.source(),
                    slots: entry.arity(),
                },
                _ => GrammarError::TooManySlots {
                    catalog,
                    index,
                    template: entry.source(),
                    arity: entry.arity(),
                    max: max_arity,
                },
            });
        }
    }
    Ok(())
}

/// Check that `root` has exactly one anchor for the mask.
pub fn check_root(root: &Template) -> Result<(), GrammarError> {
    match root.anchors() {
        1 => Ok(()),
        found => Err(GrammarError::RootAnchors { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_grammar() {
        let grammar = Grammar::from_sources(&["x", "#"], &["f(&)", "g(&, #)"], &["rgb"]).unwrap();
        assert_eq!(grammar.terminals().len(), 2);
        assert_eq!(grammar.functions()[1].arity(), 1);
        assert_eq!(grammar.catalog(Catalog::Masks).len(), 1);
    }

    #[test]
    fn test_rejects_empty_catalogs() {
        assert_eq!(
            Grammar::from_sources(&[], &["f(&)"], &["m"]).unwrap_err(),
            GrammarError::EmptyCatalog(Catalog::Terminals)
        );
        assert_eq!(
            Grammar::from_sources(&["x"], &[], &["m"]).unwrap_err(),
            GrammarError::EmptyCatalog(Catalog::Functions)
        );
        assert_eq!(
            Grammar::from_sources(&["x"], &["f(&)"], &[]).unwrap_err(),
            GrammarError::EmptyCatalog(Catalog::Masks)
        );
    }

    #[test]
    fn test_rejects_terminal_with_slot() {
        let err = Grammar::from_sources(&["x", "y(&)"], &["f(&)"], &["m"]).unwrap_err();
        assert_eq!(
            err,
            GrammarError::TerminalHasSlots {
                index: 1,
                template: "y(&)".to_string(),
                slots: 1,
            }
        );
    }

    #[test]
    fn test_rejects_arity_over_limit() {
        let err = Grammar::from_sources(&["x"], &["f(&, &, &, &, &)"], &["m"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::TooManySlots { catalog: Catalog::Functions, arity: 5, max: 4, .. }
        ));

        let err = Grammar::from_sources(&["x"], &["f(&)"], &["m(&, &, &)"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::TooManySlots { catalog: Catalog::Masks, arity: 3, max: 2, .. }
        ));
    }

    #[test]
    fn test_rejects_anchor_in_catalog() {
        let err = Grammar::from_sources(&["x"], &["f(&MASK&)"], &["m"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::UnexpectedAnchor { catalog: Catalog::Functions, index: 0, .. }
        ));
    }

    #[test]
    fn test_root_anchor_count() {
        assert!(check_root(&Template::parse("a = &MASK&;")).is_ok());
        assert_eq!(
            check_root(&Template::parse("a = &;")),
            Err(GrammarError::RootAnchors { found: 0 })
        );
        assert_eq!(
            check_root(&Template::parse("&MASK& &MASK&")),
            Err(GrammarError::RootAnchors { found: 2 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GrammarError::EmptyCatalog(Catalog::Terminals);
        assert_eq!(err.to_string(), "terminal catalog is empty");
    }
}
