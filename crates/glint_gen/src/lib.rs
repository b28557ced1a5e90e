//! Glint Gen
//!
//! Grammar-driven expression generation and WGSL program assembly:
//! - Templates parsed into slot/literal/anchor tokens
//! - Validated terminal, function and mask catalogs
//! - Breadth-first, depth-bounded expansion driven by a seeded engine
//! - The standard operator library and fragment skeleton

pub mod config;
pub mod generator;
pub mod grammar;
pub mod shader;
pub mod template;

pub use config::{DepthRange, GeneratorConfig};
pub use generator::{ExpressionGenerator, GenerateError, MAX_DEPTH};
pub use grammar::{Catalog, Grammar, GrammarError};
pub use shader::{assemble, fragment_root, standard_grammar, GeneratedShader, ShaderGenerator};
pub use template::{Template, Token};
