//! WGSL shader assembly
//!
//! A generated program is the fixed operator library followed by the
//! vertex/fragment skeleton, with the expression body substituted into the
//! fragment stage. Every operator maps `[0, 1]` inputs back into `[0, 1]`, so
//! any nesting the grammar produces stays a valid colour channel.

use crate::config::GeneratorConfig;
use crate::generator::{ExpressionGenerator, GenerateError};
use crate::grammar::{Grammar, GrammarError};
use crate::template::Template;
use glint_core::Random;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Vertex stage entry point of every generated program.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Fragment stage entry point of every generated program.
pub const FRAGMENT_ENTRY: &str = "fs_main";
/// Where the skeleton receives the generated body.
pub const BODY_PLACEHOLDER: &str = "{{BODY}}";

pub const OPERATOR_LIBRARY: &str = r#"// One input

fn op_inv(x: f32) -> f32 {
    return 1.0 - x;
}

fn op_sqr(x: f32) -> f32 {
    return x * x;
}

fn op_sqrt(x: f32) -> f32 {
    return sqrt(x);
}

fn op_smooth(x: f32) -> f32 {
    let x2 = x * x;
    return 3.0 * x2 - 2.0 * x2 * x;
}

fn op_sharp(x: f32) -> f32 {
    return x * (x * (2.0 * x - 3.0) + 2.0);
}

// Two inputs

fn op_add(x: f32, y: f32) -> f32 {
    let sum = x + y;
    return select(sum, 2.0 - sum, sum > 1.0);
}

fn op_sub(x: f32, y: f32) -> f32 {
    return abs(x - y);
}

fn op_mul(x: f32, y: f32) -> f32 {
    return x * y;
}

fn op_div(x: f32, y: f32) -> f32 {
    let lo = min(x, y);
    let hi = max(max(x, y), 0.0001);
    return lo / hi;
}

fn op_avg(x: f32, y: f32) -> f32 {
    return (x + y) * 0.5;
}

fn op_geom(x: f32, y: f32) -> f32 {
    return sqrt(x * y);
}

fn op_harm(x: f32, y: f32) -> f32 {
    let den = max(x + y, 0.0001);
    return (2.0 * x * y) / den;
}

fn op_hypot(x: f32, y: f32) -> f32 {
    return 0.70710678 * sqrt(x * x + y * y);
}

fn op_max(x: f32, y: f32) -> f32 {
    return max(x, y);
}

fn op_min(x: f32, y: f32) -> f32 {
    return min(x, y);
}

fn op_pow(x: f32, y: f32) -> f32 {
    return pow(x, pow(10.0, 2.0 * y - 1.0));
}

fn op_bell(x: f32, y: f32) -> f32 {
    let y2 = y * y;
    return pow(4.0 * x * (1.0 - x), 20.0 * y2 * y2 + 0.3);
}

fn op_wave(x: f32, y: f32) -> f32 {
    let max_frequency = 6.0 * 3.1415927;
    return 0.5 + 0.5 * cos(max_frequency * x * y);
}

// Three inputs

fn op_lerp(x: f32, y: f32, t: f32) -> f32 {
    return mix(x, y, t);
}

fn op_mlerp(x: f32, y: f32, t: f32) -> f32 {
    let lo = max(x, 0.0001);
    return lo * pow(y / lo, t);
}

// Four inputs

fn op_dist(x: f32, y: f32, px: f32, py: f32) -> f32 {
    return 0.70710678 * distance(vec2<f32>(x, y), vec2<f32>(px, py));
}

// Distance from (x, y) to the line through (0.5, w) at angle a * pi
fn op_dist_line(x: f32, y: f32, a: f32, w: f32) -> f32 {
    if (a < 0.499) {
        let m = tan(a * 3.1415927);
        let n = (1.0 - w) * (1.0 + m) - m;
        let c = (x + y * m - m * n) / (m * m + 1.0);
        return 0.70710678 * distance(vec2<f32>(c, m * c + n), vec2<f32>(x, y));
    } else if (a > 0.501) {
        let m = tan(a * 3.1415927);
        let n = w - m * w;
        let c = (x + y * m - m * n) / (m * m + 1.0);
        return 0.70710678 * distance(vec2<f32>(c, m * c + n), vec2<f32>(x, y));
    }
    return 0.70710678 * abs(w - x);
}

// Masks

fn mask_inv(v: vec3<f32>) -> vec3<f32> {
    return vec3<f32>(1.0) - v;
}

fn mask_add(v: vec3<f32>, x: f32) -> vec3<f32> {
    let sum = v + vec3<f32>(x);
    return mix(sum, 2.0 - sum, step(vec3<f32>(1.0), sum));
}

fn mask_sub(v: vec3<f32>, x: f32) -> vec3<f32> {
    return abs(v - vec3<f32>(x));
}
"#;

pub const SKELETON: &str = r#"
struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var positions = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, 1.0), vec2<f32>(1.0, 1.0), vec2<f32>(-1.0, -1.0),
        vec2<f32>(-1.0, -1.0), vec2<f32>(1.0, 1.0), vec2<f32>(1.0, -1.0),
    );
    var uvs = array<vec2<f32>, 6>(
        vec2<f32>(0.0, 1.0), vec2<f32>(1.0, 1.0), vec2<f32>(0.0, 0.0),
        vec2<f32>(0.0, 0.0), vec2<f32>(1.0, 1.0), vec2<f32>(1.0, 0.0),
    );

    var output: VertexOutput;
    output.position = vec4<f32>(positions[vertex_index], 0.0, 1.0);
    output.uv = uvs[vertex_index];
    return output;
}

@group(0) @binding(0) var<uniform> time_params: vec4<f32>;

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let inv_x = 1.0 - input.uv.x;
    let inv_y = 1.0 - input.uv.y;
    let sin_time = time_params.x;
    let cos_time = time_params.y;

{{BODY}}

    return vec4<f32>(rgb_masked, 1.0);
}
"#;

/// Fragment body: three channel slots and the mask anchor.
pub const FRAGMENT_ROOT: &str = concat!(
    "    let rgb: vec3<f32> = vec3<f32>(&, &, &);\n",
    "    let rgb_masked: vec3<f32> = &MASK&;",
);

pub const STATIC_TERMINALS: &[&str] = &[
    "input.uv.x",
    "input.uv.y",
    "inv_x",
    "inv_y",
    "#",
    "#",
];

pub const ANIMATED_TERMINALS: &[&str] = &[
    "input.uv.x",
    "input.uv.y",
    "inv_x",
    "inv_y",
    "sin_time",
    "cos_time",
    "#",
    "#",
];

pub const FUNCTIONS: &[&str] = &[
    "op_inv(&)",
    "op_sqr(&)",
    "op_sqrt(&)",
    "op_smooth(&)",
    "op_sharp(&)",
    "op_add(&, &)",
    "op_sub(&, &)",
    "op_mul(&, &)",
    "op_inv(op_mul(&, &))",
    "op_div(&, &)",
    "op_avg(&, &)",
    "op_geom(&, &)",
    "op_harm(&, &)",
    "op_hypot(&, &)",
    "op_inv(op_hypot(&, &))",
    "op_max(&, &)",
    "op_min(&, &)",
    "op_pow(&, &)",
    "op_bell(&, &)",
    "op_inv(op_bell(&, &))",
    "op_wave(&, &)",
    "op_wave(&, &)",
    "op_lerp(&, &, &)",
    "op_mlerp(&, &, &)",
    "op_dist(&, &, &, &)",
    "op_dist(&, &, #, #)",
    "op_dist(input.uv.x, input.uv.y, &, &)",
    "op_dist(input.uv.x, input.uv.y, #, #)",
    "op_inv(op_dist(&, &, &, &))",
    "op_inv(op_dist(&, &, #, #))",
    "op_inv(op_dist(input.uv.x, input.uv.y, &, &))",
    "op_inv(op_dist(input.uv.x, input.uv.y, #, #))",
    "op_dist_line(&, &, &, &)",
    "op_dist_line(&, &, #, #)",
    "op_dist_line(input.uv.x, input.uv.y, &, &)",
    "op_dist_line(input.uv.x, input.uv.y, #, #)",
    "op_inv(op_dist_line(&, &, &, &))",
    "op_inv(op_dist_line(&, &, #, #))",
    "op_inv(op_dist_line(input.uv.x, input.uv.y, &, &))",
    "op_inv(op_dist_line(input.uv.x, input.uv.y, #, #))",
];

pub const MASKS: &[&str] = &[
    "rgb",
    "rgb",
    "rgb",
    "mask_add(rgb, &)",
    "mask_sub(rgb, &)",
    "mask_add(mask_sub(rgb, &), &)",
    "mask_sub(mask_add(rgb, &), &)",
    "mask_inv(mask_add(rgb, &))",
    "mask_inv(mask_sub(rgb, &))",
    "mask_inv(mask_add(mask_sub(rgb, &), &))",
    "mask_inv(mask_sub(mask_add(rgb, &), &))",
];

static ANIMATED_GRAMMAR: Lazy<Result<Grammar, GrammarError>> =
    Lazy::new(|| Grammar::from_sources(ANIMATED_TERMINALS, FUNCTIONS, MASKS));

static STATIC_GRAMMAR: Lazy<Result<Grammar, GrammarError>> =
    Lazy::new(|| Grammar::from_sources(STATIC_TERMINALS, FUNCTIONS, MASKS));

/// The built-in grammar, with or without the time-driven terminals.
pub fn standard_grammar(animate: bool) -> Result<&'static Grammar, GrammarError> {
    let grammar = if animate {
        &ANIMATED_GRAMMAR
    } else {
        &STATIC_GRAMMAR
    };
    Lazy::force(grammar).as_ref().map_err(Clone::clone)
}

pub fn fragment_root() -> Template {
    Template::parse(FRAGMENT_ROOT)
}

/// Complete WGSL program for a generated fragment body.
pub fn assemble(body: &str) -> String {
    let capacity = OPERATOR_LIBRARY.len() + SKELETON.len() + body.len();
    let mut source = String::with_capacity(capacity);
    source.push_str(OPERATOR_LIBRARY);
    source.push_str(&SKELETON.replacen(BODY_PLACEHOLDER, body, 1));
    source
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedShader {
    pub seed: u64,
    pub max_depth: u32,
    pub source: String,
}

/// Seed-to-program pipeline over the standard grammar.
#[derive(Debug, Clone)]
pub struct ShaderGenerator {
    config: GeneratorConfig,
    expressions: ExpressionGenerator,
}

impl ShaderGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GrammarError> {
        let grammar = standard_grammar(config.animate)?.clone();
        let expressions = ExpressionGenerator::new(grammar, fragment_root())?;
        Ok(Self {
            config,
            expressions,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the program for `seed`. The depth is drawn from the same
    /// engine that then drives expansion.
    pub fn generate(&self, seed: u64) -> Result<GeneratedShader, GenerateError> {
        let mut rng = Random::new(seed);
        let max_depth = self.config.draw_depth(&mut rng)?;
        let body = self.expressions.generate(&mut rng, max_depth)?;
        tracing::debug!(seed, max_depth, "shader generated");

        Ok(GeneratedShader {
            seed,
            max_depth,
            source: assemble(&body),
        })
    }

    /// Body only, at an explicit depth.
    pub fn generate_body(&self, seed: u64, max_depth: u32) -> Result<String, GenerateError> {
        let mut rng = Random::new(seed);
        self.expressions.generate(&mut rng, max_depth)
    }
}
