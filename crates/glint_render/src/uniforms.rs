//! Per-frame uniform block
//!
//! Matches `time_params: vec4<f32>` at `@group(0) @binding(0)` in the
//! generated fragment stage.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Read by the program as `sin_time`.
    pub sin_time: f32,
    /// Read by the program as `cos_time`.
    pub cos_time: f32,
    _padding: [f32; 2],
}

impl FrameUniforms {
    /// Values for `elapsed` seconds since the program was loaded, both on `[0, 1]`.
    pub fn at(elapsed: f32) -> Self {
        let phase = elapsed * 0.5;
        Self {
            sin_time: 0.5 + 0.5 * phase.sin(),
            cos_time: 0.5 + 0.5 * phase.cos(),
            _padding: [0.0; 2],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::at(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_one_vec4() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 16);
        assert_eq!(FrameUniforms::default().as_bytes().len(), 16);
    }

    #[test]
    fn test_start_values() {
        let u = FrameUniforms::at(0.0);
        assert_eq!(u.sin_time, 0.5);
        assert_eq!(u.cos_time, 1.0);
    }

    #[test]
    fn test_quarter_period() {
        // sin(t / 2) peaks at t = pi
        let u = FrameUniforms::at(std::f32::consts::PI);
        assert!((u.sin_time - 1.0).abs() < 1e-6);
        assert!((u.cos_time - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_values_stay_in_unit_range() {
        for step in 0..1000 {
            let u = FrameUniforms::at(step as f32 * 0.037);
            assert!((0.0..=1.0).contains(&u.sin_time));
            assert!((0.0..=1.0).contains(&u.cos_time));
        }
    }

    #[test]
    fn test_bytes_follow_field_order() {
        let u = FrameUniforms::at(0.0);
        let bytes = u.as_bytes();
        assert_eq!(&bytes[0..4], &0.5f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[8..16], &[0u8; 8]);
    }
}
