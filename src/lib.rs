//! Small library that synthesizes gradient textures on the CPU.
//!
//! Main features:
//!  - Color ramps with independently keyed color and alpha
//!  - Linear gradients along an arbitrary angle with tiling and offset
//!  - Radial gradients with center offset and per-channel power falloff
//!  - BMP and PNG output
//!
#![deny(warnings)]

mod color;
mod geometry;
mod image;
mod ramp;
mod rasterize;
mod utils;

pub use color::{Color, ColorError, Rgba8};
pub use geometry::{EPSILON, PI, Point, Scalar, deg2rad};
pub use image::{Image, ImageIter, ImageOwned, PixelBuffer, Shape, Size};
pub use ramp::{AlphaKey, ColorKey, GradientRamp};
pub use rasterize::{
    Axis, DrawMode, GradientParams, MAX_RESOLUTION, TextureError, rasterize, rasterize_axis,
    rasterize_radial, wrap,
};
