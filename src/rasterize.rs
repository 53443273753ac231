use crate::{EPSILON, GradientRamp, PixelBuffer, Point, Scalar, Size, deg2rad};
use std::{fmt, io};

/// Largest accepted texture side
pub const MAX_RESOLUTION: usize = 8192;

/// Reference axis of a linear gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Selects which rasterizer processes the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DrawMode {
    Axis(Axis),
    Radial,
}

/// Frozen configuration consumed by the rasterizers
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GradientParams {
    /// Output texture size, each side within [1, `MAX_RESOLUTION`]
    pub resolution: Size,
    /// Rasterizer selected by [`rasterize`]
    pub draw_mode: DrawMode,
    /// Gradient angle in degrees, unrestricted
    pub angle: Scalar,
    /// Shift along the gradient axis as a fraction of the projected span
    pub offset: Scalar,
    /// Ramp repeat frequency, the sign flips the gradient direction
    ///
    /// Zero collapses the texture to the ramp color at position 0 (the
    /// sign of zero is taken as positive, so the direction stays a unit
    /// vector).
    pub tile: Scalar,
    /// Wrap out of range ramp positions instead of clamping them
    pub repeat: bool,
    /// Radial mode: scale of the gradient circle, must be positive
    pub radius: Scalar,
    /// Radial mode: center displacement as a fraction of the half extent
    pub center_offset: Point,
    /// Radial mode: per channel power exponent, effective range [0, 10]
    pub radial_falloff: Scalar,
}

impl Default for GradientParams {
    fn default() -> Self {
        Self {
            resolution: Size {
                width: 256,
                height: 256,
            },
            draw_mode: DrawMode::Axis(Axis::Vertical),
            angle: 0.0,
            offset: 0.0,
            tile: 1.0,
            repeat: true,
            radius: 1.0,
            center_offset: Point::new(0.0, 0.0),
            radial_falloff: 1.0,
        }
    }
}

impl GradientParams {
    fn validate(&self) -> Result<(), TextureError> {
        let Size { width, height } = self.resolution;
        if width < 1 || width > MAX_RESOLUTION || height < 1 || height > MAX_RESOLUTION {
            return Err(TextureError::InvalidResolution { width, height });
        }
        let scalars = [
            self.angle,
            self.offset,
            self.tile,
            self.radius,
            self.center_offset.x(),
            self.center_offset.y(),
            self.radial_falloff,
        ];
        if scalars.iter().any(|value| !value.is_finite()) {
            return Err(TextureError::DegenerateGeometry {
                reason: "all scalar parameters must be finite".to_owned(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureError {
    InvalidResolution { width: usize, height: usize },
    DegenerateGeometry { reason: String },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<TextureError> for io::Error {
    fn from(error: TextureError) -> Self {
        Self::new(io::ErrorKind::InvalidData, error)
    }
}

impl std::error::Error for TextureError {}

/// Map gradient position according to the wrap policy
///
/// With `repeat` set the position cycles over [0, 1) whatever its sign,
/// otherwise it is passed through unchanged and ramp evaluation clamps
/// it to the boundary keys.
#[inline]
pub fn wrap(position: Scalar, repeat: bool) -> Scalar {
    if repeat {
        position.rem_euclid(1.0)
    } else {
        position
    }
}

/// Sign of the value, with zero counted as positive
fn sign_or_one(value: Scalar) -> Scalar {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Distance across the texture along the gradient axis
///
/// The angle is folded into the first quadrant, the texture extent is
/// projected on both axes and the tighter bound wins: past 45 degrees
/// one of the projections grows beyond the texture, the other shrinks.
fn projection_span(axis: Axis, width: Scalar, height: Scalar, angle: Scalar) -> Scalar {
    let mut folded = angle.abs();
    if folded > 90.0 {
        folded = 180.0 - folded;
    }
    let (major, minor) = match axis {
        Axis::Vertical => (height, width),
        Axis::Horizontal => (width, height),
    };
    let major_dist = (major / deg2rad(folded).cos()).abs();
    let minor_dist = (minor / deg2rad(90.0 - folded).cos()).abs();
    major_dist.min(minor_dist).max(EPSILON)
}

/// Unit direction of the gradient
///
/// The unfolded angle rotates the reference axis, the sign of `tile`
/// flips the result.
fn direction(axis: Axis, angle: Scalar, tile: Scalar) -> Point {
    let reference = match axis {
        Axis::Vertical => Point::new(0.0, 1.0),
        Axis::Horizontal => Point::new(1.0, 0.0),
    };
    sign_or_one(tile) * reference.rotate(deg2rad(-angle))
}

/// Rasterize a linear gradient along an arbitrary angle
///
/// `axis` picks the reference axis the angle is measured from; the
/// vertical and horizontal draw modes differ only in this choice. Pixel
/// row 0 is the bottom row of the texture.
pub fn rasterize_axis(
    params: &GradientParams,
    ramp: &GradientRamp,
    axis: Axis,
) -> Result<PixelBuffer, TextureError> {
    params.validate()?;
    let Size { width, height } = params.resolution;
    let (w, h) = (width as Scalar, height as Scalar);

    let dist = projection_span(axis, w, h, params.angle);
    let dir = direction(axis, params.angle, params.tile);
    let tex_offset = params.offset * dist;
    let tile = params.tile.abs();
    // when the direction is negative along an axis the projection origin
    // moves to the opposite edge
    let x_mod = if dir.x() < 0.0 { w } else { 0.0 };
    let y_mod = if dir.y() < 0.0 { h } else { 0.0 };
    tracing::debug!(?axis, dist, dir = ?dir, "axis gradient geometry");

    let repeat = params.repeat;
    Ok(PixelBuffer::new_with(height, width, |row, col| {
        let pixel = Point::new(col as Scalar - x_mod, row as Scalar - y_mod);
        let position = ((dir.dot(pixel) + tex_offset) / dist) * tile;
        ramp.evaluate(wrap(position, repeat))
    }))
}

/// Rasterize a gradient radiating from a possibly offset center
///
/// After ramp evaluation every channel is raised to the falloff
/// exponent independently. Pixel row 0 is the bottom row of the
/// texture.
pub fn rasterize_radial(
    params: &GradientParams,
    ramp: &GradientRamp,
) -> Result<PixelBuffer, TextureError> {
    params.validate()?;
    if params.radius <= 0.0 {
        return Err(TextureError::DegenerateGeometry {
            reason: format!("radius must be positive, got {}", params.radius),
        });
    }
    let Size { width, height } = params.resolution;
    let (w, h) = (width as Scalar, height as Scalar);

    let half = Point::new((w - 1.0) * 0.5, (h - 1.0) * 0.5);
    let center = half
        + Point::new(
            params.center_offset.x() * half.x(),
            params.center_offset.y() * half.y(),
        );
    // a 1x1 texture collapses the half extent to zero, keep the divisor positive
    let local_radius = (half.x() / params.radius).max(EPSILON);
    let falloff = params.radial_falloff.clamp(0.0, 10.0) as f32;
    tracing::debug!(center = ?center, local_radius, falloff, "radial gradient geometry");

    let repeat = params.repeat;
    Ok(PixelBuffer::new_with(height, width, |row, col| {
        let pixel_dist = center.dist(Point::new(col as Scalar, row as Scalar));
        // +1 because even sized textures come just short of the center
        let position = (pixel_dist + 1.0) / local_radius;
        ramp.evaluate(wrap(position, repeat)).falloff(falloff)
    }))
}

/// Rasterize with the rasterizer selected by the draw mode
pub fn rasterize(
    params: &GradientParams,
    ramp: &GradientRamp,
) -> Result<PixelBuffer, TextureError> {
    match params.draw_mode {
        DrawMode::Axis(axis) => rasterize_axis(params, ramp, axis),
        DrawMode::Radial => rasterize_radial(params, ramp),
    }
}
