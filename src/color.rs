use std::{
    fmt,
    ops::{Add, Mul},
    str::FromStr,
};

/// RGBA color with f32 channels in the [0, 1] range
///
/// Alpha is straight (not premultiplied) and channels are kept in the
/// same space the ramp keys were authored in, no gamma conversion is
/// applied anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color([f32; 4]);

impl Color {
    pub const TRANSPARENT: Self = Color([0.0, 0.0, 0.0, 0.0]);

    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self([r, g, b, a])
    }

    #[inline]
    pub fn red(self) -> f32 {
        self.0[0]
    }

    #[inline]
    pub fn green(self) -> f32 {
        self.0[1]
    }

    #[inline]
    pub fn blue(self) -> f32 {
        self.0[2]
    }

    #[inline]
    pub fn alpha(self) -> f32 {
        self.0[3]
    }

    /// Linear interpolation between self and other colors.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        other * t + self * (1.0 - t)
    }

    /// Raise every channel (alpha included) to the `exponent` power.
    ///
    /// `powf(0.0, 0.0)` is 1.0, so a zero exponent maps any color to
    /// opaque white.
    #[inline]
    pub fn falloff(self, exponent: f32) -> Self {
        let Self([r, g, b, a]) = self;
        Self([
            r.powf(exponent),
            g.powf(exponent),
            b.powf(exponent),
            a.powf(exponent),
        ])
    }

    /// Restrict all channels to the [0, 1] range
    #[inline]
    pub fn clamp(self) -> Self {
        let Self([r, g, b, a]) = self;
        Self([
            r.clamp(0.0, 1.0),
            g.clamp(0.0, 1.0),
            b.clamp(0.0, 1.0),
            a.clamp(0.0, 1.0),
        ])
    }

    /// Convert color to an RGBA list of bytes
    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        Rgba8::from(self).to_rgba()
    }

    /// Relative luminance of the color (alpha is ignored)
    pub fn luma(self) -> f32 {
        let Self([r, g, b, _]) = self;
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }
}

impl Add<Self> for Color {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self::Output {
        let Self([r0, g0, b0, a0]) = self;
        let Self([r1, g1, b1, a1]) = other;
        Self([r0 + r1, g0 + g1, b0 + b1, a0 + a1])
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f32) -> Self::Output {
        let Self([r, g, b, a]) = self;
        Self([r * scale, g * scale, b * scale, a * scale])
    }
}

impl From<Rgba8> for Color {
    fn from(color: Rgba8) -> Self {
        let [r, g, b, a] = color.to_rgba();
        Self([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        Ok(Rgba8::from_str(color)?.into())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rgba8::from(*self).fmt(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// RGBA pixel packed as four bytes, in memory order red first
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable,
)]
#[repr(transparent)]
pub struct Rgba8([u8; 4]);

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        self.0
    }
}

impl From<Color> for Rgba8 {
    fn from(color: Color) -> Self {
        let Color([r, g, b, a]) = color.clamp();
        Self([
            (r * 255.0 + 0.5) as u8,
            (g * 255.0 + 0.5) as u8,
            (b * 255.0 + 0.5) as u8,
            (a * 255.0 + 0.5) as u8,
        ])
    }
}

impl fmt::Debug for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for Rgba8 {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && (color.len() == 7 || color.len() == 9) {
            // #RRGGBB(AA)
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok(digit(pair[0])? << 4 | digit(pair[1])?));
            Ok(Rgba8::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(255))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[derive(Debug, Clone)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_rgba8_parse() -> Result<(), ColorError> {
        assert_eq!(Rgba8::new(1, 2, 3, 4), "#01020304".parse::<Rgba8>()?);
        assert_eq!(Rgba8::new(170, 187, 204, 255), "#aabbcc".parse::<Rgba8>()?);
        assert_eq!(Rgba8::new(0, 0, 0, 255), "#000000".parse::<Rgba8>()?);
        assert!("#0102030".parse::<Rgba8>().is_err());
        assert!("01020304".parse::<Rgba8>().is_err());
        Ok(())
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: Rgba8 = "#01020304".parse()?;
        assert_eq!(c, Rgba8::new(1, 2, 3, 4));
        assert_eq!(c.to_string(), "#01020304");

        let c: Rgba8 = "#010203".parse()?;
        assert_eq!(c, Rgba8::new(1, 2, 3, 255));
        assert_eq!(c.to_string(), "#010203");

        Ok(())
    }

    #[test]
    fn test_conversion() -> Result<(), ColorError> {
        let c: Rgba8 = "#ff804010".parse()?;
        let f: Color = c.into();
        let r: Rgba8 = f.into();
        assert_eq!(c, r);
        Ok(())
    }

    #[test]
    fn test_lerp() {
        let c0 = Color::new(0.0, 1.0, 0.0, 1.0);
        let c1 = Color::new(1.0, 0.0, 0.5, 0.0);
        let mid = c0.lerp(c1, 0.5);
        assert_approx_eq!(mid.red(), 0.5);
        assert_approx_eq!(mid.green(), 0.5);
        assert_approx_eq!(mid.blue(), 0.25);
        assert_approx_eq!(mid.alpha(), 0.5);
        assert_eq!(c0.lerp(c1, 0.0), c0);
        assert_eq!(c0.lerp(c1, 1.0), c1);
    }

    #[test]
    fn test_falloff() {
        let c = Color::new(0.25, 0.5, 1.0, 1.0);
        let f = c.falloff(2.0);
        assert_approx_eq!(f.red(), 0.0625, 1e-6);
        assert_approx_eq!(f.green(), 0.25, 1e-6);
        assert_approx_eq!(f.blue(), 1.0, 1e-6);
        assert_approx_eq!(f.alpha(), 1.0, 1e-6);

        // pow(0, 0) follows the IEEE convention
        let z = Color::TRANSPARENT.falloff(0.0);
        assert_eq!(z, Color::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_clamp_to_rgba() {
        let c = Color::new(-0.5, 1.5, 0.5, 2.0);
        assert_eq!(c.to_rgba(), [0, 255, 128, 255]);
    }

    #[test]
    fn test_luma() {
        assert_approx_eq!(Color::new(1.0, 1.0, 1.0, 1.0).luma(), 1.0, 1e-6);
        assert_approx_eq!(Color::TRANSPARENT.luma(), 0.0);
    }
}
