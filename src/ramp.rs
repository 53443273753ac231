use crate::{Color, Scalar};
use std::cmp::Ordering;

/// Specifies the color at a particular parameter offset of the ramp
///
/// The alpha channel of `color` is not sampled during evaluation, alpha
/// is keyed separately with [`AlphaKey`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorKey {
    pub position: Scalar,
    pub color: Color,
}

impl ColorKey {
    pub fn new(position: Scalar, color: Color) -> Self {
        Self { position, color }
    }
}

/// Specifies the alpha at a particular parameter offset of the ramp
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaKey {
    pub position: Scalar,
    pub alpha: f32,
}

impl AlphaKey {
    pub fn new(position: Scalar, alpha: f32) -> Self {
        Self { position, alpha }
    }
}

/// Common interface of ramp keys used by the evaluator
trait Key {
    type Value: Copy;

    fn position(&self) -> Scalar;
    fn value(&self) -> Self::Value;
    fn lerp(v0: Self::Value, v1: Self::Value, ratio: f32) -> Self::Value;
}

impl Key for ColorKey {
    type Value = Color;

    fn position(&self) -> Scalar {
        self.position
    }

    fn value(&self) -> Self::Value {
        self.color
    }

    fn lerp(v0: Self::Value, v1: Self::Value, ratio: f32) -> Self::Value {
        v0.lerp(v1, ratio)
    }
}

impl Key for AlphaKey {
    type Value = f32;

    fn position(&self) -> Scalar {
        self.position
    }

    fn value(&self) -> Self::Value {
        self.alpha
    }

    fn lerp(v0: Self::Value, v1: Self::Value, ratio: f32) -> Self::Value {
        v0 * (1.0 - ratio) + v1 * ratio
    }
}

fn sort_keys<K: Key>(keys: &mut [K]) {
    keys.sort_by(|k0, k1| {
        k0.position()
            .partial_cmp(&k1.position())
            .unwrap_or(Ordering::Greater)
    });
}

/// Value at `t` interpolated between the two bracketing keys, or the
/// boundary key value when `t` falls outside of the keyed range.
fn key_at<K: Key>(keys: &[K], t: Scalar) -> Option<K::Value> {
    let index = keys.binary_search_by(|key| {
        if key.position() < t {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    });
    let index = match index {
        Ok(index) => index,
        Err(index) => index,
    };
    let size = keys.len();
    if size == 0 {
        None
    } else if index == 0 {
        Some(keys[index].value())
    } else if index == size {
        Some(keys[size - 1].value())
    } else {
        let k0 = &keys[index - 1];
        let k1 = &keys[index];
        let ratio = (t - k0.position()) / (k1.position() - k0.position());
        Some(K::lerp(k0.value(), k1.value(), ratio as f32))
    }
}

/// Color ramp mapping a normalized position in [0, 1] to a color
///
/// Color and alpha are keyed independently, the way authoring tools
/// expose gradients. Keys are sorted by position at construction time.
#[derive(Debug, Clone)]
pub struct GradientRamp {
    color_keys: Vec<ColorKey>,
    alpha_keys: Vec<AlphaKey>,
}

impl GradientRamp {
    pub fn new(mut color_keys: Vec<ColorKey>, mut alpha_keys: Vec<AlphaKey>) -> Self {
        sort_keys(&mut color_keys);
        sort_keys(&mut alpha_keys);
        Self {
            color_keys,
            alpha_keys,
        }
    }

    /// Build a ramp from combined keys
    ///
    /// Each entry contributes a color key and an alpha key, the alpha
    /// taken from the color's alpha channel.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = (Scalar, Color)>,
    {
        let (color_keys, alpha_keys) = keys
            .into_iter()
            .map(|(position, color)| {
                (
                    ColorKey::new(position, color),
                    AlphaKey::new(position, color.alpha()),
                )
            })
            .unzip();
        Self::new(color_keys, alpha_keys)
    }

    /// Evaluate ramp color at the normalized `position`
    ///
    /// Positions outside [0, 1] clamp to the boundary keys. A ramp with
    /// no keys at all evaluates to transparent black; a missing alpha
    /// track alone defaults to fully opaque.
    pub fn evaluate(&self, position: Scalar) -> Color {
        if self.color_keys.is_empty() && self.alpha_keys.is_empty() {
            return Color::TRANSPARENT;
        }
        let color = key_at(&self.color_keys, position).unwrap_or(Color::TRANSPARENT);
        let alpha = key_at(&self.alpha_keys, position).unwrap_or(1.0);
        Color::new(color.red(), color.green(), color.blue(), alpha)
    }
}

impl Default for GradientRamp {
    /// Opaque black to white ramp
    fn default() -> Self {
        Self::from_keys([
            (0.0, Color::new(0.0, 0.0, 0.0, 1.0)),
            (1.0, Color::new(1.0, 1.0, 1.0, 1.0)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_evaluate() {
        let ramp = GradientRamp::from_keys([
            (0.0, Color::new(1.0, 0.0, 0.0, 1.0)),
            (0.5, Color::new(0.0, 1.0, 0.0, 1.0)),
            (1.0, Color::new(0.0, 0.0, 1.0, 1.0)),
        ]);
        assert_eq!(ramp.evaluate(-1.0), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(ramp.evaluate(0.25), Color::new(0.5, 0.5, 0.0, 1.0));
        assert_eq!(ramp.evaluate(0.75), Color::new(0.0, 0.5, 0.5, 1.0));
        assert_eq!(ramp.evaluate(2.0), Color::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_keys_sorted() {
        // keys provided out of order evaluate the same as sorted ones
        let ramp = GradientRamp::from_keys([
            (1.0, Color::new(1.0, 1.0, 1.0, 1.0)),
            (0.0, Color::new(0.0, 0.0, 0.0, 1.0)),
        ]);
        assert_approx_eq!(ramp.evaluate(0.25).red(), 0.25);
        assert_approx_eq!(ramp.evaluate(0.75).red(), 0.75);
    }

    #[test]
    fn test_alpha_keyed_independently() {
        let ramp = GradientRamp::new(
            vec![
                ColorKey::new(0.0, Color::new(1.0, 0.0, 0.0, 0.25)),
                ColorKey::new(1.0, Color::new(1.0, 0.0, 0.0, 0.75)),
            ],
            vec![AlphaKey::new(0.0, 1.0), AlphaKey::new(0.5, 0.0)],
        );
        // color key alpha channel has no effect on the result
        let c = ramp.evaluate(0.25);
        assert_approx_eq!(c.red(), 1.0);
        assert_approx_eq!(c.alpha(), 0.5);
        // past the last alpha key the boundary value applies
        assert_approx_eq!(ramp.evaluate(0.9).alpha(), 0.0);
    }

    #[test]
    fn test_empty_ramp() {
        let empty = GradientRamp::new(Vec::new(), Vec::new());
        assert_eq!(empty.evaluate(0.0), Color::TRANSPARENT);
        assert_eq!(empty.evaluate(0.5), Color::TRANSPARENT);

        let color_only = GradientRamp::new(
            vec![ColorKey::new(0.0, Color::new(0.5, 0.5, 0.5, 0.0))],
            Vec::new(),
        );
        assert_eq!(color_only.evaluate(0.5), Color::new(0.5, 0.5, 0.5, 1.0));

        let alpha_only = GradientRamp::new(Vec::new(), vec![AlphaKey::new(0.0, 0.5)]);
        assert_eq!(alpha_only.evaluate(0.5), Color::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_single_key() {
        let ramp = GradientRamp::from_keys([(0.5, Color::new(0.25, 0.5, 0.75, 1.0))]);
        for t in [-1.0, 0.0, 0.5, 1.0, 2.0] {
            assert_eq!(ramp.evaluate(t), Color::new(0.25, 0.5, 0.75, 1.0));
        }
    }
}
