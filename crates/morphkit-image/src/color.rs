/// Fixed-point RGBA color with 16 bits per channel.
///
/// Channel values are unsigned fixed-point in `[0, u16::MAX]`. All blending
/// arithmetic saturates at the channel maximum instead of wrapping, so a
/// weighted sum of many contributions can never produce a darker pixel than
/// any of its inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba64 {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Alpha channel.
    pub a: u16,
}

impl Rgba64 {
    /// Fully transparent black, the value of unwritten pixels.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Create a new color from channel values.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Scale every channel by `weight`, rounding half-up.
    ///
    /// Results above the channel maximum saturate to `u16::MAX`, negative
    /// results clamp to zero; the operation never wraps.
    ///
    /// # Examples
    ///
    /// ```
    /// use morphkit_image::Rgba64;
    ///
    /// let c = Rgba64::new(0, 0x1000, 0x2000, 0x1000);
    /// assert_eq!(c.scale(16.0), Rgba64::new(0, 65535, 65535, 65535));
    /// ```
    pub fn scale(self, weight: f64) -> Self {
        Self {
            r: scale_channel(self.r, weight),
            g: scale_channel(self.g, weight),
            b: scale_channel(self.b, weight),
            a: scale_channel(self.a, weight),
        }
    }

    /// Per-channel sum, saturating at the channel maximum.
    pub fn saturating_add(self, other: Self) -> Self {
        Self {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            a: self.a.saturating_add(other.a),
        }
    }

    /// Linear interpolation `self * weight + other * (1 - weight)` through
    /// the saturating add.
    pub fn lerp(self, other: Self, weight: f64) -> Self {
        self.scale(weight).saturating_add(other.scale(1.0 - weight))
    }
}

/// Scale a single channel, clamping the rounded result into `[0, u16::MAX]`.
fn scale_channel(value: u16, weight: f64) -> u16 {
    let scaled = f64::from(value) * weight + 0.5;
    if scaled >= f64::from(u16::MAX) + 1.0 {
        u16::MAX
    } else if scaled < 1.0 {
        0
    } else {
        scaled as u16
    }
}
