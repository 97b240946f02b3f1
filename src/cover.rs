//! Cover-fit geometry for stretched background images.
//!
//! Scales an image uniformly until it covers a viewport on both axes, then
//! shifts it by an offset bias measured in source pixels. The image is
//! enlarged further when offset so the side opposite the shift never shows
//! an uncovered strip. Pure geometry: no allocations, no logging, `no_std`
//! compatible.
//!
//! # Example
//!
//! ```
//! use zencover::{CoverFit, Offset, Size};
//!
//! let layout = CoverFit::new(Size::new(1920.0, 1080.0), Size::new(1200.0, 800.0))
//!     .offset(Offset::new(100.0, 0.0))
//!     .compute()
//!     .unwrap();
//!
//! // 1.6× to cover, 1.2× more to absorb the 100px bias.
//! assert!((layout.width - 2304.0).abs() < 1e-9);
//! assert!((layout.height - 1536.0).abs() < 1e-9);
//! assert!(layout.covers(Size::new(1920.0, 1080.0)));
//! ```
//!
//! # Offset direction
//!
//! ```text
//!     offset.x > 0  →  image moves right, its left part shows
//!     offset.y > 0  →  image moves up,    its bottom part shows
//!
//!     source point under the viewport centre = (w/2 - x, h/2 + y)
//! ```

use core::fmt;

#[cfg(not(feature = "std"))]
#[allow(unused_imports)]
use num_traits::Float;

/// Width and height in CSS pixels.
///
/// Used both for the viewport (available display area) and for the natural
/// size of a loaded image.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Both axes finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        is_positive_finite(self.width) && is_positive_finite(self.height)
    }
}

/// Display area the image must cover.
pub type ViewportSize = Size;

/// Intrinsic pixel dimensions of the source image.
pub type NaturalSize = Size;

/// Bias away from dead-centre, in source-image pixels.
///
/// Each component must stay strictly inside half the image dimension on its
/// axis; see [`Offset::limit_for`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    /// No bias.
    pub const CENTER: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_center(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Exclusive bound on `|x|` and `|y|` for an image of the given size.
    pub fn limit_for(image: Size) -> Self {
        Self {
            x: image.width / 2.0,
            y: image.height / 2.0,
        }
    }
}

/// Box to apply to the image element: scaled size plus top/left position
/// relative to the container.
///
/// Offsets are zero or negative for a covering layout; the overflow is
/// clipped by the container.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RenderLayout {
    pub width: f64,
    pub height: f64,
    /// CSS `left`.
    pub offset_x: f64,
    /// CSS `top`.
    pub offset_y: f64,
}

impl RenderLayout {
    /// Right edge in container coordinates.
    pub fn right(&self) -> f64 {
        self.offset_x + self.width
    }

    /// Bottom edge in container coordinates.
    pub fn bottom(&self) -> f64 {
        self.offset_y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the layout leaves no part of `viewport` uncovered.
    ///
    /// Tolerates floating-point error of `1e-9` relative to the viewport, so
    /// a visible strip is caught however large the rendered image is. The far
    /// edge is compared as free space rather than `offset + size`, which
    /// would round away whole pixels on huge layouts.
    pub fn covers(&self, viewport: Size) -> bool {
        let tol_x = COVER_TOLERANCE * viewport.width;
        let tol_y = COVER_TOLERANCE * viewport.height;
        self.offset_x <= tol_x
            && self.offset_y <= tol_y
            && self.offset_x >= viewport.width - self.width - tol_x
            && self.offset_y >= viewport.height - self.height - tol_y
    }

    fn is_finite(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.offset_x.is_finite()
            && self.offset_y.is_finite()
    }
}

const COVER_TOLERANCE: f64 = 1e-9;

/// Builder-style front end for [`compute_layout`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use]
pub struct CoverFit {
    pub viewport: Size,
    pub image: Size,
    pub offset: Offset,
}

impl CoverFit {
    /// Centered cover of `image` over `viewport`.
    pub fn new(viewport: Size, image: Size) -> Self {
        Self {
            viewport,
            image,
            offset: Offset::CENTER,
        }
    }

    /// Set the offset bias.
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    /// Compute the layout.
    pub fn compute(&self) -> Result<RenderLayout, CoverError> {
        compute_layout(
            self.offset,
            self.viewport.width,
            self.viewport.height,
            self.image.width,
            self.image.height,
        )
    }
}

/// Compute the size and position that make an image cover a viewport.
///
/// Inputs are validated in order (viewport width, viewport height, image
/// width, image height, offset x, offset y) and the first failure is
/// returned. The result is deterministic: identical inputs produce
/// bit-identical layouts.
pub fn compute_layout(
    offset: Offset,
    viewport_w: f64,
    viewport_h: f64,
    image_w: f64,
    image_h: f64,
) -> Result<RenderLayout, CoverError> {
    check_dimension(Dimension::ViewportWidth, viewport_w)?;
    check_dimension(Dimension::ViewportHeight, viewport_h)?;
    check_dimension(Dimension::ImageWidth, image_w)?;
    check_dimension(Dimension::ImageHeight, image_h)?;

    let half_w = image_w / 2.0;
    let half_h = image_h / 2.0;
    check_offset(Axis::X, offset.x, half_w)?;
    check_offset(Axis::Y, offset.y, half_h)?;

    // The larger ratio covers both axes; the smaller would leave a strip.
    let ratio = (viewport_w / image_w).max(viewport_h / image_h);

    // Pixels left between the emphasis point and the far edge, expressed as
    // the enlargement needed to stretch them back to half the image.
    let space_left_x = half_w / (half_w - offset.x.abs());
    let space_left_y = half_h / (half_h - offset.y.abs());
    let extra = space_left_x.max(space_left_y) - 1.0;
    let grow = 1.0 + extra;

    // Floor at the viewport: absorbs the last-ulp loss of `image * (viewport / image)`.
    let width = (image_w * ratio * grow).max(viewport_w);
    let height = (image_h * ratio * grow).max(viewport_h);

    let free_w = viewport_w - width;
    let free_h = viewport_h - height;
    let shift_x = axis_shift(offset.x, ratio, free_w, grow);
    let shift_y = -axis_shift(offset.y, ratio, free_h, grow);

    let mut layout = RenderLayout {
        width,
        height,
        offset_x: free_w * (0.5 + shift_x),
        offset_y: free_h * (0.5 + shift_y),
    };
    if !layout.is_finite() {
        return Err(CoverError::LayoutOverflow);
    }
    // Near the offset limit the scaled size dwarfs the viewport and the
    // position loses whole fractions of a pixel. Keep both edges outside.
    layout.offset_x = layout.offset_x.clamp(free_w, 0.0);
    layout.offset_y = layout.offset_y.clamp(free_h, 0.0);
    Ok(layout)
}

/// Fraction of the free space to move by, relative to centre.
///
/// Free space is zero only when the image fits an axis exactly, which
/// implies no offset was applied.
fn axis_shift(offset: f64, ratio: f64, free: f64, grow: f64) -> f64 {
    if free == 0.0 {
        0.0
    } else {
        (offset * ratio / free) * grow
    }
}

fn check_dimension(dimension: Dimension, value: f64) -> Result<(), CoverError> {
    if is_positive_finite(value) {
        Ok(())
    } else {
        Err(CoverError::InvalidDimension { dimension, value })
    }
}

fn check_offset(axis: Axis, value: f64, limit: f64) -> Result<(), CoverError> {
    if value.is_finite() && value.abs() < limit {
        Ok(())
    } else {
        Err(CoverError::InvalidOffset { axis, value, limit })
    }
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Which input size was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    ViewportWidth,
    ViewportHeight,
    ImageWidth,
    ImageHeight,
}

impl Dimension {
    fn name(self) -> &'static str {
        match self {
            Self::ViewportWidth => "viewport width",
            Self::ViewportHeight => "viewport height",
            Self::ImageWidth => "image width",
            Self::ImageHeight => "image height",
        }
    }
}

/// Offset axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Cover layout computation error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CoverError {
    /// A viewport or image dimension is non-finite, zero, or negative.
    InvalidDimension { dimension: Dimension, value: f64 },
    /// An offset component is non-finite or not strictly inside
    /// `limit` (half the image dimension on that axis).
    InvalidOffset { axis: Axis, value: f64, limit: f64 },
    /// Valid inputs whose scaled result does not fit in an `f64`.
    LayoutOverflow,
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { dimension, value } => write!(
                f,
                "{} must be finite and greater than zero, got {value}",
                dimension.name()
            ),
            Self::InvalidOffset { axis, value, limit } => {
                let axis = match axis {
                    Axis::X => 'x',
                    Axis::Y => 'y',
                };
                write!(
                    f,
                    "offset {axis} = {value} must be finite with magnitude below {limit} (half the image)"
                )
            }
            Self::LayoutOverflow => f.write_str("cover layout overflowed f64 range"),
        }
    }
}

impl core::error::Error for CoverError {}
