//! Background stretch lifecycle: settings, image swaps, fade-in, and cleanup.
//!
//! [`Stretcher`] is the caller-owned state for one stretched background. The
//! host reports what happened (a new source was requested, an image finished
//! loading, the viewport changed, a fade-in finished) and applies what comes
//! back. No DOM, no timers, no allocation.
//!
//! # Example
//!
//! ```
//! use zencover::{Size, Target};
//! use zencover::stretch::{FadeSpeed, LoadOutcome, StretchOptions, Stretcher};
//!
//! let mut bg = Stretcher::new(Target::Body);
//! let first = bg
//!     .stretch("beach.jpg", StretchOptions::new().speed(FadeSpeed::Fast))
//!     .unwrap();
//! assert!(first.container.is_some()); // host creates the wrapper once
//!
//! let viewport = Size::new(1920.0, 1080.0);
//! let LoadOutcome::Show { layout, fade, .. } = bg
//!     .image_loaded(first.id, Size::new(1200.0, 800.0), viewport)
//!     .unwrap()
//! else {
//!     panic!("newest image is never stale");
//! };
//! assert_eq!(fade.duration_ms(), 200);
//! assert!(layout.covers(viewport));
//!
//! // Swap the background: the old image retires once the new one faded in.
//! let second = bg.stretch("forest.jpg", StretchOptions::new()).unwrap();
//! bg.image_loaded(second.id, Size::new(800.0, 1200.0), viewport).unwrap();
//! let retired = bg.fade_complete(second.id).unwrap();
//! assert_eq!(retired.iter().collect::<Vec<_>>(), vec![first.id]);
//! ```

use core::fmt;
use core::ops::Range;
use core::time::Duration;

use tracing::{debug, trace, warn};

use crate::cover::{CoverError, CoverFit, Offset, RenderLayout, Size};

/// Base CSS for every background image element before it fades in.
pub const IMAGE_BASE_CSS: &str =
    "position: absolute; display: none; margin: 0; padding: 0; border: none; z-index: -999999";

/// Where the stretched background lives.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Target {
    /// Behind the whole page, pinned to the window.
    #[default]
    Body,
    /// Inside a block-level element, clipped to its padding box.
    Element,
}

impl Target {
    /// Style for the wrapper that clips the image.
    pub fn container_style(self) -> ContainerStyle {
        match self {
            Self::Body => ContainerStyle {
                position: ElementPosition::Fixed,
                z_index: -999_999,
            },
            Self::Element => ContainerStyle {
                position: ElementPosition::Absolute,
                z_index: -999_998,
            },
        }
    }

    /// Area the image has to cover.
    ///
    /// The body uses its content box; an element uses its inner box
    /// (content plus padding), since the wrapper is absolutely positioned
    /// against the padding edge.
    pub fn viewport(self, content: Size, padding: Insets) -> Size {
        match self {
            Self::Body => content,
            Self::Element => Size::new(
                content.width + padding.left + padding.right,
                content.height + padding.top + padding.bottom,
            ),
        }
    }
}

/// Box padding in CSS pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// CSS `position` values accepted for the host element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ElementPosition {
    #[default]
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl ElementPosition {
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

/// Fade-in duration for a freshly loaded image.
///
/// Named speeds follow the usual 200/400/600 ms presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FadeSpeed {
    /// Show immediately.
    #[default]
    Instant,
    Fast,
    Normal,
    Slow,
    Millis(u32),
}

impl FadeSpeed {
    pub const fn duration_ms(self) -> u32 {
        match self {
            Self::Instant => 0,
            Self::Fast => 200,
            Self::Normal => 400,
            Self::Slow => 600,
            Self::Millis(ms) => ms,
        }
    }

    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.duration_ms() as u64)
    }

    pub const fn is_instant(self) -> bool {
        self.duration_ms() == 0
    }
}

/// Effective settings for a stretched background.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct StretchSettings {
    /// Bias away from centre, in source pixels.
    pub offset: Offset,
    /// Fade-in once the image has loaded.
    pub speed: FadeSpeed,
    /// `position` applied to the host element (element targets only).
    pub el_position: ElementPosition,
}

impl StretchSettings {
    /// Overlay the fields `options` sets; everything else is kept.
    pub fn apply(&mut self, options: &StretchOptions) {
        if let Some(x) = options.offset_x {
            self.offset.x = x;
        }
        if let Some(y) = options.offset_y {
            self.offset.y = y;
        }
        if let Some(speed) = options.speed {
            self.speed = speed;
        }
        if let Some(pos) = options.el_position {
            self.el_position = pos;
        }
    }

    /// Copy with `options` overlaid.
    pub fn merged(mut self, options: &StretchOptions) -> Self {
        self.apply(options);
        self
    }
}

/// Partial settings for one [`Stretcher::stretch`] call.
///
/// Unset fields keep whatever the previous call left in place, so a second
/// call that only changes the speed keeps the earlier offset.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
#[must_use]
pub struct StretchOptions {
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub speed: Option<FadeSpeed>,
    pub el_position: Option<ElementPosition>,
}

impl StretchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both offset components.
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset_x = Some(offset.x);
        self.offset_y = Some(offset.y);
        self
    }

    pub fn offset_x(mut self, x: f64) -> Self {
        self.offset_x = Some(x);
        self
    }

    pub fn offset_y(mut self, y: f64) -> Self {
        self.offset_y = Some(y);
        self
    }

    pub fn speed(mut self, speed: FadeSpeed) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn el_position(mut self, position: ElementPosition) -> Self {
        self.el_position = Some(position);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Wrapper element style. Besides `position` and `z-index` the wrapper is
/// always pinned to the top-left, clips overflow, has no margin or padding,
/// and fills its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContainerStyle {
    pub position: ElementPosition,
    pub z_index: i32,
}

impl fmt::Display for ContainerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left: 0; top: 0; position: {}; overflow: hidden; z-index: {}; \
             margin: 0; padding: 0; width: 100%; height: 100%",
            self.position.as_css(),
            self.z_index
        )
    }
}

/// Style for the host element of an [`Target::Element`] background.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementStyle {
    pub position: ElementPosition,
}

impl fmt::Display for ElementStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position: {}; background: none", self.position.as_css())
    }
}

/// CSS box for a computed layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayoutCss(pub RenderLayout);

impl fmt::Display for LayoutCss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = &self.0;
        write!(
            f,
            "left: {}px; top: {}px; width: {}px; height: {}px",
            l.offset_x, l.offset_y, l.width, l.height
        )
    }
}

/// Identifies one background image element. Ids increase with every
/// [`Stretcher::stretch`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the host must do after [`Stretcher::stretch`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StretchRequest {
    /// Id for the new image element (styled with [`IMAGE_BASE_CSS`]).
    pub id: ImageId,
    /// Present on the first call only: create the wrapper with this style.
    pub container: Option<ContainerStyle>,
    /// Present for element targets: restyle the host element.
    pub element: Option<ElementStyle>,
}

/// Result of [`Stretcher::image_loaded`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// Size the image to `layout` and fade it in over `fade`.
    Show {
        id: ImageId,
        layout: RenderLayout,
        fade: FadeSpeed,
    },
    /// A newer image was requested since this one. Leave it hidden; it is
    /// removed with the next retirement.
    Stale { id: ImageId },
}

/// Layout for the visible image after a viewport change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resized {
    pub id: ImageId,
    pub layout: RenderLayout,
}

/// Image elements the host should now remove.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Retired {
    ids: Range<u64>,
}

impl Retired {
    pub fn iter(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.ids.clone().map(ImageId)
    }

    pub fn len(&self) -> usize {
        (self.ids.end - self.ids.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.ids.contains(&id.0)
    }
}

impl IntoIterator for Retired {
    type Item = ImageId;
    type IntoIter = core::iter::Map<Range<u64>, fn(u64) -> ImageId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.map(ImageId as fn(u64) -> ImageId)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Shown {
    id: ImageId,
    natural: Size,
}

/// Caller-owned state for one stretched background.
///
/// Tracks the effective settings, the newest requested image, the newest
/// image that finished loading, and which older images still await
/// removal. Every image id below the visible one is retiring.
#[derive(Clone, Debug, PartialEq)]
pub struct Stretcher {
    target: Target,
    settings: StretchSettings,
    has_container: bool,
    next_id: u64,
    pending: Option<ImageId>,
    shown: Option<Shown>,
    /// Lowest id not yet handed out in a [`Retired`].
    oldest: u64,
}

impl Stretcher {
    pub fn new(target: Target) -> Self {
        Self::with_settings(target, StretchSettings::default())
    }

    /// Start from explicit settings instead of the defaults.
    pub fn with_settings(target: Target, settings: StretchSettings) -> Self {
        Self {
            target,
            settings,
            has_container: false,
            next_id: 0,
            pending: None,
            shown: None,
            oldest: 0,
        }
    }

    /// Request a new background image.
    ///
    /// Settings from earlier calls act as defaults for `options`. Every image
    /// that already exists starts retiring; it is removed once the new image
    /// has faded in.
    pub fn stretch(
        &mut self,
        source: &str,
        options: StretchOptions,
    ) -> Result<StretchRequest, StretchError> {
        if source.trim().is_empty() {
            return Err(StretchError::EmptySource);
        }
        self.settings.apply(&options);

        let container = if self.has_container {
            None
        } else {
            self.has_container = true;
            Some(self.target.container_style())
        };
        let element = match self.target {
            Target::Body => None,
            Target::Element => Some(ElementStyle {
                position: self.settings.el_position,
            }),
        };

        let id = ImageId(self.next_id);
        self.next_id += 1;
        if let Some(prev) = self.pending.replace(id) {
            debug!(superseded = %prev, "pending image superseded before load");
        }
        debug!(
            image = %id,
            source,
            target = ?self.target,
            retiring = id.0 - self.oldest,
            "stretch requested"
        );

        Ok(StretchRequest {
            id,
            container,
            element,
        })
    }

    /// Report that image `id` loaded with the given natural size.
    ///
    /// Only the newest requested image is shown; older ones come back as
    /// [`LoadOutcome::Stale`]. A repeated load of the live image shows it
    /// again with its recorded size. Ids never issued here fail with
    /// [`StretchError::UnknownImage`]. A layout error leaves the image
    /// pending.
    pub fn image_loaded(
        &mut self,
        id: ImageId,
        natural: Size,
        viewport: Size,
    ) -> Result<LoadOutcome, StretchError> {
        if id.0 >= self.next_id {
            return Err(StretchError::UnknownImage(id));
        }
        if let Some(shown) = self.shown.filter(|s| s.id == id) {
            debug!(image = %id, "repeated load of live image");
            return Ok(LoadOutcome::Show {
                id,
                layout: self.layout(viewport, shown.natural)?,
                fade: self.settings.speed,
            });
        }
        if self.pending != Some(id) {
            warn!(image = %id, "dropping load of superseded image");
            return Ok(LoadOutcome::Stale { id });
        }

        let layout = self.layout(viewport, natural)?;
        self.pending = None;
        self.shown = Some(Shown { id, natural });
        debug!(
            image = %id,
            width = natural.width,
            height = natural.height,
            fade_ms = self.settings.speed.duration_ms(),
            "image shown"
        );

        Ok(LoadOutcome::Show {
            id,
            layout,
            fade: self.settings.speed,
        })
    }

    /// Recompute the visible image's layout for a new viewport.
    ///
    /// Fails with [`StretchError::ImageNotLoaded`] until some image has
    /// reported its natural size.
    pub fn resize(&self, viewport: Size) -> Result<Resized, StretchError> {
        let shown = self.shown.ok_or(StretchError::ImageNotLoaded)?;
        let layout = self.layout(viewport, shown.natural)?;
        Ok(Resized {
            id: shown.id,
            layout,
        })
    }

    /// Report that the fade-in of `id` finished.
    ///
    /// Returns the older images to remove. Each id is returned at most once;
    /// repeating the call yields an empty set.
    pub fn fade_complete(&mut self, id: ImageId) -> Result<Retired, StretchError> {
        match self.shown {
            Some(shown) if shown.id == id => {}
            _ => return Err(StretchError::UnknownImage(id)),
        }
        let start = self.oldest.min(id.0);
        let retired = Retired { ids: start..id.0 };
        self.oldest = id.0;
        if !retired.is_empty() {
            debug!(count = retired.len(), up_to = %id, "images retired");
        }
        Ok(retired)
    }

    /// Images that would be removed if the visible image finished fading now.
    pub fn retiring(&self) -> Retired {
        let end = self.shown.map_or(self.oldest, |s| s.id.0);
        Retired {
            ids: self.oldest.min(end)..end,
        }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn settings(&self) -> &StretchSettings {
        &self.settings
    }

    pub fn has_container(&self) -> bool {
        self.has_container
    }

    /// Newest requested image still waiting to load.
    pub fn pending_image(&self) -> Option<ImageId> {
        self.pending
    }

    /// Newest image that finished loading.
    pub fn live_image(&self) -> Option<ImageId> {
        self.shown.map(|s| s.id)
    }

    /// Natural size of the live image.
    pub fn natural_size(&self) -> Option<Size> {
        self.shown.map(|s| s.natural)
    }

    fn layout(&self, viewport: Size, natural: Size) -> Result<RenderLayout, StretchError> {
        let layout = CoverFit::new(viewport, natural)
            .offset(self.settings.offset)
            .compute()?;
        trace!(?viewport, ?natural, ?layout, "cover layout");
        Ok(layout)
    }
}

/// Stretch lifecycle error.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StretchError {
    /// `stretch` was called without an image source.
    EmptySource,
    /// Layout requested before any image reported its natural size.
    ImageNotLoaded,
    /// `fade_complete` for an image that is not the visible one, or a load
    /// reported for an id this stretcher never issued.
    UnknownImage(ImageId),
    /// The cover computation rejected the inputs.
    Layout(CoverError),
}

impl From<CoverError> for StretchError {
    fn from(e: CoverError) -> Self {
        Self::Layout(e)
    }
}

impl fmt::Display for StretchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySource => f.write_str("no image source given"),
            Self::ImageNotLoaded => f.write_str("natural image size not known yet"),
            Self::UnknownImage(id) => write!(f, "image {id} is not the visible image"),
            Self::Layout(e) => write!(f, "layout failed: {e}"),
        }
    }
}

impl core::error::Error for StretchError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            _ => None,
        }
    }
}
