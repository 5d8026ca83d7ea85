//! OverlayPlus composites an overlay frame onto a base frame with one of 37 blend modes.
//!
//! Frames are planar (gray, YUV with optional chroma subsampling, or RGB, plus an optional
//! alpha plane) at integer depths 8..=16 or 32-bit float. A composite:
//!
//! - places the overlay at an `(x, y)` offset, cropping or padding it onto the base grid
//! - blends each plane with a [`BlendMode`] evaluated in the native sample range
//! - merges the result over the base through a mask scaled by opacity
//!
//! ```no_run
//! use overlay_plus::{BlendMode, CompositeOptions, composite, load_frame, save_frame};
//!
//! # fn main() -> overlay_plus::OverlayResult<()> {
//! let base = load_frame("base.png")?;
//! let overlay = load_frame("overlay.png")?;
//! let opts = CompositeOptions {
//!     mode: BlendMode::Multiply,
//!     opacity: 0.75,
//!     ..CompositeOptions::default()
//! };
//! save_frame(&composite(&base, &overlay, None, &opts)?, "out.png")?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod foundation;

pub(crate) mod blend;
pub(crate) mod composite;
pub(crate) mod io;
pub(crate) mod plane;
pub(crate) mod resample;

pub use crate::foundation::error::{OverlayError, OverlayResult};

pub use crate::blend::apply::blend_planes;
pub use crate::blend::mode::BlendMode;
pub use crate::composite::compositor::{composite, composite_with};
pub use crate::composite::geometry::{Edges, PlacementGeometry, crop_pad};
pub use crate::composite::merge::merge_masked;
pub use crate::composite::options::CompositeOptions;
pub use crate::io::image::{frame_from_image, frame_to_image, load_frame, save_frame};
pub use crate::plane::buffer::{Plane, Samples};
pub use crate::plane::format::{
    ChromaSubsampling, ColorFamily, FrameFormat, RangeDescriptor, SampleFormat, SampleType,
};
pub use crate::plane::frame::Frame;
pub use crate::resample::kernel::ResampleKernel;
pub use crate::resample::resampler::{ChromaPlacement, CpuResampler, PlaneResampler, ResampleHints};
