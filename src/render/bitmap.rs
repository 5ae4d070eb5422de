use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{NOMINAL_DPI, is_positive_metric};
use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

struct BitmapData {
    pixmap: vello_cpu::Pixmap,
    dpi_x: f32,
    dpi_y: f32,
}

/// In-memory premultiplied RGBA8 image.
///
/// `Bitmap` is a shared handle: cloning it is cheap and every clone sees the same pixels. A
/// [`Surface`](crate::Surface) keeps one handle to its target for as long as it is alive and
/// drops it on dispose. Handles are single-threaded.
#[derive(Clone)]
pub struct Bitmap {
    inner: Rc<RefCell<BitmapData>>,
}

impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("dpi_x", &self.dpi_x())
            .field("dpi_y", &self.dpi_y())
            .finish()
    }
}

impl Bitmap {
    /// Allocate a transparent bitmap at [`NOMINAL_DPI`].
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let (w, h) = checked_dims(width, height)?;
        Ok(Self::from_pixmap(vello_cpu::Pixmap::new(w, h)))
    }

    /// Build a bitmap from tightly packed straight-alpha RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> RenderResult<Self> {
        let mut premul = rgba.to_vec();
        premultiply_rgba8_in_place(&mut premul);
        let pixmap = pixmap_from_premul_bytes(&premul, width, height)?;
        Ok(Self::from_pixmap(pixmap))
    }

    /// Build a bitmap from an `image` RGBA buffer.
    pub fn from_rgba_image(img: &image::RgbaImage) -> RenderResult<Self> {
        let (w, h) = img.dimensions();
        Self::from_rgba8(w, h, img.as_raw())
    }

    /// Decode encoded image bytes (PNG, JPEG, ...).
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        Self::from_rgba_image(&dyn_img.to_rgba8())
    }

    /// Load and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let dyn_img =
            image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
        Self::from_rgba_image(&dyn_img.to_rgba8())
    }

    fn from_pixmap(pixmap: vello_cpu::Pixmap) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BitmapData {
                pixmap,
                dpi_x: NOMINAL_DPI,
                dpi_y: NOMINAL_DPI,
            })),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.inner.borrow().pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.inner.borrow().pixmap.height())
    }

    /// Horizontal resolution in pixels per inch.
    pub fn dpi_x(&self) -> f32 {
        self.inner.borrow().dpi_x
    }

    /// Vertical resolution in pixels per inch.
    pub fn dpi_y(&self) -> f32 {
        self.inner.borrow().dpi_y
    }

    /// Change the resolution the bitmap reports. Both values must be finite and > 0.
    pub fn set_resolution(&self, dpi_x: f32, dpi_y: f32) -> RenderResult<()> {
        if !is_positive_metric(dpi_x) || !is_positive_metric(dpi_y) {
            return Err(RenderError::backend(format!(
                "bitmap resolution must be positive, got {dpi_x}x{dpi_y}"
            )));
        }
        let mut data = self.inner.borrow_mut();
        data.dpi_x = dpi_x;
        data.dpi_y = dpi_y;
        Ok(())
    }

    /// Premultiplied RGBA8 value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let data = self.inner.borrow();
        let (w, h) = (
            u32::from(data.pixmap.width()),
            u32::from(data.pixmap.height()),
        );
        if x >= w || y >= h {
            return None;
        }
        let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
        let bytes = data.pixmap.data_as_u8_slice();
        Some([bytes[idx], bytes[idx + 1], bytes[idx + 2], bytes[idx + 3]])
    }

    /// Copy out as a straight-alpha `image` buffer.
    pub fn to_rgba_image(&self) -> RenderResult<image::RgbaImage> {
        let data = self.inner.borrow();
        let mut bytes = data.pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut bytes);
        image::RgbaImage::from_raw(
            u32::from(data.pixmap.width()),
            u32::from(data.pixmap.height()),
            bytes,
        )
        .ok_or_else(|| RenderError::backend("bitmap byte len mismatch"))
    }

    /// Encode to a file; the format follows the path extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_rgba_image()?
            .save(path)
            .with_context(|| format!("save image '{}'", path.display()))?;
        Ok(())
    }

    /// Return `true` when another handle (for example a live surface) references these pixels.
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.inner) > 1
    }

    pub(crate) fn dims(&self) -> (u16, u16) {
        let data = self.inner.borrow();
        (data.pixmap.width(), data.pixmap.height())
    }

    pub(crate) fn with_pixels_mut<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        f(self.inner.borrow_mut().pixmap.data_as_u8_slice_mut())
    }

    /// Snapshot the pixels as a `vello_cpu` image paint.
    pub(crate) fn to_paint(
        &self,
        extend: vello_cpu::peniko::Extend,
    ) -> RenderResult<vello_cpu::Image> {
        let data = self.inner.borrow();
        let pixmap = pixmap_from_premul_bytes(
            data.pixmap.data_as_u8_slice(),
            u32::from(data.pixmap.width()),
            u32::from(data.pixmap.height()),
        )?;
        let mut sampler = vello_cpu::peniko::ImageSampler::default();
        sampler.x_extend = extend;
        sampler.y_extend = extend;
        Ok(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler,
        })
    }
}

fn checked_dims(width: u32, height: u32) -> RenderResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(RenderError::backend(format!(
            "bitmap size must be non-zero, got {width}x{height}"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| RenderError::backend("bitmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| RenderError::backend("bitmap height exceeds u16"))?;
    Ok((w, h))
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> RenderResult<vello_cpu::Pixmap> {
    let (w, h) = checked_dims(width, height)?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(RenderError::backend("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/bitmap.rs"]
mod tests;
