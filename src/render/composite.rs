use crate::foundation::error::{RenderError, RenderResult};
use crate::foundation::math::{add_sat_u8, mul_div255};

pub(crate) type PremulRgba8 = [u8; 4];

/// Alpha-compositing behavior applied when a draw lands on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CompositingMode {
    /// Blend source over destination.
    #[default]
    SourceOver,
    /// Source replaces destination wherever the shape covers it.
    SourceCopy,
}

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-copy: `src` already carries coverage, `dst` keeps what the shape leaves uncovered.
pub(crate) fn copy(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    let inv = 255u16 - u16::from(coverage);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// A rasterised draw ready to be merged into the target.
pub(crate) struct Layer<'a> {
    /// Painted pixels (premultiplied, coverage applied).
    pub(crate) color: &'a [u8],
    /// Geometry rendered in opaque white; its alpha is pure coverage. Needed for `SourceCopy`.
    pub(crate) coverage: Option<&'a [u8]>,
    pub(crate) mode: CompositingMode,
}

/// Merge `layer` into `dst`, skipping pixels rejected by `mask`.
pub(crate) fn composite_layer(
    dst: &mut [u8],
    layer: &Layer<'_>,
    mask: Option<&[bool]>,
) -> RenderResult<()> {
    if dst.len() != layer.color.len() || !dst.len().is_multiple_of(4) {
        return Err(RenderError::backend(
            "composite_layer expects equal-length rgba8 buffers",
        ));
    }
    let needs_coverage = layer.mode == CompositingMode::SourceCopy;
    let coverage = match layer.coverage {
        Some(c) if c.len() == dst.len() => Some(c),
        Some(_) => {
            return Err(RenderError::backend("coverage layer length mismatch"));
        }
        None if needs_coverage => {
            return Err(RenderError::backend("compositing mode requires a coverage layer"));
        }
        None => None,
    };
    if let Some(m) = mask
        && m.len() * 4 != dst.len()
    {
        return Err(RenderError::backend("clip mask length mismatch"));
    }

    for (i, (d, s)) in dst
        .chunks_exact_mut(4)
        .zip(layer.color.chunks_exact(4))
        .enumerate()
    {
        if mask.is_some_and(|m| !m[i]) {
            continue;
        }
        let src = [s[0], s[1], s[2], s[3]];
        let cov = coverage.map_or(src[3], |c| c[i * 4 + 3]);
        if cov == 0 {
            continue;
        }
        let cur = [d[0], d[1], d[2], d[3]];
        let out = match layer.mode {
            CompositingMode::SourceOver => over(cur, src),
            CompositingMode::SourceCopy => copy(cur, src, cov),
        };
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Overwrite every unmasked pixel with `px`.
pub(crate) fn fill_masked(dst: &mut [u8], px: PremulRgba8, mask: Option<&[bool]>) {
    for (i, d) in dst.chunks_exact_mut(4).enumerate() {
        if mask.is_some_and(|m| !m[i]) {
            continue;
        }
        d.copy_from_slice(&px);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
