use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_alpha_blends() {
    let out = over([0, 0, 255, 255], [128, 0, 0, 128]);
    assert_eq!(out, [128, 0, 127, 255]);
}

#[test]
fn copy_full_coverage_replaces_even_with_transparent_src() {
    assert_eq!(copy([9, 9, 9, 255], [0, 0, 0, 0], 255), [0, 0, 0, 0]);
}

#[test]
fn composite_copy_requires_coverage_layer() {
    let mut dst = vec![0u8; 4];
    let layer = Layer {
        color: &[255, 0, 0, 255],
        coverage: None,
        mode: CompositingMode::SourceCopy,
    };
    assert!(composite_layer(&mut dst, &layer, None).is_err());
}

#[test]
fn composite_respects_mask() {
    let mut dst = vec![0u8; 8];
    let color = [255, 0, 0, 255, 255, 0, 0, 255];
    let layer = Layer {
        color: &color,
        coverage: None,
        mode: CompositingMode::SourceOver,
    };
    composite_layer(&mut dst, &layer, Some(&[true, false])).unwrap();
    assert_eq!(&dst[..4], &[255, 0, 0, 255]);
    assert_eq!(&dst[4..], &[0, 0, 0, 0]);
}

#[test]
fn copy_keeps_uncovered_share_of_dst() {
    let mut dst = vec![0, 0, 255, 255, 0, 0, 255, 255];
    // Pixel 0 is fully covered by a transparent shape, pixel 1 is untouched.
    let color = [0u8; 8];
    let coverage = [255, 255, 255, 255, 0, 0, 0, 0];
    let layer = Layer {
        color: &color,
        coverage: Some(&coverage),
        mode: CompositingMode::SourceCopy,
    };
    composite_layer(&mut dst, &layer, None).unwrap();
    assert_eq!(&dst[..4], &[0, 0, 0, 0]);
    assert_eq!(&dst[4..], &[0, 0, 255, 255]);
}

#[test]
fn fill_masked_writes_only_unmasked() {
    let mut dst = vec![1u8; 8];
    fill_masked(&mut dst, [9, 9, 9, 9], Some(&[false, true]));
    assert_eq!(dst, vec![1, 1, 1, 1, 9, 9, 9, 9]);
}
