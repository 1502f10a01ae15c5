use super::*;

const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
  <rect x="0" y="0" width="8" height="4" fill="#67c23a"/>
</svg>"##;

#[test]
fn png_has_scaled_dimensions() {
    let png = svg_to_png(SQUARE, 2.0).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!((img.width(), img.height()), (16, 8));
    let px = img.to_rgba8().get_pixel(3, 3).0;
    assert_eq!(px, [0x67, 0xc2, 0x3a, 0xff]);
}

#[test]
fn bad_scale_is_a_config_error() {
    assert!(matches!(
        rasterize_svg(SQUARE, 0.0).unwrap_err(),
        BlocksError::Config(_)
    ));
}

#[test]
fn garbage_svg_is_reported() {
    assert!(matches!(
        rasterize_svg("not svg", 1.0).unwrap_err(),
        BlocksError::Other(_)
    ));
}

#[test]
fn demultiply_restores_straight_alpha() {
    let mut px = [50u8, 25, 100, 128, 9, 9, 9, 0, 1, 2, 3, 255];
    demultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[100, 50, 199, 128]);
    assert_eq!(&px[4..], &[9, 9, 9, 0, 1, 2, 3, 255]);
}
