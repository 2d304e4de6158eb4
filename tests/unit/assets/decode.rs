use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let PreparedLayer::Image(prepared) = decode_layer(AssetKind::Raster, &buf).unwrap() else {
        panic!("expected raster layer");
    };
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    assert!(matches!(
        decode_layer(AssetKind::Svg, ok).unwrap(),
        PreparedLayer::Svg(_)
    ));

    let bad = br#"<svg"#;
    assert!(decode_layer(AssetKind::Svg, bad).is_err());
    assert!(decode_layer(AssetKind::Raster, b"not a png").is_err());
}

#[test]
fn unpremultiply_restores_opaque_and_clears_nothing_else() {
    let mut px = vec![10u8, 20, 30, 255, 0, 0, 0, 0, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..8], &[10, 20, 30, 255, 0, 0, 0, 0]);
    assert_eq!(&px[8..], &[128, 64, 0, 128]);
}
