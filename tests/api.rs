//! Tests for the loading entry points and intrinsic size queries.

use std::io::Write;

use minisvg::{LoadingError, SvgImage};

#[test]
fn loads_from_str() {
    let image = SvgImage::load_from_str(
        r#"<svg viewBox="0 0 100 50">
             <rect x="10" y="10" width="30" height="30"/>
           </svg>"#,
    )
    .unwrap();

    assert_eq!(image.width(), Some(100.0));
    assert_eq!(image.height(), Some(50.0));
    assert_eq!(image.aspect_ratio(), Some(2.0));
}

#[test]
fn explicit_size_attributes_win_over_view_box() {
    let image =
        SvgImage::load_from_str(r#"<svg viewBox="0 0 100 100" width="10px" height="40"/>"#)
            .unwrap();

    assert_eq!(image.width(), Some(10.0));
    assert_eq!(image.height(), Some(40.0));
    assert_eq!(image.aspect_ratio(), Some(0.25));
}

#[test]
fn percentage_sizes_fall_back_to_the_view_box() {
    let image =
        SvgImage::load_from_str(r#"<svg viewBox="0 0 30 40" width="100%" height="100%"/>"#)
            .unwrap();

    assert_eq!(image.width(), Some(30.0));
    assert_eq!(image.height(), Some(40.0));
}

#[test]
fn document_without_sizing_defaults_to_100_by_100() {
    let image = SvgImage::load_from_str("<svg/>").unwrap();

    assert_eq!(image.width(), Some(100.0));
    assert_eq!(image.height(), Some(100.0));
}

#[test]
fn degenerate_view_box_has_no_intrinsic_size() {
    let image = SvgImage::load_from_str(r#"<svg viewBox="0 0 0 10"/>"#).unwrap();

    assert_eq!(image.width(), None);
    assert_eq!(image.height(), Some(10.0));
    assert_eq!(image.aspect_ratio(), None);
}

#[test]
fn loads_from_bytes() {
    let image = SvgImage::load_from_bytes(br#"<svg width="5" height="5"/>"#).unwrap();

    assert_eq!(image.width(), Some(5.0));
}

#[test]
fn rejects_non_utf8_bytes() {
    assert!(matches!(
        SvgImage::load_from_bytes(b"<svg>\xff</svg>"),
        Err(LoadingError::XmlParseError(_))
    ));
}

#[test]
fn strips_a_byte_order_mark() {
    let image = SvgImage::load_from_str("\u{feff}<svg width=\"5\" height=\"5\"/>").unwrap();

    assert_eq!(image.width(), Some(5.0));
}

#[test]
fn loads_from_a_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".svg")
        .tempfile()
        .unwrap();
    file.write_all(br#"<svg viewBox="0 0 16 16"><circle cx="8" cy="8" r="8"/></svg>"#)
        .unwrap();

    let image = SvgImage::load_from_path(file.path()).unwrap();

    assert_eq!(image.width(), Some(16.0));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        SvgImage::load_from_path("this/file/does/not/exist.svg"),
        Err(LoadingError::Io(_))
    ));
}

#[test]
fn malformed_xml_is_an_error() {
    assert!(matches!(
        SvgImage::load_from_str("<svg><rect</svg>"),
        Err(LoadingError::XmlParseError(_))
    ));

    assert!(matches!(
        SvgImage::load_from_str("<svg><g></svg>"),
        Err(LoadingError::XmlParseError(_))
    ));
}

#[test]
fn non_svg_root_is_an_error() {
    assert!(matches!(
        SvgImage::load_from_str("<html/>"),
        Err(LoadingError::NoSvgRoot)
    ));
}

#[test]
fn doctype_is_an_error() {
    assert!(matches!(
        SvgImage::load_from_str("<!DOCTYPE svg><svg/>"),
        Err(LoadingError::XmlParseError(_))
    ));
}

#[test]
fn loading_errors_format_usefully() {
    let err = SvgImage::load_from_str("<html/>").unwrap_err();
    assert_eq!(err.to_string(), "XML does not have <svg> root");
}
