use std::io::Cursor;

use base64::Engine as _;

use super::*;
use crate::typeset::math::MathContent;

const SVG_OK: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"></svg>"#;

fn png_base64(width: u32, height: u32) -> String {
    let img = ::image::RgbaImage::from_raw(width, height, vec![255u8; (width * height * 4) as usize])
        .unwrap();
    let mut buf = Vec::new();
    ::image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ::image::ImageFormat::Png)
        .unwrap();
    base64::engine::general_purpose::STANDARD.encode(buf)
}

#[test]
fn builtins_claim_disjoint_nonempty_mimetype_sets() {
    let mut seen = std::collections::HashSet::new();
    for b in &Builtin::ALL {
        assert!(!b.mimetypes().is_empty(), "{}", b.name());
        for m in b.mimetypes() {
            assert!(b.claims(m));
            assert!(seen.insert(*m), "{m} claimed twice");
        }
    }
    assert_eq!(seen.len(), 10);
}

#[test]
fn unclaimed_mimetype_is_a_render_error() {
    let err = Builtin::Text.transform("text/html", "<b>x</b>").unwrap_err();
    assert!(matches!(err, TransformimeError::Render(_)));
}

#[test]
fn text_is_kept_verbatim() {
    let a = Builtin::Text.transform("text/plain", "hi <there>").unwrap();
    assert_eq!(
        a,
        Artifact::Text {
            text: "hi <there>".to_string()
        }
    );
}

#[test]
fn html_and_latex_produce_dirty_math_nodes() {
    let html = Builtin::Html.transform("text/html", "<b>hi</b>").unwrap();
    let node = html.math().unwrap();
    assert!(node.is_dirty());
    assert_eq!(node.content(), &MathContent::Html("<b>hi</b>".to_string()));
    assert_eq!(html.to_html(), "<b>hi</b>");

    let latex = Builtin::Latex.transform("text/latex", r"$x^2$").unwrap();
    assert_eq!(latex.kind(), "latex");
    assert_eq!(
        latex.math().unwrap().content(),
        &MathContent::Text(r"$x^2$".to_string())
    );
}

#[test]
fn image_builds_data_uri_and_reads_size() {
    let b64 = png_base64(3, 2);
    let a = Builtin::Image.transform("image/png", &b64).unwrap();
    let Artifact::Image {
        mimetype,
        src,
        width,
        height,
    } = a
    else {
        panic!("expected image artifact");
    };
    assert_eq!(mimetype, "image/png");
    assert_eq!(src, format!("data:image/png;base64,{b64}"));
    assert_eq!((width, height), (Some(3), Some(2)));
}

#[test]
fn image_tolerates_wrapped_base64_and_unknown_bytes() {
    let b64 = png_base64(1, 1);
    let (head, tail) = b64.split_at(8);
    let wrapped = format!("{head}\n{tail}\n");
    let a = Builtin::Image.transform("image/png", &wrapped).unwrap();
    assert_eq!(a.to_html(), format!(r#"<img src="data:image/png;base64,{b64}" width="1" height="1"/>"#));

    let opaque = Builtin::Image.transform("image/gif", "AAAA").unwrap();
    let Artifact::Image { width, .. } = opaque else {
        panic!("expected image artifact");
    };
    assert_eq!(width, None);
}

#[test]
fn image_accepts_unpadded_base64() {
    let b64 = png_base64(2, 2);
    let unpadded = b64.trim_end_matches('=');
    assert_ne!(unpadded, b64, "fixture should need padding");

    let a = Builtin::Image.transform("image/png", unpadded).unwrap();
    let Artifact::Image {
        src, width, height, ..
    } = a
    else {
        panic!("expected image artifact");
    };
    assert_eq!(src, format!("data:image/png;base64,{b64}"));
    assert_eq!((width, height), (Some(2), Some(2)));
}

#[test]
fn image_rejects_invalid_base64() {
    for bad in ["not base64!", "", "  \n"] {
        let err = Builtin::Image.transform("image/jpeg", bad).unwrap_err();
        assert!(matches!(err, TransformimeError::Render(_)), "{bad:?}");
    }
}

#[test]
fn svg_parses_and_records_size() {
    let a = Builtin::Svg.transform("image/svg+xml", SVG_OK).unwrap();
    let Artifact::Svg {
        markup,
        width,
        height,
    } = &a
    else {
        panic!("expected svg artifact");
    };
    assert_eq!(markup, SVG_OK);
    assert_eq!((*width, *height), (Some(4.0), Some(2.0)));
    assert_eq!(a.to_html(), SVG_OK);
}

#[test]
fn svg_accepts_prolog_comments_and_doctype() {
    let doc = format!(
        "<?xml version=\"1.0\"?>\n<!-- generated -->\n<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n{SVG_OK}"
    );
    Builtin::Svg.transform("image/svg+xml", &doc).unwrap();
}

#[test]
fn svg_without_namespace_is_kept() {
    let doc = r#"<svg width="10" height="10"><rect width="5" height="5"/></svg>"#;
    let a = Builtin::Svg.transform("image/svg+xml", doc).unwrap();
    let Artifact::Svg { markup, .. } = &a else {
        panic!("expected svg artifact");
    };
    assert_eq!(markup, doc);
    assert_eq!(a.to_html(), doc);
}

#[test]
fn svg_with_zero_size_has_no_dimensions() {
    let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0"></svg>"#;
    let a = Builtin::Svg.transform("image/svg+xml", doc).unwrap();
    let Artifact::Svg {
        markup,
        width,
        height,
    } = a
    else {
        panic!("expected svg artifact");
    };
    assert_eq!(markup, doc);
    assert_eq!((width, height), (None, None));
}

#[test]
fn svg_rejects_non_svg_payloads() {
    for bad in [
        "not svg",
        "",
        "<svg",
        r#"<div xmlns="http://www.w3.org/1999/xhtml"><p>x</p></div>"#,
    ] {
        let err = Builtin::Svg.transform("image/svg+xml", bad).unwrap_err();
        assert!(matches!(err, TransformimeError::Render(_)), "{bad:?}");
        assert!(err.to_string().contains("<svg>"));
    }
}

#[test]
fn script_keeps_mimetype_and_source() {
    for m in ["text/javascript", "application/javascript"] {
        let a = Builtin::Javascript.transform(m, "console.log(1)").unwrap();
        assert_eq!(
            a,
            Artifact::Script {
                mimetype: m.to_string(),
                source: "console.log(1)".to_string()
            }
        );
    }
}

#[test]
fn console_text_escapes_then_styles() {
    let a = Builtin::ConsoleText
        .transform(
            "application/vnd.jupyter.console-text",
            "\u{1b}[31m<err>\u{1b}[0m & ok\n",
        )
        .unwrap();
    let Artifact::ConsoleText { html } = a else {
        panic!("expected console text artifact");
    };
    assert_eq!(
        html,
        r#"<span style="color:#A00">&lt;err&gt;</span> &amp; ok<br/>"#
    );
}

#[test]
fn console_text_combines_attributes_and_resets() {
    let html = console::ansi_to_html("\u{1b}[1;32mok\u{1b}[22m!\u{1b}[39m.");
    assert_eq!(
        html,
        r#"<span style="color:#0A0;font-weight:bold">ok</span><span style="color:#0A0">!</span>."#
    );
}

#[test]
fn console_text_supports_extended_colors() {
    assert_eq!(
        console::ansi_to_html("\u{1b}[38;5;196mx"),
        r#"<span style="color:#ff0000">x</span>"#
    );
    assert_eq!(
        console::ansi_to_html("\u{1b}[48;5;232mx"),
        r#"<span style="background-color:#080808">x</span>"#
    );
    assert_eq!(
        console::ansi_to_html("\u{1b}[38;2;1;2;3mx"),
        r#"<span style="color:#010203">x</span>"#
    );
    assert_eq!(console::ansi_to_html("\u{1b}[38;2;1mx"), "x");
}

#[test]
fn console_text_inverse_uses_default_colors() {
    assert_eq!(
        console::ansi_to_html("\u{1b}[7mx\u{1b}[27my"),
        r#"<span style="color:#000;background-color:#FFF">x</span>y"#
    );
}

#[test]
fn console_text_strips_non_sgr_sequences() {
    assert_eq!(
        console::ansi_to_html("a\u{1b}[2Kb\u{1b}]0;title\u{07}c\r\nd\u{1b}(B"),
        "abc<br/>d"
    );
    assert_eq!(console::ansi_to_html("\u{1b}[m\u{1b}[0mplain"), "plain");
}
