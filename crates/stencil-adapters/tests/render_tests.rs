//! End-to-end tests of the template stage against the fixture templates.

use std::path::PathBuf;

use serde_json::json;
use stencil_adapters::{
    TemplateDirLoader, load_templates, new_stream_renderer, template, template_with_data,
    template_with_options,
};
use stencil_core::prelude::*;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/templates")
}

fn page(template: &str) -> FileInfo {
    let mut fi = FileInfo::new("foo");
    fi.ctx.insert("template", template);
    fi
}

fn render_once(fi: FileInfo, content: &[u8]) -> Vec<u8> {
    let renderer = new_stream_renderer(fixtures(), RenderOptions::default()).unwrap();
    let (_, out) = renderer.render(fi, content.to_vec()).unwrap();
    out
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn loads_every_fixture_by_relative_name() {
    let set = TemplateDirLoader::new(fixtures()).load().unwrap();
    for name in [
        "content.tmpl",
        "data.tmpl",
        "frontmatter.tmpl",
        "import.tmpl",
        "plain.tmpl",
    ] {
        assert!(set.contains(name), "missing {name}");
    }
    assert!(set.contains(&PathBuf::from("partials").join("partial.tmpl").to_string_lossy()));
    assert_eq!(set.len(), 6);
}

#[test]
fn two_loaded_templates_resolve_each_other() {
    let dir = fixtures();
    let paths = [dir.join("import.tmpl"), dir.join("partials/partial.tmpl")];
    let set = load_templates(&paths).unwrap();

    assert!(set.contains("import.tmpl"));
    assert!(set.contains("partials/partial.tmpl"));

    let out = set.render("import.tmpl", &RenderData::new(b"")).unwrap();
    assert_eq!(out, "<div>Import <div>Partial</div>\n</div>\n");
}

#[test]
fn missing_templates_directory_fails_construction() {
    let err = new_stream_renderer(fixtures().join("does-not-exist"), RenderOptions::default())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        StencilError::Application(ApplicationError::Io { .. })
    ));
}

// ── Render step ───────────────────────────────────────────────────────────────

#[test]
fn file_without_template_is_passed_through() {
    let renderer = new_stream_renderer(fixtures(), RenderOptions::default()).unwrap();

    for ctx in [json!({}), json!({ "other": "plain.tmpl" }), json!({ "template": null })] {
        let mut fi = FileInfo::new("foo");
        for (k, v) in ctx.as_object().unwrap() {
            fi.ctx.insert(k.clone(), v.clone());
        }
        let (_, out) = renderer.render(fi, b"foo".to_vec()).unwrap();
        assert_eq!(out, b"foo");
    }
}

#[test]
fn non_string_template_fails_unless_ignored() {
    let strict = new_stream_renderer(fixtures(), RenderOptions::default()).unwrap();
    let lenient = new_stream_renderer(
        fixtures(),
        RenderOptions::default().ignore_template_errors(true),
    )
    .unwrap();

    for value in [json!(1), json!(true), json!(["plain.tmpl"]), json!({ "x": 1 })] {
        let mut fi = FileInfo::new("foo");
        fi.ctx.insert("template", value);

        let failure = strict.render(fi.clone(), b"foo".to_vec()).unwrap_err();
        assert!(failure.error.is_type_mismatch());
        assert!(failure.chunk.is_none());

        let (_, out) = lenient.render(fi, b"foo".to_vec()).unwrap();
        assert_eq!(out, b"foo");
    }
}

#[test]
fn plain_template_ignores_content() {
    for content in [&b"foo"[..], b"something else entirely"] {
        let out = render_once(page("plain.tmpl"), content);
        assert_eq!(out, b"<div>Plain</div>\n");
    }
}

#[test]
fn content_template_substitutes_content() {
    let out = render_once(page("content.tmpl"), b"foo");
    assert_eq!(out, b"<div>Content foo</div>\n");
}

#[test]
fn frontmatter_template_embeds_content_and_front_matter() {
    let mut fi = page("frontmatter.tmpl");
    fi.ctx.set_front_matter(json!({ "Bar": "bar" }));

    let out = render_once(fi, b"foo");
    assert_eq!(out, b"<div>Content foo, FrontMatter bar</div>\n");
}

#[test]
fn import_template_includes_partial() {
    let out = render_once(page("import.tmpl"), b"foo");
    assert_eq!(out, b"<div>Import <div>Partial</div>\n</div>\n");
}

#[test]
fn unknown_template_hands_back_original_content() {
    let renderer = new_stream_renderer(fixtures(), RenderOptions::default()).unwrap();
    let failure = renderer
        .render(page("nope.tmpl"), b"foo".to_vec())
        .unwrap_err();

    assert_eq!(failure.chunk.as_deref(), Some(&b"foo"[..]));
    assert!(matches!(
        failure.error,
        StencilError::Application(ApplicationError::TemplateExecution { .. })
    ));
}

// ── Streaming stage ───────────────────────────────────────────────────────────

#[test]
fn stage_suppresses_then_renders_once_then_passes_through() {
    let mut stage = template(fixtures());
    assert_eq!(stage.name(), "stencil::template");
    let fi = page("content.tmpl");

    let first = stage.stream(Some(fi.clone()), Some(b"foo".to_vec())).unwrap();
    assert_eq!(first, Emission::Suppressed);

    let second = stage.stream(Some(fi.clone()), None).unwrap();
    assert_eq!(second.bytes(), Some(&b"<div>Content foo</div>\n"[..]));

    let third = stage.stream(Some(fi.clone()), None).unwrap();
    assert_eq!(third, Emission::Chunk { file: fi, chunk: None });

    assert_eq!(stage.stream(None, None).unwrap(), Emission::EndOfStream);
}

#[test]
fn stage_renders_interleaved_files_independently() {
    let mut stage = template(fixtures());
    let a = {
        let mut fi = FileInfo::new("a.md");
        fi.ctx.insert("template", "content.tmpl");
        fi
    };
    let b = FileInfo::new("b.md");

    stage.stream(Some(a.clone()), Some(b"A".to_vec())).unwrap();
    stage.stream(Some(b.clone()), Some(b"B".to_vec())).unwrap();
    stage.stream(Some(a.clone()), Some(b"A".to_vec())).unwrap();

    let out_a = stage.stream(Some(a), None).unwrap();
    let out_b = stage.stream(Some(b), None).unwrap();
    assert_eq!(out_a.bytes(), Some(&b"<div>Content AA</div>\n"[..]));
    assert_eq!(out_b.bytes(), Some(&b"B"[..]));
}

#[test]
fn stage_with_front_matter_disabled_omits_it() {
    let mut stage = template_with_options(
        fixtures(),
        RenderOptions::default().include_front_matter(false),
    );
    let mut fi = page("frontmatter.tmpl");
    fi.ctx.set_front_matter(json!({ "Bar": "bar" }));

    stage.stream(Some(fi.clone()), Some(b"foo".to_vec())).unwrap();
    let out = stage.stream(Some(fi), None).unwrap();
    assert_eq!(out.bytes(), Some(&b"<div>Content foo, FrontMatter </div>\n"[..]));
}

#[test]
fn stage_exposes_user_data() {
    let mut stage = template_with_data(fixtures(), json!({ "site": "example.org" }));
    let fi = page("data.tmpl");

    stage.stream(Some(fi.clone()), Some(b"hello".to_vec())).unwrap();
    let out = stage.stream(Some(fi), None).unwrap();
    assert_eq!(out.bytes(), Some(&b"Site example.org: hello\n"[..]));
}

#[test]
fn stage_over_missing_directory_fails_every_call() {
    let mut stage = template(fixtures().join("does-not-exist"));
    assert!(stage.construction_error().is_some());

    let fi = page("content.tmpl");
    let failure = stage.stream(Some(fi.clone()), Some(b"foo".to_vec())).unwrap_err();
    assert_eq!(failure.file, Some(fi));
    assert_eq!(failure.chunk.as_deref(), Some(&b"foo"[..]));

    assert!(stage.stream(None, None).is_err());
}
