use marginalia_core::{E_NOTE_UNCLOSED, FindError, Span, expand, find_tag, rewrite};

#[test]
fn single_tag_span_and_content_are_byte_exact() {
    let source = "See {{sn:a footnote:}} here.";
    let tag = find_tag(source, "sn").expect("no error").expect("tag");
    assert_eq!(tag.span, Span { start: 4, end: 22 });
    assert_eq!(tag.content, "a footnote");
    assert_eq!(tag.span.slice(source), "{{sn:a footnote:}}");
}

#[test]
fn nesting_resolves_across_two_passes() {
    let source = "{{sn:before {{mn:inner:}} after:}}";
    let outer = find_tag(source, "sn").expect("no error").expect("tag");
    assert_eq!(outer.content, "before {{mn:inner:}} after");
    assert_eq!(
        outer.span,
        Span {
            start: 0,
            end: source.len(),
        }
    );

    let inner = find_tag(&outer.content, "mn").expect("no error").expect("tag");
    assert_eq!(inner.content, "inner");
}

#[test]
fn repeated_finds_surface_tags_left_to_right() {
    let mut document = "a {{sn:1:}} b {{sn:2:}} c {{sn:3:}}".to_string();
    let mut contents = Vec::new();
    loop {
        match find_tag(&document, "sn").expect("no error") {
            Some(tag) => {
                contents.push(tag.content.clone());
                document.replace_range(tag.span.start..tag.span.end, "*");
            }
            None => break,
        }
    }
    assert_eq!(contents, vec!["1", "2", "3"]);
    assert_eq!(document, "a * b * c *");
}

#[test]
fn unmatched_opening_is_reported_and_leaves_the_document() {
    let source = "{{sn:no close here";
    assert!(matches!(
        find_tag(source, "sn"),
        Err(FindError::UnclosedTag { position: 0, .. })
    ));

    let result = rewrite(source, "sn", |_| String::new());
    assert_eq!(result.output, source);
    assert_eq!(result.replaced, 0);
    assert_eq!(result.diagnostics[0].code, E_NOTE_UNCLOSED);
}

#[test]
fn plain_text_comes_back_byte_identical() {
    let source = "Nothing to expand.\nNot even here.\n";
    assert_eq!(find_tag(source, "sn").expect("no error"), None);
    let result = expand(source);
    assert_eq!(result.output, source);
    assert_eq!(result.replaced, 0);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn stray_close_is_preserved_in_the_output() {
    let source = "before :}} after";
    let result = expand(source);
    assert_eq!(result.output, source);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn expansion_is_idempotent_once_no_tags_remain() {
    let source = "a {{sn:one:}} b {{mn:two:}} c";
    let first = expand(source);
    assert_eq!(first.replaced, 2);
    let second = expand(&first.output);
    assert_eq!(second.output, first.output);
    assert_eq!(second.replaced, 0);
    assert!(second.diagnostics.is_empty());
}

#[test]
fn end_to_end_sidenote_example() {
    let result = expand("See {{sn:a footnote:}} here.");
    let rendered = "<label for=\"sn_4\" class=\"margin-toggle sidenote-number\"></label>\
                    <input type=\"checkbox\" id=\"sn_4\" class=\"margin-toggle\" />\
                    <span class=\"sidenote\">a footnote</span>";
    assert_eq!(result.output, format!("See {} here.", rendered));
    assert_eq!(result.replaced, 1);
}
