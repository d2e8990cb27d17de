use stylecomp::parser::cascade::{ElementMeta, compute_style};
use stylecomp::parser::parse_stylesheet;
use stylecomp::theme::{Theme, paint, paint_style};

#[test]
fn test_paint_resolves_cascaded_tokens() {
    let stylesheet = parse_stylesheet(
        ".post { background: var(--bg-color--default); border: 1px solid var(--border-color--default); }",
    )
    .unwrap();
    let post = ElementMeta::new("div").with_class("post");
    let style = compute_style(&post, &[], &stylesheet);

    let painted = paint_style(&style, &Theme::light());
    assert_eq!(painted["background"], "#ffffff");
    assert_eq!(painted["border"], "1px solid #d6d6d6");

    let painted = paint_style(&style, &Theme::dark());
    assert_eq!(painted["background"], "#1b1b1b");
}

#[test]
fn test_standard_themes_define_same_tokens() {
    let themes = Theme::standard_themes();
    let light = &themes["light"];
    let dark = &themes["dark"];
    let light_names: Vec<&String> = light.tokens.keys().collect();
    let dark_names: Vec<&String> = dark.tokens.keys().collect();
    assert_eq!(light_names, dark_names);
    assert!(dark.dark);
}

#[test]
fn test_paint_leaves_literals_alone() {
    assert_eq!(paint("0 12px 5px", &Theme::light()), "0 12px 5px");
}
