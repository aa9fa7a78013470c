//! Tests for the inline HTML diff

use sitewatch::core::services::diff::tokenize;
use sitewatch::core::services::html_diff;

#[test]
fn identical_inputs_have_no_markers() {
    let html = "<div>\n <p>\n  same\n </p>\n</div>\n";
    assert_eq!(html_diff(html, html), html);
}

#[test]
fn replaced_word_is_marked() {
    let out = html_diff("<p>\n Nissan\n</p>\n", "<p>\n Toyota\n</p>\n");
    assert!(out.starts_with("<p>\n "));
    assert!(out.contains("<del>Nissan</del>"));
    assert!(out.contains("<ins>Toyota</ins>"));
    assert!(out.ends_with("\n</p>\n"));
}

#[test]
fn inserted_element_keeps_its_tags() {
    let old = "<ul>\n <li>\n  a\n </li>\n</ul>\n";
    let new = "<ul>\n <li>\n  a\n </li>\n <li>\n  b\n </li>\n</ul>\n";
    let out = html_diff(old, new);
    assert!(out.contains("<ins>b</ins>"));
    assert_eq!(out.matches("<li>").count(), 2);
}

#[test]
fn deleted_element_loses_its_tags() {
    let old = "<ul>\n <li>\n  a\n </li>\n <li>\n  gone\n </li>\n</ul>\n";
    let new = "<ul>\n <li>\n  a\n </li>\n</ul>\n";
    let out = html_diff(old, new);
    assert!(out.contains("<del>gone</del>"));
    assert_eq!(out.matches("<li>").count(), 1);
}

#[test]
fn quoted_angle_bracket_does_not_split_a_tag() {
    let old = "<div>\n</div>\n";
    let new = "<div>\n <a title=\"a>b\">\n  x\n </a>\n</div>\n";
    let out = html_diff(old, new);
    assert!(out.contains("<a title=\"a>b\">"));
    assert!(out.contains("<ins>x</ins>"));
    assert!(!out.contains("<ins>b"));
    assert_eq!(tokenize(new)[2], "<a title=\"a>b\">");
}

#[test]
fn canonical_attributes_survive_the_diff() {
    let old = "<p>\n old\n</p>\n";
    let new = "<p title=\"1 &gt; 0\">\n new\n</p>\n";
    let out = html_diff(old, new);
    assert!(out.contains("<p title=\"1 &gt; 0\">"));
    assert!(out.contains("<ins>new</ins>"));
}

#[test]
fn diff_is_deterministic() {
    let old = "<p>\n one two three\n</p>\n";
    let new = "<p>\n one 2 three four\n</p>\n";
    assert_eq!(html_diff(old, new), html_diff(old, new));
}

#[test]
fn tokens_reassemble_the_input() {
    let html = "<a href=\"x\">\n link text\n</a>\n";
    assert_eq!(tokenize(html).concat(), html);
}
