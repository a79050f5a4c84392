use intramark_engine::{
    HeadingMarkupStrip, HeadingShift, OperationSet, Output, SourceDocument, analyze, process,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn run(text: &str, ops: &OperationSet) -> String {
    let doc = SourceDocument::new(text);
    process(&doc, ops).text(&doc).to_string()
}

fn heading_levels(text: &str) -> Vec<usize> {
    analyze(&SourceDocument::new(text))
        .headings
        .values()
        .map(|h| h.level())
        .collect()
}

const OUTLINE: &str = "\
## Introduction

Some text.

### Details

#### Fine print
";

#[test]
fn test_no_modification_reproduces_input() {
    // Given a document with every kind of markup, including CRLF endings
    let text = "# Title #  \r\nline break  \r\n[foo][bar]\r\n[bar]: http://x\r\n";

    // When nothing is requested
    let doc = SourceDocument::new(text);
    let processed = process(&doc, &OperationSet::default());

    // Then the input comes back byte-for-byte
    assert_eq!(processed.output, Output::Unchanged);
    assert_eq!(processed.text(&doc), text);
}

#[test]
fn test_strip_all_heading_markup_is_idempotent() {
    let ops = OperationSet {
        strip_heading_markup: Some(HeadingMarkupStrip::All),
        ..Default::default()
    };

    let once = run(OUTLINE, &ops);
    let twice = run(&once, &ops);

    assert_eq!(once, twice);
    assert!(heading_levels(&once).is_empty());
}

#[test]
fn test_strip_trailing_hashes_is_idempotent() {
    let ops = OperationSet {
        strip_heading_markup: Some(HeadingMarkupStrip::TrailingHashes),
        ..Default::default()
    };

    let once = run("## A ##\n### B ###  \n", &ops);
    assert_eq!(once, "## A\n### B\n");
    assert_eq!(run(&once, &ops), once);
}

#[test]
fn test_decrease_max_brings_shallowest_to_level_one() {
    let ops = OperationSet {
        heading_shift: Some(HeadingShift::DecreaseMax),
        ..Default::default()
    };

    let out = run(OUTLINE, &ops);

    assert_eq!(heading_levels(OUTLINE), vec![2, 3, 4]);
    assert_eq!(heading_levels(&out), vec![1, 2, 3]);
}

#[test]
fn test_increase_max_brings_deepest_to_level_six() {
    let ops = OperationSet {
        heading_shift: Some(HeadingShift::IncreaseMax),
        ..Default::default()
    };

    let out = run(OUTLINE, &ops);

    assert_eq!(heading_levels(&out), vec![4, 5, 6]);
}

#[rstest]
#[case(HeadingShift::IncreaseBy(1), vec![3, 4, 5])]
#[case(HeadingShift::IncreaseBy(3), vec![4, 5, 6])]
#[case(HeadingShift::DecreaseBy(1), vec![1, 2, 3])]
#[case(HeadingShift::DecreaseBy(4), vec![1, 2, 3])]
fn test_numeric_shift_is_clamped(#[case] shift: HeadingShift, #[case] expected: Vec<usize>) {
    let ops = OperationSet {
        heading_shift: Some(shift),
        ..Default::default()
    };
    assert_eq!(heading_levels(&run(OUTLINE, &ops)), expected);
}

#[test]
fn test_seven_hashes_is_a_level_six_heading() {
    let markup = analyze(&SourceDocument::new("####### content\n"));
    let heading = markup.heading(1).unwrap();

    assert_eq!(heading.level(), 6);
    assert_eq!(heading.content, "# content");
}

#[test]
fn test_seven_hash_heading_shifts_with_the_rest() {
    // Given a level 2 heading and a seven-hash level 6 heading
    let text = "## a\n####### b\n";
    let ops = OperationSet {
        heading_shift: Some(HeadingShift::DecreaseBy(1)),
        ..Default::default()
    };

    // When decreasing by one
    let out = run(text, &ops);

    // Then both move by one level and the overflow content survives
    assert_eq!(out, "# a\n##### # b\n");
    let markup = analyze(&SourceDocument::new(out.as_str()));
    assert_eq!(heading_levels(&out), vec![1, 5]);
    assert_eq!(markup.heading(2).unwrap().content, "# b");
}

#[test]
fn test_heading_with_trailing_spaces_is_not_a_hard_break() {
    let markup = analyze(&SourceDocument::new("## heading  \n"));

    assert!(markup.heading(1).is_some());
    assert!(markup.hard_break(1).is_none());
    assert!(!markup.summary.at_least_one_hard_line_break_exists);
}

#[test]
fn test_full_reference_link_becomes_inline() {
    let ops = OperationSet {
        make_links_inline: true,
        ..Default::default()
    };

    let out = run("[foo][bar]\n[bar]: http://example.com\n", &ops);

    assert_eq!(out, "[foo](http://example.com)\n");
}

#[test]
fn test_collapsed_reference_link_becomes_inline() {
    let ops = OperationSet {
        make_links_inline: true,
        ..Default::default()
    };

    let out = run("[foo][]\n[foo]: http://x\n", &ops);

    assert_eq!(out, "[foo](http://x)\n");
}

#[test]
fn test_preserve_keeps_definitions() {
    let ops = OperationSet {
        make_links_inline: true,
        preserve_reference_definitions: true,
        ..Default::default()
    };

    let out = run("See [docs].\n\n[docs]: https://example.com/docs\n", &ops);

    insta::assert_snapshot!(out, @r"
See [docs](https://example.com/docs).

[docs]: https://example.com/docs
");
}

#[test]
fn test_escaped_brackets_are_not_spans() {
    let markup = analyze(&SourceDocument::new("\\[not a link\\]\n"));
    assert!(markup.links.is_empty());
}

#[test]
fn test_footnote_definition_is_untouched_by_link_inlining() {
    let ops = OperationSet {
        make_links_inline: true,
        ..Default::default()
    };
    let text = "Claim[^1] and [site].\n\n[^1]: note text\n[site]: http://site\n";

    let doc = SourceDocument::new(text);
    let processed = process(&doc, &ops);

    let footnote = &processed.markup.links[&3];
    assert!(footnote.footnote_definition.is_some());
    assert!(footnote.reference_definition.is_none());
    assert_eq!(
        processed.text(&doc),
        "Claim[^1] and [site](http://site).\n\n[^1]: note text\n"
    );
}

#[test]
fn test_annotate_and_equalize() {
    let ops = OperationSet {
        annotate_headings: true,
        heading_shift: Some(HeadingShift::IncreaseBy(1)),
        ..Default::default()
    };

    let out = run("# Top #\ntext\n## Sub\n", &ops);

    insta::assert_snapshot!(out, @r"
Level 2 heading. Top
text
Level 3 heading. Sub
");

    let ops = OperationSet {
        equalize_trailing_hashes: true,
        ..Default::default()
    };
    assert_eq!(run("### Three #\n", &ops), "### Three ###\n");
}

#[test]
fn test_strip_line_breaks() {
    let ops = OperationSet {
        strip_line_breaks: true,
        ..Default::default()
    };
    assert_eq!(
        run("Roses are red,  \nViolets are blue.\n", &ops),
        "Roses are red,\nViolets are blue.\n"
    );
}

#[test]
fn test_combined_operations() {
    let ops = OperationSet {
        heading_shift: Some(HeadingShift::DecreaseMax),
        strip_heading_markup: Some(HeadingMarkupStrip::TrailingHashes),
        strip_line_breaks: true,
        make_links_inline: true,
        ..Default::default()
    };
    let text = "\
### Guide ###

Read [the manual][man].
Then [ask].

[man]: https://example.com/manual
[ask]: https://example.com/ask
";

    insta::assert_snapshot!(run(text, &ops), @r"
# Guide

Read [the manual](https://example.com/manual).
Then [ask](https://example.com/ask).
");
}

#[test]
fn test_diagnostic_summary_keys() {
    let doc = SourceDocument::new("## A\nB  \n[x](y)\n[^1]: z\n");
    let processed = process(&doc, &OperationSet::default());
    let json = processed.diagnostic().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let summary = &value["markup"]["summary"];
    assert_eq!(summary["at_least_one_heading_exists"], true);
    assert_eq!(summary["total_heading_count"], 1);
    assert_eq!(summary["at_least_one_hard_line_break_exists"], true);
    assert_eq!(summary["at_least_one_link_exists"], true);
    assert_eq!(summary["at_least_one_footnote_definition_exists"], true);
}
