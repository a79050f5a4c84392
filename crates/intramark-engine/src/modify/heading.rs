use crate::analysis::{HeadingRecord, MarkupSummary};
use crate::operations::{HeadingMarkupStrip, HeadingShift, MAX_HEADING_LEVEL, OperationSet};

/// The level change applied to every heading in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelAdjustment {
    None,
    Decrease(usize),
    Increase(usize),
}

impl LevelAdjustment {
    /// Resolves a requested shift against the heading levels present.
    ///
    /// A decrease that would take the shallowest heading above level 1, or an
    /// increase that would take the deepest heading past level 6, is clamped
    /// to the largest shift that fits. Decrease is considered first.
    pub fn resolve(shift: Option<HeadingShift>, summary: &MarkupSummary) -> Self {
        let (Some(shift), Some(lowest), Some(highest)) = (
            shift,
            summary.lowest_heading_number,
            summary.highest_heading_number,
        ) else {
            return Self::None;
        };

        let adjustment = match shift {
            HeadingShift::DecreaseMax => Self::Decrease(lowest - 1),
            HeadingShift::DecreaseBy(n) if n >= lowest => Self::Decrease(lowest - 1),
            HeadingShift::DecreaseBy(n) => Self::Decrease(n),
            HeadingShift::IncreaseMax => Self::Increase(MAX_HEADING_LEVEL - highest),
            HeadingShift::IncreaseBy(n) if highest + n > MAX_HEADING_LEVEL => {
                Self::Increase(MAX_HEADING_LEVEL - highest)
            }
            HeadingShift::IncreaseBy(n) => Self::Increase(n),
        };

        match adjustment {
            Self::Decrease(0) | Self::Increase(0) => Self::None,
            other => other,
        }
    }

    fn apply_to(self, level: usize) -> usize {
        match self {
            Self::None => level,
            Self::Decrease(n) => level.saturating_sub(n).max(1),
            Self::Increase(n) => (level + n).min(MAX_HEADING_LEVEL),
        }
    }
}

/// Rewrites one heading line.
///
/// `line` may already carry link edits; they only ever fall inside the
/// heading content, so the counts in `record` still describe both ends of the
/// line. `content` is the heading content with the same edits applied.
///
/// Steps run in a fixed order, each on the result of the last: level shift,
/// trailing hash equalisation, annotation, trailing hash strip, full strip.
pub fn rewrite_heading(
    line: &str,
    record: &HeadingRecord,
    adjustment: LevelAdjustment,
    ops: &OperationSet,
    content: &str,
) -> String {
    let leading_spaces = record.leading_space_count.unwrap_or(0);
    let trailing_spaces = record.trailing_space_count.unwrap_or(0);

    let mut body = line.get(leading_spaces..).unwrap_or_default().to_string();

    let level = adjustment.apply_to(record.level());
    if level != record.level() {
        let rest = body.get(record.level()..).unwrap_or_default();
        // A `#` glued to a six-hash marker is content and needs its own space.
        let separator = if rest.starts_with('#') { " " } else { "" };
        body = format!("{}{separator}{rest}", "#".repeat(level));
    }

    let mut rewritten = format!("{}{}", " ".repeat(leading_spaces), body);

    let mut trailing_hashes = record.trailing_hash_count;
    if ops.equalize_trailing_hashes
        && let Some(count) = trailing_hashes
    {
        rewritten.truncate(rewritten.len() - trailing_spaces);
        rewritten.truncate(rewritten.len() - count);
        rewritten.push_str(&"#".repeat(level));
        rewritten.push_str(&" ".repeat(trailing_spaces));
        trailing_hashes = Some(level);
    }

    let annotated = ops.annotate_headings;
    if annotated {
        rewritten = format!("Level {level} heading. {content}");
    }

    if ops.strip_heading_markup == Some(HeadingMarkupStrip::TrailingHashes)
        && !annotated
        && let Some(count) = trailing_hashes
    {
        // The closing run, the single space before it and anything after it.
        rewritten.truncate(rewritten.len() - (count + 1 + trailing_spaces));
    }

    if ops.strip_heading_markup == Some(HeadingMarkupStrip::All) {
        rewritten = content.to_string();
    }

    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn summary(lowest: usize, highest: usize) -> MarkupSummary {
        MarkupSummary {
            at_least_one_heading_exists: true,
            lowest_heading_number: Some(lowest),
            highest_heading_number: Some(highest),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(HeadingShift::DecreaseMax, 2, 4, LevelAdjustment::Decrease(1))]
    #[case(HeadingShift::DecreaseMax, 3, 5, LevelAdjustment::Decrease(2))]
    #[case(HeadingShift::DecreaseMax, 1, 4, LevelAdjustment::None)]
    #[case(HeadingShift::DecreaseBy(1), 3, 5, LevelAdjustment::Decrease(1))]
    #[case(HeadingShift::DecreaseBy(5), 3, 5, LevelAdjustment::Decrease(2))]
    #[case(HeadingShift::DecreaseBy(2), 3, 5, LevelAdjustment::Decrease(2))]
    #[case(HeadingShift::IncreaseMax, 2, 4, LevelAdjustment::Increase(2))]
    #[case(HeadingShift::IncreaseMax, 1, 6, LevelAdjustment::None)]
    #[case(HeadingShift::IncreaseBy(1), 2, 4, LevelAdjustment::Increase(1))]
    #[case(HeadingShift::IncreaseBy(5), 2, 4, LevelAdjustment::Increase(2))]
    fn resolves_clamped_adjustment(
        #[case] shift: HeadingShift,
        #[case] lowest: usize,
        #[case] highest: usize,
        #[case] expected: LevelAdjustment,
    ) {
        assert_eq!(
            LevelAdjustment::resolve(Some(shift), &summary(lowest, highest)),
            expected
        );
    }

    #[test]
    fn no_headings_means_no_adjustment() {
        let adjustment =
            LevelAdjustment::resolve(Some(HeadingShift::IncreaseMax), &MarkupSummary::default());
        assert_eq!(adjustment, LevelAdjustment::None);
    }

    fn rewrite(line: &str, adjustment: LevelAdjustment, ops: &OperationSet) -> String {
        let record = HeadingRecord::detect(line).unwrap();
        rewrite_heading(line, &record, adjustment, ops, &record.content)
    }

    #[rstest]
    #[case("## Title", LevelAdjustment::Decrease(1), "# Title")]
    #[case("## Title", LevelAdjustment::Increase(2), "#### Title")]
    #[case("  ### Indented", LevelAdjustment::Decrease(2), "  # Indented")]
    #[case("## Closed ##  ", LevelAdjustment::Increase(1), "### Closed ##  ")]
    #[case("#", LevelAdjustment::Increase(1), "##")]
    #[case("####### b", LevelAdjustment::Decrease(1), "##### # b")]
    #[case("####### b ##", LevelAdjustment::Decrease(3), "### # b ##")]
    fn shifts_levels(
        #[case] line: &str,
        #[case] adjustment: LevelAdjustment,
        #[case] expected: &str,
    ) {
        assert_eq!(rewrite(line, adjustment, &OperationSet::default()), expected);
    }

    #[rstest]
    #[case("## Title ####", "## Title ##")]
    #[case("### Title #", "### Title ###")]
    #[case("## Title ####   ", "## Title ##   ")]
    #[case("## No closing run", "## No closing run")]
    fn equalizes_trailing_hashes(#[case] line: &str, #[case] expected: &str) {
        let ops = OperationSet {
            equalize_trailing_hashes: true,
            ..Default::default()
        };
        assert_eq!(rewrite(line, LevelAdjustment::None, &ops), expected);
    }

    #[test]
    fn equalizes_against_the_shifted_level() {
        let ops = OperationSet {
            equalize_trailing_hashes: true,
            ..Default::default()
        };
        assert_eq!(
            rewrite("## Title ##", LevelAdjustment::Increase(1), &ops),
            "### Title ###"
        );
    }

    #[test]
    fn annotates_with_the_shifted_level() {
        let ops = OperationSet {
            annotate_headings: true,
            ..Default::default()
        };
        assert_eq!(
            rewrite("  ## Title ##", LevelAdjustment::Increase(1), &ops),
            "Level 3 heading. Title"
        );
    }

    #[rstest]
    #[case("## Title ##", "## Title")]
    #[case("## Title ###   ", "## Title")]
    #[case("## Title", "## Title")]
    fn strips_trailing_hashes(#[case] line: &str, #[case] expected: &str) {
        let ops = OperationSet {
            strip_heading_markup: Some(HeadingMarkupStrip::TrailingHashes),
            ..Default::default()
        };
        assert_eq!(rewrite(line, LevelAdjustment::None, &ops), expected);
    }

    #[test]
    fn annotation_replaces_the_closing_run_before_trailing_strip() {
        // Given an annotated heading with a closing run
        let ops = OperationSet {
            annotate_headings: true,
            strip_heading_markup: Some(HeadingMarkupStrip::TrailingHashes),
            ..Default::default()
        };

        // When the trailing strip also runs
        let out = rewrite("## Title ##  ", LevelAdjustment::None, &ops);

        // Then the annotation is left whole
        assert_eq!(out, "Level 2 heading. Title");
    }

    #[test]
    fn strips_equalized_trailing_hashes() {
        let ops = OperationSet {
            equalize_trailing_hashes: true,
            strip_heading_markup: Some(HeadingMarkupStrip::TrailingHashes),
            ..Default::default()
        };
        assert_eq!(
            rewrite("### Title #", LevelAdjustment::None, &ops),
            "### Title"
        );
    }

    #[test]
    fn strip_all_leaves_content() {
        let ops = OperationSet {
            strip_heading_markup: Some(HeadingMarkupStrip::All),
            heading_shift: Some(HeadingShift::IncreaseBy(1)),
            ..Default::default()
        };
        assert_eq!(
            rewrite("   ## Title ##  ", LevelAdjustment::Increase(1), &ops),
            "Title"
        );
    }

    #[test]
    fn edited_content_is_used_for_annotation() {
        let ops = OperationSet {
            annotate_headings: true,
            ..Default::default()
        };
        let record = HeadingRecord::detect("# See [x]").unwrap();
        let out = rewrite_heading(
            "# See [x](u)",
            &record,
            LevelAdjustment::None,
            &ops,
            "See [x](u)",
        );
        assert_eq!(out, "Level 1 heading. See [x](u)");
    }
}
