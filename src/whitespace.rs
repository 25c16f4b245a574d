//! # Whitespace Reconstruction
//!
//! Merged text runs are laid out by the game, not by the editor, so the gap
//! between two runs has to be rebuilt out of characters. Unicode has a dozen
//! space characters of different widths; a run of them can approximate
//! almost any pixel gap while staying invisible.
//!
//! The solver is a greedy search with backtracking over the space kinds
//! sorted widest first. It keeps an explicit stack of accepted indices and a
//! scan cursor, and tracks the closest combination seen so far (which may
//! overshoot) to fall back on when no combination lands exactly.

use crate::config::SpaceFonts;
use crate::font::TextMetrics;

/// The space characters the solver can draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    Em,
    Ideographic,
    Figure,
    En,
    Punctuation,
    ThreePerEm,
    FourPerEm,
    Normal,
    Narrow,
    Thin,
    SixPerEm,
    Hair,
}

impl SpaceKind {
    pub const ALL: [SpaceKind; 12] = [
        SpaceKind::Em,
        SpaceKind::Ideographic,
        SpaceKind::Figure,
        SpaceKind::En,
        SpaceKind::Punctuation,
        SpaceKind::ThreePerEm,
        SpaceKind::FourPerEm,
        SpaceKind::Normal,
        SpaceKind::Narrow,
        SpaceKind::Thin,
        SpaceKind::SixPerEm,
        SpaceKind::Hair,
    ];

    pub fn as_char(self) -> char {
        match self {
            SpaceKind::Em => '\u{2003}',
            SpaceKind::Ideographic => '\u{3000}',
            SpaceKind::Figure => '\u{2007}',
            SpaceKind::En => '\u{2002}',
            SpaceKind::Punctuation => '\u{2008}',
            SpaceKind::ThreePerEm => '\u{2004}',
            SpaceKind::FourPerEm => '\u{2005}',
            SpaceKind::Normal => ' ',
            SpaceKind::Narrow => '\u{202F}',
            SpaceKind::Thin => '\u{2009}',
            SpaceKind::SixPerEm => '\u{2006}',
            SpaceKind::Hair => '\u{200A}',
        }
    }

    /// The font this kind is measured (and rendered) in.
    pub fn font(self, fonts: &SpaceFonts) -> &str {
        match self {
            SpaceKind::Ideographic => &fonts.ideographic,
            SpaceKind::Normal | SpaceKind::Narrow => &fonts.condensed,
            _ => &fonts.default,
        }
    }

    pub fn from_char(ch: char) -> Option<SpaceKind> {
        SpaceKind::ALL.into_iter().find(|kind| kind.as_char() == ch)
    }
}

/// Whether `ch` counts as whitespace typed directly into a text layer:
/// one of the solver's space kinds or ASCII whitespace.
pub fn is_raw_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c') || SpaceKind::from_char(ch).is_some()
}

/// Pixel widths of the space kinds at one font size, widest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceWidthTable {
    entries: Vec<(SpaceKind, f64)>,
}

impl SpaceWidthTable {
    /// Measure every space kind at `font_size` pixels, rounded to whole
    /// pixels like the gaps they fill.
    pub fn measure<M: TextMetrics + ?Sized>(metrics: &M, fonts: &SpaceFonts, font_size: f64) -> Self {
        Self::from_widths(SpaceKind::ALL.into_iter().map(|kind| {
            let width = metrics.advance_width(&kind.as_char().to_string(), kind.font(fonts), font_size);
            (kind, width.round())
        }))
    }

    /// Build a table from known widths. Kinds with equal widths keep their
    /// input order; non-positive widths are dropped since they can never
    /// bring the total closer to a gap.
    pub fn from_widths(widths: impl IntoIterator<Item = (SpaceKind, f64)>) -> Self {
        let mut entries: Vec<(SpaceKind, f64)> = widths
            .into_iter()
            .filter(|&(kind, width)| {
                let usable = width > 0.0;
                if !usable {
                    log::debug!("Dropping {:?} space with width {}", kind, width);
                }
                usable
            })
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        Self { entries }
    }

    /// Entries sorted widest first.
    pub fn entries(&self) -> &[(SpaceKind, f64)] {
        &self.entries
    }

    #[cfg(test)]
    fn width(&self, kind: SpaceKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|&(_, width)| width)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find a run of spaces whose total width approximates `target` pixels.
    ///
    /// An exact or undershooting combination is returned when the search
    /// reaches one; otherwise the closest combination it saw, which may
    /// overshoot. Spaces are listed in the order they were accepted.
    pub fn solve(&self, target: f64) -> Solution {
        let entries = &self.entries;
        let Some(&(narrowest, narrowest_width)) = entries.last() else {
            return Solution::empty();
        };

        if target < narrowest_width {
            if narrowest_width - target > target {
                return Solution::empty();
            }
            return Solution {
                width: narrowest_width,
                spaces: vec![narrowest],
            };
        }

        let mut best_total = 0.0;
        let mut best: Vec<usize> = Vec::new();
        let mut total = 0.0;
        let mut stack: Vec<usize> = Vec::new();
        let mut cursor = 0;

        while total < target {
            let mut accepted = false;

            for (i, &(_, width)) in entries.iter().enumerate().skip(cursor) {
                let candidate = total + width;
                if (candidate - target).abs() < (best_total - target).abs() {
                    best_total = candidate;
                    best.clone_from(&stack);
                    best.push(i);
                }
                if candidate <= target {
                    cursor = i;
                    stack.push(i);
                    total = candidate;
                    accepted = true;
                    break;
                }
            }

            if !accepted {
                let Some(popped) = stack.pop() else {
                    return self.solution(best_total, &best);
                };
                total -= entries[popped].1;
                // Only an exhausted cursor is rewound to the popped entry;
                // otherwise it steps past wherever it already was.
                if cursor == entries.len() {
                    cursor = popped;
                }
                cursor += 1;
            }
        }

        self.solution(total, &stack)
    }

    fn solution(&self, width: f64, indices: &[usize]) -> Solution {
        Solution {
            width,
            spaces: indices.iter().map(|&i| self.entries[i].0).collect(),
        }
    }
}

/// A run of spaces chosen by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Total width of `spaces` in pixels.
    pub width: f64,
    pub spaces: Vec<SpaceKind>,
}

impl Solution {
    pub fn empty() -> Self {
        Self {
            width: 0.0,
            spaces: Vec::new(),
        }
    }

    /// The spaces as literal characters.
    pub fn to_text(&self) -> String {
        self.spaces.iter().map(|kind| kind.as_char()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(widths: &[(SpaceKind, f64)]) -> SpaceWidthTable {
        SpaceWidthTable::from_widths(widths.iter().copied())
    }

    fn basic() -> SpaceWidthTable {
        table(&[
            (SpaceKind::Hair, 2.0),
            (SpaceKind::Em, 20.0),
            (SpaceKind::Thin, 4.0),
            (SpaceKind::En, 10.0),
        ])
    }

    #[test]
    fn test_sorted_widest_first() {
        let kinds: Vec<SpaceKind> = basic().entries().iter().map(|e| e.0).collect();
        assert_eq!(
            kinds,
            vec![SpaceKind::Em, SpaceKind::En, SpaceKind::Thin, SpaceKind::Hair]
        );
    }

    #[test]
    fn test_equal_widths_keep_input_order() {
        let t = table(&[
            (SpaceKind::Figure, 8.0),
            (SpaceKind::Punctuation, 8.0),
            (SpaceKind::Em, 16.0),
        ]);
        let kinds: Vec<SpaceKind> = t.entries().iter().map(|e| e.0).collect();
        assert_eq!(
            kinds,
            vec![SpaceKind::Em, SpaceKind::Figure, SpaceKind::Punctuation]
        );
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(basic().solve(0.0), Solution::empty());
    }

    #[test]
    fn test_below_narrowest_rounds_to_nothing() {
        // Using a 2px hair space would overshoot by 1.1, leaving it out misses by 0.9.
        assert_eq!(basic().solve(0.9), Solution::empty());
    }

    #[test]
    fn test_below_narrowest_rounds_up_on_tie() {
        let s = basic().solve(1.0);
        assert_eq!(s.width, 2.0);
        assert_eq!(s.spaces, vec![SpaceKind::Hair]);
    }

    #[test]
    fn test_exact_combination_in_acceptance_order() {
        let s = basic().solve(16.0);
        assert_eq!(s.width, 16.0);
        assert_eq!(s.spaces, vec![SpaceKind::En, SpaceKind::Thin, SpaceKind::Hair]);
    }

    #[test]
    fn test_repeats_a_kind() {
        let s = basic().solve(44.0);
        assert_eq!(s.width, 44.0);
        assert_eq!(s.spaces, vec![SpaceKind::Em, SpaceKind::Em, SpaceKind::Thin]);
    }

    #[test]
    fn test_backtracks_to_undershoot() {
        let t = table(&[(SpaceKind::Em, 10.0), (SpaceKind::En, 6.0)]);
        let s = t.solve(13.0);
        assert_eq!(s.width, 12.0);
        assert_eq!(s.spaces, vec![SpaceKind::En, SpaceKind::En]);
    }

    #[test]
    fn test_overshoot_when_closest() {
        let t = table(&[(SpaceKind::Em, 10.0)]);
        let s = t.solve(19.0);
        assert_eq!(s.width, 20.0);
        assert_eq!(s.spaces, vec![SpaceKind::Em, SpaceKind::Em]);
    }

    #[test]
    fn test_deterministic() {
        let t = basic();
        for target in [3.0, 7.0, 13.0, 31.0, 57.0] {
            assert_eq!(t.solve(target), t.solve(target));
        }
    }

    #[test]
    fn test_empty_table() {
        let t = table(&[(SpaceKind::Em, 0.0), (SpaceKind::Hair, -1.0)]);
        assert!(t.is_empty());
        assert_eq!(t.solve(12.0), Solution::empty());
    }

    #[test]
    fn test_solution_text() {
        let s = Solution {
            width: 0.0,
            spaces: vec![SpaceKind::Normal, SpaceKind::Ideographic, SpaceKind::Hair],
        };
        assert_eq!(s.to_text(), " \u{3000}\u{200A}");
    }

    #[test]
    fn test_raw_whitespace() {
        assert!(is_raw_whitespace(' '));
        assert!(is_raw_whitespace('\t'));
        assert!(is_raw_whitespace('\u{2009}'));
        assert!(is_raw_whitespace('\u{3000}'));
        assert!(!is_raw_whitespace('a'));
        // Not in the solver's set, and not ASCII.
        assert!(!is_raw_whitespace('\u{00A0}'));
    }

    struct FixedMetrics;

    impl TextMetrics for FixedMetrics {
        fn has_font(&self, _family: &str) -> bool {
            true
        }

        fn advance_width(&self, text: &str, family: &str, size: f64) -> f64 {
            let per_char = match family {
                "Furore" => 0.3,
                "Noto Sans JP Medium" => 1.0,
                _ => 0.25,
            };
            text.chars().count() as f64 * per_char * size
        }
    }

    #[test]
    fn test_measure_uses_designated_fonts() {
        let t = SpaceWidthTable::measure(&FixedMetrics, &SpaceFonts::default(), 20.0);
        assert_eq!(t.width(SpaceKind::Ideographic), Some(20.0));
        assert_eq!(t.width(SpaceKind::Normal), Some(6.0));
        assert_eq!(t.width(SpaceKind::Narrow), Some(6.0));
        assert_eq!(t.width(SpaceKind::Em), Some(5.0));
        assert_eq!(t.entries()[0].0, SpaceKind::Ideographic);
    }
}
