//! # Cell Renderer
//!
//! Renders one run of text to an exact printable width: truncate or pad,
//! then style. Widths are measured in characters, never bytes, and the
//! escape sequences added by styling are excluded from the measurement
//! because styling happens after alignment.

use super::style::TextStyle;

/// Horizontal placement of text inside its width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One content row of a box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub content: String,
    pub align: Align,
    pub style: TextStyle,
}

impl Line {
    pub fn new(content: impl Into<String>, align: Align) -> Self {
        Self {
            content: content.into(),
            align,
            style: TextStyle::default(),
        }
    }

    pub fn styled(content: impl Into<String>, align: Align, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            align,
            style,
        }
    }
}

/// Fit `content` to exactly `width` printable characters, then apply `style`.
///
/// Content wider than `width` is truncated. Shorter content is padded with
/// spaces: after the text for [`Align::Left`], before it for
/// [`Align::Right`], and split for [`Align::Center`] with the extra space on
/// the right when the padding is odd.
pub fn render_cell(content: &str, width: usize, align: Align, style: &TextStyle) -> String {
    style.apply(&align_text(content, width, align))
}

fn align_text(text: &str, width: usize, align: Align) -> String {
    let length = text.chars().count();
    if length >= width {
        return text.chars().take(width).collect();
    }
    let padding = width - length;
    match align {
        Align::Left => format!("{text}{}", " ".repeat(padding)),
        Align::Right => format!("{}{text}", " ".repeat(padding)),
        Align::Center => {
            let left = padding / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(padding - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::style::Fill;
    use super::*;

    fn plain(content: &str, width: usize, align: Align) -> String {
        render_cell(content, width, align, &TextStyle::default())
    }

    #[test]
    fn test_left_pads_to_exact_width() {
        assert_eq!(plain("hi", 6, Align::Left), "hi    ");
    }

    #[test]
    fn test_right_pads_to_exact_width() {
        assert_eq!(plain("hi", 6, Align::Right), "    hi");
    }

    #[test]
    fn test_center_splits_evenly() {
        assert_eq!(plain("hi", 6, Align::Center), "  hi  ");
    }

    #[test]
    fn test_center_odd_padding_leans_right() {
        assert_eq!(plain("hi", 5, Align::Center), " hi  ");
    }

    #[test]
    fn test_exact_width_is_unchanged() {
        assert_eq!(plain("exact", 5, Align::Center), "exact");
    }

    #[test]
    fn test_overflow_truncates() {
        assert_eq!(plain("overflowing", 4, Align::Left), "over");
        assert_eq!(plain("overflowing", 4, Align::Right), "over");
    }

    #[test]
    fn test_zero_width_is_empty() {
        assert_eq!(plain("anything", 0, Align::Center), "");
        assert_eq!(plain("", 0, Align::Left), "");
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        // é and │ are multi-byte but single-width characters
        assert_eq!(plain("héllo", 7, Align::Left), "héllo  ");
        assert_eq!(plain("││││", 2, Align::Left), "││");
    }

    #[test]
    fn test_styling_never_changes_printable_width() {
        let style = TextStyle {
            background: Some(Fill::Reverse),
            bold: true,
            ..TextStyle::default()
        };
        let styled = render_cell("hi", 6, Align::Center, &style);
        let stripped: String = styled
            .split('\x1b')
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    part.to_string()
                } else {
                    part.chars().skip_while(|c| *c != 'm').skip(1).collect()
                }
            })
            .collect();
        assert_eq!(stripped, "  hi  ");
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        assert!(!plain("text", 10, Align::Center).contains('\x1b'));
    }
}
