//! Word wrapping and line placement.
//!
//! Layout is independent of the raster: it only needs a way to measure a
//! string, so the wrapping rules can be tested with a fixed-width measure.

/// Width of a string in pixels.
pub trait MeasureText {
    fn width(&self, text: &str) -> f32;
}

impl<F> MeasureText for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

pub const ELLIPSIS: &str = "...";

/// Greedy word wrap.
///
/// A word is appended to the current line while the line (with a trailing
/// space) stays within `max_width`. A single word wider than `max_width`
/// occupies its own line unbroken. Empty input produces one empty line.
pub fn wrap_words(text: &str, max_width: f32, measure: &impl MeasureText) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = format!("{}{} ", line, word);
        if measure.width(&candidate) > max_width && !line.is_empty() {
            lines.push(line.trim_end().to_string());
            line = format!("{} ", word);
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim_end().to_string());

    lines
}

/// Cut `lines` down to `max_lines`, marking the cut with an ellipsis.
///
/// Words are dropped from the end of the last kept line until the line plus
/// the ellipsis fits `max_width`.
pub fn ellipsize(
    mut lines: Vec<String>,
    max_lines: usize,
    max_width: f32,
    measure: &impl MeasureText,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);

    if let Some(last) = lines.last_mut() {
        let mut words: Vec<&str> = last.split_whitespace().collect();
        loop {
            let candidate = format!("{}{}", words.join(" "), ELLIPSIS);
            if words.len() <= 1 || measure.width(&candidate) <= max_width {
                *last = candidate;
                break;
            }
            words.pop();
        }
    }

    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One line of text positioned on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    /// Left edge of the line.
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
}

/// Where and how a block of text is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFrame {
    /// Left edge for [`Align::Left`], center line for [`Align::Center`].
    pub x: f32,
    /// Baseline of the first line.
    pub baseline: f32,
    pub max_width: f32,
    pub line_height: f32,
    pub align: Align,
    pub max_lines: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<PlacedLine>,
    /// Baseline one line below the last placed line.
    pub next_baseline: f32,
}

impl TextBlock {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Move every line down by `dy`.
    pub fn offset(&mut self, dy: f32) {
        for line in &mut self.lines {
            line.baseline += dy;
        }
        self.next_baseline += dy;
    }
}

/// Wrap `text` into `frame` and assign each line its position.
pub fn layout_block(text: &str, frame: &TextFrame, measure: &impl MeasureText) -> TextBlock {
    let mut wrapped = wrap_words(text, frame.max_width, measure);
    if let Some(max_lines) = frame.max_lines {
        wrapped = ellipsize(wrapped, max_lines, frame.max_width, measure);
    }

    let mut baseline = frame.baseline;
    let mut lines = Vec::with_capacity(wrapped.len());
    for text in wrapped {
        let width = measure.width(&text);
        let x = match frame.align {
            Align::Left => frame.x,
            Align::Center => frame.x - width / 2.0,
        };
        lines.push(PlacedLine {
            text,
            x,
            baseline,
            width,
        });
        baseline += frame.line_height;
    }

    TextBlock {
        lines,
        next_baseline: baseline,
    }
}

/// Number of lines whose baselines fit between `first_baseline` and `limit`.
pub fn lines_fitting(first_baseline: f32, limit: f32, line_height: f32) -> usize {
    if first_baseline > limit || line_height <= 0.0 {
        return 0;
    }
    ((limit - first_baseline) / line_height).floor() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mono(text: &str) -> f32 {
        text.chars().count() as f32 * 10.0
    }

    #[test]
    fn test_wrap_single_line() {
        assert_eq!(wrap_words("one two", 100.0, &mono), vec!["one two"]);
    }

    #[test]
    fn test_wrap_empty_input() {
        assert_eq!(wrap_words("", 100.0, &mono), vec![""]);
        assert_eq!(wrap_words("   ", 100.0, &mono), vec![""]);
    }

    #[test]
    fn test_wrap_breaks_on_width() {
        // "alpha beta " is 11 chars = 110px
        let lines = wrap_words("alpha beta gamma", 100.0, &mono);
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);

        let lines = wrap_words("alpha beta gamma", 110.0, &mono);
        assert_eq!(lines, vec!["alpha beta", "gamma"]);
    }

    #[test]
    fn test_wrap_long_word_not_split() {
        let lines = wrap_words("Jeffersonville is", 50.0, &mono);
        assert_eq!(lines, vec!["Jeffersonville", "is"]);
    }

    #[test]
    fn test_ellipsize_noop_when_short() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(ellipsize(lines.clone(), 2, 100.0, &mono), lines);
    }

    #[test]
    fn test_ellipsize_trims_last_line() {
        let lines = vec!["one two".to_string(), "three four".to_string(), "five".to_string()];
        let cut = ellipsize(lines, 2, 100.0, &mono);
        assert_eq!(cut, vec!["one two", "three..."]);
    }

    #[test]
    fn test_layout_block_centers() {
        let frame = TextFrame {
            x: 100.0,
            baseline: 20.0,
            max_width: 200.0,
            line_height: 16.0,
            align: Align::Center,
            max_lines: None,
        };
        let block = layout_block("abcd", &frame, &mono);
        assert_eq!(block.lines[0].x, 80.0);
        assert_eq!(block.lines[0].baseline, 20.0);
        assert_eq!(block.next_baseline, 36.0);
    }

    #[test]
    fn test_lines_fitting() {
        assert_eq!(lines_fitting(100.0, 100.0, 18.0), 1);
        assert_eq!(lines_fitting(100.0, 136.0, 18.0), 3);
        assert_eq!(lines_fitting(100.0, 90.0, 18.0), 0);
    }
}
