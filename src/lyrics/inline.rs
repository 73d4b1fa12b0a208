//! Inline time-marker text (`[mm:ss.cc]text`, one caption per line).
//!
//! Lines without a well-formed leading marker are skipped; they never abort
//! the rest of the parse. Output keeps input order.

use tracing::trace;

use super::model::Caption;

/// Parse every `[mm:ss.cc]text` line of `text` into a caption.
pub fn parse(text: &str) -> Vec<Caption> {
    text.lines()
        .filter_map(|line| {
            let caption = parse_line(line);
            if caption.is_none() && !line.trim().is_empty() {
                trace!(line, "skipping line without time marker");
            }
            caption
        })
        .collect()
}

/// Render captions back into inline time-marker text.
pub fn render(captions: &[Caption]) -> String {
    captions
        .iter()
        .map(|c| format!("{}{}", format_marker(c.timestamp), c.text))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Format milliseconds as `[mm:ss.cc]`. Sub-hundredth precision is dropped.
pub fn format_marker(timestamp_ms: u64) -> String {
    let minutes = timestamp_ms / 60_000;
    let seconds = (timestamp_ms % 60_000) / 1000;
    let hundredths = (timestamp_ms % 1000) / 10;
    format!("[{:02}:{:02}.{:02}]", minutes, seconds, hundredths)
}

fn parse_line(line: &str) -> Option<Caption> {
    let line = line.trim();
    let rest = line.strip_prefix('[')?;
    let (marker, text) = rest.split_once(']')?;

    let (minutes, rest) = marker.split_once(':')?;
    let (seconds, fraction) = rest.split_once('.')?;

    let minutes = digits(minutes)?;
    if seconds.len() != 2 {
        return None;
    }
    let seconds = digits(seconds)?;
    if seconds >= 60 {
        return None;
    }
    let fraction_ms = match fraction.len() {
        2 => digits(fraction)? * 10,
        3 => digits(fraction)?,
        _ => return None,
    };

    Some(Caption::new(
        minutes * 60_000 + seconds * 1000 + fraction_ms,
        text.trim(),
    ))
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_marker_into_milliseconds_and_trims_text() {
        let captions = parse("[01:02.34]  Hello there  ");
        assert_eq!(captions, vec![Caption::new(62_340, "Hello there")]);
    }

    #[test]
    fn malformed_lines_are_skipped_without_aborting() {
        let text = "\
[ar:Some Artist]
[00:01.00]first
no marker here
[0x:02.00]broken minutes
[00:02.5]short fraction
[00:03.00]second
";
        let captions = parse(text);
        assert_eq!(
            captions,
            vec![Caption::new(1000, "first"), Caption::new(3000, "second")]
        );
    }

    #[test]
    fn keeps_input_order_without_sorting() {
        let captions = parse("[00:05.00]late\n[00:01.00]early");
        assert_eq!(captions[0].text, "late");
        assert_eq!(captions[1].text, "early");
    }

    #[test]
    fn empty_input_yields_no_captions() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n   \n").is_empty());
    }

    #[test]
    fn empty_text_after_marker_is_kept() {
        let captions = parse("[00:10.00]");
        assert_eq!(captions, vec![Caption::new(10_000, "")]);
    }

    #[test]
    fn three_digit_fraction_is_milliseconds() {
        let captions = parse("[00:00.250]x");
        assert_eq!(captions[0].timestamp, 250);
    }

    #[test]
    fn render_produces_parseable_text() {
        let captions = vec![Caption::new(0, "Hello"), Caption::new(63_450, "World")];
        let text = render(&captions);
        assert_eq!(text, "[00:00.00]Hello\n[01:03.45]World");
        assert_eq!(parse(&text), captions);
    }
}
