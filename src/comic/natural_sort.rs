use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// Splits a name into maximal runs of ascii digits and runs of everything else.
fn segments(s: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != is_digit)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if is_digit {
            Segment::Digits(run)
        } else {
            Segment::Text(run)
        })
    })
}

// Compares digit runs by value without parsing, so runs of any length work.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a_value = a.trim_start_matches('0');
    let b_value = b.trim_start_matches('0');
    a_value
        .len()
        .cmp(&b_value.len())
        .then_with(|| a_value.cmp(b_value))
        // "1" before "01"
        .then_with(|| a.len().cmp(&b.len()))
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn cmp_segment(a: Segment<'_>, b: Segment<'_>) -> Ordering {
    match (a, b) {
        (Segment::Digits(a), Segment::Digits(b)) => cmp_digits(a, b),
        (Segment::Text(a), Segment::Text(b)) => cmp_text(a, b),
        (Segment::Digits(_), Segment::Text(_)) => Ordering::Less,
        (Segment::Text(_), Segment::Digits(_)) => Ordering::Greater,
    }
}

/// Natural ordering for file names.
///
/// Embedded numbers compare by numeric value and text compares
/// case-insensitively, segment by segment from the start of each name.
/// Names that are still equal after that are ordered byte-wise, which keeps
/// the ordering total (`Chapter1` and `chapter1` are not equal).
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_segments = segments(a);
    let mut b_segments = segments(b);
    loop {
        match (a_segments.next(), b_segments.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a_seg), Some(b_seg)) => match cmp_segment(a_seg, b_seg) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}
