//! `--pages` parsing.

use std::collections::BTreeSet;

/// Parse a 1-based page selection such as `"1,3-5"` into sorted, distinct
/// 0-based page indices.
///
/// Empty items are ignored. Page 0, pages beyond `page_count`, reversed ranges
/// and anything non-numeric are errors.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = BTreeSet::new();

    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (first, last) = match item.split_once('-') {
            Some((a, b)) => (page_number(a, page_count)?, page_number(b, page_count)?),
            None => {
                let page = page_number(item, page_count)?;
                (page, page)
            }
        };
        if first > last {
            return Err(format!("reversed page range: '{item}'"));
        }
        pages.extend((first..=last).map(|p| p - 1));
    }

    Ok(pages.into_iter().collect())
}

fn page_number(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    match page {
        0 => Err("page 0 is invalid (pages start at 1)".to_string()),
        p if p > page_count => Err(format!(
            "page {p} exceeds document page count ({page_count})"
        )),
        p => Ok(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pages_and_ranges() {
        assert_eq!(parse_page_range("2", 3).unwrap(), vec![1]);
        assert_eq!(parse_page_range("1,3-5", 5).unwrap(), vec![0, 2, 3, 4]);
    }

    #[test]
    fn sorted_and_deduplicated() {
        assert_eq!(parse_page_range("3,1-2,2", 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn whitespace_and_empty_items() {
        assert_eq!(parse_page_range(" 1 , , 2 - 3 ", 3).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn page_zero() {
        assert!(parse_page_range("0", 2).unwrap_err().contains("pages start at 1"));
    }

    #[test]
    fn beyond_page_count() {
        assert!(parse_page_range("1-4", 2).unwrap_err().contains("exceeds"));
    }

    #[test]
    fn reversed_range() {
        assert!(parse_page_range("3-1", 3).unwrap_err().contains("reversed"));
    }

    #[test]
    fn not_a_number() {
        assert!(parse_page_range("two", 3).unwrap_err().contains("invalid page number"));
    }
}
