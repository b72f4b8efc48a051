/// Characters that are illegal in file names on common file systems
const ILLEGAL_CHARACTERS: [char; 10] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|', '\t'];

/// Strips characters that cannot appear in a file name
///
/// Removes path separators, the reserved characters `: * ? " < > |` and
/// tabs. Everything else, including surrounding whitespace, is kept as is,
/// so applying the function twice yields the same result as applying it once.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !ILLEGAL_CHARACTERS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Normal Title"), "Normal Title");
        assert_eq!(sanitize_title("Title: With Colon"), "Title With Colon");
        assert_eq!(sanitize_title("Path/With\\Slashes"), "PathWithSlashes");
        assert_eq!(sanitize_title("Who? \"Me\" <you> | *"), "Who Me you  ");
        assert_eq!(sanitize_title("Tab\tSeparated"), "TabSeparated");
        assert_eq!(sanitize_title("  Spaces  "), "  Spaces  ");
    }

    proptest! {
        #[test]
        fn prop_sanitize_is_idempotent(title in ".*") {
            let once = sanitize_title(&title);
            prop_assert_eq!(sanitize_title(&once), once);
        }

        #[test]
        fn prop_sanitize_removes_every_illegal_character(title in ".*") {
            let cleaned = sanitize_title(&title);
            prop_assert!(!cleaned.chars().any(|c| ILLEGAL_CHARACTERS.contains(&c)));
        }

        #[test]
        fn prop_sanitize_keeps_clean_titles(title in "[^\\\\/:*?\"<>|\t]*") {
            prop_assert_eq!(sanitize_title(&title), title);
        }
    }
}
