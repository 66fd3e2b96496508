//! File-name sanitization for backend key segments.
//!
//! Every character outside `[A-Za-z0-9.-]` becomes `_`. The dot is in the
//! allow-set, so extensions such as `.java` survive verbatim. The mapping is
//! per character: a multi-byte character collapses to a single `_`.
//!
//! Only file names are sanitized. PR identifiers pass through untouched.

/// Replacement for every character outside the allow-set.
pub const REPLACEMENT: char = '_';

/// Whether `ch` may appear unchanged in a sanitized segment.
pub fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '.' || ch == '-'
}

/// Sanitize a file name into a safe key segment.
///
/// # Examples
///
/// ```
/// use pra_types::names::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Foo.java"), "Foo.java");
/// assert_eq!(sanitize_file_name("weird name!.java"), "weird_name_.java");
/// assert_eq!(sanitize_file_name("src/main/App.kt"), "src_main_App.kt");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| if is_allowed(ch) { ch } else { REPLACEMENT })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn keeps_allowed_characters() {
        assert_eq!(sanitize_file_name("Foo.java"), "Foo.java");
        assert_eq!(sanitize_file_name("a-b.c-d"), "a-b.c-d");
        assert_eq!(sanitize_file_name("ABCxyz0189"), "ABCxyz0189");
    }

    #[test]
    fn replaces_spaces_and_punctuation() {
        assert_eq!(sanitize_file_name("weird name!.java"), "weird_name_.java");
        assert_eq!(sanitize_file_name("a:b*c?d"), "a_b_c_d");
    }

    #[test]
    fn replaces_path_separators() {
        assert_eq!(sanitize_file_name("src/test/FooTest.java"), "src_test_FooTest.java");
        assert_eq!(sanitize_file_name("..\\evil"), ".._evil");
    }

    #[test]
    fn underscore_maps_to_itself() {
        assert_eq!(sanitize_file_name("snake_case.py"), "snake_case.py");
    }

    #[test]
    fn non_ascii_is_one_replacement_per_char() {
        assert_eq!(sanitize_file_name("héllo.rs"), "h_llo.rs");
        assert_eq!(sanitize_file_name("日本.txt"), "__.txt");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize_file_name(""), "");
    }

    proptest! {
        #[test]
        fn output_only_contains_allowed_chars(s in ".*") {
            let out = sanitize_file_name(&s);
            prop_assert!(out.chars().all(|c| is_allowed(c) || c == '_'));
        }

        #[test]
        fn sanitize_is_idempotent(s in ".*") {
            let once = sanitize_file_name(&s);
            prop_assert_eq!(sanitize_file_name(&once), once.clone());
        }

        #[test]
        fn allowed_input_is_unchanged(s in "[A-Za-z0-9._-]*") {
            prop_assert_eq!(sanitize_file_name(&s), s);
        }

        #[test]
        fn preserves_char_count(s in ".*") {
            prop_assert_eq!(sanitize_file_name(&s).chars().count(), s.chars().count());
        }
    }
}
