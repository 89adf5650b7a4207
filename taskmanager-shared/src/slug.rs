//! URL-safe slugs derived from display names.

use deunicode::deunicode_with_tofu;

/// Derives a slug from `input`
///
/// The input is first transliterated to ASCII (`Zoë` becomes `Zoe`, `Иван`
/// becomes `Ivan`); characters with no transliteration are removed. Letters
/// and digits are then lowercased, apostrophes are removed, and every run of
/// anything else becomes a single `-`. Separators never lead or trail the
/// result.
///
/// ```
/// use taskmanager_shared::slug::slugify;
///
/// assert_eq!(slugify("John Doe"), "john-doe");
/// assert_eq!(slugify("José Müller"), "jose-muller");
/// ```
pub fn slugify(input: &str) -> String {
    let ascii = deunicode_with_tofu(input, "");

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch != '\'' {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_cases() {
        assert_eq!(slugify("John Doe"), "john-doe");
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("foo/bar\\baz"), "foo-bar-baz");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("  Hello,  World!! "), "hello-world");
        assert_eq!(slugify("foo_bar--baz"), "foo-bar-baz");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slugify_transliterates_accented_letters() {
        assert_eq!(slugify("Zoë"), "zoe");
        assert_eq!(slugify("Zoë Ångström"), "zoe-angstrom");
        assert_eq!(slugify("José Müller"), "jose-muller");
    }

    #[test]
    fn slugify_transliterates_cyrillic() {
        assert_eq!(slugify("Иван Петров"), "ivan-petrov");
    }

    #[test]
    fn slugify_drops_apostrophes() {
        assert_eq!(slugify("Someone else's"), "someone-elses");
        assert_eq!(slugify("O'Brien"), "obrien");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("User 42"), "user-42");
        assert_eq!(slugify("R2D2"), "r2d2");
    }

    #[test]
    fn slugify_is_deterministic() {
        assert_eq!(slugify("Jane  Roe"), slugify("Jane  Roe"));
    }
}
