/// Derive a URL slug from a free-text name: lowercase, alphanumeric runs
/// joined by single hyphens, no leading or trailing hyphen.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_joins_words() {
        assert_eq!(slugify("Isha Center"), "isha-center");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("  Spring -- Retreat! 2024 "), "spring-retreat-2024");
    }

    #[test]
    fn empty_input_gives_empty_slug() {
        assert_eq!(slugify("   "), "");
    }
}
