/// Построить URL-slug из названия товара.
///
/// Нижний регистр, обрезка пробелов, удаление всего, кроме ASCII-букв, цифр,
/// `_`, пробельных символов и `-`; серии пробелов/`_`/`-` сворачиваются в один
/// `-`, дефисы по краям удаляются.
///
/// ```
/// use contracts::domain::a002_product::slug::generate_slug;
/// assert_eq!(generate_slug("Red T-Shirt!! 2024"), "red-t-shirt-2024");
/// ```
pub fn generate_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.trim().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_and_spaces() {
        assert_eq!(generate_slug("Red T-Shirt!! 2024"), "red-t-shirt-2024");
        assert_eq!(generate_slug("  Hello   World  "), "hello-world");
        assert_eq!(generate_slug("a_b__c--d"), "a-b-c-d");
    }

    #[test]
    fn separators_at_edges_are_stripped() {
        assert_eq!(generate_slug("--Sale--"), "sale");
        assert_eq!(generate_slug("_x_"), "x");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn removed_characters_do_not_split_words() {
        assert_eq!(generate_slug("Men's Shoes"), "mens-shoes");
        assert_eq!(generate_slug("Café Crème"), "caf-crme");
    }

    #[test]
    fn idempotent() {
        for name in ["Red T-Shirt!! 2024", "  Hello   World  ", "Men's Shoes", "x"] {
            let once = generate_slug(name);
            assert_eq!(generate_slug(&once), once);
        }
    }
}
