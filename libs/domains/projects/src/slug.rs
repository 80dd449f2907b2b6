//! URL slugs derived from project titles.

/// Lowercase ASCII slug: accented Latin letters are folded, `@` becomes `at`,
/// whitespace, `-` and `_` become single hyphens and any other symbol is dropped.
///
/// ```
/// use domain_projects::slugify;
///
/// assert_eq!(slugify("Sito Vetrina"), "sito-vetrina");
/// assert_eq!(slugify("Caffè & Città"), "caffe-citta");
/// assert_eq!(slugify("L'Aquila"), "laquila");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut hyphen = false;

    for c in title.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            hyphen = true;
        } else if c == '@' {
            separate(&mut slug, true);
            slug.push_str("at");
            hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            separate(&mut slug, hyphen);
            slug.push(c.to_ascii_lowercase());
            hyphen = false;
        } else if let Some(folded) = fold(c) {
            separate(&mut slug, hyphen);
            slug.push_str(folded);
            hyphen = false;
        }
    }

    slug
}

fn separate(slug: &mut String, hyphen: bool) {
    if hyphen && !slug.is_empty() {
        slug.push('-');
    }
}

/// ASCII form of an accented Latin letter, or `None` when it has no slug representation.
fn fold(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => "a",
        'æ' | 'Æ' => "ae",
        'ç' | 'Ç' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'È' | 'É' | 'Ê' | 'Ë' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'Ì' | 'Í' | 'Î' | 'Ï' => "i",
        'ñ' | 'Ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "o",
        'œ' | 'Œ' => "oe",
        'ß' => "ss",
        'ù' | 'ú' | 'û' | 'ü' | 'Ù' | 'Ú' | 'Û' | 'Ü' => "u",
        'ý' | 'ÿ' | 'Ý' => "y",
        _ => return None,
    };
    Some(folded)
}
