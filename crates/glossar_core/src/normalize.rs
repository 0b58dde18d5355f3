use crate::translit;

/// Replace every mapped character with its ASCII spelling; unmapped characters pass through.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match translit::lookup(ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// Sort key of a visible entry: transliterated, lowercased, first character uppercased.
///
/// The table is applied again after lowercasing, and a first character whose
/// uppercase form spans several characters keeps only the leading one in upper
/// case, so a key always maps to itself.
///
/// An empty result means the entry has nothing to sort on and must be dropped.
pub fn sort_key(visible_text: &str) -> String {
    let lowered = transliterate(&transliterate(visible_text).to_lowercase());
    let mut chars = lowered.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(lowered.len());
    out.extend(upper.next());
    out.extend(upper.flat_map(char::to_lowercase));
    out.extend(chars);
    out
}

#[cfg(test)]
mod tests {
    use super::{sort_key, transliterate};

    #[test]
    fn folds_diacritics_and_ligatures() {
        assert_eq!(transliterate("Corn Markée"), "Corn Markee");
        assert_eq!(transliterate("Æther"), "AEther");
        assert_eq!(transliterate("Straße"), "Strasse");
        assert_eq!(transliterate("Über"), "Uber");
    }

    #[test]
    fn folds_cyrillic_phonetically() {
        assert_eq!(transliterate("Щука"), "schuka");
        assert_eq!(transliterate("Юрий"), "jurij");
        assert_eq!(transliterate("объект"), "obekt");
    }

    #[test]
    fn drops_guillemets_and_keeps_unmapped() {
        assert_eq!(transliterate("»Sol«"), "Sol");
        assert_eq!(transliterate("Ω-Punkt 7"), "Ω-Punkt 7");
    }

    #[test]
    fn sort_key_lowercases_then_capitalizes_first() {
        assert_eq!(sort_key("perry RHODAN"), "Perry rhodan");
        assert_eq!(sort_key("Ärger"), "Arger");
        assert_eq!(sort_key("»Sol«"), "Sol");
        assert_eq!(sort_key("9-Imbariem"), "9-imbariem");
    }

    #[test]
    fn sort_key_of_only_deleted_characters_is_empty() {
        assert_eq!(sort_key("»«"), "");
        assert_eq!(sort_key(""), "");
    }

    #[test]
    fn capital_sharp_s_and_ligatures_fold_like_lowercase() {
        assert_eq!(sort_key("Straẞe"), sort_key("Straße"));
        assert_eq!(sort_key("Aẞ"), "Ass");
        assert_eq!(sort_key("ẞx"), "Ssx");
        assert_eq!(sort_key("ﬁsch"), "Fisch");
    }

    #[test]
    fn sort_key_is_idempotent() {
        for input in [
            "Saedelaere, Alaska",
            "Щука",
            "ärger über Straße",
            "»X«",
            "Ω",
            "Aẞ",
            "ẞx",
            "ﬁsch",
        ] {
            let once = sort_key(input);
            assert_eq!(sort_key(&once), once, "input: {input}");
        }
    }
}
