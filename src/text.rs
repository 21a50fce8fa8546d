//! Name formatting and context-key helpers shared by the corrector and the suggestor.

/// Upper-case the first character of every space-separated word.
///
/// The remainder of each word is left untouched and runs of spaces are
/// preserved, so `title_case("general  paz")` is `"General  Paz"`.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for (i, word) in name.split(' ').enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Stable, non-negative numeric code for a display name.
///
/// The code is the CRC32 of the title-cased name, so `"san luis"` and
/// `"San Luis"` share a code. It is used both as the optional identifier on a
/// suggestion and to derive suggestion context keys.
pub fn name_code(name: &str) -> u32 {
    crc32fast::hash(title_case(name).as_bytes())
}

/// Context key of the per-state city list.
pub fn state_key(state: &str) -> String {
    name_code(state).to_string()
}

/// Context key of the per-city street list: `"{stateCode}-{cityCode}"`.
pub fn street_key(state: &str, city: &str) -> String {
    format!("{}-{}", name_code(state), name_code(city))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("san martin"), "San Martin");
        assert_eq!(title_case("general san martin"), "General San Martin");
        assert_eq!(title_case("córdoba"), "Córdoba");
        assert_eq!(title_case("ñuñoa"), "Ñuñoa");
        assert_eq!(title_case("Rio Cuarto"), "Rio Cuarto");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_keeps_spacing() {
        assert_eq!(title_case("general  paz"), "General  Paz");
        assert_eq!(title_case(" ushuaia"), " Ushuaia");
        assert_eq!(title_case("ushuaia "), "Ushuaia ");
    }

    #[test]
    fn test_name_code_is_case_insensitive_on_initials() {
        assert_eq!(name_code("san luis"), name_code("San Luis"));
        assert_ne!(name_code("san luis"), name_code("san juan"));
    }

    #[test]
    fn test_context_keys() {
        let state = state_key("cordoba");
        assert_eq!(state, name_code("Cordoba").to_string());

        let street = street_key("cordoba", "rio cuarto");
        assert_eq!(
            street,
            format!("{}-{}", name_code("Cordoba"), name_code("Rio Cuarto"))
        );
    }
}
