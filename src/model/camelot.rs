//! Pitch notation to Camelot wheel notation

/// Map a key such as `"C#"` or `"Ebm"` to its Camelot code (`"1B"`, `"7A"`).
///
/// Enharmonic spellings share a code. Surrounding whitespace is ignored;
/// anything else unrecognised yields `None`.
pub fn to_camelot(key: &str) -> Option<&'static str> {
    let code = match key.trim() {
        // Major keys
        "C" => "8B",
        "C#" | "Db" => "1B",
        "D" => "3B",
        "D#" | "Eb" => "4B",
        "E" => "5B",
        "F" => "6B",
        "F#" | "Gb" => "7B",
        "G" => "8B",
        "G#" | "Ab" => "9B",
        "A" => "10B",
        "A#" | "Bb" => "11B",
        "B" => "12B",

        // Minor keys
        "Am" => "8A",
        "A#m" | "Bbm" => "1A",
        "Bm" => "3A",
        "Cm" => "4A",
        "C#m" | "Dbm" => "5A",
        "Dm" => "6A",
        "D#m" | "Ebm" => "7A",
        "Em" => "8A",
        "Fm" => "9A",
        "F#m" | "Gbm" => "10A",
        "Gm" => "11A",
        "G#m" | "Abm" => "12A",

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enharmonic_spellings_agree() {
        assert_eq!(to_camelot("C#"), to_camelot("Db"));
        assert_eq!(to_camelot("D#m"), Some("7A"));
        assert_eq!(to_camelot("Ebm"), Some("7A"));
    }

    #[test]
    fn test_major_and_minor() {
        assert_eq!(to_camelot("F#"), Some("7B"));
        assert_eq!(to_camelot(" Am "), Some("8A"));
        assert_eq!(to_camelot("G#m"), Some("12A"));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(to_camelot("H"), None);
        assert_eq!(to_camelot(""), None);
        assert_eq!(to_camelot("am"), None);
    }
}
