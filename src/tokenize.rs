use regex::Regex;

/// Split raw text into sentence candidates on runs of terminal punctuation.
/// Candidates that are empty after trimming are dropped, so `"Wow!!!"`
/// yields one sentence and a trailing run yields none.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let boundary = Regex::new(r"[.!?]+").unwrap();
    boundary
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split one corpus item into word tokens on runs of whitespace.
/// Punctuation stays inside the tokens.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn ends_terminal(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation_runs() {
        let sentences = split_sentences("Hello there. Wow!!! Really? ");
        assert_eq!(sentences, vec!["Hello there", "Wow", "Really"]);
    }

    #[test]
    fn drops_empty_candidates() {
        assert!(split_sentences("...!?.").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn tokenizes_on_whitespace_runs() {
        assert_eq!(
            word_tokens("hello   world\tagain\n"),
            vec!["hello", "world", "again"]
        );
        assert!(word_tokens("").is_empty());
    }

    #[test]
    fn keeps_punctuation_inside_tokens() {
        assert_eq!(word_tokens("well, ok"), vec!["well,", "ok"]);
    }

    #[test]
    fn terminal_detection() {
        assert!(ends_terminal("done."));
        assert!(ends_terminal("what?!"));
        assert!(!ends_terminal("nope,"));
        assert!(!ends_terminal(""));
    }

    #[test]
    fn capitalizes_first_char() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éclair"), "Éclair");
    }
}
