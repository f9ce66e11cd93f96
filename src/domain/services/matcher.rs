/// Decides whether a project environment shows use of `skill`.
///
/// Rules are tried in order: exact token match, the `git` prefix exception,
/// then a multi-word skill whose every word is itself a token. Words of a
/// multi-word skill must match whole tokens, never substrings.
pub fn tech_in_environment<S: AsRef<str>>(skill: &str, tokens: &[S]) -> bool {
    let target = skill.trim().to_lowercase();
    let has_token = |word: &str| tokens.iter().any(|token| token.as_ref() == word);

    if has_token(&target) {
        return true;
    }

    // github, gitlab, gitflow all imply git
    if target == "git" && tokens.iter().any(|token| token.as_ref().starts_with("git")) {
        return true;
    }

    let words: Vec<&str> = target.split_whitespace().collect();
    words.len() > 1 && words.iter().all(|word| has_token(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        assert!(tech_in_environment("Python", &["python"]));
        assert!(tech_in_environment(" PostgreSQL ", &["redis", "postgresql"]));
        assert!(!tech_in_environment("Java", &["javascript"]));
    }

    #[test]
    fn test_git_prefix_exception() {
        assert!(tech_in_environment("git", &["github"]));
        assert!(tech_in_environment("Git", &["gitlab ci"]));
        assert!(!tech_in_environment("go", &["gogs"]));
    }

    #[test]
    fn test_multiword_requires_every_word() {
        assert!(!tech_in_environment("Unit Testing", &["unit"]));
        assert!(tech_in_environment("Unit Testing", &["unit", "testing"]));
        assert!(!tech_in_environment("Unit Testing", &["unit testing framework"]));
    }

    #[test]
    fn test_empty_environment_never_matches() {
        let tokens: [&str; 0] = [];
        assert!(!tech_in_environment("Python", &tokens));
    }
}
