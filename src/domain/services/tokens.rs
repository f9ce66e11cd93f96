/// Token that marks an open-ended environment list and never names a technology.
const ETC_TOKEN: &str = "etc.";

/// Base name of a skill: everything before the first `(`, trimmed.
pub fn normalize_skill_name(raw: &str) -> String {
    raw.split('(').next().unwrap_or_default().trim().to_string()
}

/// Splits free-text environment entries into lowercase technology tokens.
///
/// Entries are split on `(`, `)` and `,`. Empty tokens and `etc.` are dropped;
/// the first occurrence of each token keeps its position.
pub fn parse_environment<S: AsRef<str>>(env_list: &[S]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for entry in env_list {
        for piece in entry.as_ref().split(['(', ')', ',']) {
            let token = piece.trim().to_lowercase();
            if token.is_empty() || token == ETC_TOKEN || tokens.contains(&token) {
                continue;
            }
            tokens.push(token);
        }
    }
    tokens
}

/// Human-readable label for a category key: `cloud_platforms` -> `Cloud Platforms`.
pub fn category_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut after_letter = false;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if after_letter {
                label.extend(ch.to_lowercase());
            } else {
                label.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            label.push(ch);
            after_letter = false;
        }
    }
    label
}
