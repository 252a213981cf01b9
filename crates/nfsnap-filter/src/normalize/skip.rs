/// Drop lines containing any of the `ignore` substrings.
pub fn apply_ignore(ignore: &[String], lines: Vec<String>) -> Vec<String> {
    if ignore.is_empty() {
        return lines;
    }
    lines
        .into_iter()
        .filter(|line| !ignore.iter().any(|s| line.contains(s.as_str())))
        .collect()
}

/// Keep only lines containing at least one `include` substring.
/// An empty `include` list keeps everything.
pub fn apply_include(include: &[String], lines: Vec<String>) -> Vec<String> {
    if include.is_empty() {
        return lines;
    }
    lines
        .into_iter()
        .filter(|line| include.iter().any(|s| line.contains(s.as_str())))
        .collect()
}
