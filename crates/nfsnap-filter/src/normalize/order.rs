/// Lines whose position depends on scheduling rather than pipeline logic.
///
/// Checked after scrubbing, so technology names are already `[CONTAINER]`
/// (`Creating env using conda:` reads `Creating env using [CONTAINER]:`).
pub fn is_sortable(line: &str) -> bool {
    line.contains("Staging foreign file")
        || line.contains("Submitted process")
        || line.starts_with("Creating env using ")
        || (line.starts_with("Pulling ") && line.contains(" image"))
        || line.starts_with("ERROR ~")
        || line.starts_with("WARN:")
        || (line.contains("Check ") && line.contains(" file for details"))
}

/// Order-preserving lines first, then sortable lines in byte order, then
/// adjacent duplicates collapsed.
pub fn reorder(lines: Vec<String>) -> Vec<String> {
    let (mut sortable, mut ordered): (Vec<String>, Vec<String>) =
        lines.into_iter().partition(|line| is_sortable(line));
    sortable.sort();
    ordered.append(&mut sortable);
    ordered.dedup();
    ordered
}
