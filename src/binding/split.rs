/// Split a CPE string into its `:` separated components.
///
/// A colon quoted with a backslash (`\:`) belongs to the attribute value and does not separate
/// components, e.g. the product in `cpe:2.3:a:foo:bar\:mumble:1.0`.
pub fn split_cpe(cpe: &str) -> Vec<&str> {
    if !cpe.contains("\\:") {
        return cpe.split(':').collect();
    }

    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (idx, c) in cpe.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' => escaped = true,
            ':' => {
                parts.push(&cpe[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(&cpe[start..]);
    parts
}
