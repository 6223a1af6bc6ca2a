//! Unified line diff between the current hosts file and the proposed one.

use similar::{ChangeTag, DiffOp, TextDiff};

/// Context lines around each hunk
const CONTEXT_LINES: usize = 3;

/// Generate a unified diff of `current` against `proposed`.
///
/// Both texts are split into lines first, so a trailing newline alone does
/// not produce a change, but trailing whitespace inside a line does. Returns
/// an empty vector when the texts are line-identical.
pub fn generate_diff(current: &str, proposed: &str, from_label: &str, to_label: &str) -> Vec<String> {
    let old_lines: Vec<&str> = current.lines().collect();
    let new_lines: Vec<&str> = proposed.lines().collect();

    if old_lines == new_lines {
        return Vec::new();
    }

    let diff = TextDiff::from_slices(old_lines.as_slice(), new_lines.as_slice());
    let groups = diff.grouped_ops(CONTEXT_LINES);
    if groups.is_empty() {
        return Vec::new();
    }

    let mut out = vec![format!("--- {}", from_label), format!("+++ {}", to_label)];

    for group in &groups {
        out.push(hunk_header(group));
        for op in group {
            for change in diff.iter_changes(op) {
                let prefix = match change.tag() {
                    ChangeTag::Equal => ' ',
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                };
                out.push(format!("{}{}", prefix, change.value()));
            }
        }
    }

    out
}

/// Count added and removed lines, ignoring the `---`/`+++` file headers
pub fn count_changes(diff: &[String]) -> (usize, usize) {
    diff.iter()
        .filter(|l| !l.starts_with("+++ ") && !l.starts_with("--- "))
        .fold((0, 0), |(added, removed), line| match line.chars().next() {
            Some('+') => (added + 1, removed),
            Some('-') => (added, removed + 1),
            _ => (added, removed),
        })
}

/// `@@ -a,b +c,d @@` for a group of ops
fn hunk_header(group: &[DiffOp]) -> String {
    let (Some(first), Some(last)) = (group.first(), group.last()) else {
        return "@@ -0,0 +0,0 @@".to_string();
    };

    let old_start = first.old_range().start;
    let old_len = last.old_range().end - old_start;
    let new_start = first.new_range().start;
    let new_len = last.new_range().end - new_start;

    format!(
        "@@ -{} +{} @@",
        format_range(old_start, old_len),
        format_range(new_start, new_len)
    )
}

/// Range in unified diff notation: 1-based start, length omitted when 1,
/// start pointing before the gap when the range is empty.
fn format_range(start: usize, len: usize) -> String {
    match len {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_is_empty() {
        let text = "127.0.0.1 localhost\n::1 localhost\n";
        assert!(generate_diff(text, text, "a", "b").is_empty());
    }

    #[test]
    fn test_empty_texts() {
        assert!(generate_diff("", "", "a", "b").is_empty());
    }

    #[test]
    fn test_trailing_newline_only_is_identical() {
        assert!(generate_diff("a\nb", "a\nb\n", "x", "y").is_empty());
    }

    #[test]
    fn test_one_line_added() {
        let current = "line1\nline2\nline3";
        let proposed = "line1\nline2\nline3\n0.0.0.0 ads.example.com";
        let diff = generate_diff(current, proposed, "/etc/hosts (current)", "/etc/hosts (new)");

        assert_eq!(
            diff,
            vec![
                "--- /etc/hosts (current)",
                "+++ /etc/hosts (new)",
                "@@ -1,3 +1,4 @@",
                " line1",
                " line2",
                " line3",
                "+0.0.0.0 ads.example.com",
            ]
        );
        assert_eq!(count_changes(&diff), (1, 0));
    }

    #[test]
    fn test_replace_single_line() {
        let diff = generate_diff("a\nb\nc", "a\nB\nc", "old", "new");
        assert_eq!(diff[2], "@@ -1,3 +1,3 @@");
        assert!(diff.contains(&"-b".to_string()));
        assert!(diff.contains(&"+B".to_string()));
        assert_eq!(count_changes(&diff), (1, 1));
    }

    #[test]
    fn test_from_empty_file() {
        let diff = generate_diff("", "a\nb", "old", "new");
        assert_eq!(diff[2], "@@ -0,0 +1,2 @@");
        assert_eq!(&diff[3..], &["+a".to_string(), "+b".to_string()]);
    }

    #[test]
    fn test_to_empty_file() {
        let diff = generate_diff("only", "", "old", "new");
        assert_eq!(diff[2], "@@ -1 +0,0 @@");
        assert_eq!(diff[3], "-only");
    }

    #[test]
    fn test_trailing_whitespace_visible() {
        let diff = generate_diff("a\nb", "a\nb ", "old", "new");
        assert!(diff.contains(&"-b".to_string()));
        assert!(diff.contains(&"+b ".to_string()));
    }

    #[test]
    fn test_distant_changes_split_into_hunks() {
        let current: Vec<String> = (0..30).map(|i| format!("line{}", i)).collect();
        let mut proposed = current.clone();
        proposed[1] = "changed1".to_string();
        proposed[25] = "changed25".to_string();

        let diff = generate_diff(&current.join("\n"), &proposed.join("\n"), "old", "new");
        let hunks = diff.iter().filter(|l| l.starts_with("@@")).count();
        assert_eq!(hunks, 2);
        assert_eq!(count_changes(&diff), (2, 2));
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0, 0), "0,0");
        assert_eq!(format_range(4, 0), "4,0");
        assert_eq!(format_range(0, 1), "1");
        assert_eq!(format_range(2, 5), "3,5");
    }
}
