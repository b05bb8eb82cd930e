use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Lexically normalizes a path: drops `.` components, folds `..` into its
/// parent where one exists and unifies separators. The file system is never
/// touched, so paths of units that only exist in memory normalize as well.
pub fn normalize(path: impl AsRef<Utf8Path>) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();

    for component in path.as_ref().components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let last_is_normal = matches!(
                    out.components().next_back(),
                    Some(Utf8Component::Normal(_))
                );

                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_str()),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_current_dir() {
        assert_eq!(normalize("./src/./a"), Utf8PathBuf::from("src/a"));
    }

    #[test]
    fn folds_parent_dir() {
        assert_eq!(normalize("src/x/../a"), Utf8PathBuf::from("src/a"));
        assert_eq!(normalize("/../src"), Utf8PathBuf::from("/src"));
        assert_eq!(normalize("../src"), Utf8PathBuf::from("../src"));
    }

    #[test]
    fn trailing_separator_is_ignored() {
        assert_eq!(normalize("src/a/"), normalize("src/a"));
    }
}
