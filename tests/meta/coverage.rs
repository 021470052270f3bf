//! Checks that `tests/unit` mirrors `src` one file per module

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Crate roots and module indexes only declare modules
    const INDEX_FILES: [&str; 3] = ["lib.rs", "main.rs", "mod.rs"];

    /// Every `.rs` file below `root`, relative to it
    fn rust_files(root: &Path) -> BTreeSet<PathBuf> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir)
                .unwrap_or_else(|error| panic!("cannot read {}: {error}", dir.display()));
            for path in entries.flatten().map(|entry| entry.path()) {
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    if let Ok(relative) = path.strip_prefix(root) {
                        found.insert(relative.to_path_buf());
                    }
                }
            }
        }

        found
    }

    fn is_index(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| INDEX_FILES.contains(&name))
    }

    /// Module files that hold code rather than declarations
    fn leaf_modules(root: &Path) -> BTreeSet<PathBuf> {
        rust_files(root)
            .into_iter()
            .filter(|path| !is_index(path))
            .collect()
    }

    fn listing<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> String {
        paths
            .into_iter()
            .map(|path| format!("  - {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests each source module has a unit test file at the same relative path
    // Verified by diffing the leaf module sets of src and tests/unit
    #[test]
    fn test_source_modules_have_unit_files() {
        let src = leaf_modules(Path::new("src"));
        let unit = leaf_modules(Path::new("tests/unit"));

        let missing: Vec<_> = src.difference(&unit).collect();
        assert!(
            missing.is_empty(),
            "src modules without a tests/unit counterpart:\n{}",
            listing(missing)
        );
    }

    // Tests unit test files are not left behind after a module is removed
    // Verified by diffing the leaf module sets the other way around
    #[test]
    fn test_unit_files_have_source_modules() {
        let src = leaf_modules(Path::new("src"));
        let unit = leaf_modules(Path::new("tests/unit"));

        let orphaned: Vec<_> = unit.difference(&src).collect();
        assert!(
            orphaned.is_empty(),
            "tests/unit files without a src module:\n{}",
            listing(orphaned)
        );
    }

    // Tests every unit file is reachable from the harness root
    // Verified by finding `mod name;` for each path component in the index
    // file of the directory above it
    #[test]
    fn test_unit_files_are_declared() {
        let root = Path::new("tests/unit");
        let mut undeclared = BTreeSet::new();

        for module in leaf_modules(root) {
            let components: Vec<_> = module.iter().collect();
            for depth in 0..components.len() {
                let parent: PathBuf = components[..depth].iter().collect();
                let index = if depth == 0 { "main.rs" } else { "mod.rs" };
                let declaring = root.join(&parent).join(index);
                let name = Path::new(components[depth]).with_extension("");

                let declarations = fs::read_to_string(&declaring).unwrap_or_default();
                if !declarations.contains(&format!("mod {};", name.display())) {
                    undeclared.insert(parent.join(components[depth]));
                }
            }
        }

        assert!(
            undeclared.is_empty(),
            "tests/unit modules never compiled:\n{}",
            listing(&undeclared)
        );
    }

    // Tests no test file outside the index files is empty of tests
    // Verified by searching each file under tests for a #[test] attribute
    #[test]
    fn test_test_files_contain_tests() {
        let root = Path::new("tests");

        let empty: Vec<_> = leaf_modules(root)
            .into_iter()
            .filter(|path| {
                fs::read_to_string(root.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .collect();

        assert!(
            empty.is_empty(),
            "test files without a #[test] function:\n{}",
            listing(&empty)
        );
    }
}
