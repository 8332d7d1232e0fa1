use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use regex::Regex;

use std::path::{Path, PathBuf};

/// A bounded, name-based file search below a root directory.
///
/// `excluded_names` is tested against the bare name of every entry before its
/// type is known, so an exclusion hides matching files as well as directories.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub root: PathBuf,
    pub name_pattern: Regex,
    pub excluded_names: Vec<Regex>,
    pub max_depth: usize,
}

impl SearchRequest {
    pub fn new<P: Into<PathBuf>>(root: P, name_pattern: Regex) -> Self {
        Self {
            root: root.into(),
            name_pattern,
            excluded_names: Vec::new(),
            max_depth: 0,
        }
    }

    pub fn exclude(mut self, pattern: Regex) -> Self {
        self.excluded_names.push(pattern);
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded_names
            .iter()
            .any(|pattern| pattern.is_match(name))
    }
}

/// Return every file below `request.root` whose name matches the request.
///
/// Siblings are visited concurrently on the calling task and the result order
/// is unspecified. Unreadable directories and entries that cannot be stat'ed
/// contribute nothing; no error ever escapes.
pub async fn find(request: &SearchRequest) -> Vec<PathBuf> {
    let root = std::path::absolute(&request.root).unwrap_or_else(|_| request.root.clone());
    search_dir(request, root, request.max_depth).await
}

fn search_dir(
    request: &SearchRequest,
    dir: PathBuf,
    depth_left: usize,
) -> BoxFuture<'_, Vec<PathBuf>> {
    async move {
        let entries = read_entries(&dir).await;
        let branches = entries
            .into_iter()
            .map(|(path, name)| search_entry(request, path, name, depth_left));

        join_all(branches).await.into_iter().flatten().collect()
    }
    .boxed()
}

async fn search_entry(
    request: &SearchRequest,
    path: PathBuf,
    name: String,
    depth_left: usize,
) -> Vec<PathBuf> {
    if request.is_excluded(&name) {
        return Vec::new();
    }

    let Ok(metadata) = tokio::fs::metadata(&path).await else {
        return Vec::new();
    };

    if metadata.is_dir() {
        match depth_left.checked_sub(1) {
            Some(next) => search_dir(request, path, next).await,
            None => Vec::new(),
        }
    } else if metadata.is_file() && request.name_pattern.is_match(&name) {
        vec![path]
    } else {
        Vec::new()
    }
}

/// Directory listing as (path, bare name) pairs; stops quietly at the first error
async fn read_entries(dir: &Path) -> Vec<(PathBuf, String)> {
    let mut entries = Vec::new();
    let Ok(mut reader) = tokio::fs::read_dir(dir).await else {
        return entries;
    };

    while let Ok(Some(entry)) = reader.next_entry().await {
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((entry.path(), name));
    }

    entries
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn conf_request(root: &Path, max_depth: usize) -> SearchRequest {
        SearchRequest::new(root, Regex::new(r"tauri\.conf\.json$").unwrap())
            .exclude(Regex::new("node_modules").unwrap())
            .exclude(Regex::new("target").unwrap())
            .max_depth(max_depth)
    }

    type Fixture = std::result::Result<(TempDir, PathBuf), Box<dyn std::error::Error>>;

    fn create_nested_conf() -> Fixture {
        let temp_dir = tempfile::tempdir()?;
        let nested = temp_dir.path().join("a/b/c");
        fs::create_dir_all(&nested)?;
        let conf = nested.join("tauri.conf.json");
        fs::write(&conf, "{}")?;
        Ok((temp_dir, conf))
    }

    #[tokio::test]
    async fn test_find__three_levels_deep_within_depth() -> TestResult {
        let (temp_dir, conf) = create_nested_conf()?;

        let result = find(&conf_request(temp_dir.path(), 3)).await;

        assert_eq!(result, vec![conf]);
        Ok(())
    }

    #[tokio::test]
    async fn test_find__three_levels_deep_beyond_depth() -> TestResult {
        let (temp_dir, _conf) = create_nested_conf()?;

        let result = find(&conf_request(temp_dir.path(), 2)).await;

        assert!(result.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find__zero_depth_only_checks_root_files() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("tauri.conf.json"), "{}")?;
        fs::create_dir_all(temp_dir.path().join("sub"))?;
        fs::write(temp_dir.path().join("sub/tauri.conf.json"), "{}")?;

        let result = find(&conf_request(temp_dir.path(), 0)).await;

        assert_eq!(result, vec![temp_dir.path().join("tauri.conf.json")]);
        Ok(())
    }

    #[tokio::test]
    async fn test_find__nonexistent_root() {
        let result = find(&conf_request(Path::new("/definitely/not/a/real/root"), 3)).await;

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find__root_is_a_file() -> TestResult {
        let file = tempfile::NamedTempFile::new()?;

        let result = find(&conf_request(file.path(), 3)).await;

        assert!(result.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find__skips_node_modules() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("node_modules/pkg"))?;
        fs::write(temp_dir.path().join("node_modules/tauri.conf.json"), "{}")?;
        fs::write(temp_dir.path().join("node_modules/pkg/tauri.conf.json"), "{}")?;
        fs::create_dir_all(temp_dir.path().join("src-tauri/target"))?;
        fs::write(temp_dir.path().join("src-tauri/target/tauri.conf.json"), "{}")?;
        fs::write(temp_dir.path().join("src-tauri/tauri.conf.json"), "{}")?;

        let result = find(&conf_request(temp_dir.path(), 3)).await;

        assert_eq!(result, vec![temp_dir.path().join("src-tauri/tauri.conf.json")]);
        assert!(
            result
                .iter()
                .all(|p| !p.to_string_lossy().contains("node_modules"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_find__exclusion_applies_to_files() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::write(temp_dir.path().join("tauri.conf.json"), "{}")?;

        let request = SearchRequest::new(temp_dir.path(), Regex::new(r"\.json$")?)
            .exclude(Regex::new(r"^tauri\.")?)
            .max_depth(3);

        assert!(find(&request).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find__directory_with_matching_name_is_not_a_match() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("tauri.conf.json"))?;

        let result = find(&conf_request(temp_dir.path(), 3)).await;

        assert!(result.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_find__multiple_matches_across_siblings() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        for dir in ["one", "two", "three/deeper"] {
            fs::create_dir_all(temp_dir.path().join(dir))?;
            fs::write(temp_dir.path().join(dir).join("tauri.conf.json"), "{}")?;
        }
        fs::write(temp_dir.path().join("one/package.json"), "{}")?;

        let result: HashSet<PathBuf> = find(&conf_request(temp_dir.path(), 3))
            .await
            .into_iter()
            .collect();

        let expected: HashSet<PathBuf> = ["one", "two", "three/deeper"]
            .iter()
            .map(|dir| temp_dir.path().join(dir).join("tauri.conf.json"))
            .collect();
        assert_eq!(result, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_find__idempotent() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        for dir in ["a", "b/c", "d/e/f"] {
            fs::create_dir_all(temp_dir.path().join(dir))?;
            fs::write(temp_dir.path().join(dir).join("tauri.conf.json"), "{}")?;
        }
        let request = conf_request(temp_dir.path(), 3);

        let first: HashSet<PathBuf> = find(&request).await.into_iter().collect();
        let second: HashSet<PathBuf> = find(&request).await.into_iter().collect();

        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_find__relative_root_yields_absolute_paths() -> TestResult {
        let request = SearchRequest::new("src", Regex::new(r"^lib\.rs$")?).max_depth(0);

        let result = find(&request).await;

        assert_eq!(result.len(), 1);
        assert!(result[0].is_absolute());
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_find__symlink_loop_is_bounded() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("app"))?;
        fs::write(temp_dir.path().join("app/tauri.conf.json"), "{}")?;
        std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("app/loop"))?;

        let result = find(&conf_request(temp_dir.path(), 3)).await;

        assert!(result.contains(&temp_dir.path().join("app/tauri.conf.json")));
        assert!(result.iter().all(|p| {
            p.strip_prefix(temp_dir.path())
                .map(|rel| rel.components().count() <= 4)
                .unwrap_or(false)
        }));
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_find__dangling_symlink_is_ignored() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        std::os::unix::fs::symlink(
            temp_dir.path().join("missing.json"),
            temp_dir.path().join("tauri.conf.json"),
        )?;

        let result = find(&conf_request(temp_dir.path(), 3)).await;

        assert!(result.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_find__unreadable_subdirectory_is_skipped() -> TestResult {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir()?;
        let locked = temp_dir.path().join("locked");
        fs::create_dir_all(locked.join("inner"))?;
        fs::write(locked.join("inner/tauri.conf.json"), "{}")?;
        fs::create_dir_all(temp_dir.path().join("open"))?;
        fs::write(temp_dir.path().join("open/tauri.conf.json"), "{}")?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users (root) can still list the directory
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let result = find(&conf_request(temp_dir.path(), 3)).await;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        assert_eq!(result, vec![temp_dir.path().join("open/tauri.conf.json")]);
        Ok(())
    }
}
