//! Image selection by file extension.
//!
//! The match is a plain, case-sensitive suffix test on the file name:
//! `IMG_1.JPG` is **not** selected unless `.JPG` is in the accepted list.
//! Input order is preserved and an empty result is not an error.

use std::path::{Path, PathBuf};

/// Extensions accepted by the gallery builder.
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

/// Whether the file name of `path` ends with one of `extensions`.
///
/// Paths without a file name component (`/`, `..`) never match.
pub fn has_accepted_extension(path: &Path, extensions: &[&str]) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext)))
}

/// Keep the candidates whose file name ends with an accepted extension,
/// in their original order.
pub fn select_images<I, P>(candidates: I, extensions: &[&str]) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    candidates
        .into_iter()
        .filter(|p| has_accepted_extension(p.as_ref(), extensions))
        .map(|p| p.as_ref().to_path_buf())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(paths: &[&str]) -> Vec<String> {
        select_images(paths, ACCEPTED_EXTENSIONS)
            .into_iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn keeps_accepted_in_order() {
        assert_eq!(select(&["a.jpg", "b.txt", "c.png"]), vec!["a.jpg", "c.png"]);
    }

    #[test]
    fn all_accepted_extensions() {
        assert_eq!(
            select(&["w.gif", "x.jpeg", "y.png", "z.jpg"]),
            vec!["w.gif", "x.jpeg", "y.png", "z.jpg"]
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        assert!(select(&["IMG_0001.JPG", "scan.PNG"]).is_empty());
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(select(&[]).is_empty());
    }

    #[test]
    fn extension_must_be_a_suffix() {
        assert!(select(&["a.jpg.bak", "notes.jpgx"]).is_empty());
    }

    #[test]
    fn matches_on_file_name_not_directory() {
        assert_eq!(
            select(&["photos.jpg/readme.txt", "dir/pic.jpeg"]),
            vec!["dir/pic.jpeg"]
        );
    }

    #[test]
    fn paths_without_file_name_are_rejected() {
        assert!(!has_accepted_extension(Path::new(".."), ACCEPTED_EXTENSIONS));
        assert!(!has_accepted_extension(Path::new("/"), ACCEPTED_EXTENSIONS));
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(select(&["a.jpg", "a.jpg"]), vec!["a.jpg", "a.jpg"]);
    }

    #[test]
    fn custom_extension_list() {
        let picked = select_images(["a.JPG", "b.jpg"], &[".JPG"]);
        assert_eq!(picked, vec![PathBuf::from("a.JPG")]);
    }
}
