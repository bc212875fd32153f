use std::path::Path;

use crate::config::NameField;

/// Compose a track name from `fields`, joined by `sep`.
///
/// Empty or missing fields are skipped. Falls back to `title` when nothing
/// was produced.
pub fn name_from_fields(
    path: &Path,
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    fields: &[NameField],
    sep: &str,
) -> String {
    let non_empty = |s: Option<&str>| s.map(str::trim).filter(|s| !s.is_empty()).map(String::from);

    let parts: Vec<String> = fields
        .iter()
        .filter_map(|f| match f {
            NameField::Title => non_empty(Some(title)),
            NameField::Artist => non_empty(artist),
            NameField::Album => non_empty(album),
            NameField::Filename => non_empty(path.file_stem().and_then(|s| s.to_str())),
            NameField::Path => Some(path.display().to_string()),
        })
        .collect();

    if parts.is_empty() {
        title.to_string()
    } else {
        parts.join(sep)
    }
}
