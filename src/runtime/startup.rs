use crate::config::LibrarySettings;
use crate::library::{self, Track};

/// Build the session's track list.
///
/// Command-line paths win over `library.tracks`, which wins over scanning
/// `library.dir`.
pub fn track_list(args: &[String], settings: &LibrarySettings) -> Vec<Track> {
    if !args.is_empty() {
        return library::from_paths(args);
    }
    if !settings.tracks.is_empty() {
        return library::from_paths(&settings.tracks);
    }
    library::scan(&settings.dir, settings)
}
