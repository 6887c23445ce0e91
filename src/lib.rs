//! Persistent player settings for a small arcade shooter: music and sound
//! volumes, the two audio toggles, and the high score, kept in one save
//! file under the platform data directory.

pub mod record;

pub use record::SettingsRecord;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// File name of the save file inside the application's data directory.
pub const SETTINGS_FILE_NAME: &str = "playerInfo.dat";

/// Owner of the live [`SettingsRecord`] and its load/save logic.
///
/// The host application constructs one store and hands it to collaborators
/// by reference; the record is only reachable through the accessors below.
/// All I/O is synchronous, with the file handle scoped to the single load
/// or save call. Not safe for concurrent use from multiple threads without
/// an external lock.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    record: SettingsRecord,
}

impl SettingsStore {
    /// Opens a store backed by `path` and loads the record stored there.
    ///
    /// A missing file is the first-run state and leaves the store at
    /// defaults; any other read failure propagates.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            record: SettingsRecord::default(),
        };
        store.load()?;
        Ok(store)
    }

    /// Opens the store at its conventional location,
    /// `<platform data dir>/<app_name>/playerInfo.dat`.
    pub fn open_in_data_dir(app_name: &str) -> io::Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "no writable data directory on this platform",
            )
        })?;
        Self::open(data_dir.join(app_name).join(SETTINGS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn music_volume(&self) -> f32 {
        self.record.music_volume
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.record.music_volume = volume;
    }

    pub fn sound_volume(&self) -> f32 {
        self.record.sound_volume
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.record.sound_volume = volume;
    }

    pub fn music_on(&self) -> bool {
        self.record.music_on
    }

    /// Flips the music flag and returns the new value. The flag is
    /// toggle-only; there is no setter taking an explicit value.
    pub fn toggle_music_on(&mut self) -> bool {
        self.record.music_on = !self.record.music_on;
        self.record.music_on
    }

    pub fn sound_on(&self) -> bool {
        self.record.sound_on
    }

    /// Flips the sound flag and returns the new value, as
    /// [`toggle_music_on`](Self::toggle_music_on) does for music.
    pub fn toggle_sound_on(&mut self) -> bool {
        self.record.sound_on = !self.record.sound_on;
        self.record.sound_on
    }

    pub fn high_score(&self) -> i32 {
        self.record.high_score
    }

    /// Writes the current record to the save file, replacing any previous
    /// contents and creating the parent directory if missing. In-memory
    /// state is left untouched.
    pub fn save(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, self.record.to_file_bytes())
    }

    /// Overwrites the stored high score with `score`, then writes the full
    /// record. No comparison against the previous score is made.
    pub fn save_high_score(&mut self, score: i32) -> io::Result<()> {
        self.record.high_score = score;
        self.save()
    }

    /// Replaces the in-memory record wholesale with the one on disk.
    ///
    /// A missing file leaves the current record untouched; an unreadable or
    /// corrupt file propagates as an error without falling back to defaults.
    pub fn load(&mut self) -> io::Result<()> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err),
        };
        self.record = SettingsRecord::from_file_bytes(&bytes).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed parsing settings file {}: {e}", self.path.display()),
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_path(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("playerdata_test_{tag}_{nanos}.dat"))
    }

    #[test]
    fn first_run_starts_from_defaults() {
        let store = SettingsStore::open(unique_temp_path("defaults")).expect("open store");
        assert_eq!(store.music_volume(), 0.5);
        assert_eq!(store.sound_volume(), 0.0);
        assert!(store.music_on());
        assert!(!store.sound_on());
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn toggling_twice_restores_each_flag() {
        let mut store = SettingsStore::open(unique_temp_path("toggles")).expect("open store");

        assert!(!store.toggle_music_on());
        assert!(store.toggle_music_on());
        assert!(store.music_on());

        assert!(store.toggle_sound_on());
        assert!(!store.toggle_sound_on());
        assert!(!store.sound_on());
    }

    #[test]
    fn setting_one_field_leaves_the_rest() {
        let mut store = SettingsStore::open(unique_temp_path("independent")).expect("open store");

        store.set_music_volume(0.9);
        assert_eq!(store.sound_volume(), 0.0);
        assert!(store.music_on());
        assert!(!store.sound_on());
        assert_eq!(store.high_score(), 0);

        store.set_sound_volume(0.4);
        assert_eq!(store.music_volume(), 0.9);

        store.toggle_sound_on();
        assert_eq!(store.music_volume(), 0.9);
        assert_eq!(store.sound_volume(), 0.4);
        assert!(store.music_on());
        assert_eq!(store.high_score(), 0);
    }
}
