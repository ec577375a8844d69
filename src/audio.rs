use crate::library::Track;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads and writes the tags the sync workflow needs.
///
/// Implementations must be usable from several workers at once; each call
/// touches a single file.
pub trait TagStore: Send + Sync {
    /// Load title, artist and lyrics for the file at `path`
    fn read(&self, path: &Path) -> Result<Track>;

    /// Persist the lyrics of `track`. Title and artist are left as they are on disk.
    fn write(&self, track: &Track) -> Result<()>;
}

/// Trait representing tag operations on one audio container format
pub trait AudioFile: Send + Sync {
    /// Get the file format name (e.g., "flac", "mp3")
    fn format_name(&self) -> &'static str;

    /// Read the track tags from the file
    fn read_track(&self, path: &Path) -> Result<Track>;

    /// Replace the lyrics stored in the file. An empty string removes them.
    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<()>;
}

/// Language code used for new ID3 lyrics frames
const ID3_LYRICS_LANG: &str = "eng";

fn read_id3(result: id3::Result<id3::Tag>, format: &str) -> Result<id3::Tag> {
    match result {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => Ok(id3::Tag::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read {} tags", format)),
    }
}

fn track_from_id3(path: &Path, tag: &id3::Tag) -> Track {
    use id3::TagLike;

    Track {
        path: path.to_path_buf(),
        title: tag.title().unwrap_or_default().to_string(),
        artist: tag.artist().unwrap_or_default().to_string(),
        lyrics: tag
            .lyrics()
            .next()
            .map(|l| l.text.clone())
            .unwrap_or_default(),
    }
}

fn replace_id3_lyrics(tag: &mut id3::Tag, lyrics: &str) {
    use id3::TagLike;

    tag.remove_all_lyrics();
    if !lyrics.is_empty() {
        tag.add_frame(id3::frame::Lyrics {
            lang: ID3_LYRICS_LANG.to_string(),
            description: String::new(),
            text: lyrics.to_string(),
        });
    }
}

fn ensure_writable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).context("Failed to read file metadata")?;
    if metadata.permissions().readonly() {
        anyhow::bail!("File is read-only: {}", path.display());
    }
    Ok(())
}

/// MP3 audio file implementation (ID3v2, USLT frame)
pub struct Mp3File;

impl AudioFile for Mp3File {
    fn format_name(&self) -> &'static str {
        "mp3"
    }

    fn read_track(&self, path: &Path) -> Result<Track> {
        let tag = read_id3(id3::Tag::read_from_path(path), "MP3")?;
        Ok(track_from_id3(path, &tag))
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<()> {
        tracing::debug!("Reading MP3 tags from: {}", path.display());

        let mut tag = read_id3(id3::Tag::read_from_path(path), "MP3")?;
        replace_id3_lyrics(&mut tag, lyrics);

        tracing::debug!("Writing MP3 tags to file: {}", path.display());

        ensure_writable(path)?;
        tag.write_to_path(path, id3::Version::Id3v23)
            .context("Failed to save MP3 tags")?;

        Ok(())
    }
}

/// WAV audio file implementation (ID3v2 stored in an `id3 ` RIFF chunk)
pub struct WavFile;

impl AudioFile for WavFile {
    fn format_name(&self) -> &'static str {
        "wav"
    }

    fn read_track(&self, path: &Path) -> Result<Track> {
        let tag = read_id3(id3::Tag::read_from_path(path), "WAV")?;
        Ok(track_from_id3(path, &tag))
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<()> {
        let mut tag = read_id3(id3::Tag::read_from_path(path), "WAV")?;
        replace_id3_lyrics(&mut tag, lyrics);

        ensure_writable(path)?;
        tag.write_to_path(path, id3::Version::Id3v23)
            .context("Failed to save WAV tags")?;

        Ok(())
    }
}

/// FLAC audio file implementation (Vorbis comments)
pub struct FlacFile;

impl FlacFile {
    fn first_vorbis(tag: &metaflac::Tag, key: &str) -> String {
        tag.get_vorbis(key)
            .and_then(|mut values| values.next())
            .unwrap_or_default()
            .to_string()
    }
}

impl AudioFile for FlacFile {
    fn format_name(&self) -> &'static str {
        "flac"
    }

    fn read_track(&self, path: &Path) -> Result<Track> {
        let tag = metaflac::Tag::read_from_path(path).context("Failed to read FLAC tags")?;

        Ok(Track {
            path: path.to_path_buf(),
            title: Self::first_vorbis(&tag, "TITLE"),
            artist: Self::first_vorbis(&tag, "ARTIST"),
            lyrics: Self::first_vorbis(&tag, "LYRICS"),
        })
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<()> {
        let mut tag = metaflac::Tag::read_from_path(path).context("Failed to read FLAC tags")?;

        if lyrics.is_empty() {
            tag.remove_vorbis("LYRICS");
        } else {
            tag.set_vorbis("LYRICS", vec![lyrics.to_string()]);
        }

        tag.save().context("Failed to save FLAC tags")?;
        Ok(())
    }
}

/// M4A (AAC/ALAC) audio file implementation (iTunes-style atoms)
pub struct M4aFile;

impl AudioFile for M4aFile {
    fn format_name(&self) -> &'static str {
        "m4a"
    }

    fn read_track(&self, path: &Path) -> Result<Track> {
        let tag = mp4ameta::Tag::read_from_path(path).context("Failed to read M4A tags")?;

        Ok(Track {
            path: path.to_path_buf(),
            title: tag.title().unwrap_or_default().to_string(),
            artist: tag.artist().unwrap_or_default().to_string(),
            lyrics: tag.lyrics().unwrap_or_default().to_string(),
        })
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<()> {
        use mp4ameta::Tag;

        let mut tag =
            Tag::read_from_path(path).or_else(|_| Ok::<_, anyhow::Error>(Tag::default()))?;

        if lyrics.is_empty() {
            tag.remove_lyrics();
        } else {
            tag.set_lyrics(lyrics);
        }

        tag.write_to_path(path).context("Failed to save M4A tags")?;
        Ok(())
    }
}

/// Factory function to create the appropriate AudioFile implementation based on file extension
pub fn get_audio_file_handler(extension: &str) -> Option<Box<dyn AudioFile>> {
    match extension {
        "flac" => Some(Box::new(FlacFile)),
        "mp3" => Some(Box::new(Mp3File)),
        "wav" => Some(Box::new(WavFile)),
        "m4a" => Some(Box::new(M4aFile)),
        _ => None,
    }
}

/// Tag store backed by the files' own tag containers
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTagStore;

impl FileTagStore {
    fn handler_for(path: &Path) -> Result<Box<dyn AudioFile>> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        get_audio_file_handler(extension)
            .with_context(|| format!("Unsupported audio format: {}", path.display()))
    }
}

impl TagStore for FileTagStore {
    fn read(&self, path: &Path) -> Result<Track> {
        let handler = Self::handler_for(path)?;
        handler
            .read_track(path)
            .with_context(|| format!("Failed to read {} tags: {}", handler.format_name(), path.display()))
    }

    fn write(&self, track: &Track) -> Result<()> {
        let handler = Self::handler_for(&track.path)?;
        handler
            .write_lyrics(&track.path, &track.lyrics)
            .with_context(|| {
                format!(
                    "Failed to write {} tags: {}",
                    handler.format_name(),
                    track.path.display()
                )
            })
    }
}
