//! `TagStore` backed by ID3v2 tags of MPEG files, via `lofty`.
//!
//! `SYLT` frames are the time-coded kind, `USLT` frames the plain-text kind;
//! the frame description is the content descriptor (language tag).

use std::fs::File;
use std::path::{Path, PathBuf};

use lofty::TextEncoding;
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{AudioFile, FileType};
use lofty::id3::v2::{
    BinaryFrame, Frame, FrameId, Id3v2Tag, SyncTextContentType, SynchronizedTextFrame,
    TimestampFormat, UnsynchronizedTextFrame,
};
use lofty::mpeg::MpegFile;
use lofty::probe::Probe;
use lofty::tag::TagExt;
use tracing::debug;

use super::inline;
use super::model::Caption;
use super::tag::{FrameKind, PlainTextFrame, Tag, TagStore, TimeCodedFrame};
use crate::error::{LyricError, Result};

const SYLT: &str = "SYLT";
const USLT: &str = "USLT";

/// ID3v2 "undetermined" language code.
const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

#[derive(Debug, Default, Clone, Copy)]
pub struct Id3TagStore;

impl Id3TagStore {
    pub fn new() -> Self {
        Self
    }
}

impl TagStore for Id3TagStore {
    fn open_tag(&self, path: &Path) -> Result<Tag> {
        let id3 = read_id3v2(path)?.ok_or_else(|| LyricError::NotTagged {
            path: path.to_path_buf(),
        })?;

        let mut tag = Tag::default();
        for frame in &id3 {
            match frame.id_str() {
                SYLT => tag.time_coded.push(decode_sylt(path, frame)?),
                USLT => tag.plain.push(decode_uslt(path, frame)?),
                _ => {}
            }
        }

        debug!(
            path = %path.display(),
            time_coded = tag.time_coded.len(),
            plain = tag.plain.len(),
            "opened ID3v2 tag"
        );
        Ok(tag)
    }

    fn write_frame(
        &self,
        path: &Path,
        kind: FrameKind,
        language_tag: &str,
        captions: &[Caption],
    ) -> Result<()> {
        // An untagged MPEG file gets a fresh tag; other containers are refused.
        let mut id3 = read_id3v2(path)
            .map_err(|e| persistence(path, e.to_string()))?
            .unwrap_or_default();

        let frame = match kind {
            FrameKind::TimeCoded => build_sylt(path, language_tag, captions)?,
            FrameKind::PlainText => build_uslt(language_tag, captions),
        };

        let id = frame_id(kind);
        id3.retain(|f| !(f.id_str() == id && descriptor_of(f).as_deref() == Some(language_tag)));
        id3.insert(frame);

        id3.save_to_path(path, WriteOptions::default())
            .map_err(|e| persistence(path, e.to_string()))?;

        debug!(
            path = %path.display(),
            %kind,
            language_tag,
            captions = captions.len(),
            "rewrote lyric frame"
        );
        Ok(())
    }
}

/// Read the ID3v2 tag of `path`.
///
/// `Ok(None)` means an MPEG file without a tag; non-MPEG files are `NotTagged`.
fn read_id3v2(path: &Path) -> Result<Option<Id3v2Tag>> {
    let probe = Probe::open(path)
        .map_err(|source| LyricError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .guess_file_type()?;

    if probe.file_type() != Some(FileType::Mpeg) {
        return Err(LyricError::NotTagged {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path)?;
    let mpeg =
        MpegFile::read_from(&mut file, ParseOptions::new()).map_err(|source| LyricError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(mpeg.id3v2().cloned())
}

fn decode_sylt(path: &Path, frame: &Frame<'_>) -> Result<TimeCodedFrame> {
    let sylt = parse_sylt(frame).map_err(|reason| frame_type(path, SYLT, reason))?;

    if !matches!(sylt.timestamp_format, TimestampFormat::MS) {
        return Err(frame_type(
            path,
            SYLT,
            "timestamps are not in milliseconds".to_string(),
        ));
    }

    Ok(TimeCodedFrame {
        descriptor: sylt.description.unwrap_or_default(),
        captions: sylt
            .content
            .into_iter()
            .map(|(timestamp, text)| Caption::new(u64::from(timestamp), text))
            .collect(),
    })
}

fn decode_uslt(path: &Path, frame: &Frame<'_>) -> Result<PlainTextFrame> {
    match frame {
        Frame::UnsynchronizedText(uslt) => Ok(PlainTextFrame {
            descriptor: uslt.description.to_string(),
            body: uslt.content.to_string(),
        }),
        _ => Err(frame_type(
            path,
            USLT,
            "not an unsynchronized text frame".to_string(),
        )),
    }
}

fn parse_sylt(frame: &Frame<'_>) -> std::result::Result<SynchronizedTextFrame<'static>, String> {
    match frame {
        Frame::Binary(binary) => {
            SynchronizedTextFrame::parse(&binary.data, frame.flags()).map_err(|e| e.to_string())
        }
        _ => Err("unexpected frame layout".to_string()),
    }
}

fn descriptor_of(frame: &Frame<'_>) -> Option<String> {
    match frame {
        Frame::UnsynchronizedText(uslt) => Some(uslt.description.to_string()),
        Frame::Binary(_) => parse_sylt(frame).ok().map(|s| s.description.unwrap_or_default()),
        _ => None,
    }
}

fn build_sylt(path: &Path, language_tag: &str, captions: &[Caption]) -> Result<Frame<'static>> {
    let content = captions
        .iter()
        .map(|c| {
            let ts = u32::try_from(c.timestamp).unwrap_or(u32::MAX);
            (ts, c.text.clone())
        })
        .collect();

    let sylt = SynchronizedTextFrame::new(
        TextEncoding::UTF8,
        language_code(language_tag),
        TimestampFormat::MS,
        SyncTextContentType::Lyrics,
        Some(language_tag.to_string()),
        content,
    );
    let data = sylt
        .as_bytes(WriteOptions::default())
        .map_err(|e| persistence(path, e.to_string()))?;
    let id = FrameId::new(SYLT).map_err(|e| persistence(path, e.to_string()))?;

    Ok(Frame::Binary(BinaryFrame::new(id, data)))
}

fn build_uslt(language_tag: &str, captions: &[Caption]) -> Frame<'static> {
    Frame::UnsynchronizedText(UnsynchronizedTextFrame::new(
        TextEncoding::UTF8,
        language_code(language_tag),
        language_tag.to_string(),
        inline::render(captions),
    ))
}

/// ID3v2 wants an ISO-639-2 code; use the tag itself when it looks like one.
fn language_code(language_tag: &str) -> [u8; 3] {
    match language_tag.as_bytes() {
        [a, b, c] if [a, b, c].iter().all(|x| x.is_ascii_alphabetic()) => [
            a.to_ascii_lowercase(),
            b.to_ascii_lowercase(),
            c.to_ascii_lowercase(),
        ],
        _ => UNKNOWN_LANGUAGE,
    }
}

fn frame_id(kind: FrameKind) -> &'static str {
    match kind {
        FrameKind::TimeCoded => SYLT,
        FrameKind::PlainText => USLT,
    }
}

fn frame_type(path: &Path, frame: &'static str, reason: String) -> LyricError {
    LyricError::FrameType {
        path: PathBuf::from(path),
        frame,
        reason,
    }
}

fn persistence(path: &Path, reason: String) -> LyricError {
    LyricError::Persistence {
        path: PathBuf::from(path),
        reason,
    }
}
