//! Audio Input
//!
//! Opens the PCM source — a named file or standard input (`-`) — and skips
//! the fixed WAV prefix. No header parsing happens: the remainder is
//! treated as raw 16-bit signed little-endian mono PCM at the assumed
//! sample rate ([`crate::config::AUDIO_SAMPLE_RATE`]).

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::config;
use crate::types::Error;

/// Audio byte stream after the prefix skip
#[derive(Debug)]
pub enum AudioSource {
    /// Named WAV file
    File(File),
    /// Standard input (path argument `-`)
    Stdin(io::Stdin),
}

impl AudioSource {
    /// Open `path`, or standard input when `path` is `-`, and skip the
    /// fixed [`WAV_PREFIX_BYTES`](config::WAV_PREFIX_BYTES) prefix.
    ///
    /// An input shorter than the prefix is just an empty stream, not an
    /// error.
    ///
    /// # Errors
    ///
    /// [`Error::AudioOpen`] when the source cannot be opened or positioned.
    /// This is fatal and must be raised before any hardware state is
    /// enabled.
    pub fn open(path: &str) -> Result<Self, Error> {
        let open_err = |source: io::Error| Error::AudioOpen {
            path: path.to_owned(),
            source,
        };
        if path == "-" {
            let stdin = io::stdin();
            let mut prefix = stdin.take(config::WAV_PREFIX_BYTES);
            io::copy(&mut prefix, &mut io::sink()).map_err(open_err)?;
            Ok(Self::Stdin(prefix.into_inner()))
        } else {
            let mut file = File::open(Path::new(path)).map_err(open_err)?;
            file.seek(SeekFrom::Start(config::WAV_PREFIX_BYTES))
                .map_err(open_err)?;
            Ok(Self::File(file))
        }
    }
}

impl Read for AudioSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.read(buf),
            Self::Stdin(stdin) => stdin.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_skips_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0xAA; 22]).unwrap();
        file.write_all(&[0x01, 0x02, 0x03, 0x04]).unwrap();
        drop(file);

        let mut source = AudioSource::open(path.to_str().unwrap()).unwrap();
        let mut rest = Vec::new();
        source.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = AudioSource::open("/no/such/file.wav").unwrap_err();
        assert!(matches!(err, Error::AudioOpen { .. }));
    }
}
