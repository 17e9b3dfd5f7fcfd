//! Fixed-capacity character window and the sources that feed it.

use crate::config::MIN_WINDOW_CAPACITY;
use crate::error::{Error, Result};
use crate::utils::regularize;
use std::io::{self, Read};
use std::str::Chars;

/// Pull-based supplier of characters.
pub trait CharSource {
    /// Fill `buf` with up to `buf.len()` characters, returning how many were
    /// written. Returns 0 only at end of input.
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize>;
}

impl<T: CharSource + ?Sized> CharSource for Box<T> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_chars(buf)
    }
}

impl<T: CharSource + ?Sized> CharSource for &mut T {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        (**self).read_chars(buf)
    }
}

/// Characters of a string slice.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        let mut count = 0;
        for (slot, ch) in buf.iter_mut().zip(&mut self.chars) {
            *slot = ch;
            count += 1;
        }
        Ok(count)
    }
}

const READ_CHUNK: usize = 8192;

/// UTF-8 decoder over any byte reader.
///
/// Multi-byte sequences split across reads are carried over to the next read.
/// Malformed input is reported as an [`io::ErrorKind::InvalidData`] error.
pub struct ReadSource<R> {
    reader: R,
    bytes: Box<[u8]>,
    pos: usize,
    len: usize,
    eof: bool,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes: vec![0; READ_CHUNK].into_boxed_slice(),
            pos: 0,
            len: 0,
            eof: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode as many buffered characters as fit into `out`.
    fn decode_into(&mut self, out: &mut [char]) -> io::Result<usize> {
        let pending = &self.bytes[self.pos..self.len];
        let valid = match std::str::from_utf8(pending) {
            Ok(_) => pending.len(),
            Err(e) if e.valid_up_to() == 0 && e.error_len().is_some() => {
                return Err(invalid_data(format!(
                    "invalid UTF-8 sequence {:02x?}",
                    &pending[..e.error_len().unwrap_or(1)]
                )));
            }
            Err(e) => e.valid_up_to(),
        };
        let text = std::str::from_utf8(&pending[..valid])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut count = 0;
        let mut consumed = 0;
        for (slot, ch) in out.iter_mut().zip(text.chars()) {
            *slot = ch;
            count += 1;
            consumed += ch.len_utf8();
        }
        self.pos += consumed;
        Ok(count)
    }

    fn fill_bytes(&mut self) -> io::Result<()> {
        if self.pos > 0 {
            self.bytes.copy_within(self.pos..self.len, 0);
            self.len -= self.pos;
            self.pos = 0;
        }
        loop {
            match self.reader.read(&mut self.bytes[self.len..]) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.len += n;
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> CharSource for ReadSource<R> {
    fn read_chars(&mut self, buf: &mut [char]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let count = self.decode_into(buf)?;
            if count > 0 {
                return Ok(count);
            }
            if self.eof {
                if self.pos < self.len {
                    return Err(invalid_data(
                        "truncated UTF-8 sequence at end of input".to_string(),
                    ));
                }
                return Ok(0);
            }
            self.fill_bytes()?;
        }
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

/// The scan window.
///
/// Holds up to `capacity` normalized characters. Only `read`, `shift` and
/// `refill` change its contents; all index bookkeeping stays in here.
#[derive(Debug)]
pub struct CharWindow {
    buf: Box<[char]>,
    available: usize,
}

impl CharWindow {
    /// Window of `capacity` characters, raised to the minimum if smaller.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec!['\0'; capacity.max(MIN_WINDOW_CAPACITY)].into_boxed_slice(),
            available: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of valid characters in the window.
    pub fn available(&self) -> usize {
        self.available
    }

    pub fn is_full(&self) -> bool {
        self.available == self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available == 0
    }

    /// The valid characters.
    pub fn chars(&self) -> &[char] {
        &self.buf[..self.available]
    }

    /// Move the characters after `scanned` to the front of the window.
    ///
    /// Returns how many characters were carried forward.
    pub fn shift(&mut self, scanned: usize) -> usize {
        let scanned = scanned.min(self.available);
        let carry = self.available - scanned;
        if scanned > 0 && carry > 0 {
            self.buf.copy_within(scanned..self.available, 0);
        }
        self.available = carry;
        carry
    }

    /// Append characters from `source` until the window is full or the source
    /// is exhausted. New characters are normalized as they arrive.
    ///
    /// Returns how many characters were read.
    pub fn read<S: CharSource + ?Sized>(&mut self, source: &mut S) -> Result<usize> {
        let start = self.available;
        while self.available < self.buf.len() {
            let n = source
                .read_chars(&mut self.buf[self.available..])
                .map_err(input_error)?;
            if n == 0 {
                break;
            }
            for ch in &mut self.buf[self.available..self.available + n] {
                *ch = regularize(*ch);
            }
            self.available += n;
        }
        Ok(self.available - start)
    }

    /// Carry the unscanned tail forward and top the window up from `source`.
    ///
    /// Returns the number of valid characters afterwards.
    pub fn refill<S: CharSource + ?Sized>(&mut self, source: &mut S, scanned: usize) -> Result<usize> {
        self.shift(scanned);
        self.read(source)?;
        Ok(self.available)
    }

    pub fn clear(&mut self) {
        self.available = 0;
    }
}

fn input_error(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::InvalidData {
        Error::InvalidInput(e.to_string())
    } else {
        Error::Io(e)
    }
}
