//! Raw-mode line editor.
//!
//! Keystrokes are read one byte at a time with the terminal in raw mode, so
//! the editor does its own echoing, backspacing and tab completion. Raw mode
//! disables output post-processing as well, which is why every line break
//! written here is `\r\n`.

use crate::completion::{CompletionOutcome, ShellCompleter};
use crate::error::ShellError;
use bytes::{Buf, BytesMut};
use crossterm::terminal;
use std::io::{self, ErrorKind, Read, Write};

const CTRL_C: char = '\x03';
const ESC: char = '\x1b';
const BACKSPACE: char = '\x7f';
const BELL: &str = "\x07";

/// How a call to [`LineEditor::read_line`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl+C was pressed.
    Interrupted,
}

/// Raw mode for the controlling terminal, left again when dropped.
pub struct RawMode(());

impl RawMode {
    pub fn enable() -> Result<Self, ShellError> {
        terminal::enable_raw_mode().map_err(ShellError::Terminal)?;
        Ok(RawMode(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to restore terminal mode: {}", e);
        }
    }
}

enum Step {
    Continue,
    Done(ReadOutcome),
}

pub struct LineEditor<'c> {
    completer: ShellCompleter<'c>,
    prompt: String,
}

impl<'c> LineEditor<'c> {
    pub fn new(completer: ShellCompleter<'c>, prompt: impl Into<String>) -> Self {
        Self {
            completer,
            prompt: prompt.into(),
        }
    }

    /// Prints the prompt and reads one line from the terminal in raw mode.
    pub fn read_line(&self) -> Result<ReadOutcome, ShellError> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", self.prompt)?;
        stdout.flush()?;

        let _raw = RawMode::enable()?;
        self.read_from(&mut io::stdin().lock(), &mut stdout)
    }

    /// Runs the key loop over an arbitrary byte stream.
    ///
    /// Every key's echo is flushed before the next byte is read.
    pub fn read_from<R: Read, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<ReadOutcome, ShellError> {
        let mut state = EditState::default();
        let mut keys = KeyReader::new(input);

        loop {
            let key = keys.next_key()?;
            let step = state.handle_key(key, &self.completer, &self.prompt, out)?;
            out.flush()?;
            if let Step::Done(outcome) = step {
                return Ok(outcome);
            }
        }
    }
}

/// Progress through a terminal escape sequence such as an arrow key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Escape {
    #[default]
    None,
    Start,
    /// `ESC [`, ended by a byte in `@..=~`.
    Csi,
    /// `ESC O`, ended by the next byte.
    Ss3,
}

#[derive(Default)]
struct EditState {
    buffer: String,
    tab_presses: u32,
    escape: Escape,
}

impl EditState {
    fn handle_key<W: Write>(
        &mut self,
        key: char,
        completer: &ShellCompleter<'_>,
        prompt: &str,
        out: &mut W,
    ) -> io::Result<Step> {
        if key != '\t' {
            self.tab_presses = 0;
        }
        if self.skip_escape(key) {
            return Ok(Step::Continue);
        }

        match key {
            CTRL_C => return Ok(Step::Done(ReadOutcome::Interrupted)),
            '\r' | '\n' => {
                write!(out, "\r\n")?;
                return Ok(Step::Done(ReadOutcome::Line(std::mem::take(&mut self.buffer))));
            }
            BACKSPACE => {
                // One column per character; wide characters are not measured.
                if self.buffer.pop().is_some() {
                    write!(out, "\x08 \x08")?;
                }
            }
            '\t' => self.complete(completer, prompt, out)?,
            ESC => self.escape = Escape::Start,
            c if c.is_control() => log::debug!("ignoring control key {:?}", c),
            c => {
                self.buffer.push(c);
                write!(out, "{}", c)?;
            }
        }
        Ok(Step::Continue)
    }

    /// Consumes keys belonging to an escape sequence. Editing keys such as
    /// arrows are not supported, so the whole sequence is dropped.
    fn skip_escape(&mut self, key: char) -> bool {
        let next = match (self.escape, key) {
            (Escape::None, _) => return false,
            (Escape::Start, '[') => Escape::Csi,
            (Escape::Start, 'O') => Escape::Ss3,
            // A control key or a lone ESC ends the sequence and is handled normally.
            (Escape::Start, _) => {
                self.escape = Escape::None;
                return false;
            }
            (_, c) if c.is_control() => {
                self.escape = Escape::None;
                return false;
            }
            (Escape::Csi, '@'..='~') | (Escape::Ss3, _) => Escape::None,
            (Escape::Csi, _) => Escape::Csi,
        };
        self.escape = next;
        true
    }

    fn complete<W: Write>(
        &mut self,
        completer: &ShellCompleter<'_>,
        prompt: &str,
        out: &mut W,
    ) -> io::Result<()> {
        self.tab_presses += 1;
        match completer.complete(&self.buffer) {
            CompletionOutcome::DirectMatch(suffix) => {
                self.buffer.push_str(&suffix);
                write!(out, "{}", suffix)?;
                self.tab_presses = 0;
            }
            CompletionOutcome::NoMatch => {
                write!(out, "{}", BELL)?;
                self.tab_presses = 0;
            }
            // First press only rings; the list waits for a second press.
            CompletionOutcome::MultiMatch(_) if self.tab_presses == 1 => {
                write!(out, "{}", BELL)?;
            }
            CompletionOutcome::MultiMatch(candidates) => {
                write!(out, "\r\n{}\r\n{}{}", candidates.join("  "), prompt, self.buffer)?;
                self.tab_presses = 0;
            }
        }
        Ok(())
    }
}

/// Decodes keystrokes from raw bytes, buffering partial UTF-8 sequences.
struct KeyReader<'r, R> {
    input: &'r mut R,
    pending: BytesMut,
}

impl<'r, R: Read> KeyReader<'r, R> {
    fn new(input: &'r mut R) -> Self {
        Self {
            input,
            pending: BytesMut::with_capacity(4),
        }
    }

    fn next_key(&mut self) -> Result<char, ShellError> {
        loop {
            if let Some(key) = self.decode_pending() {
                return Ok(key);
            }

            let mut byte = [0u8; 1];
            match self.input.read(&mut byte) {
                Ok(0) => return Err(ShellError::InputClosed),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Input(e)),
            }
            self.pending.extend_from_slice(&byte);
        }
    }

    /// Takes one key off the front of `pending`.
    ///
    /// An invalid sequence becomes U+FFFD and only its own bytes are dropped;
    /// whatever follows is decoded as the next key. An incomplete sequence
    /// yields `None` until more bytes arrive.
    fn decode_pending(&mut self) -> Option<char> {
        let (valid, invalid_len) = match std::str::from_utf8(&self.pending) {
            Ok(s) => (s, None),
            Err(e) => (
                std::str::from_utf8(&self.pending[..e.valid_up_to()]).unwrap_or_default(),
                e.error_len(),
            ),
        };

        let first = valid.chars().next();
        if let Some(key) = first {
            self.pending.advance(key.len_utf8());
            return Some(key);
        }
        let len = invalid_len?;
        log::debug!("discarding invalid input bytes {:?}", &self.pending[..len]);
        self.pending.advance(len);
        Some(char::REPLACEMENT_CHARACTER)
    }
}
