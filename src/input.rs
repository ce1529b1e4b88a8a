use std::io::{self, Read};

use aho_corasick::AhoCorasick;
use lib_2048::{
    game::{Controller, Input},
    Grid, Move,
};

use crate::render;

const ESC: u8 = 0x1b;
const ARROWS: [&[u8]; 4] = [b"\x1b[A", b"\x1b[B", b"\x1b[C", b"\x1b[D"];
const ARROW_MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Right, Move::Left];

/// Longest control sequence waited for before giving up on its final byte.
const MAX_CSI_LEN: usize = 16;

const fn is_csi_final(byte: &u8) -> bool {
    matches!(*byte, 0x40..=0x7e)
}

/// Reads keys from a raw-mode byte stream.
pub struct Keyboard<R> {
    input: R,
    arrows: AhoCorasick,
    buf: [u8; 64],
    len: usize,
}

impl<R: Read> Keyboard<R> {
    pub fn new(input: R) -> io::Result<Self> {
        let arrows = AhoCorasick::new(ARROWS).map_err(io::Error::other)?;

        Ok(Self {
            input,
            arrows,
            buf: [0; 64],
            len: 0,
        })
    }

    /// First complete key in `bytes` and how many bytes it used.
    ///
    /// `None` means more bytes are needed.
    fn decode(&self, bytes: &[u8]) -> Option<(Input, usize)> {
        let &first = bytes.first()?;

        if first == ESC {
            if let Some(m) = self.arrows.find(bytes).filter(|m| m.start() == 0) {
                return Some((Input::Move(ARROW_MOVES[m.pattern().as_usize()]), m.end()));
            }

            return match bytes {
                [ESC] => None,
                [ESC, b'[', params @ ..] => match params.iter().position(is_csi_final) {
                    Some(end) => Some((Input::Invalid, end + 3)),
                    None if bytes.len() < MAX_CSI_LEN => None,
                    None => Some((Input::Invalid, bytes.len())),
                },
                _ => Some((Input::Invalid, 1)),
            };
        }

        let input = match first {
            b'w' => Input::Move(Move::Up),
            b's' => Input::Move(Move::Down),
            b'a' => Input::Move(Move::Left),
            b'd' => Input::Move(Move::Right),
            b'u' => Input::Move(Move::Undo),
            b'q' => Input::Move(Move::Quit),
            _ => Input::Invalid,
        };

        Some((input, 1))
    }

    /// Blocks until any key is pressed.
    pub fn wait_key(&mut self) -> io::Result<()> {
        if self.len > 0 {
            self.len = 0;
            return Ok(());
        }

        loop {
            match self.input.read(&mut self.buf) {
                Ok(_) => return Ok(()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R: Read> Controller for Keyboard<R> {
    fn next_input(&mut self, _grid: &Grid) -> io::Result<Input> {
        loop {
            if let Some((input, used)) = self.decode(&self.buf[..self.len]) {
                self.buf.copy_within(used..self.len, 0);
                self.len -= used;

                return Ok(input);
            }

            if render::take_resize() {
                return Ok(Input::Resize);
            }

            match self.input.read(&mut self.buf[self.len..]) {
                // Closed input ends the game.
                Ok(0) => return Ok(Input::Move(Move::Quit)),
                Ok(n) => self.len += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}
