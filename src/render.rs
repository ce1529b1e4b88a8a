use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::RawFd,
    ptr,
    sync::atomic::{AtomicBool, Ordering},
};

use lib_2048::{
    layout::Layout,
    surface::{Style, Surface},
};
use tracing::debug;

static RESIZED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_resize(_: libc::c_int) {
    RESIZED.store(true, Ordering::Relaxed);
}

/// Whether the terminal was resized since the last call.
pub fn take_resize() -> bool {
    RESIZED.swap(false, Ordering::Relaxed)
}

/// Installs the SIGWINCH handler without `SA_RESTART`, so a blocked read on
/// stdin returns `Interrupted` when the window changes size.
fn watch_resize() -> io::Result<()> {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_resize as extern "C" fn(libc::c_int) as libc::sighandler_t;
        action.sa_flags = 0;
        libc::sigemptyset(&mut action.sa_mask);

        if libc::sigaction(libc::SIGWINCH, &action, ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios = MaybeUninit::uninit();

    unsafe {
        if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }

        Ok(termios.assume_init())
    }
}

fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    unsafe {
        if libc::tcsetattr(fd, libc::TCSADRAIN, termios) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

/// SGR parameters for each style.
const fn sgr(style: Style) -> &'static str {
    match style {
        Style::Plain => "0",
        Style::Resting => "1;90;107",
        Style::NewTile => "1;97;100",
        Style::Moving => "1;30;106",
        Style::Merged => "1;30;101",
        Style::GridLine => "90;107",
        Style::Title => "1;92",
        Style::Score => "1;3;96",
        Style::Message => "96",
        Style::Error => "1;3;91",
    }
}

/// The controlling terminal in raw mode on the alternate screen.
///
/// Output is buffered until `refresh`. Dropping it restores the terminal.
pub struct Terminal {
    out: io::StdoutLock<'static>,
    saved: libc::termios,
    origin: (usize, usize),
    buf: Vec<u8>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let saved = get_termios(libc::STDIN_FILENO)?;
        let mut raw = saved;

        raw.c_lflag &= !(libc::ECHO | libc::ICANON);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;

        set_termios(libc::STDIN_FILENO, &raw)?;
        watch_resize()?;

        let mut terminal = Self {
            out: io::stdout().lock(),
            saved,
            origin: (0, 0),
            buf: Vec::with_capacity(4096),
        };

        terminal.buf.extend_from_slice(b"\x1b[?1049h\x1b[?25l\x1b[2J");
        terminal.refresh()?;

        Ok(terminal)
    }
}

impl Surface for Terminal {
    fn put_str(&mut self, row: usize, col: usize, text: &str, style: Style) -> io::Result<()> {
        let (row, col) = (self.origin.0 + row + 1, self.origin.1 + col + 1);

        write!(self.buf, "\x1b[{row};{col}H\x1b[{}m{text}\x1b[0m", sgr(style))
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.out.write_all(&self.buf)?;
        self.buf.clear();
        self.out.flush()
    }

    fn dimensions(&self) -> io::Result<(usize, usize)> {
        let mut size = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };

        unsafe {
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size as *mut libc::winsize) != 0 {
                return Err(io::Error::last_os_error());
            }
        }

        Ok((size.ws_row.into(), size.ws_col.into()))
    }

    fn reposition(&mut self, layout: &Layout) -> io::Result<()> {
        self.origin = (layout.win_row, layout.win_col);
        self.buf.extend_from_slice(b"\x1b[0m\x1b[2J");

        debug!(row = layout.win_row, col = layout.win_col, "window positioned");

        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.buf.extend_from_slice(b"\x1b[0m\x1b[?25h\x1b[?1049l");

        // Nothing sensible to do if the terminal is already gone.
        let _ = self.refresh();
        let _ = set_termios(libc::STDIN_FILENO, &self.saved);
    }
}
