//! Terminal setup and the end-of-run pause.

use std::io::{self, BufRead, Write};

/// Windows code page for UTF-8.
#[cfg(windows)]
const UTF8_CODE_PAGE: u32 = 65001;

/// Switch the console to UTF-8 so the Korean status lines render.
///
/// No-op outside Windows, where terminals are UTF-8 already.
pub fn enable_utf8_console() {
    #[cfg(windows)]
    {
        use windows::Win32::System::Console::{SetConsoleCP, SetConsoleOutputCP};

        // SAFETY: plain Win32 calls with a constant code page; no pointers.
        let output = unsafe { SetConsoleOutputCP(UTF8_CODE_PAGE) };
        let input = unsafe { SetConsoleCP(UTF8_CODE_PAGE) };
        log::debug!("Console code page set to UTF-8: output={output:?} input={input:?}");
    }

    #[cfg(not(windows))]
    log::trace!("UTF-8 console setup not needed on this platform");
}

/// Prompt shown by [`pause`].
pub const PAUSE_PROMPT: &str = "계속하려면 Enter 키를 누르십시오...";

/// Print the prompt and block until a line (or EOF) arrives on `input`.
pub fn pause_with<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    write!(output, "{PAUSE_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// [`pause_with`] on the process's stdin/stdout.
pub fn pause() {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    if let Err(e) = pause_with(&mut input, &mut output) {
        log::debug!("Pause interrupted: {}", e);
    }
}
