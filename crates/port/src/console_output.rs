use crate::console_output::ConsoleFormatting::{
    Newline, StrNewLineAfter, StrNewLineBefore, StrNewLineBoth, StrNoFormatting,
};
use hal_interface::Hal;

/// Console output formatting directives.
///
/// This enum describes how a given string should be emitted on the UART console,
/// including whether to surround it with newlines. Line endings are plain `'\n'`; the
/// UART backend expands them for the terminal.
pub enum ConsoleFormatting<'a> {
    /// No formatting is done.
    StrNoFormatting(&'a str),
    /// New line is added after write.
    StrNewLineAfter(&'a str),
    /// New line is added before write.
    StrNewLineBefore(&'a str),
    /// New lines are added before and after write.
    StrNewLineBoth(&'a str),
    /// Only adds a new line.
    Newline,
}

/// Diagnostic text sink over UART0.
///
/// `ConsoleOutput` borrows the hardware capability for the duration of a diagnostic, so
/// a message is written by whichever context currently holds control. Writes are
/// synchronous and cannot fail; formatted output goes through [`core::fmt::Write`].
pub struct ConsoleOutput<'a, H: Hal> {
    hal: &'a mut H,
}

impl<'a, H: Hal> ConsoleOutput<'a, H> {
    pub fn new(p_hal: &'a mut H) -> Self {
        ConsoleOutput { hal: p_hal }
    }

    /// Writes `p_data` according to its formatting directive.
    ///
    /// # Parameters
    /// - `p_data`: The string and its newline placement.
    pub fn write(&mut self, p_data: &ConsoleFormatting) {
        match p_data {
            StrNoFormatting(l_str) => self.hal.uart_puts(l_str),
            StrNewLineAfter(l_str) => {
                self.hal.uart_puts(l_str);
                self.new_line();
            }
            StrNewLineBefore(l_str) => {
                self.new_line();
                self.hal.uart_puts(l_str);
            }
            StrNewLineBoth(l_str) => {
                self.new_line();
                self.hal.uart_puts(l_str);
                self.new_line();
            }
            Newline => self.new_line(),
        }
    }

    #[inline(always)]
    pub(crate) fn new_line(&mut self) {
        self.hal.uart_puts("\n");
    }
}

impl<H: Hal> core::fmt::Write for ConsoleOutput<'_, H> {
    fn write_str(&mut self, p_str: &str) -> core::fmt::Result {
        self.hal.uart_puts(p_str);
        Ok(())
    }
}
