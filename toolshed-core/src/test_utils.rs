use crate::console::{Console, Styles};
use std::{
    cell::RefCell,
    io::{self, Cursor, Write},
    rc::Rc,
};

/// Output sink that stays readable after being boxed into a `Console`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A colorless console reading `input` and writing to the returned buffer.
pub fn scripted_console(input: &str) -> (Console, SharedBuffer) {
    let out = SharedBuffer::default();
    let console = Console::new(
        Box::new(Cursor::new(input.as_bytes().to_vec())),
        Box::new(out.clone()),
        Styles::plain(),
    );
    (console, out)
}
