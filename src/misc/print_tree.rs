use std::io::{self, Write};

/// A small helper for dumping trees with one labelled line per level.
pub struct PrintTree<'a> {
    level: usize,
    dest: &'a mut dyn Write,
}

impl<'a> PrintTree<'a> {
    pub fn new(title: &str, dest: &'a mut dyn Write) -> Self {
        let _ = writeln!(dest, "{}", title);
        Self { level: 0, dest }
    }

    pub fn new_level(&mut self, label: String) -> io::Result<()> {
        for _ in 0..self.level {
            write!(self.dest, "  ")?;
        }
        writeln!(self.dest, "{}", label)?;
        self.level += 1;
        Ok(())
    }

    pub fn end_level(&mut self) {
        debug_assert!(self.level > 0, "Unbalanced end_level");
        self.level -= 1;
    }
}
