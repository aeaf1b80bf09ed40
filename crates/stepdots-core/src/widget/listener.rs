//! Selection listener.

/// Receives the index of a dot selected by a tap.
///
/// Invoked synchronously from input handling, at most once per tap.
pub trait SelectionListener {
    fn on_selected(&mut self, index: usize);
}

impl<F> SelectionListener for F
where
    F: FnMut(usize),
{
    fn on_selected(&mut self, index: usize) {
        self(index)
    }
}
