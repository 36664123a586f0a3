use super::errors::Error;

/// Receiver of the diagnostics a check pass produces.
///
/// Reports arrive in traversal order. A sink cannot stop the pass.
pub trait Diagnostics {
    fn report(&mut self, error: Error);
}

impl Diagnostics for Vec<Error> {
    fn report(&mut self, error: Error) {
        self.push(error);
    }
}
