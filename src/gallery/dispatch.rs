use std::fmt::Display;

use super::registry::Registry;

/// Text shown in a cell whose strategy failed during setup.
pub fn error_text(message: impl Display) -> String {
    format!("Error: {message}")
}

/// Outcome of one dispatch pass.
#[derive(Debug)]
pub struct Dispatched<H> {
    /// Handles of the strategies that started, with their registry index.
    pub running: Vec<(usize, H)>,
    /// Registry indices whose setup failed.
    pub failed: Vec<usize>,
}

impl<H> Default for Dispatched<H> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Invoke every descriptor's render entry point against its container.
///
/// A setup failure is reported into that container only; the remaining
/// descriptors are still rendered.
pub fn dispatch<R, C, H, E, I, F>(
    registry: &Registry<R>,
    containers: &[C],
    mut invoke: I,
    mut report: F,
) -> Dispatched<H>
where
    E: Display,
    I: FnMut(&R, &C) -> Result<H, E>,
    F: FnMut(&C, &str),
{
    let mut out = Dispatched::default();
    for (index, (descriptor, container)) in registry.iter().zip(containers).enumerate() {
        match invoke(&descriptor.render, container) {
            Ok(handle) => out.running.push((index, handle)),
            Err(e) => {
                log::error!("Error rendering {}: {}", descriptor.name, e);
                report(container, &error_text(&e));
                out.failed.push(index);
            }
        }
    }
    out
}
