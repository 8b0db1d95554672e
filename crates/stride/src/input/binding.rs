use super::InputState;

/// Delivers a fresh input snapshot each time the core ticks.
pub trait InputSource {
    fn sample(&mut self) -> InputState;
}

impl<F> InputSource for F
where
    F: FnMut() -> InputState,
{
    fn sample(&mut self) -> InputState {
        self()
    }
}

/// Slot for the external input layer. Reads as all-zero input while nothing is bound.
#[derive(Default)]
pub struct InputBinding {
    source: Option<Box<dyn InputSource>>,
}

impl InputBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, source: impl InputSource + 'static) {
        if self.source.is_some() {
            log::debug!("input source replaced");
        } else {
            log::debug!("input source bound");
        }
        self.source = Some(Box::new(source));
    }

    pub fn unbind(&mut self) -> bool {
        let was_bound = self.source.take().is_some();
        if was_bound {
            log::debug!("input source unbound");
        }
        was_bound
    }

    pub fn is_bound(&self) -> bool {
        self.source.is_some()
    }

    pub fn sample(&mut self) -> InputState {
        self.source
            .as_mut()
            .map(|source| source.sample())
            .unwrap_or_default()
    }
}
