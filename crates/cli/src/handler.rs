use eyre::EyreHandler;
use itertools::Itertools;
use std::{error::Error, fmt};

/// An `eyre` handler that reports an error and its causes once each, without repeated messages.
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Self { debug_handler: None }
    }

    /// Override the debug handler with a custom one.
    pub fn debug_handler(mut self, debug_handler: Option<Box<dyn EyreHandler>>) -> Self {
        self.debug_handler = debug_handler;
        self
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        nftm_common::errors::dedup_chain(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }

        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let errors = nftm_common::errors::dedup_chain(error);
        let Some((error, causes)) = errors.split_first() else { return Ok(()) };
        write!(f, "{error}")?;

        if let [cause] = causes {
            write!(f, "\n\nCaused by:\n  {cause}")?;
        } else if !causes.is_empty() {
            write!(f, "\n\nCaused by:")?;
            for (n, cause) in causes.iter().enumerate() {
                write!(f, "\n  {n}: {cause}")?;
            }
        }

        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

/// Installs the nftm [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// Errors are reported with the plain [`Handler`] unless `NFTM_DEBUG` is set, in which case the
/// `color-eyre` report with span traces and backtraces is used. Panics always use the latter.
pub fn install() {
    let panic_section = "This is a bug. Consider reporting it at https://github.com/nft-market/nftm";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();

    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("NFTM_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler::new().debug_handler(debug.then(|| debug_hook(e))))
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}
