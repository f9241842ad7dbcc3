//! Commonly used errors

mod fs;
pub use fs::FsPathError;

mod private {
    use eyre::Chain;
    use std::error::Error;

    pub trait ErrorChain {
        fn chain(&self) -> Chain<'_>;
    }

    impl ErrorChain for dyn Error + 'static {
        fn chain(&self) -> Chain<'_> {
            Chain::new(self)
        }
    }

    impl ErrorChain for eyre::Report {
        fn chain(&self) -> Chain<'_> {
            self.chain()
        }
    }
}

/// Displays a chain of errors in a single line, e.g. `order rejected: token not listed`.
pub fn display_chain<E: private::ErrorChain + ?Sized>(error: &E) -> String {
    dedup_chain(error).join("; ")
}

/// Collects the messages of an error chain, dropping a cause whose text is already part of the
/// message that wraps it.
///
/// `thiserror` wrappers commonly render as `outer: inner` followed by `inner` itself; only the
/// first one is kept.
pub fn dedup_chain<E: private::ErrorChain + ?Sized>(error: &E) -> Vec<String> {
    let mut causes: Vec<String> = error
        .chain()
        .map(|cause| cause.to_string().trim().to_string())
        .filter(|cause| !cause.is_empty())
        .collect();
    causes.dedup_by(|inner, outer| outer.contains(inner.as_str()));
    causes
}
