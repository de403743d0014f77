use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Caller handed over a page with no content at all.
    #[error("empty page content")]
    EmptyPage,
}
