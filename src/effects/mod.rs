pub(crate) mod element;
pub(crate) mod filter;
pub(crate) mod sequencer;
pub(crate) mod timeline;
