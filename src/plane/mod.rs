pub(crate) mod buffer;
pub(crate) mod format;
pub(crate) mod frame;
