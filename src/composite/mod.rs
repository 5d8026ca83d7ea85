pub(crate) mod compositor;
pub(crate) mod geometry;
pub(crate) mod mask;
pub(crate) mod merge;
pub(crate) mod options;
