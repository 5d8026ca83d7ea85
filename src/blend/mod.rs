pub(crate) mod apply;
pub(crate) mod mode;
pub(crate) mod ops;
