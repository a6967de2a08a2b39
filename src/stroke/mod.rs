pub(crate) mod capture;
pub(crate) mod classify;
pub(crate) mod model;
