pub(crate) mod behavior;
