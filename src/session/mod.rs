pub(crate) mod doodle;
pub(crate) mod frame_loop;
