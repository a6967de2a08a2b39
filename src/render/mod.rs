pub(crate) mod brush;
pub(crate) mod cpu;
pub(crate) mod pipeline;
pub(crate) mod surface;

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
pub(crate) mod recording;
