pub mod scroll_buffer;

pub use scroll_buffer::{
    DEFAULT_BUFFER_SIZE, PageRequest, ScrollBuffer, ScrollEvent, Transition, clamp_offset, reduce,
    row_range,
};
